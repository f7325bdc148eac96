//! Runtime for pooled skill effects.
//!
//! This crate owns the mutable side of the skill subsystem: effect pools, the
//! per-instance state machine, engagements that apply damage and pace damage
//! texts, and the [`SkillManager`] the combat loop calls into. The game world
//! is reached only through the collaborator traits in [`world`].
//!
//! Modules are organized by responsibility:
//! - [`manager`] hosts the catalog and the skill entry points
//! - [`effect`] holds instances, engagements and target acquisition
//! - [`pool`] provides the grow-on-demand object pool
//! - [`world`] defines collaborator seams plus in-memory adapters
//! - [`events`] provides the topic-based event bus
//! - [`schedule`] turns frame deltas into fixed simulation steps
pub mod config;
pub mod effect;
pub mod error;
pub mod events;
pub mod manager;
pub mod pool;
pub mod presenter;
pub mod schedule;
pub mod world;

pub use config::{RuntimeConfig, TimeoutPolicy};
pub use effect::{EffectInstance, EffectKey, EffectPhase, Engagement};
pub use error::{Result, SkillError};
pub use events::{EventBus, ReleaseReason, SkillEvent, Topic};
pub use manager::SkillManager;
pub use pool::{ObjectPool, PoolHandle, PoolStats, Poolable};
pub use presenter::{Presenter, RecordingPresenter, ShownText, TracingPresenter};
pub use schedule::FixedTimestep;
pub use world::{
    ArenaTarget, ArenaWorld, EnemySelector, OverlapQuery, SeededStats, SkillEnv, TargetRegistry,
    World,
};
