//! Pure rules and data types for pooled skill effects.
//!
//! `skill-core` defines what a skill effect *is* (definitions, prototypes,
//! geometry), how targets are recognised (colliders, contact filters, the
//! [`Target`] capability), and how damage is computed and formatted. It holds
//! no mutable runtime state; the pooling and per-tick state machine live in
//! `skill-runtime`, which depends on the types re-exported here.
pub mod combat;
pub mod config;
pub mod definition;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod stats;
pub mod target;

pub use combat::{DamageEvent, DamageText, calculate_skill_damage, format_damage, roll_damage};
pub use config::SkillConfig;
pub use definition::{DefinitionError, EffectMode, EffectPrototype, SkillEffectDefinition};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Transform, Vec2, facing_angle_degrees};
pub use rng::{PcgRng, compute_seed};
pub use stats::{DamageRoll, StatCategory, StatResolver};
pub use target::{
    BonusDamageKind, Collider, ColliderBody, CollisionVolume, ContactFilter, LayerMask, Target,
    TargetId,
};
