//! Pooled skill effect instances.
//!
//! An [`EffectInstance`] is one projectile or area pulse. It is created by
//! its pool, activated by the manager, advanced by `tick`, and goes back to
//! idle by itself when its activation is over. Damage for an engaged target
//! is applied eagerly in an [`Engagement`]; only the damage texts are paced.
mod acquisition;
mod engagement;
mod instance;

pub use acquisition::{EngagedSet, RejectReason, evaluate_contact, pulse_targets};
pub use engagement::Engagement;
pub use instance::{EffectInstance, EffectPhase};

use std::fmt;

use serde::{Deserialize, Serialize};
use skill_core::EffectPrototype;

use crate::config::{RuntimeConfig, TimeoutPolicy};
use crate::pool::PoolHandle;

/// Identifies one pooled instance: which effect pool, which slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectKey {
    pub effect: usize,
    pub slot: PoolHandle,
}

impl EffectKey {
    pub const fn new(effect: usize, slot: PoolHandle) -> Self {
        Self { effect, slot }
    }
}

impl fmt::Display for EffectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.effect, self.slot)
    }
}

/// Timers shared by every instance of a pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectTiming {
    pub disable_after: f32,
    pub text_delay: f32,
    pub policy: TimeoutPolicy,
}

impl EffectTiming {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            disable_after: config.skill.disable_after_secs,
            text_delay: config.skill.damage_text_delay_secs,
            policy: config.timeout_policy,
        }
    }
}

impl Default for EffectTiming {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

/// What a pool instantiates its effects from.
#[derive(Clone, Debug)]
pub struct EffectTemplate {
    /// Index of the owning pool inside the manager.
    pub effect: usize,
    pub prototype: EffectPrototype,
    pub timing: EffectTiming,
}
