use serde::{Deserialize, Serialize};
use skill_core::{EffectMode, TargetId, Vec2};

use super::Topic;
use crate::effect::EffectKey;

/// Why an instance went back to its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReleaseReason {
    /// The disable timer ran out.
    Expired,
    /// An area pulse finished displaying every engagement.
    Completed,
    /// An area pulse was deactivated before finishing.
    Deactivated,
    /// Handed back explicitly through the manager.
    Forced,
}

/// Everything an effect instance reports.
///
/// `activation` is the instance's activation counter, so consumers can tell
/// two uses of the same pooled slot apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillEvent {
    EffectActivated {
        key: EffectKey,
        activation: u64,
        skill: String,
        mode: EffectMode,
        position: Vec2,
        angle_degrees: f32,
    },
    TargetEngaged {
        key: EffectKey,
        activation: u64,
        target: TargetId,
    },
    DamageApplied {
        key: EffectKey,
        activation: u64,
        target: TargetId,
        magnitude: f64,
        is_critical: bool,
    },
    DamageTextShown {
        key: EffectKey,
        activation: u64,
        target: TargetId,
        value: String,
        is_critical: bool,
    },
    EffectReleased {
        key: EffectKey,
        activation: u64,
        reason: ReleaseReason,
    },
}

impl SkillEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SkillEvent::EffectActivated { .. } | SkillEvent::EffectReleased { .. } => {
                Topic::Lifecycle
            }
            SkillEvent::TargetEngaged { .. }
            | SkillEvent::DamageApplied { .. }
            | SkillEvent::DamageTextShown { .. } => Topic::Combat,
        }
    }

    pub fn key(&self) -> EffectKey {
        match self {
            SkillEvent::EffectActivated { key, .. }
            | SkillEvent::TargetEngaged { key, .. }
            | SkillEvent::DamageApplied { key, .. }
            | SkillEvent::DamageTextShown { key, .. }
            | SkillEvent::EffectReleased { key, .. } => *key,
        }
    }
}
