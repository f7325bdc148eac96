//! Skill definitions and the effect prototypes they point at.

use crate::config::SkillConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::target::{CollisionVolume, ContactFilter};

/// How an activated effect finds its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectMode {
    /// Flies along its facing and engages enemies it collides with.
    Projectile,
    /// Queries its area once on activation and engages everything inside.
    AreaPulse,
}

/// Read-only description of a skill, bound to an effect instance per activation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffectDefinition {
    /// Display name used in logs.
    pub name: String,
    /// Identifier of the effect prototype (pool key).
    pub effect_name: String,
    /// Damage ticks per engagement.
    pub attack_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub moves_forward: bool,
    /// World units per second while moving.
    #[cfg_attr(feature = "serde", serde(default))]
    pub move_speed: f32,
}

impl SkillEffectDefinition {
    /// A stationary area skill.
    pub fn area(
        name: impl Into<String>,
        effect_name: impl Into<String>,
        attack_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            effect_name: effect_name.into(),
            attack_count,
            moves_forward: false,
            move_speed: 0.0,
        }
    }

    /// A skill whose effect travels forward at `move_speed`.
    pub fn projectile(
        name: impl Into<String>,
        effect_name: impl Into<String>,
        attack_count: u32,
        move_speed: f32,
    ) -> Self {
        Self {
            name: name.into(),
            effect_name: effect_name.into(),
            attack_count,
            moves_forward: true,
            move_speed,
        }
    }

    pub fn mode(&self) -> EffectMode {
        if self.moves_forward {
            EffectMode::Projectile
        } else {
            EffectMode::AreaPulse
        }
    }

    /// Checks the definition before it is bound to an instance.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.effect_name.trim().is_empty() {
            return Err(DefinitionError::MissingEffectName {
                skill: self.name.clone(),
            });
        }
        if self.attack_count == 0 || self.attack_count > SkillConfig::MAX_ATTACK_COUNT {
            return Err(DefinitionError::InvalidAttackCount {
                skill: self.name.clone(),
                count: self.attack_count,
            });
        }
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(DefinitionError::InvalidMoveSpeed {
                skill: self.name.clone(),
                speed: self.move_speed,
            });
        }
        Ok(())
    }
}

/// Template an effect pool instantiates for one effect identifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectPrototype {
    pub name: String,
    pub volume: CollisionVolume,
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: ContactFilter,
}

impl EffectPrototype {
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            volume: CollisionVolume::new(radius),
            filter: ContactFilter::enemies(),
        }
    }

    pub fn with_filter(mut self, filter: ContactFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Rejections raised by [`SkillEffectDefinition::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("skill '{skill}' has no effect name")]
    MissingEffectName { skill: String },

    #[error("skill '{skill}' has invalid attack count {count}")]
    InvalidAttackCount { skill: String, count: u32 },

    #[error("skill '{skill}' has invalid move speed {speed}")]
    InvalidMoveSpeed { skill: String, speed: f32 },
}

impl GameError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingEffectName { .. } => "DEFINITION_MISSING_EFFECT_NAME",
            Self::InvalidAttackCount { .. } => "DEFINITION_INVALID_ATTACK_COUNT",
            Self::InvalidMoveSpeed { .. } => "DEFINITION_INVALID_MOVE_SPEED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_flag_selects_mode() {
        let bolt = SkillEffectDefinition::projectile("Bolt", "Bolt_FX", 2, 6.0);
        let nova = SkillEffectDefinition::area("Nova", "Nova_FX", 3);

        assert_eq!(bolt.mode(), EffectMode::Projectile);
        assert_eq!(nova.mode(), EffectMode::AreaPulse);
    }

    #[test]
    fn zero_attack_count_is_rejected() {
        let skill = SkillEffectDefinition::area("Nova", "Nova_FX", 0);
        let err = skill.validate().unwrap_err();

        assert_eq!(err.error_code(), "DEFINITION_INVALID_ATTACK_COUNT");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn blank_effect_name_is_rejected() {
        let skill = SkillEffectDefinition::area("Nova", "  ", 1);
        assert!(matches!(
            skill.validate(),
            Err(DefinitionError::MissingEffectName { .. })
        ));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let skill = SkillEffectDefinition::projectile("Bolt", "Bolt_FX", 1, -1.0);
        assert!(matches!(
            skill.validate(),
            Err(DefinitionError::InvalidMoveSpeed { .. })
        ));
    }
}
