//! Failures surfaced by the skill runtime.
//!
//! None of these are fatal. `SkillManager::use_skill` logs them and reports
//! `false`; callers that want the reason use `try_use_skill`.
use thiserror::Error;

use skill_core::{DefinitionError, ErrorSeverity, GameError};

use crate::effect::EffectKey;

pub type Result<T> = std::result::Result<T, SkillError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkillError {
    #[error("effect '{effect}' is not registered")]
    EffectNotRegistered { effect: String },

    #[error("no valid target for skill '{skill}'")]
    NoValidTarget { skill: String },

    #[error(transparent)]
    InvalidDefinition(#[from] DefinitionError),

    #[error("effect key {0} does not refer to a pooled instance")]
    UnknownEffect(EffectKey),

    #[error("effect {0} is already back in its pool")]
    NotInUse(EffectKey),
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoValidTarget { .. } => ErrorSeverity::Recoverable,
            Self::EffectNotRegistered { .. } | Self::InvalidDefinition(_) => {
                ErrorSeverity::Validation
            }
            Self::NotInUse(_) => ErrorSeverity::Validation,
            Self::UnknownEffect(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EffectNotRegistered { .. } => "SKILL_EFFECT_NOT_REGISTERED",
            Self::NoValidTarget { .. } => "SKILL_NO_VALID_TARGET",
            Self::InvalidDefinition(inner) => inner.error_code(),
            Self::UnknownEffect(_) => "SKILL_UNKNOWN_EFFECT",
            Self::NotInUse(_) => "SKILL_EFFECT_NOT_IN_USE",
        }
    }
}
