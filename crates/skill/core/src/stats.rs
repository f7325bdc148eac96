//! Stat resolution seam.
//!
//! Final skill damage and bonus stats are owned by the caster's stat system.
//! The skill subsystem asks for them fresh on every hit and never caches.

use crate::target::BonusDamageKind;

/// Primary stat category a lookup is qualified by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatCategory {
    /// No primary qualifier; the bonus kind alone selects the stat.
    #[default]
    None,
    SkillAttack,
}

/// One resolved damage roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    pub magnitude: f64,
    pub is_critical: bool,
}

impl DamageRoll {
    pub const fn new(magnitude: f64, is_critical: bool) -> Self {
        Self {
            magnitude,
            is_critical,
        }
    }
}

/// Read access to the caster's stats.
///
/// Methods take `&mut self` because rolling a critical hit advances the
/// resolver's random state.
pub trait StatResolver {
    /// Final skill attack damage with its critical outcome.
    fn final_skill_damage(&mut self) -> DamageRoll;

    /// Value of the stat selected by `category` and `kind`, in percent for bonuses.
    fn stat(&mut self, category: StatCategory, kind: BonusDamageKind) -> f64;
}
