//! Target capability and collision filtering.
//!
//! Enemy entities are owned by the host game. The skill subsystem only sees
//! them through the narrow [`Target`] trait and through [`Collider`]s whose
//! [`ColliderBody`] says, at detection time, what was hit.
mod filter;

pub use filter::{Collider, ColliderBody, CollisionVolume, ContactFilter, LayerMask};

use std::fmt;

use crate::geometry::Vec2;

/// Stable identifier of a damageable target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bonus-damage category configured on a target.
///
/// The caster's stat of the same kind is added as a percentage on top of
/// skill damage when hitting that target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BonusDamageKind {
    #[default]
    None,
    Normal,
    Elite,
    Boss,
}

/// Capability surface of an enemy entity.
pub trait Target {
    fn id(&self) -> TargetId;

    fn is_alive(&self) -> bool;

    /// Applies `magnitude` damage. Callers check [`Target::is_alive`] first.
    fn apply_damage(&mut self, magnitude: f64);

    fn bonus_damage_kind(&self) -> BonusDamageKind;

    /// Current world position, used to place damage text.
    fn position(&self) -> Vec2;
}
