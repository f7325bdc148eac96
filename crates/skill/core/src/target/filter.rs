//! Collider classification and contact filtering.

use bitflags::bitflags;

use super::TargetId;

bitflags! {
    /// Physics layers a collider can live on.
    ///
    /// A collider occupies exactly one layer; filters hold any combination.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct LayerMask: u32 {
        const DEFAULT    = 1 << 0;
        const PLAYER     = 1 << 1;
        const ENEMY      = 1 << 2;
        const PROJECTILE = 1 << 3;
        const TERRAIN    = 1 << 4;
    }
}

/// What a collider belongs to, resolved when it is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColliderBody {
    Enemy(TargetId),
    Player,
    Obstacle,
}

/// A collider reported by the host physics, either through a contact
/// notification or an overlap query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collider {
    pub layer: LayerMask,
    pub is_trigger: bool,
    pub body: ColliderBody,
}

impl Collider {
    /// A solid collider on the enemy layer.
    pub fn enemy(id: TargetId) -> Self {
        Self {
            layer: LayerMask::ENEMY,
            is_trigger: false,
            body: ColliderBody::Enemy(id),
        }
    }

    /// The enemy behind this collider, if it is one.
    pub fn enemy_id(&self) -> Option<TargetId> {
        match self.body {
            ColliderBody::Enemy(id) => Some(id),
            ColliderBody::Player | ColliderBody::Obstacle => None,
        }
    }
}

/// Layer mask plus trigger inclusion, as used by overlap queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactFilter {
    pub layers: LayerMask,
    pub include_triggers: bool,
}

impl ContactFilter {
    /// Enemy layer, triggers included.
    pub const fn enemies() -> Self {
        Self {
            layers: LayerMask::ENEMY,
            include_triggers: true,
        }
    }

    pub fn accepts(&self, collider: &Collider) -> bool {
        self.layers.intersects(collider.layer) && (self.include_triggers || !collider.is_trigger)
    }
}

impl Default for ContactFilter {
    fn default() -> Self {
        Self::enemies()
    }
}

/// Circular collision volume of an effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionVolume {
    pub radius: f32,
}

impl CollisionVolume {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }
}
