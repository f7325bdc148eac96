//! Collaborator seams the skill runtime reads the game world through.
//!
//! The host game owns enemies, physics and stats. Effects reach them only
//! through the traits below, bundled per call in a [`SkillEnv`]. In-memory
//! implementations ([`ArenaWorld`], [`SeededStats`]) back the tests and the
//! headless simulation.
mod arena;
mod stats;

pub use arena::{ArenaTarget, ArenaWorld};
pub use stats::SeededStats;

use skill_core::{
    Collider, CollisionVolume, ContactFilter, StatResolver, Target, TargetId, Transform,
};

use crate::presenter::Presenter;

/// Lookup of live target entities by id.
pub trait TargetRegistry {
    fn target(&self, id: TargetId) -> Option<&dyn Target>;

    fn target_mut(&mut self, id: TargetId) -> Option<&mut dyn Target>;
}

/// Point-in-time overlap query against the host physics.
pub trait OverlapQuery {
    /// All colliders accepted by `filter` overlapping `volume` placed at `at`.
    fn overlap(
        &self,
        volume: &CollisionVolume,
        at: &Transform,
        filter: &ContactFilter,
    ) -> Vec<Collider>;
}

/// Picks the target a newly used skill is aimed at.
pub trait EnemySelector {
    /// A random enemy that is currently spawned and alive.
    fn random_active_target(&mut self) -> Option<TargetId>;
}

/// Everything the runtime needs from the world side.
pub trait World: TargetRegistry + OverlapQuery + EnemySelector {}

impl<T> World for T where T: TargetRegistry + OverlapQuery + EnemySelector + ?Sized {}

/// Aggregates the collaborators one manager call needs.
pub struct SkillEnv<'a> {
    pub world: &'a mut dyn World,
    pub stats: &'a mut dyn StatResolver,
    pub presenter: &'a mut dyn Presenter,
}

impl<'a> SkillEnv<'a> {
    pub fn new(
        world: &'a mut dyn World,
        stats: &'a mut dyn StatResolver,
        presenter: &'a mut dyn Presenter,
    ) -> Self {
        Self {
            world,
            stats,
            presenter,
        }
    }

    /// Liveness of `id`; targets missing from the registry count as dead.
    pub fn is_alive(&self, id: TargetId) -> bool {
        self.world.target(id).is_some_and(|target| target.is_alive())
    }
}
