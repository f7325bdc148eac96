//! In-memory arena of circular enemies.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use skill_core::{
    BonusDamageKind, Collider, CollisionVolume, ContactFilter, PcgRng, Target, TargetId,
    Transform, Vec2,
};

use super::{EnemySelector, OverlapQuery, TargetRegistry};
use crate::effect::EffectKey;

/// One enemy in the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaTarget {
    pub id: TargetId,
    pub hp: f64,
    pub max_hp: f64,
    pub position: Vec2,
    pub radius: f32,
    pub bonus: BonusDamageKind,
    pub is_trigger: bool,
    /// Number of `apply_damage` calls received.
    pub hits_taken: u32,
}

impl ArenaTarget {
    fn collider(&self) -> Collider {
        Collider {
            is_trigger: self.is_trigger,
            ..Collider::enemy(self.id)
        }
    }
}

impl Target for ArenaTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    fn apply_damage(&mut self, magnitude: f64) {
        self.hp = (self.hp - magnitude).max(0.0);
        self.hits_taken += 1;
    }

    fn bonus_damage_kind(&self) -> BonusDamageKind {
        self.bonus
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

/// Headless world: enemies, overlap queries, random target selection, and
/// contact tracking that turns continuous overlap into enter events.
#[derive(Debug)]
pub struct ArenaWorld {
    targets: Vec<ArenaTarget>,
    next_id: u32,
    rng: PcgRng,
    touching: HashMap<EffectKey, HashSet<TargetId>>,
    overlap_queries: Cell<usize>,
}

impl ArenaWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            targets: Vec::new(),
            next_id: 1,
            rng: PcgRng::new(seed),
            touching: HashMap::new(),
            overlap_queries: Cell::new(0),
        }
    }

    /// Adds an enemy and returns its id.
    pub fn spawn(
        &mut self,
        position: Vec2,
        hp: f64,
        radius: f32,
        bonus: BonusDamageKind,
    ) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets.push(ArenaTarget {
            id,
            hp,
            max_hp: hp,
            position,
            radius,
            bonus,
            is_trigger: false,
            hits_taken: 0,
        });
        id
    }

    pub fn get(&self, id: TargetId) -> Option<&ArenaTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut ArenaTarget> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    pub fn targets(&self) -> &[ArenaTarget] {
        &self.targets
    }

    pub fn alive_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_alive()).count()
    }

    /// Removes dead enemies; returns how many were removed.
    pub fn despawn_dead(&mut self) -> usize {
        let before = self.targets.len();
        self.targets.retain(|t| t.is_alive());
        before - self.targets.len()
    }

    /// Total overlap queries served so far.
    pub fn overlap_queries(&self) -> usize {
        self.overlap_queries.get()
    }

    /// Colliders `key`'s volume started touching since the previous call.
    ///
    /// Emulates a physics engine's collision-enter notifications: a target
    /// that stays inside the volume is reported once, and again only after
    /// it left and re-entered.
    pub fn contacts_entered(
        &mut self,
        key: EffectKey,
        at: Vec2,
        volume: &CollisionVolume,
    ) -> Vec<Collider> {
        let now: HashSet<TargetId> = self
            .targets
            .iter()
            .filter(|t| t.position.distance(at) <= volume.radius + t.radius)
            .map(|t| t.id)
            .collect();

        let before = self.touching.entry(key).or_default();
        let entered: Vec<Collider> = self
            .targets
            .iter()
            .filter(|t| now.contains(&t.id) && !before.contains(&t.id))
            .map(ArenaTarget::collider)
            .collect();
        *before = now;
        entered
    }

    /// Drops contact history for an effect that returned to its pool.
    pub fn forget_contacts(&mut self, key: EffectKey) {
        self.touching.remove(&key);
    }
}

impl TargetRegistry for ArenaWorld {
    fn target(&self, id: TargetId) -> Option<&dyn Target> {
        self.get(id).map(|t| t as &dyn Target)
    }

    fn target_mut(&mut self, id: TargetId) -> Option<&mut dyn Target> {
        self.get_mut(id).map(|t| t as &mut dyn Target)
    }
}

impl OverlapQuery for ArenaWorld {
    fn overlap(
        &self,
        volume: &CollisionVolume,
        at: &Transform,
        filter: &ContactFilter,
    ) -> Vec<Collider> {
        self.overlap_queries.set(self.overlap_queries.get() + 1);
        self.targets
            .iter()
            .filter(|t| t.position.distance(at.position) <= volume.radius + t.radius)
            .map(ArenaTarget::collider)
            .filter(|collider| filter.accepts(collider))
            .collect()
    }
}

impl EnemySelector for ArenaWorld {
    fn random_active_target(&mut self) -> Option<TargetId> {
        let alive: Vec<TargetId> = self
            .targets
            .iter()
            .filter(|t| t.is_alive())
            .map(|t| t.id)
            .collect();
        if alive.is_empty() {
            return None;
        }
        Some(alive[self.rng.below(alive.len())])
    }
}
