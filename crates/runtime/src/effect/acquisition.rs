//! Target acquisition: streaming contacts and one-shot area pulses.

use std::collections::HashSet;

use skill_core::{Collider, ContactFilter, TargetId};

use crate::world::SkillEnv;

/// Targets already engaged during the current activation.
#[derive(Clone, Debug, Default)]
pub struct EngagedSet {
    ids: HashSet<TargetId>,
}

impl EngagedSet {
    pub fn contains(&self, id: TargetId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `false` if `id` was already engaged.
    pub fn insert(&mut self, id: TargetId) -> bool {
        self.ids.insert(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.ids.iter().copied()
    }
}

/// Why a contact did not start an engagement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    FilteredOut,
    NotAnEnemy,
    Dead,
    AlreadyEngaged,
}

/// Decides whether a contact notification qualifies for an engagement.
///
/// Checks run in order: layer filter, enemy body, liveness, then the
/// de-duplication set. The set is only read here; the caller inserts.
pub fn evaluate_contact(
    collider: &Collider,
    filter: &ContactFilter,
    engaged: &EngagedSet,
    env: &SkillEnv<'_>,
) -> Result<TargetId, RejectReason> {
    if !filter.accepts(collider) {
        return Err(RejectReason::FilteredOut);
    }
    let id = collider.enemy_id().ok_or(RejectReason::NotAnEnemy)?;
    if engaged.contains(id) {
        return Err(RejectReason::AlreadyEngaged);
    }
    if !env.is_alive(id) {
        return Err(RejectReason::Dead);
    }
    Ok(id)
}

/// Living enemies among the colliders of one overlap query, each once.
///
/// Accepted ids are recorded in `engaged`, so a target reported through
/// several colliders is engaged a single time.
pub fn pulse_targets(
    colliders: &[Collider],
    engaged: &mut EngagedSet,
    env: &SkillEnv<'_>,
) -> Vec<TargetId> {
    colliders
        .iter()
        .filter_map(Collider::enemy_id)
        .filter(|&id| env.is_alive(id) && engaged.insert(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::{BonusDamageKind, ColliderBody, LayerMask, Target, Vec2};

    use crate::presenter::RecordingPresenter;
    use crate::world::{ArenaWorld, SeededStats, TargetRegistry};

    struct Fixture {
        world: ArenaWorld,
        stats: SeededStats,
        presenter: RecordingPresenter,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                world: ArenaWorld::new(1),
                stats: SeededStats::new(10.0, 1),
                presenter: RecordingPresenter::new(),
            }
        }

        fn env(&mut self) -> SkillEnv<'_> {
            SkillEnv::new(&mut self.world, &mut self.stats, &mut self.presenter)
        }
    }

    #[test]
    fn contact_checks_filter_body_and_liveness() {
        let mut fx = Fixture::new();
        let alive = fx.world.spawn(Vec2::ZERO, 10.0, 0.5, BonusDamageKind::None);
        let dead = fx.world.spawn(Vec2::ZERO, 10.0, 0.5, BonusDamageKind::None);
        if let Some(target) = fx.world.target_mut(dead) {
            target.apply_damage(100.0);
        }
        let filter = ContactFilter::enemies();
        let engaged = EngagedSet::default();
        let env = fx.env();

        assert_eq!(
            evaluate_contact(&Collider::enemy(alive), &filter, &engaged, &env),
            Ok(alive)
        );
        assert_eq!(
            evaluate_contact(&Collider::enemy(dead), &filter, &engaged, &env),
            Err(RejectReason::Dead)
        );

        let player = Collider {
            layer: LayerMask::PLAYER,
            is_trigger: false,
            body: ColliderBody::Player,
        };
        assert_eq!(
            evaluate_contact(&player, &filter, &engaged, &env),
            Err(RejectReason::FilteredOut)
        );

        let rock = Collider {
            layer: LayerMask::ENEMY,
            is_trigger: false,
            body: ColliderBody::Obstacle,
        };
        assert_eq!(
            evaluate_contact(&rock, &filter, &engaged, &env),
            Err(RejectReason::NotAnEnemy)
        );
    }

    #[test]
    fn engaged_targets_are_rejected() {
        let mut fx = Fixture::new();
        let id = fx.world.spawn(Vec2::ZERO, 10.0, 0.5, BonusDamageKind::None);
        let mut engaged = EngagedSet::default();
        assert!(engaged.insert(id));
        assert!(!engaged.insert(id));

        let env = fx.env();
        assert_eq!(
            evaluate_contact(&Collider::enemy(id), &ContactFilter::enemies(), &engaged, &env),
            Err(RejectReason::AlreadyEngaged)
        );
    }

    #[test]
    fn pulse_skips_dead_and_duplicate_colliders() {
        let mut fx = Fixture::new();
        let a = fx.world.spawn(Vec2::ZERO, 10.0, 0.5, BonusDamageKind::None);
        let b = fx.world.spawn(Vec2::ZERO, 10.0, 0.5, BonusDamageKind::None);
        let dead = fx.world.spawn(Vec2::ZERO, 10.0, 0.5, BonusDamageKind::None);
        if let Some(target) = fx.world.target_mut(dead) {
            target.apply_damage(100.0);
        }
        let colliders = [
            Collider::enemy(a),
            Collider::enemy(dead),
            Collider::enemy(b),
            Collider::enemy(a),
        ];
        let mut engaged = EngagedSet::default();

        let env = fx.env();
        assert_eq!(pulse_targets(&colliders, &mut engaged, &env), vec![a, b]);
        assert_eq!(engaged.len(), 2);
    }
}
