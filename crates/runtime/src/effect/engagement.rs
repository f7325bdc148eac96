//! Damage application against one engaged target.

use std::collections::VecDeque;

use skill_core::{BonusDamageKind, DamageText, TargetId, Vec2, format_damage, roll_damage};
use tracing::trace;

use super::EffectKey;
use crate::events::{EventBus, SkillEvent};
use crate::world::SkillEnv;

#[derive(Clone, Debug, PartialEq)]
struct PendingText {
    value: String,
    is_critical: bool,
}

/// One target's hit sequence for one activation.
///
/// All `attack_count` hits are rolled and applied when the engagement
/// starts. The resulting texts are then shown one at a time: the first
/// right away, each following one once `delay` seconds have passed since
/// the previous, never more than one per tick.
#[derive(Clone, Debug)]
pub struct Engagement {
    target: TargetId,
    origin: EffectKey,
    activation: u64,
    pending: VecDeque<PendingText>,
    delay: f32,
    until_next: f32,
    last_position: Vec2,
    computed: u32,
    applied: u32,
    shown: u32,
}

impl Engagement {
    /// Rolls and applies every hit, then shows the first text.
    ///
    /// `fallback` is where texts appear if the target is no longer in the
    /// registry.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        target: TargetId,
        attack_count: u32,
        delay: f32,
        origin: EffectKey,
        activation: u64,
        fallback: Vec2,
        env: &mut SkillEnv<'_>,
        events: &EventBus,
    ) -> Self {
        let (bonus, last_position) = env
            .world
            .target(target)
            .map(|t| (t.bonus_damage_kind(), t.position()))
            .unwrap_or((BonusDamageKind::None, fallback));

        let mut engagement = Self {
            target,
            origin,
            activation,
            pending: VecDeque::with_capacity(attack_count as usize),
            delay,
            until_next: 0.0,
            last_position,
            computed: 0,
            applied: 0,
            shown: 0,
        };

        for _ in 0..attack_count {
            let hit = roll_damage(target, bonus, &mut *env.stats);
            engagement.computed += 1;

            if let Some(entity) = env.world.target_mut(target)
                && entity.is_alive()
            {
                entity.apply_damage(hit.magnitude);
                engagement.applied += 1;
                trace!(
                    target: "skill::effect",
                    effect = %origin,
                    %target,
                    magnitude = hit.magnitude,
                    critical = hit.is_critical,
                    "Hit applied"
                );
                events.publish(SkillEvent::DamageApplied {
                    key: origin,
                    activation,
                    target,
                    magnitude: hit.magnitude,
                    is_critical: hit.is_critical,
                });
            }

            engagement.pending.push_back(PendingText {
                value: format_damage(hit.magnitude),
                is_critical: hit.is_critical,
            });
        }

        engagement.show_next(env, events);
        engagement
    }

    /// Advances the display countdown; returns `true` once every text is shown.
    pub fn tick(&mut self, dt: f32, env: &mut SkillEnv<'_>, events: &EventBus) -> bool {
        if self.pending.is_empty() {
            return true;
        }
        self.until_next -= dt;
        if self.until_next <= 0.0 {
            self.show_next(env, events);
        }
        self.pending.is_empty()
    }

    fn show_next(&mut self, env: &mut SkillEnv<'_>, events: &EventBus) {
        let Some(next) = self.pending.pop_front() else {
            return;
        };
        if let Some(entity) = env.world.target(self.target) {
            self.last_position = entity.position();
        }

        let text = DamageText {
            value: next.value,
            position: self.last_position,
            is_critical: next.is_critical,
        };
        env.presenter.show_damage_text(&text);
        self.shown += 1;
        self.until_next = self.delay;

        events.publish(SkillEvent::DamageTextShown {
            key: self.origin,
            activation: self.activation,
            target: self.target,
            value: text.value,
            is_critical: text.is_critical,
        });
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Damage values rolled, always the definition's attack count.
    pub fn computed(&self) -> u32 {
        self.computed
    }

    /// Hits that landed on a living target.
    pub fn applied(&self) -> u32 {
        self.applied
    }

    pub fn shown(&self) -> u32 {
        self.shown
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
