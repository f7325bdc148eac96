//! Per-instance state machine.

use skill_core::{
    Collider, EffectMode, EffectPrototype, SkillEffectDefinition, TargetId, Transform, Vec2,
};
use tracing::{debug, trace};

use super::acquisition::{self, EngagedSet};
use super::{EffectKey, EffectTemplate, EffectTiming, Engagement};
use crate::config::TimeoutPolicy;
use crate::events::{EventBus, ReleaseReason, SkillEvent};
use crate::pool::{PoolHandle, Poolable};
use crate::world::SkillEnv;

/// Where an instance is in its activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EffectPhase {
    /// Sitting in the pool.
    Idle,
    /// Handed out by the pool, not set up yet.
    Activating,
    /// Projectile flying along its facing.
    Moving,
    /// Area pulse fired; engagements are still being displayed.
    Pulsed,
    /// Projectile timed out; it no longer moves or takes contacts and goes
    /// back to the pool once its engagements have shown every text.
    Draining,
}

/// One pooled projectile or area effect.
#[derive(Debug)]
pub struct EffectInstance {
    key: EffectKey,
    prototype: EffectPrototype,
    timing: EffectTiming,
    phase: EffectPhase,
    mode: EffectMode,
    definition: Option<SkillEffectDefinition>,
    transform: Transform,
    elapsed: f32,
    enabled: bool,
    activation: u64,
    engaged: EngagedSet,
    engagements: Vec<Engagement>,
    overlap_queries: u32,
}

impl EffectInstance {
    pub fn new(key: EffectKey, prototype: EffectPrototype, timing: EffectTiming) -> Self {
        Self {
            key,
            prototype,
            timing,
            phase: EffectPhase::Idle,
            mode: EffectMode::AreaPulse,
            definition: None,
            transform: Transform::default(),
            elapsed: 0.0,
            enabled: false,
            activation: 0,
            engaged: EngagedSet::default(),
            engagements: Vec::new(),
            overlap_queries: 0,
        }
    }

    /// Starts a new activation at `origin`, facing `toward`.
    ///
    /// Whatever the previous activation left behind (movement, pending
    /// texts, engaged targets) is dropped first. A projectile starts moving
    /// on the next tick; an area pulse queries its overlap immediately.
    pub fn set_up(
        &mut self,
        definition: SkillEffectDefinition,
        origin: Vec2,
        toward: Vec2,
        env: &mut SkillEnv<'_>,
        events: &EventBus,
    ) {
        if self.is_active() {
            debug!(
                target: "skill::effect",
                effect = %self.key,
                activation = self.activation,
                pending = self.engagements.len(),
                "Cancelling previous activation"
            );
        }

        self.engagements.clear();
        self.engaged.clear();
        self.activation += 1;
        self.mode = definition.mode();
        self.transform = Transform::looking_at(origin, toward);
        self.elapsed = 0.0;
        self.enabled = true;
        self.overlap_queries = 0;

        debug!(
            target: "skill::effect",
            effect = %self.key,
            skill = %definition.name,
            mode = %self.mode,
            activation = self.activation,
            angle = self.transform.angle_degrees,
            "Effect activated"
        );
        events.publish(SkillEvent::EffectActivated {
            key: self.key,
            activation: self.activation,
            skill: definition.name.clone(),
            mode: self.mode,
            position: self.transform.position,
            angle_degrees: self.transform.angle_degrees,
        });
        self.definition = Some(definition);

        match self.mode {
            EffectMode::Projectile => self.phase = EffectPhase::Moving,
            EffectMode::AreaPulse => {
                self.phase = EffectPhase::Pulsed;
                self.pulse(env, events);
            }
        }
    }

    fn pulse(&mut self, env: &mut SkillEnv<'_>, events: &EventBus) {
        self.overlap_queries += 1;
        let colliders =
            env.world
                .overlap(&self.prototype.volume, &self.transform, &self.prototype.filter);
        let targets = acquisition::pulse_targets(&colliders, &mut self.engaged, env);
        trace!(
            target: "skill::effect",
            effect = %self.key,
            overlapping = colliders.len(),
            engaged = targets.len(),
            "Area pulse"
        );
        for target in targets {
            self.engage(target, env, events);
        }
    }

    fn engage(&mut self, target: TargetId, env: &mut SkillEnv<'_>, events: &EventBus) {
        let attack_count = self.definition.as_ref().map_or(0, |d| d.attack_count);
        debug!(
            target: "skill::effect",
            effect = %self.key,
            %target,
            attack_count,
            "Target engaged"
        );
        events.publish(SkillEvent::TargetEngaged {
            key: self.key,
            activation: self.activation,
            target,
        });

        let engagement = Engagement::start(
            target,
            attack_count,
            self.timing.text_delay,
            self.key,
            self.activation,
            self.transform.position,
            env,
            events,
        );
        if !engagement.is_finished() {
            self.engagements.push(engagement);
        }
    }

    /// Handles a collision-enter notification.
    ///
    /// Only an enabled, moving projectile reacts. Returns `true` if the
    /// contact started an engagement.
    pub fn on_collision_enter(
        &mut self,
        collider: &Collider,
        env: &mut SkillEnv<'_>,
        events: &EventBus,
    ) -> bool {
        if self.phase != EffectPhase::Moving || !self.enabled {
            return false;
        }

        match acquisition::evaluate_contact(collider, &self.prototype.filter, &self.engaged, env) {
            Ok(target) => {
                self.engaged.insert(target);
                self.engage(target, env, events);
                true
            }
            Err(reason) => {
                trace!(
                    target: "skill::effect",
                    effect = %self.key,
                    body = ?collider.body,
                    %reason,
                    "Contact ignored"
                );
                false
            }
        }
    }

    /// Advances one simulation step.
    ///
    /// Returns `true` when the activation ended during this step and the
    /// instance is back in its pool.
    pub fn tick(&mut self, dt: f32, env: &mut SkillEnv<'_>, events: &EventBus) -> bool {
        if !self.is_active() {
            return false;
        }

        self.engagements
            .retain_mut(|engagement| !engagement.tick(dt, env, events));

        match self.phase {
            EffectPhase::Moving => {
                let speed = self.definition.as_ref().map_or(0.0, |d| d.move_speed);
                self.transform.advance(speed * dt);
                self.elapsed += dt;

                let expired = self.elapsed >= self.timing.disable_after;
                let finalize = match self.timing.policy {
                    TimeoutPolicy::GracePeriod => expired && !self.enabled,
                    TimeoutPolicy::HardCap => expired,
                };
                if finalize {
                    if self.engagements.is_empty() {
                        self.finish(ReleaseReason::Expired, events);
                        return true;
                    }
                    self.enabled = false;
                    self.phase = EffectPhase::Draining;
                    debug!(
                        target: "skill::effect",
                        effect = %self.key,
                        activation = self.activation,
                        pending = self.pending_texts(),
                        "Effect timed out, draining damage texts"
                    );
                }
            }
            EffectPhase::Draining => {
                self.elapsed += dt;
                if self.engagements.is_empty() {
                    self.finish(ReleaseReason::Expired, events);
                    return true;
                }
            }
            EffectPhase::Pulsed => {
                self.elapsed += dt;
                if !self.enabled {
                    self.finish(ReleaseReason::Deactivated, events);
                    return true;
                }
                if self.engagements.is_empty() {
                    self.finish(ReleaseReason::Completed, events);
                    return true;
                }
            }
            EffectPhase::Idle | EffectPhase::Activating => {}
        }
        false
    }

    /// Clears the enabled flag.
    ///
    /// A projectile keeps flying until its disable timer runs out; an area
    /// pulse goes back to the pool on its next tick. Returns `false` if the
    /// instance was not enabled.
    pub fn request_deactivation(&mut self) -> bool {
        if !self.is_active() || !self.enabled {
            return false;
        }
        self.enabled = false;
        debug!(
            target: "skill::effect",
            effect = %self.key,
            activation = self.activation,
            elapsed = self.elapsed,
            "Deactivation requested"
        );
        true
    }

    fn finish(&mut self, reason: ReleaseReason, events: &EventBus) {
        debug!(
            target: "skill::effect",
            effect = %self.key,
            activation = self.activation,
            %reason,
            elapsed = self.elapsed,
            "Effect returned to pool"
        );
        events.publish(SkillEvent::EffectReleased {
            key: self.key,
            activation: self.activation,
            reason,
        });
        self.go_idle();
    }

    fn go_idle(&mut self) {
        self.phase = EffectPhase::Idle;
        self.enabled = false;
        self.engagements.clear();
    }

    pub fn key(&self) -> EffectKey {
        self.key
    }

    pub fn prototype(&self) -> &EffectPrototype {
        &self.prototype
    }

    pub fn phase(&self) -> EffectPhase {
        self.phase
    }

    pub fn mode(&self) -> EffectMode {
        self.mode
    }

    /// True between set-up and the return to the pool.
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            EffectPhase::Moving | EffectPhase::Pulsed | EffectPhase::Draining
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn activation(&self) -> u64 {
        self.activation
    }

    pub fn definition(&self) -> Option<&SkillEffectDefinition> {
        self.definition.as_ref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn engaged(&self) -> &EngagedSet {
        &self.engaged
    }

    pub fn engagements(&self) -> &[Engagement] {
        &self.engagements
    }

    /// Texts of this activation still waiting to be shown.
    pub fn pending_texts(&self) -> usize {
        self.engagements.iter().map(Engagement::pending).sum()
    }

    /// Overlap queries issued during the current activation.
    pub fn overlap_queries(&self) -> u32 {
        self.overlap_queries
    }
}

impl Poolable for EffectInstance {
    type Prototype = EffectTemplate;

    fn instantiate(template: &EffectTemplate, handle: PoolHandle) -> Self {
        Self::new(
            EffectKey::new(template.effect, handle),
            template.prototype.clone(),
            template.timing,
        )
    }

    fn is_available(&self) -> bool {
        self.phase == EffectPhase::Idle
    }

    fn on_acquire(&mut self) {
        self.phase = EffectPhase::Activating;
    }

    fn on_release(&mut self) {
        self.go_idle();
    }
}
