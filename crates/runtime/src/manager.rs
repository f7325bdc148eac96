//! Skill catalog: one effect pool per effect name.
//!
//! The manager is the entry point the combat loop talks to. It resolves a
//! skill's effect, aims it at a random living enemy, and drives every pooled
//! instance forward through [`SkillManager::tick`].
use std::collections::HashMap;

use skill_core::{Collider, EffectPrototype, GameError, SkillEffectDefinition, Vec2};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::effect::{EffectInstance, EffectKey, EffectTemplate, EffectTiming};
use crate::error::{Result, SkillError};
use crate::events::{EventBus, ReleaseReason, SkillEvent, Topic};
use crate::pool::{ObjectPool, PoolStats, Poolable};
use crate::world::SkillEnv;

pub struct SkillManager {
    config: RuntimeConfig,
    pools: Vec<ObjectPool<EffectInstance>>,
    index: HashMap<String, usize>,
    initialized: bool,
    events: EventBus,
}

impl SkillManager {
    pub fn new(config: RuntimeConfig) -> Self {
        let events = EventBus::with_capacity(config.event_buffer_size);
        Self {
            config,
            pools: Vec::new(),
            index: HashMap::new(),
            initialized: false,
            events,
        }
    }

    /// Builds one pool per effect prototype.
    ///
    /// Runs once. Later calls change nothing and return `false`. If two
    /// entries share a name, the later one replaces the earlier.
    pub fn initialize<I>(&mut self, entries: I) -> bool
    where
        I: IntoIterator<Item = (EffectPrototype, usize)>,
    {
        if self.initialized {
            warn!(target: "skill::manager", "Skill manager already initialized, ignoring");
            return false;
        }

        let timing = EffectTiming::from_config(&self.config);
        for (prototype, capacity) in entries {
            let name = prototype.name.clone();
            let effect = match self.index.get(&name) {
                Some(&existing) => {
                    warn!(
                        target: "skill::manager",
                        effect = %name,
                        "Duplicate effect prototype, replacing earlier entry"
                    );
                    existing
                }
                None => self.pools.len(),
            };

            let template = EffectTemplate {
                effect,
                prototype,
                timing,
            };
            let pool = ObjectPool::new(name.clone(), template, capacity);
            if effect == self.pools.len() {
                self.pools.push(pool);
            } else {
                self.pools[effect] = pool;
            }
            self.index.insert(name, effect);
        }

        self.initialized = true;
        info!(
            target: "skill::manager",
            effects = self.pools.len(),
            policy = %self.config.timeout_policy,
            "Skill manager initialized"
        );
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_registered(&self, effect_name: &str) -> bool {
        self.index.contains_key(effect_name)
    }

    /// Takes an instance out of the pool registered under `effect_name`.
    ///
    /// The instance is reserved but not set up: hand it to
    /// [`activate`](Self::activate) or give it back with
    /// [`release`](Self::release). `None` if no such pool.
    pub fn resolve_effect(&mut self, effect_name: &str) -> Option<EffectKey> {
        let effect = *self.index.get(effect_name)?;
        let pool = self.pools.get_mut(effect)?;
        Some(EffectKey::new(effect, pool.acquire()))
    }

    /// Activates `definition` at `caster`, aimed at a random living enemy.
    ///
    /// Nothing is taken from a pool unless the skill can actually fire.
    pub fn try_use_skill(
        &mut self,
        definition: &SkillEffectDefinition,
        caster: Vec2,
        env: &mut SkillEnv<'_>,
    ) -> Result<EffectKey> {
        definition.validate()?;

        if !self.is_registered(&definition.effect_name) {
            return Err(SkillError::EffectNotRegistered {
                effect: definition.effect_name.clone(),
            });
        }

        let no_target = || SkillError::NoValidTarget {
            skill: definition.name.clone(),
        };
        let target = env.world.random_active_target().ok_or_else(no_target)?;
        let aim = env
            .world
            .target(target)
            .map(|t| t.position())
            .ok_or_else(no_target)?;

        let key = self
            .resolve_effect(&definition.effect_name)
            .ok_or_else(|| SkillError::EffectNotRegistered {
                effect: definition.effect_name.clone(),
            })?;
        self.set_up_instance(key, definition, caster, aim, env)?;

        debug!(
            target: "skill::manager",
            skill = %definition.name,
            effect = %key,
            %target,
            "Skill used"
        );
        Ok(key)
    }

    /// Sets up a reserved instance at `caster`, facing `aim`.
    ///
    /// Works on instances from [`resolve_effect`](Self::resolve_effect) and
    /// on active ones, whose current activation is cancelled. An instance
    /// that is back in its pool is rejected.
    pub fn activate(
        &mut self,
        key: EffectKey,
        definition: &SkillEffectDefinition,
        caster: Vec2,
        aim: Vec2,
        env: &mut SkillEnv<'_>,
    ) -> Result<()> {
        definition.validate()?;
        self.set_up_instance(key, definition, caster, aim, env)
    }

    fn set_up_instance(
        &mut self,
        key: EffectKey,
        definition: &SkillEffectDefinition,
        caster: Vec2,
        aim: Vec2,
        env: &mut SkillEnv<'_>,
    ) -> Result<()> {
        let events = &self.events;
        let instance = self
            .pools
            .get_mut(key.effect)
            .and_then(|pool| pool.get_mut(key.slot))
            .ok_or(SkillError::UnknownEffect(key))?;
        if instance.is_available() {
            return Err(SkillError::NotInUse(key));
        }
        instance.set_up(definition.clone(), caster, aim, env, events);
        Ok(())
    }

    /// Boolean form of [`try_use_skill`](Self::try_use_skill).
    ///
    /// Failures are logged, never raised.
    pub fn use_skill(
        &mut self,
        definition: &SkillEffectDefinition,
        caster: Vec2,
        env: &mut SkillEnv<'_>,
    ) -> bool {
        match self.try_use_skill(definition, caster, env) {
            Ok(_) => true,
            Err(err) if err.severity().is_recoverable() => {
                debug!(
                    target: "skill::manager",
                    skill = %definition.name,
                    code = err.error_code(),
                    "{}", err
                );
                false
            }
            Err(err) => {
                warn!(
                    target: "skill::manager",
                    skill = %definition.name,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    "{}", err
                );
                false
            }
        }
    }

    /// Forwards a collision-enter notification to the instance behind `key`.
    pub fn on_collision_enter(
        &mut self,
        key: EffectKey,
        collider: &Collider,
        env: &mut SkillEnv<'_>,
    ) -> bool {
        let events = &self.events;
        match self
            .pools
            .get_mut(key.effect)
            .and_then(|pool| pool.get_mut(key.slot))
        {
            Some(instance) => instance.on_collision_enter(collider, env, events),
            None => false,
        }
    }

    /// Advances every active instance by `dt`.
    ///
    /// Returns the instances that went back to their pool during this step.
    pub fn tick(&mut self, dt: f32, env: &mut SkillEnv<'_>) -> Vec<EffectKey> {
        let events = &self.events;
        let mut released = Vec::new();
        for pool in &mut self.pools {
            for instance in pool.iter_mut() {
                if instance.tick(dt, env, events) {
                    released.push(instance.key());
                }
            }
        }
        released
    }

    /// Clears the enabled flag of the instance behind `key`.
    pub fn request_deactivation(&mut self, key: EffectKey) -> bool {
        self.instance_mut(key)
            .is_some_and(EffectInstance::request_deactivation)
    }

    /// Puts an instance back into its pool immediately.
    ///
    /// Releasing an instance that is already in its pool fails with
    /// [`SkillError::NotInUse`] and publishes nothing.
    pub fn release(&mut self, key: EffectKey) -> Result<()> {
        let instance = self.instance(key).ok_or(SkillError::UnknownEffect(key))?;
        if instance.is_available() {
            return Err(SkillError::NotInUse(key));
        }
        let activation = instance.activation();

        let pool = self
            .pools
            .get_mut(key.effect)
            .ok_or(SkillError::UnknownEffect(key))?;
        if !pool.release(key.slot) {
            return Err(SkillError::NotInUse(key));
        }

        self.events.publish(SkillEvent::EffectReleased {
            key,
            activation,
            reason: ReleaseReason::Forced,
        });
        Ok(())
    }

    pub fn instance(&self, key: EffectKey) -> Option<&EffectInstance> {
        self.pools.get(key.effect)?.get(key.slot)
    }

    fn instance_mut(&mut self, key: EffectKey) -> Option<&mut EffectInstance> {
        self.pools.get_mut(key.effect)?.get_mut(key.slot)
    }

    /// Instances that are between set-up and their return to the pool.
    pub fn active_instances(&self) -> impl Iterator<Item = &EffectInstance> {
        self.pools
            .iter()
            .flat_map(|pool| pool.iter())
            .filter(|instance| instance.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_instances().count()
    }

    pub fn pool_stats(&self) -> Vec<PoolStats> {
        self.pools.iter().map(ObjectPool::stats).collect()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SkillEvent> {
        self.events.subscribe(topic)
    }
}

impl Default for SkillManager {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::{BonusDamageKind, ErrorSeverity};

    use crate::presenter::RecordingPresenter;
    use crate::world::{ArenaWorld, SeededStats};

    fn manager() -> SkillManager {
        let mut manager = SkillManager::new(RuntimeConfig::default().with_pool_capacity(1));
        assert!(manager.initialize([
            (EffectPrototype::new("Fireball", 0.5), 1),
            (EffectPrototype::new("Nova", 3.0), 1),
        ]));
        manager
    }

    #[test]
    fn second_initialize_is_ignored() {
        let mut manager = manager();

        assert!(!manager.initialize([(EffectPrototype::new("Frost", 1.0), 4)]));
        assert!(!manager.is_registered("Frost"));
        assert_eq!(manager.pool_stats().len(), 2);
    }

    #[test]
    fn duplicate_names_keep_the_last_entry() {
        let mut manager = SkillManager::default();
        manager.initialize([
            (EffectPrototype::new("Fireball", 0.5), 1),
            (EffectPrototype::new("Fireball", 2.0), 3),
        ]);

        let stats = manager.pool_stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total, 3);
    }

    #[test]
    fn resolve_reserves_distinct_instances() {
        let mut manager = manager();

        let first = manager.resolve_effect("Fireball");
        let second = manager.resolve_effect("Fireball");
        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second);
        assert_eq!(manager.resolve_effect("Fireball_X"), None);
        assert_eq!(manager.pool_stats()[0].total, 2);
        assert_eq!(manager.pool_stats()[0].in_use, 2);
    }

    #[test]
    fn resolved_instances_go_back_to_their_pool() {
        let mut manager = manager();
        let mut world = ArenaWorld::new(1);
        let target = world.spawn(Vec2::new(1.0, 1.0), 100.0, 0.5, BonusDamageKind::None);
        let mut stats = SeededStats::new(10.0, 1);
        let mut presenter = RecordingPresenter::new();
        let mut env = SkillEnv::new(&mut world, &mut stats, &mut presenter);

        // Reserved then handed back unused.
        let unused = manager.resolve_effect("Fireball").expect("registered");
        assert_eq!(manager.release(unused), Ok(()));

        // Reserved then activated; the pulse completes on its own.
        let nova = manager.resolve_effect("Nova").expect("registered");
        let pulse = SkillEffectDefinition::area("Frost Nova", "Nova", 1);
        assert_eq!(
            manager.activate(nova, &pulse, Vec2::ZERO, Vec2::new(1.0, 1.0), &mut env),
            Ok(())
        );
        assert_eq!(
            manager.instance(nova).map(|i| i.transform().angle_degrees.round()),
            Some(45.0)
        );
        assert_eq!(manager.tick(0.1, &mut env), vec![nova]);

        assert!(manager.pool_stats().iter().all(|s| s.in_use == 0));
        assert_eq!(manager.pool_stats()[0].total, 1);
        assert_eq!(env.world.target(target).map(|t| t.is_alive()), Some(true));

        // Nothing left to activate once the slot is free again.
        assert_eq!(
            manager.activate(nova, &pulse, Vec2::ZERO, Vec2::new(1.0, 1.0), &mut env),
            Err(SkillError::NotInUse(nova))
        );
    }

    #[test]
    fn activate_rejects_invalid_definitions() {
        let mut manager = manager();
        let mut world = ArenaWorld::new(1);
        let mut stats = SeededStats::new(10.0, 1);
        let mut presenter = RecordingPresenter::new();
        let mut env = SkillEnv::new(&mut world, &mut stats, &mut presenter);

        let key = manager.resolve_effect("Nova").expect("registered");
        let broken = SkillEffectDefinition::area("Broken", "Nova", 0);
        assert!(matches!(
            manager.activate(key, &broken, Vec2::ZERO, Vec2::new(1.0, 0.0), &mut env),
            Err(SkillError::InvalidDefinition(_))
        ));
        assert_eq!(manager.release(key), Ok(()));
    }

    #[test]
    fn failures_do_not_consume_instances() {
        let mut manager = manager();
        let mut world = ArenaWorld::new(1);
        let mut stats = SeededStats::new(10.0, 1);
        let mut presenter = RecordingPresenter::new();
        let mut env = SkillEnv::new(&mut world, &mut stats, &mut presenter);

        let unknown = SkillEffectDefinition::projectile("Fire", "Fireball_X", 1, 5.0);
        assert_eq!(
            manager.try_use_skill(&unknown, Vec2::ZERO, &mut env),
            Err(SkillError::EffectNotRegistered {
                effect: "Fireball_X".to_string()
            })
        );

        let fire = SkillEffectDefinition::projectile("Fire", "Fireball", 1, 5.0);
        let err = manager.try_use_skill(&fire, Vec2::ZERO, &mut env);
        assert!(matches!(err, Err(SkillError::NoValidTarget { .. })));
        assert_eq!(err.map_err(|e| e.severity()), Err(ErrorSeverity::Recoverable));

        let broken = SkillEffectDefinition::area("Broken", "Nova", 0);
        assert!(matches!(
            manager.try_use_skill(&broken, Vec2::ZERO, &mut env),
            Err(SkillError::InvalidDefinition(_))
        ));

        assert!(manager.pool_stats().iter().all(|s| s.in_use == 0));
    }

    #[test]
    fn release_returns_instance_and_reports_it() {
        let mut manager = manager();
        let mut lifecycle = manager.subscribe(Topic::Lifecycle);
        let mut world = ArenaWorld::new(1);
        world.spawn(Vec2::new(5.0, 0.0), 100.0, 0.5, BonusDamageKind::None);
        let mut stats = SeededStats::new(10.0, 1);
        let mut presenter = RecordingPresenter::new();
        let mut env = SkillEnv::new(&mut world, &mut stats, &mut presenter);

        let fire = SkillEffectDefinition::projectile("Fire", "Fireball", 1, 5.0);
        let key = manager
            .try_use_skill(&fire, Vec2::ZERO, &mut env)
            .expect("skill should activate");
        assert_eq!(manager.active_count(), 1);

        assert_eq!(manager.release(key), Ok(()));
        assert_eq!(manager.active_count(), 0);
        assert!(matches!(
            lifecycle.try_recv(),
            Ok(SkillEvent::EffectActivated { .. })
        ));
        assert!(matches!(
            lifecycle.try_recv(),
            Ok(SkillEvent::EffectReleased {
                reason: ReleaseReason::Forced,
                ..
            })
        ));

        let bogus = EffectKey::new(9, crate::pool::PoolHandle(0));
        assert_eq!(manager.release(bogus), Err(SkillError::UnknownEffect(bogus)));
    }

    #[test]
    fn releasing_twice_reports_once() {
        let mut manager = manager();
        let mut lifecycle = manager.subscribe(Topic::Lifecycle);
        let mut world = ArenaWorld::new(1);
        world.spawn(Vec2::new(5.0, 0.0), 100.0, 0.5, BonusDamageKind::None);
        let mut stats = SeededStats::new(10.0, 1);
        let mut presenter = RecordingPresenter::new();
        let mut env = SkillEnv::new(&mut world, &mut stats, &mut presenter);

        let fire = SkillEffectDefinition::projectile("Fire", "Fireball", 1, 5.0);
        let key = manager
            .try_use_skill(&fire, Vec2::ZERO, &mut env)
            .expect("skill should activate");

        assert_eq!(manager.release(key), Ok(()));
        assert_eq!(manager.release(key), Err(SkillError::NotInUse(key)));

        let released = std::iter::from_fn(|| lifecycle.try_recv().ok())
            .filter(|event| matches!(event, SkillEvent::EffectReleased { .. }))
            .count();
        assert_eq!(released, 1);
    }
}
