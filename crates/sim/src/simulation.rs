//! Headless combat loop driving the skill manager.
use anyhow::{Context, Result};
use skill_content::{CatalogLoader, EffectEntry, SkillLoader};
use skill_core::{BonusDamageKind, PcgRng, SkillEffectDefinition, Vec2, compute_seed};
use skill_runtime::{
    ArenaWorld, EffectPhase, EventBus, FixedTimestep, PoolStats, SeededStats, SkillEnv,
    SkillManager, TracingPresenter,
};
use tracing::{debug, info};

use crate::config::SimConfig;

const ENEMY_RADIUS: f32 = 0.5;
const BONUS_KINDS: [BonusDamageKind; 4] = [
    BonusDamageKind::None,
    BonusDamageKind::Normal,
    BonusDamageKind::Elite,
    BonusDamageKind::Boss,
];

/// Tallies of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimReport {
    pub steps: u64,
    pub casts: u64,
    pub failed_casts: u64,
    pub contact_engagements: u64,
    pub deactivations: u64,
    pub releases: u64,
    pub kills: u64,
}

pub struct Simulation {
    config: SimConfig,
    manager: SkillManager,
    world: ArenaWorld,
    stats: SeededStats,
    presenter: TracingPresenter,
    skills: Vec<SkillEffectDefinition>,
    cooldowns: Vec<f32>,
    clock: FixedTimestep,
    caster: Vec2,
    spawn_rng: PcgRng,
    report: SimReport,
}

impl Simulation {
    /// Loads content and builds a ready-to-run simulation.
    pub fn from_config(config: SimConfig) -> Result<Self> {
        let (effects, skills) = load_content(&config)?;

        let mut manager = SkillManager::new(config.runtime.clone());
        let default_capacity = config.runtime.skill.pool_capacity;
        manager.initialize(
            effects
                .into_iter()
                .map(|entry| entry.into_pool_entry(default_capacity)),
        );

        let stats = SeededStats::new(config.base_damage, compute_seed(config.seed, 1))
            .with_crit(config.crit_chance, 2.0)
            .with_bonus(BonusDamageKind::Elite, 25.0)
            .with_bonus(BonusDamageKind::Boss, 50.0);

        let mut sim = Self {
            manager,
            world: ArenaWorld::new(compute_seed(config.seed, 2)),
            stats,
            presenter: TracingPresenter,
            cooldowns: vec![0.0; skills.len()],
            skills,
            clock: FixedTimestep::new(config.runtime.fixed_step_secs),
            caster: Vec2::ZERO,
            spawn_rng: PcgRng::new(compute_seed(config.seed, 3)),
            report: SimReport::default(),
            config,
        };
        for _ in 0..sim.config.enemies {
            sim.spawn_enemy();
        }
        Ok(sim)
    }

    pub fn events(&self) -> &EventBus {
        self.manager.events()
    }

    pub fn pool_stats(&self) -> Vec<PoolStats> {
        self.manager.pool_stats()
    }

    /// Runs for the configured duration, frame by frame.
    pub fn run(&mut self) -> &SimReport {
        let frames = (self.config.duration_secs / self.config.frame_secs).ceil() as u64;
        info!(
            target: "skill::sim",
            frames,
            skills = self.skills.len(),
            enemies = self.world.alive_count(),
            "Simulation started"
        );

        for _ in 0..frames {
            let steps = self.clock.advance(self.config.frame_secs);
            for _ in 0..steps {
                self.step(self.clock.step());
            }
        }
        &self.report
    }

    /// One fixed simulation step.
    pub fn step(&mut self, dt: f32) {
        self.cast_ready_skills(dt);
        self.feed_contacts();
        self.deactivate_out_of_bounds();

        let released = {
            let mut env = SkillEnv::new(&mut self.world, &mut self.stats, &mut self.presenter);
            self.manager.tick(dt, &mut env)
        };
        for key in released {
            self.world.forget_contacts(key);
            self.report.releases += 1;
        }

        let killed = self.world.despawn_dead();
        self.report.kills += killed as u64;
        for _ in 0..killed {
            self.spawn_enemy();
        }
        self.report.steps += 1;
    }

    fn cast_ready_skills(&mut self, dt: f32) {
        for (index, definition) in self.skills.iter().enumerate() {
            self.cooldowns[index] -= dt;
            if self.cooldowns[index] > 0.0 {
                continue;
            }
            self.cooldowns[index] = self.config.cast_interval_secs;

            let mut env = SkillEnv::new(&mut self.world, &mut self.stats, &mut self.presenter);
            if self.manager.use_skill(definition, self.caster, &mut env) {
                self.report.casts += 1;
            } else {
                self.report.failed_casts += 1;
            }
        }
    }

    fn feed_contacts(&mut self) {
        let moving: Vec<_> = self
            .manager
            .active_instances()
            .filter(|instance| instance.phase() == EffectPhase::Moving)
            .map(|instance| {
                (
                    instance.key(),
                    instance.transform().position,
                    instance.prototype().volume,
                )
            })
            .collect();

        for (key, position, volume) in moving {
            for collider in self.world.contacts_entered(key, position, &volume) {
                let mut env =
                    SkillEnv::new(&mut self.world, &mut self.stats, &mut self.presenter);
                if self.manager.on_collision_enter(key, &collider, &mut env) {
                    self.report.contact_engagements += 1;
                }
            }
        }
    }

    fn deactivate_out_of_bounds(&mut self) {
        let escaped: Vec<_> = self
            .manager
            .active_instances()
            .filter(|instance| {
                instance.is_enabled()
                    && instance.phase() == EffectPhase::Moving
                    && instance.transform().position.distance(self.caster)
                        > self.config.arena_radius
            })
            .map(|instance| instance.key())
            .collect();

        for key in escaped {
            if self.manager.request_deactivation(key) {
                debug!(target: "skill::sim", effect = %key, "Projectile left the arena");
                self.report.deactivations += 1;
            }
        }
    }

    fn spawn_enemy(&mut self) {
        let min = 2.0_f32;
        let max = (self.config.arena_radius * 0.8).max(min);
        let distance = min + (max - min) * self.spawn_rng.next_f64() as f32;
        let angle = 360.0 * self.spawn_rng.next_f64() as f32;
        let position = self.caster + Vec2::from_angle_degrees(angle) * distance;
        let bonus = BONUS_KINDS[self.spawn_rng.below(BONUS_KINDS.len())];

        let id = self
            .world
            .spawn(position, self.config.enemy_hp, ENEMY_RADIUS, bonus);
        debug!(target: "skill::sim", %id, %position, %bonus, "Enemy spawned");
    }
}

fn load_content(config: &SimConfig) -> Result<(Vec<EffectEntry>, Vec<SkillEffectDefinition>)> {
    match &config.content_dir {
        Some(dir) => {
            let effects = CatalogLoader::load(&dir.join("effects.ron"))
                .context("Failed to load effect catalog")?;
            let skills =
                SkillLoader::load(&dir.join("skills.toml")).context("Failed to load skills")?;
            info!(target: "skill::sim", dir = %dir.display(), "Loaded content");
            Ok((effects, skills))
        }
        None => {
            info!(target: "skill::sim", "Using built-in content");
            Ok((CatalogLoader::builtin()?, SkillLoader::builtin()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_run() -> SimConfig {
        SimConfig {
            duration_secs: 5.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn builtin_content_produces_hits() {
        let mut sim = Simulation::from_config(short_run()).expect("simulation");
        let report = sim.run().clone();

        assert!(report.casts > 0);
        assert!(report.contact_engagements > 0);
        assert!(report.steps > 0);
        assert!(report.releases > 0);
        assert_eq!(sim.world.alive_count(), sim.config.enemies);
    }

    #[test]
    fn same_seed_same_outcome() {
        let mut a = Simulation::from_config(short_run()).expect("simulation");
        let mut b = Simulation::from_config(short_run()).expect("simulation");

        assert_eq!(a.run(), b.run());
    }

    #[test]
    fn missing_content_dir_fails() {
        let config = SimConfig {
            content_dir: Some("/nonexistent/content".into()),
            ..SimConfig::default()
        };
        assert!(Simulation::from_config(config).is_err());
    }
}
