//! Simulation configuration from environment variables.
use std::env;
use std::path::PathBuf;

use skill_runtime::RuntimeConfig;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub runtime: RuntimeConfig,
    /// Directory holding `effects.ron` and `skills.toml`. Built-in content when unset.
    pub content_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub seed: u64,
    pub enemies: usize,
    pub enemy_hp: f64,
    pub base_damage: f64,
    pub crit_chance: f64,
    pub duration_secs: f32,
    pub frame_secs: f32,
    pub cast_interval_secs: f32,
    /// Projectiles leaving this radius around the caster are deactivated.
    pub arena_radius: f32,
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Reads every `SKILL_*` variable through [`RuntimeConfig::from_env`] plus:
    /// - `SIM_CONTENT_DIR` - Content directory (default: built-in content)
    /// - `SIM_LOG_DIR` - Log and event journal directory (default: `logs`)
    /// - `SIM_SEED` - Seed for crits and target selection (default: 42)
    /// - `SIM_ENEMIES` - Enemies kept alive in the arena (default: 6)
    /// - `SIM_ENEMY_HP` - Health of each spawned enemy (default: 120)
    /// - `SIM_BASE_DAMAGE` - Final skill damage before bonuses (default: 25)
    /// - `SIM_CRIT_CHANCE` - Critical hit probability (default: 0.2)
    /// - `SIM_DURATION_SECS` - Simulated time (default: 20)
    /// - `SIM_FRAME_SECS` - Frame delta fed to the fixed timestep (default: 1/30)
    /// - `SIM_CAST_INTERVAL_SECS` - Cooldown of every skill (default: 1.5)
    /// - `SIM_ARENA_RADIUS` - Arena radius around the caster (default: 12)
    pub fn from_env() -> Self {
        let mut config = Self {
            runtime: RuntimeConfig::from_env(),
            ..Self::default()
        };

        config.content_dir = env::var("SIM_CONTENT_DIR").ok().map(PathBuf::from);
        if let Ok(dir) = env::var("SIM_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }
        if let Some(enemies) = read_env::<usize>("SIM_ENEMIES") {
            config.enemies = enemies;
        }
        if let Some(hp) = read_env::<f64>("SIM_ENEMY_HP")
            && hp > 0.0
        {
            config.enemy_hp = hp;
        }
        if let Some(damage) = read_env::<f64>("SIM_BASE_DAMAGE") {
            config.base_damage = damage;
        }
        if let Some(chance) = read_env::<f64>("SIM_CRIT_CHANCE") {
            config.crit_chance = chance.clamp(0.0, 1.0);
        }
        if let Some(secs) = read_env::<f32>("SIM_DURATION_SECS")
            && secs >= 0.0
        {
            config.duration_secs = secs;
        }
        if let Some(secs) = read_env::<f32>("SIM_FRAME_SECS")
            && secs > 0.0
        {
            config.frame_secs = secs;
        }
        if let Some(secs) = read_env::<f32>("SIM_CAST_INTERVAL_SECS")
            && secs > 0.0
        {
            config.cast_interval_secs = secs;
        }
        if let Some(radius) = read_env::<f32>("SIM_ARENA_RADIUS")
            && radius > 0.0
        {
            config.arena_radius = radius;
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            content_dir: None,
            log_dir: PathBuf::from("logs"),
            seed: 42,
            enemies: 6,
            enemy_hp: 120.0,
            base_damage: 25.0,
            crit_chance: 0.2,
            duration_secs: 20.0,
            frame_secs: 1.0 / 30.0,
            cast_interval_secs: 1.5,
            arena_radius: 12.0,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
