//! Runtime configuration structures and loaders.
use std::env;

use skill_core::SkillConfig;

/// What the disable timer means for a projectile.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TimeoutPolicy {
    /// The timer only finalizes a deactivation that was already requested.
    /// An enabled projectile keeps flying regardless of elapsed time.
    #[default]
    GracePeriod,
    /// The timer returns the projectile to its pool even while enabled.
    HardCap,
}

/// Runtime configuration shared by the manager and its effect pools.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub skill: SkillConfig,
    pub timeout_policy: TimeoutPolicy,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Simulation step used by fixed-timestep drivers.
    pub fixed_step_secs: f32,
}

impl RuntimeConfig {
    pub const DEFAULT_FIXED_STEP_SECS: f32 = 1.0 / 60.0;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKILL_POOL_CAPACITY` - Instances pre-created per effect (default: 8)
    /// - `SKILL_DISABLE_AFTER_SECS` - Projectile disable timer (default: 10.0)
    /// - `SKILL_TEXT_DELAY_SECS` - Gap between damage texts (default: 0.1)
    /// - `SKILL_TIMEOUT_POLICY` - `grace_period` or `hard_cap` (default: grace_period)
    /// - `SKILL_EVENT_BUFFER` - Event bus capacity per topic (default: 256)
    /// - `SKILL_FIXED_STEP_SECS` - Fixed simulation step (default: 1/60)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("SKILL_POOL_CAPACITY") {
            config.skill.pool_capacity = capacity;
        }

        if let Some(secs) = read_env::<f32>("SKILL_DISABLE_AFTER_SECS")
            && secs.is_finite()
            && secs >= 0.0
        {
            config.skill.disable_after_secs = secs;
        }

        if let Some(secs) = read_env::<f32>("SKILL_TEXT_DELAY_SECS")
            && secs.is_finite()
            && secs >= 0.0
        {
            config.skill.damage_text_delay_secs = secs;
        }

        if let Some(policy) = read_env::<TimeoutPolicy>("SKILL_TIMEOUT_POLICY") {
            config.timeout_policy = policy;
        }

        if let Some(capacity) = read_env::<usize>("SKILL_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(step) = read_env::<f32>("SKILL_FIXED_STEP_SECS")
            && step.is_finite()
            && step > 0.0
        {
            config.fixed_step_secs = step;
        }

        config
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.skill.pool_capacity = capacity;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            skill: SkillConfig::default(),
            timeout_policy: TimeoutPolicy::default(),
            event_buffer_size: 256,
            fixed_step_secs: Self::DEFAULT_FIXED_STEP_SECS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_skill_constants() {
        let config = RuntimeConfig::default();

        assert_eq!(config.skill.disable_after_secs, 10.0);
        assert_eq!(config.skill.damage_text_delay_secs, 0.1);
        assert_eq!(config.timeout_policy, TimeoutPolicy::GracePeriod);
    }

    #[test]
    fn timeout_policy_parses_from_text() {
        assert_eq!("hard_cap".parse::<TimeoutPolicy>(), Ok(TimeoutPolicy::HardCap));
        assert_eq!(
            "Grace_Period".parse::<TimeoutPolicy>(),
            Ok(TimeoutPolicy::GracePeriod)
        );
        assert!("forever".parse::<TimeoutPolicy>().is_err());
    }
}
