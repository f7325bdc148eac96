/// Skill timing constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillConfig {
    /// Seconds a deactivated projectile keeps flying before it returns to its pool.
    pub disable_after_secs: f32,
    /// Gap between two damage texts of the same engagement.
    pub damage_text_delay_secs: f32,
    /// Instances pre-created per effect when a pool is built.
    pub pool_capacity: usize,
}

impl SkillConfig {
    // ===== compile-time constants =====
    pub const DISABLE_AFTER_SECS: f32 = 10.0;
    pub const DAMAGE_TEXT_DELAY_SECS: f32 = 0.1;
    pub const DEFAULT_POOL_CAPACITY: usize = 8;

    /// Upper bound on hits per engagement accepted from content files.
    pub const MAX_ATTACK_COUNT: u32 = 64;

    pub fn new() -> Self {
        Self {
            disable_after_secs: Self::DISABLE_AFTER_SECS,
            damage_text_delay_secs: Self::DAMAGE_TEXT_DELAY_SECS,
            pool_capacity: Self::DEFAULT_POOL_CAPACITY,
        }
    }

    pub fn with_pool_capacity(pool_capacity: usize) -> Self {
        Self {
            pool_capacity,
            ..Self::new()
        }
    }
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self::new()
    }
}
