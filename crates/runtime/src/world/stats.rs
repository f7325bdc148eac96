//! Deterministic stat resolver for headless runs.

use std::collections::HashMap;

use skill_core::{BonusDamageKind, DamageRoll, PcgRng, StatCategory, StatResolver};

/// Flat skill attack with a seeded critical roll and per-kind bonus percentages.
#[derive(Clone, Debug)]
pub struct SeededStats {
    base_damage: f64,
    crit_chance: f64,
    crit_multiplier: f64,
    bonuses: HashMap<BonusDamageKind, f64>,
    rng: PcgRng,
    rolls: usize,
}

impl SeededStats {
    pub fn new(base_damage: f64, seed: u64) -> Self {
        Self {
            base_damage,
            crit_chance: 0.0,
            crit_multiplier: 2.0,
            bonuses: HashMap::new(),
            rng: PcgRng::new(seed),
            rolls: 0,
        }
    }

    pub fn with_crit(mut self, chance: f64, multiplier: f64) -> Self {
        self.crit_chance = chance.clamp(0.0, 1.0);
        self.crit_multiplier = multiplier;
        self
    }

    /// Sets the bonus percentage applied against targets of `kind`.
    pub fn with_bonus(mut self, kind: BonusDamageKind, percent: f64) -> Self {
        self.bonuses.insert(kind, percent);
        self
    }

    /// Number of `final_skill_damage` calls served.
    pub fn rolls(&self) -> usize {
        self.rolls
    }
}

impl StatResolver for SeededStats {
    fn final_skill_damage(&mut self) -> DamageRoll {
        self.rolls += 1;
        if self.rng.chance(self.crit_chance) {
            DamageRoll::new(self.base_damage * self.crit_multiplier, true)
        } else {
            DamageRoll::new(self.base_damage, false)
        }
    }

    fn stat(&mut self, category: StatCategory, kind: BonusDamageKind) -> f64 {
        match category {
            StatCategory::None => self.bonuses.get(&kind).copied().unwrap_or(0.0),
            StatCategory::SkillAttack => self.base_damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_crit_chance_every_roll_is_flat() {
        let mut stats = SeededStats::new(40.0, 3);

        for _ in 0..20 {
            assert_eq!(stats.final_skill_damage(), DamageRoll::new(40.0, false));
        }
        assert_eq!(stats.rolls(), 20);
    }

    #[test]
    fn guaranteed_crit_multiplies_base() {
        let mut stats = SeededStats::new(40.0, 3).with_crit(1.0, 2.5);

        assert_eq!(stats.final_skill_damage(), DamageRoll::new(100.0, true));
    }

    #[test]
    fn bonus_lookup_is_keyed_by_kind() {
        let mut stats = SeededStats::new(10.0, 0).with_bonus(BonusDamageKind::Boss, 35.0);

        assert_eq!(stats.stat(StatCategory::None, BonusDamageKind::Boss), 35.0);
        assert_eq!(stats.stat(StatCategory::None, BonusDamageKind::Elite), 0.0);
        assert_eq!(stats.stat(StatCategory::SkillAttack, BonusDamageKind::None), 10.0);
    }
}
