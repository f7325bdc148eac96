//! Damage calculation.

use crate::stats::{StatCategory, StatResolver};
use crate::target::{BonusDamageKind, TargetId};

/// One computed hit, produced in batches of `attack_count` per engagement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageEvent {
    pub target: TargetId,
    pub magnitude: f64,
    pub is_critical: bool,
}

/// Applies the bonus-damage percentage to a base value.
pub fn calculate_skill_damage(base_damage: f64, bonus_percent: f64) -> f64 {
    base_damage * (1.0 + bonus_percent / 100.0)
}

/// Rolls one hit of skill damage against `target`.
///
/// Both stat lookups hit the resolver on every call.
pub fn roll_damage(
    target: TargetId,
    bonus_kind: BonusDamageKind,
    stats: &mut (impl StatResolver + ?Sized),
) -> DamageEvent {
    let roll = stats.final_skill_damage();
    let bonus = stats.stat(StatCategory::None, bonus_kind);

    DamageEvent {
        target,
        magnitude: calculate_skill_damage(roll.magnitude, bonus),
        is_critical: roll.is_critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DamageRoll;

    struct ScriptedStats {
        rolls: Vec<DamageRoll>,
        boss_bonus: f64,
        lookups: usize,
    }

    impl StatResolver for ScriptedStats {
        fn final_skill_damage(&mut self) -> DamageRoll {
            self.lookups += 1;
            self.rolls.remove(0)
        }

        fn stat(&mut self, category: StatCategory, kind: BonusDamageKind) -> f64 {
            self.lookups += 1;
            assert_eq!(category, StatCategory::None);
            match kind {
                BonusDamageKind::Boss => self.boss_bonus,
                _ => 0.0,
            }
        }
    }

    #[test]
    fn bonus_is_a_percentage_on_top() {
        assert_eq!(calculate_skill_damage(200.0, 50.0), 300.0);
        assert_eq!(calculate_skill_damage(200.0, 0.0), 200.0);
        assert_eq!(calculate_skill_damage(80.0, -25.0), 60.0);
    }

    #[test]
    fn roll_uses_target_bonus_kind_and_keeps_crit() {
        let mut stats = ScriptedStats {
            rolls: vec![DamageRoll::new(100.0, true), DamageRoll::new(100.0, false)],
            boss_bonus: 20.0,
            lookups: 0,
        };

        let boss_hit = roll_damage(TargetId(1), BonusDamageKind::Boss, &mut stats);
        let normal_hit = roll_damage(TargetId(2), BonusDamageKind::Normal, &mut stats);

        assert_eq!(boss_hit.magnitude, 120.0);
        assert!(boss_hit.is_critical);
        assert_eq!(normal_hit.magnitude, 100.0);
        assert!(!normal_hit.is_critical);
        // No caching: two lookups per roll.
        assert_eq!(stats.lookups, 4);
    }
}
