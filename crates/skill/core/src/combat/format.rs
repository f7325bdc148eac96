//! Damage text formatting.
//!
//! Large numbers are abbreviated the way idle games show currency:
//! `999`, `1.23K`, `45.6M`, `7B`, `1T`, then two-letter units `aa`, `ab`, ...

use crate::geometry::Vec2;

const NAMED_UNITS: [&str; 5] = ["", "K", "M", "B", "T"];
const LETTERS: u32 = 26;

/// Text handed to the presenter for one hit.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageText {
    pub value: String,
    pub position: Vec2,
    pub is_critical: bool,
}

/// Formats a damage magnitude with at most two decimals, truncated.
pub fn format_damage(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_damage(-value));
    }

    let mut scaled = value;
    let mut unit = 0usize;
    let max_unit = NAMED_UNITS.len() + (LETTERS * LETTERS) as usize - 1;
    while scaled >= 1000.0 && unit < max_unit {
        scaled /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{}", scaled.floor());
    }

    // Epsilon keeps 1.15 from flooring to 1.14.
    let truncated = ((scaled * 100.0) + 1e-9).floor() / 100.0;
    let digits = format!("{truncated:.2}");
    let digits = digits.trim_end_matches('0').trim_end_matches('.');
    format!("{digits}{}", unit_suffix(unit))
}

fn unit_suffix(unit: usize) -> String {
    if let Some(named) = NAMED_UNITS.get(unit) {
        return (*named).to_string();
    }
    let index = (unit - NAMED_UNITS.len()) as u32;
    let first = char::from_u32('a' as u32 + index / LETTERS).unwrap_or('z');
    let second = char::from_u32('a' as u32 + index % LETTERS).unwrap_or('z');
    format!("{first}{second}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_whole_numbers() {
        assert_eq!(format_damage(0.0), "0");
        assert_eq!(format_damage(42.9), "42");
        assert_eq!(format_damage(999.99), "999");
    }

    #[test]
    fn named_units() {
        assert_eq!(format_damage(1_000.0), "1K");
        assert_eq!(format_damage(1_234.0), "1.23K");
        assert_eq!(format_damage(1_150.0), "1.15K");
        assert_eq!(format_damage(45_600_000.0), "45.6M");
        assert_eq!(format_damage(7e9), "7B");
        assert_eq!(format_damage(1e12), "1T");
    }

    #[test]
    fn letter_units_follow_trillions() {
        assert_eq!(format_damage(1e15), "1aa");
        assert_eq!(format_damage(2.5e18), "2.5ab");
    }

    #[test]
    fn never_rounds_up_into_next_unit() {
        assert_eq!(format_damage(999_999.0), "999.99K");
    }

    #[test]
    fn odd_inputs() {
        assert_eq!(format_damage(f64::NAN), "0");
        assert_eq!(format_damage(-1_500.0), "-1.5K");
    }
}
