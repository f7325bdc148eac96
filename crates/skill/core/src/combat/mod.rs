//! Skill damage resolution.
//!
//! Pure functions: the formula, one roll against one target, and the text a
//! presenter shows for it. Applying damage and pacing the texts is the
//! runtime's job.
//!
//! # Formula
//!
//! ```text
//! damage = base_skill_damage × (1 + bonus_stat / 100)
//! ```
//!
//! `base_skill_damage` and its critical flag come from the caster's stat
//! resolver; `bonus_stat` is the caster's stat for the target's bonus kind.

pub mod damage;
pub mod format;

pub use damage::{DamageEvent, calculate_skill_damage, roll_damage};
pub use format::{DamageText, format_damage};
