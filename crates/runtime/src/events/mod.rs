//! Topic-based event bus for skill events.
//!
//! Effects publish what happened to them (activation, engagements, hits,
//! texts, release). Publishing is best-effort: with no subscriber on a
//! topic the event is dropped.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{ReleaseReason, SkillEvent};
