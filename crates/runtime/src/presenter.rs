//! Damage text presentation seam.
use skill_core::DamageText;
use tracing::info;

/// Receives damage texts as their display slot comes up.
pub trait Presenter {
    fn show_damage_text(&mut self, text: &DamageText);
}

/// Writes every damage text to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn show_damage_text(&mut self, text: &DamageText) {
        info!(
            target: "skill::presenter",
            value = %text.value,
            critical = text.is_critical,
            position = %text.position,
            "Damage"
        );
    }
}

/// A damage text stamped with the presenter clock at emission.
#[derive(Clone, Debug, PartialEq)]
pub struct ShownText {
    pub at: f64,
    pub text: DamageText,
}

/// Keeps every emission together with the time it happened.
///
/// The clock only moves through [`advance`](Self::advance); drivers call it
/// once per tick with the same `dt` they pass to the manager.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    clock: f64,
    shown: Vec<ShownText>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.clock += f64::from(dt);
    }

    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn shown(&self) -> &[ShownText] {
        &self.shown
    }

    pub fn values(&self) -> Vec<&str> {
        self.shown.iter().map(|s| s.text.value.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn show_damage_text(&mut self, text: &DamageText) {
        self.shown.push(ShownText {
            at: self.clock,
            text: text.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::Vec2;

    fn text(value: &str) -> DamageText {
        DamageText {
            value: value.to_string(),
            position: Vec2::ZERO,
            is_critical: false,
        }
    }

    #[test]
    fn recording_stamps_current_clock() {
        let mut presenter = RecordingPresenter::new();
        presenter.show_damage_text(&text("10"));
        presenter.advance(0.25);
        presenter.show_damage_text(&text("20"));

        assert_eq!(presenter.values(), vec!["10", "20"]);
        assert_eq!(presenter.shown()[0].at, 0.0);
        assert_eq!(presenter.shown()[1].at, 0.25);
    }
}
