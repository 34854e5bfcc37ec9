use std::time::{Duration, Instant};

/// Text that temporarily shows a flash message, then falls back to its resting text.
#[derive(Clone, Debug)]
pub struct TransientLabel {
    resting: &'static str,
    flash: Option<(String, Instant)>,
}

impl TransientLabel {
    pub fn new(resting: &'static str) -> Self {
        Self {
            resting,
            flash: None,
        }
    }

    pub fn text(&self) -> &str {
        match &self.flash {
            Some((text, _)) => text.as_str(),
            None => self.resting,
        }
    }

    pub fn flash(&mut self, text: impl Into<String>, now: Instant, duration: Duration) {
        self.flash = Some((text.into(), now + duration));
    }

    pub fn tick(&mut self, now: Instant) {
        if matches!(&self.flash, Some((_, until)) if now >= *until) {
            self.flash = None;
        }
    }
}
