// Multi-click detection: N primary clicks inside one window fire once.
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct ClickCounter {
    window: Duration,
    threshold: u32,
    count: u32,
    started: Option<Instant>,
}

impl ClickCounter {
    pub fn new(window: Duration, threshold: u32) -> Self {
        Self {
            window,
            threshold,
            count: 0,
            started: None,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.started = None;
    }

    /// Records a click and returns true when the threshold is reached.
    /// The window starts at the first click and is not extended by later ones.
    pub fn register(&mut self, now: Instant) -> bool {
        if let Some(started) = self.started {
            if now.saturating_duration_since(started) >= self.window {
                self.reset();
            }
        }
        if self.started.is_none() {
            self.started = Some(now);
        }
        self.count += 1;
        if self.count >= self.threshold {
            self.reset();
            return true;
        }
        false
    }
}
