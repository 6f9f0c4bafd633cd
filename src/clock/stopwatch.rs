//! Pausable elapsed-time counter.

use std::time::{Duration, Instant};

use super::format::TimeFormat;

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) counting. No-op while already running.
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Total time counted so far, including the running stretch
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.accumulated + started.elapsed(),
            None => self.accumulated,
        }
    }

    /// Stop counting and render the elapsed time.
    ///
    /// A stopwatch that was never started is started first, so the result is
    /// always well-defined.
    pub fn stop(&mut self, format: TimeFormat) -> String {
        self.start();
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
        render(self.accumulated, format)
    }

    /// Stop and zero the counter
    pub fn reset(&mut self) {
        self.started = None;
        self.accumulated = Duration::ZERO;
    }
}

/// Render a duration as hours, minutes and seconds. Hours are not wrapped at 24.
fn render(elapsed: Duration, format: TimeFormat) -> String {
    let total = elapsed.as_secs();
    format.render_hms(total / 3600, (total % 3600) / 60, total % 60)
}
