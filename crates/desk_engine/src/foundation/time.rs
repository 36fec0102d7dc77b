//! Time measurement utilities

use std::time::{Duration, Instant};

/// Convert a duration to fractional milliseconds
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Accumulating stopwatch for frame and section timing
///
/// Each `start`/`stop` pair adds to the accumulated total; `laps` counts how
/// many pairs were completed since the last reset.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
    laps: u32,
    last_lap: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
            laps: 0,
            last_lap: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start (or restart) the current lap
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the current lap and accumulate it
    ///
    /// Returns the lap duration, or `None` if the stopwatch was not running.
    pub fn stop(&mut self) -> Option<Duration> {
        let start = self.start_time.take()?;
        let lap = start.elapsed();
        self.elapsed += lap;
        self.last_lap = lap;
        self.laps += 1;
        Some(lap)
    }

    /// Reset the stopwatch to zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Total accumulated time, including a running lap
    pub fn elapsed(&self) -> Duration {
        let running = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + running
    }

    /// Total accumulated time in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        as_millis_f64(self.elapsed())
    }

    /// Duration of the most recently completed lap
    pub fn last_lap(&self) -> Duration {
        self.last_lap
    }

    /// Number of completed laps
    pub fn laps(&self) -> u32 {
        self.laps
    }

    /// Check if a lap is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut sw = Stopwatch::new();
        assert!(sw.stop().is_none());
        assert_eq!(sw.laps(), 0);
        assert_eq!(sw.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_laps_accumulate() {
        let mut sw = Stopwatch::start_new();
        assert!(sw.is_running());
        let first = sw.stop().unwrap();
        sw.start();
        let second = sw.stop().unwrap();

        assert_eq!(sw.laps(), 2);
        assert_eq!(sw.last_lap(), second);
        assert_eq!(sw.elapsed(), first + second);

        sw.reset();
        assert_eq!(sw.laps(), 0);
        assert!(!sw.is_running());
    }
}
