//! Beat clock and tick scheduling.
//!
//! The host event loop only tells us how much wall time has elapsed. The
//! [`BeatClock`] turns that into a continuous beat-phase; the [`Scheduler`]
//! decides on each frame whether a tick is due.

use std::time::{Duration, Instant};

/// Converts elapsed wall time into a beat-phase at a fixed tempo.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use showtime_core::BeatClock;
///
/// let clock = BeatClock::new(120.0);
/// // 120 BPM is two beats per second.
/// assert!((clock.phase_at(Duration::from_millis(1500)) - 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatClock {
    bpm: f64,
}

impl BeatClock {
    /// Creates a clock at `bpm` beats per minute.
    pub fn new(bpm: f64) -> Self {
        Self { bpm }
    }

    /// Tempo in beats per minute.
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Beats elapsed after `elapsed` wall time.
    pub fn phase_at(&self, elapsed: Duration) -> f64 {
        elapsed.as_secs_f64() * self.bpm / 60.0
    }
}

/// Fires at most one tick per frame as the beat-phase crosses integer
/// boundaries.
///
/// When frames arrive late and several boundaries have been crossed, the
/// scheduler still fires only one tick per frame and catches up over the
/// following frames instead of dropping or batching beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    next_step: u64,
}

impl Scheduler {
    /// Creates a scheduler whose first tick fires after the beat following
    /// `phase`.
    pub fn starting_at(phase: f64) -> Self {
        Self {
            next_step: phase.max(0.0).floor() as u64 + 1,
        }
    }

    /// The beat boundary the next tick waits for.
    pub fn next_step(&self) -> u64 {
        self.next_step
    }

    /// Handles one frame at beat-phase `phase`. Returns whether a tick is due.
    pub fn on_frame(&mut self, phase: f64) -> bool {
        if phase > self.next_step as f64 {
            self.next_step += 1;
            true
        } else {
            false
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::starting_at(0.0)
    }
}

/// Measures elapsed wall time from a fixed start.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    /// Starts measuring now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since [`start`](Self::start).
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_scales_with_bpm() {
        let clock = BeatClock::new(60.0);
        assert!((clock.phase_at(Duration::from_secs(3)) - 3.0).abs() < 1e-9);
        let clock = BeatClock::new(130.0);
        assert!((clock.phase_at(Duration::from_secs(60)) - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_tick_after_first_boundary() {
        let mut sched = Scheduler::default();
        assert_eq!(sched.next_step(), 1);
        assert!(!sched.on_frame(0.5));
        assert!(!sched.on_frame(1.0));
        assert!(sched.on_frame(1.01));
        assert!(!sched.on_frame(1.5));
        assert!(sched.on_frame(2.2));
    }

    #[test]
    fn test_at_most_one_tick_per_frame() {
        let mut sched = Scheduler::default();
        // A long stall crosses three boundaries at once.
        assert!(sched.on_frame(4.5));
        assert!(sched.on_frame(4.5));
        assert!(sched.on_frame(4.6));
        assert!(sched.on_frame(4.7));
        assert!(!sched.on_frame(4.8));
        assert_eq!(sched.next_step(), 5);
    }

    #[test]
    fn test_starting_mid_beat() {
        let sched = Scheduler::starting_at(7.3);
        assert_eq!(sched.next_step(), 8);
    }

    #[test]
    fn test_wall_clock_is_monotonic() {
        let clock = WallClock::start();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
