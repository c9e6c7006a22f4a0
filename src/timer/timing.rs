//! Progress snapshots

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::serde_defaults::duration_ms;

/// Where a timer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not running and not yet at `duration`
    Idle,
    /// A tick is scheduled
    Running,
    /// `elapsed >= duration` and not running
    Completed,
}

impl Phase {
    pub fn of(elapsed: Duration, duration: Duration, running: bool) -> Self {
        if running {
            Phase::Running
        } else if elapsed >= duration {
            Phase::Completed
        } else {
            Phase::Idle
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Completion ratio rounded to three decimals.
///
/// Only a timer whose `elapsed` has reached `duration` reports `1.0`;
/// anything short of that is capped at `0.999` so rounding never reports
/// completion early. A zero duration is always complete.
pub fn percent(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() || elapsed >= duration {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ((ratio * 1000.0).round() / 1000.0).min(0.999)
}

/// Point-in-time view of a timer, handed to callbacks and returned by
/// `timing()`.
///
/// The `onIncrement` snapshot of the tick that reaches `duration` already
/// reports [`Phase::Completed`] and a percent of `1.0`, same as the
/// `onComplete` snapshot that follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timing {
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
    #[serde(with = "duration_ms")]
    pub remaining: Duration,
    #[serde(with = "duration_ms")]
    pub increment: Duration,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    pub running: bool,
    pub phase: Phase,
    pub percent: f64,
}

impl Timing {
    pub fn new(elapsed: Duration, increment: Duration, duration: Duration, running: bool) -> Self {
        Self {
            elapsed,
            remaining: duration.saturating_sub(elapsed),
            increment,
            duration,
            running,
            phase: Phase::of(elapsed, duration, running),
            percent: percent(elapsed, duration),
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}ms/{}ms (+{}ms per tick, {:.1}%)",
            self.phase,
            self.elapsed.as_millis(),
            self.duration.as_millis(),
            self.increment.as_millis(),
            self.percent * 100.0
        )
    }
}
