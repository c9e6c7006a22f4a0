//! Lifecycle listener slots
//!
//! Each slot is optional. Listeners run for the transition they are named
//! after, once the timer's lock is released, and receive a [`Timing`]
//! snapshot taken when the transition was applied.

use std::fmt;
use std::sync::Arc;

use super::Timing;

/// A lifecycle listener.
pub type Callback = Arc<dyn Fn(&Timing) + Send + Sync>;

#[derive(Clone, Default)]
pub struct TimerCallbacks {
    pub on_start: Option<Callback>,
    pub on_increment: Option<Callback>,
    pub on_complete: Option<Callback>,
    pub on_stop: Option<Callback>,
    pub on_reset: Option<Callback>,
}

impl TimerCallbacks {
    /// Replace every slot that is set in `other`, leaving the rest untouched.
    pub fn merge(&mut self, other: TimerCallbacks) {
        if other.on_start.is_some() {
            self.on_start = other.on_start;
        }
        if other.on_increment.is_some() {
            self.on_increment = other.on_increment;
        }
        if other.on_complete.is_some() {
            self.on_complete = other.on_complete;
        }
        if other.on_stop.is_some() {
            self.on_stop = other.on_stop;
        }
        if other.on_reset.is_some() {
            self.on_reset = other.on_reset;
        }
    }
}

/// A listener call captured at a transition, delivered once the timer's
/// state lock has been released.
pub(crate) type Notice = (Callback, Timing);

/// Invoke queued listeners in the order their transitions happened.
pub(crate) fn dispatch(notices: Vec<Notice>) {
    for (callback, timing) in notices {
        callback(&timing);
    }
}

impl fmt::Debug for TimerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_increment", &self.on_increment.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .finish()
    }
}
