//! Timer configuration
//!
//! `TimerSettings` is the fully-resolved configuration of a live timer.
//! `TimerOptions` carries caller overrides; unset fields keep whatever
//! value they are merged over (defaults on `init`, live settings on `update`).

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::callbacks::{Callback, TimerCallbacks};
use super::{TimerError, Timing};
use crate::serde_defaults::{default_duration, default_increment, duration_ms};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Time added to `elapsed` on every tick
    #[serde(with = "duration_ms", default = "default_increment")]
    pub increment: Duration,

    /// Total time the timer must count before it completes
    #[serde(with = "duration_ms", default = "default_duration")]
    pub duration: Duration,

    /// Start as soon as the timer is initialized
    #[serde(default)]
    pub autostart: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            increment: default_increment(),
            duration: default_duration(),
            autostart: false,
        }
    }
}

/// A single setting looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Duration(#[serde(with = "duration_ms")] Duration),
    Flag(bool),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Duration(d) => write!(f, "{}ms", d.as_millis()),
            SettingValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl TimerSettings {
    /// Look up a setting by its option name.
    pub fn get(&self, name: &str) -> Result<SettingValue, TimerError> {
        match name {
            "increment" => Ok(SettingValue::Duration(self.increment)),
            "duration" => Ok(SettingValue::Duration(self.duration)),
            "autostart" => Ok(SettingValue::Flag(self.autostart)),
            _ => Err(TimerError::UnknownSetting {
                name: name.to_string(),
            }),
        }
    }

    /// Apply the overrides in `options`, rejecting a zero increment.
    ///
    /// On error `self` is left unchanged.
    pub(crate) fn apply(&mut self, options: &TimerOptions) -> Result<(), TimerError> {
        if options.increment.is_some_and(|inc| inc.is_zero()) {
            return Err(TimerError::InvalidIncrement);
        }
        if let Some(increment) = options.increment {
            self.increment = increment;
        }
        if let Some(duration) = options.duration {
            self.duration = duration;
        }
        if let Some(autostart) = options.autostart {
            self.autostart = autostart;
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), TimerError> {
        if self.increment.is_zero() {
            return Err(TimerError::InvalidIncrement);
        }
        Ok(())
    }
}

/// Caller-supplied overrides for `init` and `update`.
#[derive(Debug, Clone, Default)]
pub struct TimerOptions {
    pub increment: Option<Duration>,
    pub duration: Option<Duration>,
    pub autostart: Option<bool>,
    pub callbacks: TimerCallbacks,
}

impl TimerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(mut self, increment: Duration) -> Self {
        self.increment = Some(increment);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn autostart(mut self, autostart: bool) -> Self {
        self.autostart = Some(autostart);
        self
    }

    pub fn on_start(mut self, f: impl Fn(&Timing) + Send + Sync + 'static) -> Self {
        self.callbacks.on_start = Some(to_callback(f));
        self
    }

    pub fn on_increment(mut self, f: impl Fn(&Timing) + Send + Sync + 'static) -> Self {
        self.callbacks.on_increment = Some(to_callback(f));
        self
    }

    pub fn on_complete(mut self, f: impl Fn(&Timing) + Send + Sync + 'static) -> Self {
        self.callbacks.on_complete = Some(to_callback(f));
        self
    }

    pub fn on_stop(mut self, f: impl Fn(&Timing) + Send + Sync + 'static) -> Self {
        self.callbacks.on_stop = Some(to_callback(f));
        self
    }

    pub fn on_reset(mut self, f: impl Fn(&Timing) + Send + Sync + 'static) -> Self {
        self.callbacks.on_reset = Some(to_callback(f));
        self
    }
}

fn to_callback(f: impl Fn(&Timing) + Send + Sync + 'static) -> Callback {
    std::sync::Arc::new(f)
}
