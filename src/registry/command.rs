//! Typed dispatch for operations named by string

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::timer::{SettingValue, TimerError, TimerSettings, Timing};

/// State-changing operations on an initialized timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    Destroy,
}

impl FromStr for Command {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            "reset" => Ok(Command::Reset),
            "destroy" => Ok(Command::Destroy),
            _ => Err(TimerError::UnknownMethod { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Reset => "reset",
            Command::Destroy => "destroy",
        };
        f.write_str(s)
    }
}

/// Read-only getters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Settings,
    Setting(String),
    Percent,
    Timing,
    DefaultSettings,
}

impl Query {
    /// Build a query from a getter name and its optional argument.
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, TimerError> {
        match (name, arg) {
            ("getSettings" | "settings", _) => Ok(Query::Settings),
            ("getSetting" | "setting", Some(setting)) => Ok(Query::Setting(setting.to_string())),
            ("getSetting" | "setting", None) => Err(TimerError::MissingArgument {
                method: name.to_string(),
            }),
            ("getPercent" | "percent", _) => Ok(Query::Percent),
            ("getTiming" | "timing", _) => Ok(Query::Timing),
            ("getDefaultSettings" | "defaults", _) => Ok(Query::DefaultSettings),
            _ => Err(TimerError::UnknownMethod {
                name: name.to_string(),
            }),
        }
    }
}

/// Result of a [`Query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Settings(TimerSettings),
    Setting(SettingValue),
    Percent(f64),
    Timing(Timing),
}

impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutput::Settings(s) => write!(
                f,
                "increment={}ms duration={}ms autostart={}",
                s.increment.as_millis(),
                s.duration.as_millis(),
                s.autostart
            ),
            QueryOutput::Setting(v) => write!(f, "{v}"),
            QueryOutput::Percent(p) => write!(f, "{p:.3}"),
            QueryOutput::Timing(t) => write!(f, "{t}"),
        }
    }
}
