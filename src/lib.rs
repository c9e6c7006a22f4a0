pub mod app_state;
pub mod commands;
pub mod config;
pub mod logging;
pub mod registry;
pub mod repl;
pub mod serde_defaults;
pub mod timer;

pub use config::{AppConfig, ConfigError};
pub use registry::{Command, Query, QueryOutput, TimerRegistry};
pub use timer::{
    Phase, SettingValue, Timer, TimerCallbacks, TimerError, TimerOptions, TimerSettings, Timing,
};
