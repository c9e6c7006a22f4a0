//! Error types for timer operations

use thiserror::Error;

/// Usage errors reported by timers and the registry.
///
/// State-guard rejections (starting a running timer, stopping an idle one)
/// are not errors; those operations return `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("no timer initialized for element '{element}'")]
    NotInitialized { element: String },

    #[error("timer has been destroyed")]
    Destroyed,

    #[error("method '{name}' does not exist")]
    UnknownMethod { name: String },

    #[error("method '{method}' needs an argument")]
    MissingArgument { method: String },

    #[error("setting '{name}' does not exist")]
    UnknownSetting { name: String },

    #[error("increment must be greater than zero")]
    InvalidIncrement,

    #[error("timer cannot be scheduled outside a tokio runtime")]
    NoRuntime,
}
