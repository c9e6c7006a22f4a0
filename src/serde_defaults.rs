//! Common serde default value functions
//!
//! Shared by timer settings and the application config.

use std::time::Duration;

/// Default tick length
pub fn default_increment() -> Duration {
    Duration::from_millis(100)
}

/// Default total run time
pub fn default_duration() -> Duration {
    Duration::from_millis(1000)
}

/// (De)serialize a `Duration` as whole milliseconds.
///
/// Config files stay human-editable (`increment: 250`) instead of the
/// `{ secs, nanos }` struct serde derives for `Duration`.
pub mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
