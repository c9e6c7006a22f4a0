//! Interval timer
//!
//! This module provides:
//! - **Settings**: resolved configuration plus caller overrides (`TimerOptions`)
//! - **Callbacks**: optional lifecycle listener slots
//! - **Timing**: progress snapshots and the completion percentage
//! - **Instance**: the `Timer` state machine and its tick task
//!
//! # Lifecycle
//!
//! ```text
//!            start()                    tick: elapsed >= duration
//!   Idle ──────────────▶ Running ─────────────────────────────▶ Completed
//!    ▲                     │                                        │
//!    │       stop()        │                                        │
//!    ├─────────────────────┘                                        │
//!    │                         reset()                              │
//!    └──────────────────────────────────────────────────────────────┘
//! ```

mod callbacks;
mod error;
mod instance;
mod settings;
mod timing;


pub use callbacks::{Callback, TimerCallbacks};
pub use error::TimerError;
pub use instance::Timer;
pub use settings::{SettingValue, TimerOptions, TimerSettings};
pub use timing::{Phase, Timing, percent};
