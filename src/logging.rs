//! Logging configuration
//!
//! Logs go to stderr so they do not interleave with REPL output on stdout.
//! Set `DEBUG_LOGGING=1` (or `debug_logging: true` in the config) to get
//! per-tick debug output from this crate.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,simple_timer=debug"
    } else {
        "info"
    }
}

pub fn init(config_debug: bool) {
    let debug_logging = config_debug || std::env::var("DEBUG_LOGGING").is_ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::new(filter_directive(debug_logging)))
        .init();

    tracing::debug!(debug_logging, "logging initialized");
}
