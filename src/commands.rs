use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::app_state::AppState;
use crate::config::AppConfig;
use crate::registry::{Command, Query};
use crate::timer::TimerOptions;

pub type SharedState = Arc<RwLock<AppState>>;

/// Millisecond flags as timer overrides.
fn flag_options(
    increment: Option<u64>,
    duration: Option<u64>,
    autostart: Option<bool>,
) -> TimerOptions {
    TimerOptions {
        increment: increment.map(Duration::from_millis),
        duration: duration.map(Duration::from_millis),
        autostart,
        ..TimerOptions::default()
    }
}

/// Options from CLI flags, with listeners that report each transition.
pub fn cli_options(
    element: &str,
    increment: Option<u64>,
    duration: Option<u64>,
    autostart: Option<bool>,
) -> TimerOptions {
    let options = flag_options(increment, duration, autostart);
    let name = element.to_string();
    let on_complete = name.clone();
    let on_stop = name.clone();
    let on_reset = name.clone();
    options
        .on_increment(move |t| tracing::debug!(element = %name, "{t}"))
        .on_complete(move |t| println!("\n[{on_complete}] complete: {t}"))
        .on_stop(move |t| {
            tracing::info!(
                element = %on_stop,
                elapsed_ms = t.elapsed.as_millis() as u64,
                "stopped"
            )
        })
        .on_reset(move |_| tracing::info!(element = %on_reset, "reset"))
}

pub async fn init(
    state: SharedState,
    element: &str,
    increment: Option<u64>,
    duration: Option<u64>,
    autostart: bool,
) -> Result<(), String> {
    let options = cli_options(element, increment, duration, autostart.then_some(true));
    let created = state
        .write()
        .await
        .registry
        .init(element, options)
        .map_err(|e| e.to_string())?;
    if created {
        println!("initialized timer '{element}'");
    } else {
        println!("'{element}' already has a timer; use update to change it");
    }
    Ok(())
}

pub async fn update(
    state: SharedState,
    element: &str,
    increment: Option<u64>,
    duration: Option<u64>,
    autostart: Option<bool>,
) -> Result<(), String> {
    let options = flag_options(increment, duration, autostart);

    let s = state.read().await;
    s.registry
        .update(element, options)
        .map_err(|e| e.to_string())?;
    println!("updated '{element}'");
    Ok(())
}

pub async fn run(state: SharedState, element: &str, command: Command) -> Result<(), String> {
    let applied = state
        .write()
        .await
        .registry
        .call(element, command)
        .map_err(|e| e.to_string())?;
    if applied {
        println!("{command}: ok");
    } else {
        println!("{command}: ignored ({element} is not in a state that allows it)");
    }
    Ok(())
}

pub async fn query(state: SharedState, element: &str, query: Query) -> Result<(), String> {
    let s = state.read().await;
    let output = s
        .registry
        .query(element, &query)
        .map_err(|e| e.to_string())?;
    println!("{output}");
    Ok(())
}

pub async fn list(state: SharedState) {
    let s = state.read().await;
    let elements = s.registry.elements();
    if elements.is_empty() {
        println!("no timers");
        return;
    }
    for element in elements {
        match s.registry.timing(element) {
            Ok(timing) => println!("{element:<16} {timing}"),
            Err(e) => println!("{element:<16} {e}"),
        }
    }
}

pub async fn show_config(state: SharedState) {
    let s = state.read().await;
    match AppConfig::path() {
        Ok(path) => println!("config file: {}", path.display()),
        Err(e) => println!("config file: unavailable ({e})"),
    }
    let defaults = s.registry.default_settings();
    println!(
        "defaults: increment={}ms duration={}ms autostart={}",
        defaults.increment.as_millis(),
        defaults.duration.as_millis(),
        defaults.autostart
    );
    println!("debug_logging: {}", s.config.debug_logging);
}

/// Persist new default settings for timers created from now on.
///
/// Timers that already exist keep their own settings.
pub async fn set_defaults(
    state: SharedState,
    increment: Option<u64>,
    duration: Option<u64>,
    autostart: Option<bool>,
) -> Result<(), String> {
    let options = flag_options(increment, duration, autostart);

    let mut s = state.write().await;
    let mut config = s.config.clone();
    config.defaults.apply(&options).map_err(|e| e.to_string())?;
    config.save().map_err(|e| e.to_string())?;

    s.registry.set_defaults(config.defaults.clone());
    s.config = config;
    println!("defaults saved");
    Ok(())
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
