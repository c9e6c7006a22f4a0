//! Tests for TimerRegistry dispatch and usage errors

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Command, Query, QueryOutput, TimerRegistry};
use crate::timer::{Phase, SettingValue, TimerError, TimerOptions, TimerSettings};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn not_initialized(element: &str) -> TimerError {
    TimerError::NotInitialized {
        element: element.to_string(),
    }
}

#[test]
fn test_operations_before_init_are_errors() {
    let mut registry = TimerRegistry::new();

    assert_eq!(registry.start("clock"), Err(not_initialized("clock")));
    assert_eq!(registry.stop("clock"), Err(not_initialized("clock")));
    assert_eq!(registry.reset("clock"), Err(not_initialized("clock")));
    assert_eq!(registry.percent("clock"), Err(not_initialized("clock")));
    assert_eq!(registry.destroy("clock"), Err(not_initialized("clock")));
    assert_eq!(
        registry.query("clock", &Query::DefaultSettings),
        Err(not_initialized("clock"))
    );
}

#[test]
fn test_init_merges_registry_defaults() {
    let defaults = TimerSettings {
        increment: ms(250),
        duration: ms(5000),
        autostart: false,
    };
    let mut registry = TimerRegistry::with_defaults(defaults.clone());

    assert_eq!(registry.init("clock", TimerOptions::new().duration(ms(2000))), Ok(true));

    let settings = registry.settings("clock").unwrap();
    assert_eq!(settings.increment, ms(250));
    assert_eq!(settings.duration, ms(2000));
    assert_eq!(registry.default_settings(), &defaults);
    assert_eq!(
        registry.query("clock", &Query::DefaultSettings),
        Ok(QueryOutput::Settings(defaults))
    );
}

#[test]
fn test_second_init_keeps_existing_timer() {
    let mut registry = TimerRegistry::new();

    registry.init("clock", TimerOptions::new().duration(ms(3000))).unwrap();
    assert_eq!(registry.init("clock", TimerOptions::new().duration(ms(10))), Ok(false));
    assert_eq!(
        registry.setting("clock", "duration"),
        Ok(SettingValue::Duration(ms(3000)))
    );
}

#[tokio::test(start_paused = true)]
async fn test_call_dispatches_commands() {
    let mut registry = TimerRegistry::new();
    registry
        .init("clock", TimerOptions::new().increment(ms(100)).duration(ms(1000)))
        .unwrap();

    let start: Command = "start".parse().unwrap();
    assert_eq!(registry.call("clock", start), Ok(true));
    assert_eq!(registry.call("clock", start), Ok(false));

    tokio::time::sleep(ms(450)).await;
    assert_eq!(registry.call("clock", Command::Stop), Ok(true));
    assert_eq!(registry.percent("clock"), Ok(0.4));

    assert_eq!(registry.call("clock", Command::Reset), Ok(true));
    assert_eq!(registry.percent("clock"), Ok(0.0));

    assert_eq!(registry.call("clock", Command::Destroy), Ok(true));
    assert!(!registry.is_initialized("clock"));
    assert_eq!(registry.call("clock", start), Err(not_initialized("clock")));
}

#[test]
fn test_unknown_names_are_usage_errors() {
    assert_eq!(
        "explode".parse::<Command>(),
        Err(TimerError::UnknownMethod {
            name: "explode".to_string()
        })
    );
    assert_eq!(
        Query::parse("getNothing", None),
        Err(TimerError::UnknownMethod {
            name: "getNothing".to_string()
        })
    );
    assert_eq!(
        Query::parse("getSetting", None),
        Err(TimerError::MissingArgument {
            method: "getSetting".to_string()
        })
    );

    let mut registry = TimerRegistry::new();
    registry.init("clock", TimerOptions::new()).unwrap();
    assert_eq!(
        registry.query("clock", &Query::Setting("speed".to_string())),
        Err(TimerError::UnknownSetting {
            name: "speed".to_string()
        })
    );
}

#[test]
fn test_query_names() {
    assert_eq!(Query::parse("getSettings", None), Ok(Query::Settings));
    assert_eq!(
        Query::parse("getSetting", Some("increment")),
        Ok(Query::Setting("increment".to_string()))
    );
    assert_eq!(Query::parse("getPercent", None), Ok(Query::Percent));
    assert_eq!(Query::parse("timing", None), Ok(Query::Timing));
    assert_eq!(Query::parse("defaults", None), Ok(Query::DefaultSettings));
}

#[tokio::test(start_paused = true)]
async fn test_timers_are_independent() {
    let mut registry = TimerRegistry::new();
    registry
        .init("a", TimerOptions::new().increment(ms(100)).duration(ms(300)))
        .unwrap();
    registry
        .init("b", TimerOptions::new().increment(ms(100)).duration(ms(1000)))
        .unwrap();

    registry.start("a").unwrap();
    registry.start("b").unwrap();
    tokio::time::sleep(ms(350)).await;

    assert_eq!(registry.timing("a").unwrap().phase, Phase::Completed);
    assert_eq!(registry.timing("b").unwrap().phase, Phase::Running);
    assert_eq!(registry.elements(), vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn test_destroy_cancels_ticks() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);

    let mut registry = TimerRegistry::new();
    registry
        .init(
            "clock",
            TimerOptions::new()
                .increment(ms(100))
                .duration(ms(1000))
                .autostart(true)
                .on_increment(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
        )
        .unwrap();

    tokio::time::sleep(ms(250)).await;
    registry.destroy("clock").unwrap();
    tokio::time::sleep(ms(2000)).await;

    assert_eq!(ticks.load(Ordering::SeqCst), 2);
    assert!(registry.elements().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_clear_skips_destroyed_timers() {
    let mut registry = TimerRegistry::new();
    let running = TimerOptions::new().duration(ms(1000)).autostart(true);
    registry.init("gone", running.clone()).unwrap();
    registry.init("live", running).unwrap();

    let gone = registry.get("gone").unwrap().clone();
    let live = registry.get("live").unwrap().clone();
    gone.destroy().unwrap();

    registry.clear();

    assert!(registry.elements().is_empty());
    assert!(live.is_destroyed());
    assert!(!live.is_running());
    assert_eq!(gone.destroy(), Err(TimerError::Destroyed));
}
