//! Element-keyed timer registry
//!
//! Owns one [`Timer`] per element name. Operations on an element that was
//! never initialized (or has been destroyed) fail with
//! [`TimerError::NotInitialized`]; guard rejections surface as `Ok(false)`.

mod command;

#[cfg(test)]
mod registry_tests;

use hashbrown::HashMap;

use crate::timer::{SettingValue, Timer, TimerError, TimerOptions, TimerSettings, Timing};

pub use command::{Command, Query, QueryOutput};

#[derive(Debug, Default)]
pub struct TimerRegistry {
    defaults: TimerSettings,
    timers: HashMap<String, Timer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose timers start from `defaults` instead of the built-in ones.
    pub fn with_defaults(defaults: TimerSettings) -> Self {
        Self {
            defaults,
            timers: HashMap::new(),
        }
    }

    /// Attach a timer to `element`.
    ///
    /// Returns `Ok(false)` and leaves the existing timer untouched if the
    /// element already has one; use [`update`](Self::update) to change it.
    pub fn init(&mut self, element: &str, options: TimerOptions) -> Result<bool, TimerError> {
        if self.timers.contains_key(element) {
            tracing::debug!(element, "init ignored: element already has a timer");
            return Ok(false);
        }
        let timer = Timer::new(element, &self.defaults, options)?;
        self.timers.insert(element.to_string(), timer);
        Ok(true)
    }

    /// Handle to the timer attached to `element`.
    pub fn get(&self, element: &str) -> Result<&Timer, TimerError> {
        self.timers
            .get(element)
            .ok_or_else(|| TimerError::NotInitialized {
                element: element.to_string(),
            })
    }

    pub fn start(&self, element: &str) -> Result<bool, TimerError> {
        self.get(element)?.start()
    }

    pub fn stop(&self, element: &str) -> Result<bool, TimerError> {
        self.get(element)?.stop()
    }

    pub fn reset(&self, element: &str) -> Result<bool, TimerError> {
        self.get(element)?.reset()
    }

    pub fn update(&self, element: &str, options: TimerOptions) -> Result<(), TimerError> {
        self.get(element)?.update(options)
    }

    /// Reset the element's timer and drop it from the registry.
    pub fn destroy(&mut self, element: &str) -> Result<(), TimerError> {
        let timer = self
            .timers
            .remove(element)
            .ok_or_else(|| TimerError::NotInitialized {
                element: element.to_string(),
            })?;
        timer.destroy()
    }

    /// Run a command by its typed name.
    pub fn call(&mut self, element: &str, command: Command) -> Result<bool, TimerError> {
        match command {
            Command::Start => self.start(element),
            Command::Stop => self.stop(element),
            Command::Reset => self.reset(element),
            Command::Destroy => self.destroy(element).map(|()| true),
        }
    }

    /// Run a getter by its typed name.
    pub fn query(&self, element: &str, query: &Query) -> Result<QueryOutput, TimerError> {
        match query {
            Query::Settings => self.settings(element).map(QueryOutput::Settings),
            Query::Setting(name) => self.setting(element, name).map(QueryOutput::Setting),
            Query::Percent => self.percent(element).map(QueryOutput::Percent),
            Query::Timing => self.timing(element).map(QueryOutput::Timing),
            Query::DefaultSettings => {
                self.get(element)?;
                Ok(QueryOutput::Settings(self.defaults.clone()))
            }
        }
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn settings(&self, element: &str) -> Result<TimerSettings, TimerError> {
        self.get(element)?.settings()
    }

    pub fn setting(&self, element: &str, name: &str) -> Result<SettingValue, TimerError> {
        self.get(element)?.setting(name)
    }

    pub fn percent(&self, element: &str) -> Result<f64, TimerError> {
        self.get(element)?.percent()
    }

    pub fn timing(&self, element: &str) -> Result<Timing, TimerError> {
        self.get(element)?.timing()
    }

    pub fn default_settings(&self) -> &TimerSettings {
        &self.defaults
    }

    /// Replace the defaults used by later `init` calls.
    pub fn set_defaults(&mut self, defaults: TimerSettings) {
        self.defaults = defaults;
    }

    pub fn is_initialized(&self, element: &str) -> bool {
        self.timers.contains_key(element)
    }

    /// Element names with an attached timer, sorted.
    pub fn elements(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.timers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Destroy every timer.
    pub fn clear(&mut self) {
        for (element, timer) in self.timers.drain() {
            if let Err(err) = timer.destroy() {
                tracing::debug!(element = %element, %err, "timer already gone");
            }
        }
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}
