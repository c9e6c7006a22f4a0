use crate::config::AppConfig;
use crate::registry::TimerRegistry;

pub struct AppState {
    pub config: AppConfig,
    pub registry: TimerRegistry,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(AppConfig::load_or_default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let registry = TimerRegistry::with_defaults(config.defaults.clone());
        Self { config, registry }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}
