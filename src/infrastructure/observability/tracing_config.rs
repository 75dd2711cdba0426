use crate::presentation::config::{Environment, LoggingSettings};

const LOG_FORMAT_VARIABLE: &str = "LOG_FORMAT";

/// Subscriber options resolved from settings. `LOG_FORMAT=json` switches on
/// JSON output even when the settings ask for plain text.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_directives: String,
}

impl TracingConfig {
    pub fn from_settings(settings: &LoggingSettings, environment: Environment) -> Self {
        let json_from_env = std::env::var(LOG_FORMAT_VARIABLE)
            .is_ok_and(|format| format.eq_ignore_ascii_case("json"));

        Self {
            environment: environment.to_string(),
            json_format: settings.enable_json || json_from_env,
            default_directives: settings.level.clone(),
        }
    }
}
