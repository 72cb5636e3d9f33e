use std::{env, fs};
use log::{info, warn};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::weather_matrix::DayNightWindow;

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct OpenWeatherMap {
    pub api_key: String,
    pub forecast_url: String,
    pub max_days: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct Cache {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for Cache {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs() }
    }
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize)]
pub struct Config {
    pub web_server: WebServer,
    pub open_weather_map: OpenWeatherMap,
    pub day_night: DayNightWindow,
    #[serde(default)]
    pub cache: Cache,
    pub general: General,
}

fn default_timeout_secs() -> u64 { 30 }
fn default_ttl_secs() -> u64 { 600 }
fn default_log_level() -> String { "info".to_string() }

/// Returns a configuration struct for the application and starts logging
///
/// The configuration file is read from the path in the `CONFIG_PATH` environment
/// variable, or `config.toml` in the working directory if it is not set.
pub fn config() -> Result<Config, ConfigError> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let toml = fs::read_to_string(&config_path)?;
    let config = load_config(&toml)?;

    setup_logger(&config.general.log_path, &config.general.log_level)?;
    info!("configuration loaded from {}", config_path);

    if !config.day_night.is_complementary() {
        warn!("night window {}-{} is not the complement of day window {}-{}, some hours may count as neither",
            config.day_night.night_start, config.day_night.night_end,
            config.day_night.day_start, config.day_night.day_end);
    }

    Ok(config)
}

/// Parses and validates the configuration
///
/// # Arguments
///
/// * 'toml' - configuration file contents
fn load_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;
    validate_window(&config.day_night)?;

    Ok(config)
}

/// Checks that all hour boundaries are within the day and that daytime does not wrap
///
/// # Arguments
///
/// * 'window' - day/night hour boundaries
fn validate_window(window: &DayNightWindow) -> Result<(), ConfigError> {
    let hours = [window.day_start, window.day_end, window.night_start, window.night_end];
    if hours.iter().any(|h| *h > 23) {
        return Err(ConfigError::from("day/night hours must be between 0 and 23"));
    }
    if window.day_start >= window.day_end {
        return Err(ConfigError::from("day_start must be before day_end"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        [web_server]
        bind_address = "127.0.0.1"
        bind_port = 8080

        [open_weather_map]
        api_key = "abc"
        forecast_url = "https://api.openweathermap.org/data/2.5/forecast?q={city}&APPID={api_key}&units=metric"
        max_days = 3

        [day_night]
        day_start = 6
        day_end = 18
        night_start = 18
        night_end = 6

        [general]
        log_path = "weatherforecast.log"
    "#;

    #[test]
    fn config_is_parsed_with_defaults() {
        let config = load_config(CONFIG).unwrap();

        assert_eq!(config.web_server.bind_port, 8080);
        assert_eq!(config.open_weather_map.max_days, 3);
        assert_eq!(config.open_weather_map.timeout_secs, 30);
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.day_night, DayNightWindow { day_start: 6, day_end: 18, night_start: 18, night_end: 6 });
    }

    #[test]
    fn hours_out_of_range_are_rejected() {
        let toml = CONFIG.replace("night_start = 18", "night_start = 24");

        assert!(load_config(&toml).is_err());
    }

    #[test]
    fn wrapping_day_window_is_rejected() {
        let toml = CONFIG.replace("day_start = 6", "day_start = 20");

        assert!(load_config(&toml).is_err());
    }

    #[test]
    fn non_complementary_night_window_is_accepted() {
        let toml = CONFIG.replace("night_start = 18", "night_start = 21");

        let config = load_config(&toml).unwrap();
        assert!(!config.day_night.is_complementary());
    }

    #[test]
    fn missing_section_is_rejected() {
        let toml = CONFIG.replace("[general]", "").replace("log_path = \"weatherforecast.log\"", "");

        assert!(load_config(&toml).is_err());
    }
}
