use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

/// Max number of forecast days the Open-Meteo API delivers
pub const MAX_FORECAST_DAYS: u32 = 16;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub long: f64,
    pub region: String,
}

#[derive(Deserialize, Debug)]
pub struct ForecastParameters {
    pub base_url: String,
    pub days: u32,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct Selection {
    pub cities: Vec<String>,
    pub request_delay_ms: u64,
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub general: General,
    pub forecast: ForecastParameters,
    pub selection: Selection,
    pub cities: Vec<City>,
}

impl Config {
    /// Returns the cities in the selection, in selection order
    ///
    pub fn selected_cities(&self) -> Result<Vec<City>, ConfigError> {
        self.selection.cities
            .iter()
            .map(|name| {
                self.cities
                    .iter()
                    .find(|c| c.name.eq(name))
                    .cloned()
                    .ok_or_else(|| ConfigError::Message(format!("unknown city in selection: {}", name)))
            })
            .collect()
    }
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses and validates configuration given as a toml document
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(toml)?;

    if config.cities.is_empty() {
        return Err(ConfigError::from("no cities configured"));
    }
    config.forecast.days = config.forecast.days.clamp(1, MAX_FORECAST_DAYS);

    // Fail early on selection typos
    config.selected_cities()?;

    Ok(config)
}
