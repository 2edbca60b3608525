use std::time::Duration;
use log::debug;
use serde_json::Value;
use ureq::Agent;
use crate::config::MAX_FORECAST_DAYS;
use crate::errors::OpenMeteoError;
use crate::models::open_meteo::{DAILY_REQUEST, HOURLY_REQUEST};

/// Struct for fetching weather forecasts from the Open-Meteo API
pub struct OpenMeteo {
    agent: Agent,
    base_url: String,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'base_url' - url to the forecast endpoint
    /// * 'timeout_secs' - global timeout for each request
    pub fn new(base_url: &str, timeout_secs: u64) -> OpenMeteo {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build();

        let agent = config.into();

        Self { agent, base_url: base_url.to_string() }
    }

    /// Retrieves a raw forecast document for the given point.
    ///
    /// The document is returned as is, validation and unit handling is left to the normalizer.
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude for the point to get forecasts for
    /// * 'long' - longitude for the point to get forecasts for
    /// * 'days' - number of forecast days, capped to what the API delivers
    pub fn get_forecast(&self, lat: f64, long: f64, days: u32) -> Result<Value, OpenMeteoError> {
        let query = forecast_query(lat, long, days);
        debug!("requesting forecast from {} with {:?}", self.base_url, query);

        let json = self.agent
            .get(self.base_url.as_str())
            .query_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
            .call()?
            .body_mut()
            .read_to_string()?;

        Ok(serde_json::from_str(&json)?)
    }
}

/// Builds query parameters for a forecast request
///
/// Coordinates are formatted with 4 decimals and days are kept within 1..=16
///
/// # Arguments
///
/// * 'lat' - latitude
/// * 'long' - longitude
/// * 'days' - requested number of forecast days
pub fn forecast_query(lat: f64, long: f64, days: u32) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", format!("{:.4}", lat)),
        ("longitude", format!("{:.4}", long)),
        ("hourly", HOURLY_REQUEST.join(",")),
        ("daily", DAILY_REQUEST.join(",")),
        ("timezone", "auto".to_string()),
        ("forecast_days", days.clamp(1, MAX_FORECAST_DAYS).to_string()),
    ]
}
