use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw forecast document as returned by the Open-Meteo forecast API.
///
/// Each section maps a variable name to its per-time-step values. The values are kept as raw
/// json since the source may report nulls, text or nested values, and they are coerced
/// field by field when normalized. Location metadata is kept untyped, it is never read and
/// an odd value there must not reject the forecast.
#[derive(Deserialize, Debug, Clone)]
pub struct RawForecast {
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub timezone: Option<Value>,
    pub hourly: Option<Map<String, Value>>,
    pub daily: Option<Map<String, Value>>,
}

/// Hourly variable names
pub const HOURLY_TIME: &str = "time";
pub const HOURLY_TEMPERATURE: &str = "temperature_2m";
pub const HOURLY_HUMIDITY: &str = "relative_humidity_2m";
pub const HOURLY_PRECIPITATION: &str = "precipitation";
pub const HOURLY_WIND_SPEED: &str = "wind_speed_10m";
pub const HOURLY_RADIATION: &str = "shortwave_radiation";
pub const HOURLY_PRESSURE: &str = "surface_pressure";

/// Daily variable names
pub const DAILY_TIME: &str = "time";
pub const DAILY_TEMP_MAX: &str = "temperature_2m_max";
pub const DAILY_TEMP_MIN: &str = "temperature_2m_min";
pub const DAILY_PRECIPITATION: &str = "precipitation_sum";
pub const DAILY_WIND_SPEED: &str = "wind_speed_10m_max";
pub const DAILY_HUMIDITY: &str = "relative_humidity_2m_mean";
pub const DAILY_RADIATION: &str = "shortwave_radiation_sum";
pub const DAILY_PRESSURE: &str = "surface_pressure_mean";

/// Hourly variables that must be present in a forecast
pub const HOURLY_REQUIRED: [&str; 5] = [
    HOURLY_TIME,
    HOURLY_TEMPERATURE,
    HOURLY_HUMIDITY,
    HOURLY_PRECIPITATION,
    HOURLY_WIND_SPEED,
];

/// Daily variables that must be present in a forecast
pub const DAILY_REQUIRED: [&str; 6] = [
    DAILY_TIME,
    DAILY_TEMP_MAX,
    DAILY_TEMP_MIN,
    DAILY_PRECIPITATION,
    DAILY_WIND_SPEED,
    DAILY_HUMIDITY,
];

/// All hourly variables requested from the API
pub const HOURLY_REQUEST: [&str; 6] = [
    HOURLY_TEMPERATURE,
    HOURLY_HUMIDITY,
    HOURLY_PRECIPITATION,
    HOURLY_WIND_SPEED,
    HOURLY_RADIATION,
    HOURLY_PRESSURE,
];

/// All daily variables requested from the API
pub const DAILY_REQUEST: [&str; 7] = [
    DAILY_TEMP_MAX,
    DAILY_TEMP_MIN,
    DAILY_PRECIPITATION,
    DAILY_WIND_SPEED,
    DAILY_HUMIDITY,
    DAILY_RADIATION,
    DAILY_PRESSURE,
];
