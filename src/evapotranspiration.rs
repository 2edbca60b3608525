use log::warn;
use crate::coercion::finite_or;
use crate::errors::Et0Error;

/// Standard atmospheric pressure at sea level in kPa
pub const STANDARD_PRESSURE_KPA: f64 = 101.3;

/// Upper bound for a plausible daily reference evapotranspiration in mm/day
pub const MAX_ET0: f64 = 15.0;

/// Conversion factor from a mean W/m² flux to MJ/m²/day
const W_M2_TO_MJ_M2_DAY: f64 = 0.0864;

/// Soil heat flux, negligible for daily time steps
const SOIL_HEAT_FLUX: f64 = 0.0;

/// Calculates the daily reference evapotranspiration (ET0) in mm/day using the
/// FAO Penman-Monteith equation.
///
/// The result is always within 0..=15. Should the formula ever evaluate to a non finite
/// value it is logged and 0.0 is returned.
///
/// # Arguments
///
/// * 'temp' - daily mean temperature in °C
/// * 'humidity' - mean relative humidity in %
/// * 'radiation' - solar radiation in W/m²
/// * 'wind_speed' - wind speed in km/h
/// * 'pressure' - atmospheric pressure in kPa
pub fn compute_et0(temp: f64, humidity: f64, radiation: f64, wind_speed: f64, pressure: f64) -> f64 {
    match try_compute_et0(temp, humidity, radiation, wind_speed, pressure) {
        Ok(et0) => et0,
        Err(e) => {
            warn!("ET0 set to 0.0: {}", e);
            0.0
        }
    }
}

/// Same as compute_et0 but returns an error instead of 0.0 for a non finite result. Inputs are
/// clamped to finite ranges first, so with the current guards the error is never produced.
///
/// # Arguments
///
/// * 'temp' - daily mean temperature in °C
/// * 'humidity' - mean relative humidity in %
/// * 'radiation' - solar radiation in W/m²
/// * 'wind_speed' - wind speed in km/h
/// * 'pressure' - atmospheric pressure in kPa
pub fn try_compute_et0(temp: f64, humidity: f64, radiation: f64, wind_speed: f64, pressure: f64) -> Result<f64, Et0Error> {
    let temp = finite_or(temp, 20.0).clamp(-50.0, 50.0);
    let humidity = finite_or(humidity, 50.0).clamp(0.0, 100.0);
    let radiation = finite_or(radiation, 200.0).max(0.0);
    let wind_speed = finite_or(wind_speed, 10.0).max(0.0);
    let pressure = finite_or(pressure, STANDARD_PRESSURE_KPA).clamp(80.0, 120.0);

    let wind_ms = wind_speed / 3.6;
    let net_radiation = radiation * W_M2_TO_MJ_M2_DAY;
    let gamma = psychrometric_constant(pressure);

    let mut temp_denom = temp + 237.3;
    if temp_denom == 0.0 {
        temp_denom = 0.1;
    }
    let es = 0.6108 * ((17.27 * temp) / temp_denom).exp();
    let delta = 4098.0 * es / temp_denom.powi(2);
    let ea = humidity / 100.0 * es;

    let mut temp_abs = temp + 273.0;
    if temp_abs <= 0.0 {
        temp_abs = 273.0;
    }

    let numerator = 0.408 * delta * (net_radiation - SOIL_HEAT_FLUX)
        + gamma * (900.0 / temp_abs) * wind_ms * (es - ea);
    let mut denominator = delta + gamma * (1.0 + 0.34 * wind_ms);
    if denominator == 0.0 {
        denominator = 0.001;
    }

    let et0 = numerator / denominator;
    // Safety net only, with the inputs clamped above no input reaches this
    if !et0.is_finite() {
        return Err(Et0Error::NonFinite { numerator, denominator });
    }

    Ok(et0.clamp(0.0, MAX_ET0))
}

/// Psychrometric constant in kPa/°C for the given pressure in kPa
///
/// # Arguments
///
/// * 'pressure' - atmospheric pressure in kPa
fn psychrometric_constant(pressure: f64) -> f64 {
    0.665e-3 * (pressure / STANDARD_PRESSURE_KPA)
}
