use crate::coercion::finite_or;
use crate::models::advisory::{Alert, Severity};
use crate::models::forecast::DailyRecord;

/// Thresholds for the agronomic advisory rules
const HEAT_STRESS_TEMP: f64 = 35.0;
const FROST_TEMP: f64 = 0.0;
const LOW_HUMIDITY: f64 = 30.0;
const HIGH_HUMIDITY: f64 = 80.0;
const DRY_HUMIDITY: f64 = 40.0;
const HEAVY_PRECIPITATION: f64 = 20.0;
const STRONG_WIND: f64 = 25.0;
const HIGH_ET0: f64 = 6.0;
const LOW_ET0: f64 = 2.0;

/// Evaluates the advisory rules against the first (current) day of a normalized daily series
/// and returns the recommendations and alerts they produce.
///
/// Rules run in a fixed order (temperature, frost, humidity, precipitation, wind, ET0) and
/// don't exclude each other. Recommendations and alerts are kept in the order the rules added
/// them. If none of the rules raised an alert a single low severity alert for favorable
/// conditions is added together with general recommendations.
///
/// # Arguments
///
/// * 'daily' - normalized daily series, index 0 being the current day
pub fn evaluate(daily: &[DailyRecord]) -> (Vec<String>, Vec<Alert>) {
    let mut recommendations: Vec<String> = Vec::new();
    let mut alerts: Vec<Alert> = Vec::new();

    let Some(today) = daily.first() else {
        return (recommendations, alerts);
    };

    let temp_max = finite_or(today.temp_max, 0.0);
    let temp_min = finite_or(today.temp_min, 0.0);
    let humidity = finite_or(today.humidity, 0.0);
    let precipitation = finite_or(today.precipitation, 0.0);
    let wind_speed = finite_or(today.wind_speed, 0.0);
    let et0 = finite_or(today.et0, 0.0);

    if temp_max > HEAT_STRESS_TEMP {
        alerts.push(Alert::new(
            Severity::High,
            "Temperature stress",
            format!("Maximum temperature of {:.1}°C. Risk of heat stress in crops.", temp_max)));
        recommendations.push("Increase irrigation frequency, especially during the afternoon".to_string());
        recommendations.push("Consider shade netting for sensitive crops".to_string());
    }

    if temp_min < FROST_TEMP {
        alerts.push(Alert::new(
            Severity::High,
            "Frost risk",
            format!("Minimum temperature of {:.1}°C. Risk of frost.", temp_min)));
        recommendations.push("Activate frost protection systems".to_string());
        recommendations.push("Harvest cold sensitive produce early".to_string());
    }

    if humidity < LOW_HUMIDITY {
        alerts.push(Alert::new(
            Severity::Medium,
            "Low humidity",
            format!("Relative humidity of {:.1}%. Increase irrigation.", humidity)));
        recommendations.push("Raise soil moisture using drip irrigation".to_string());
    } else if humidity > HIGH_HUMIDITY {
        alerts.push(Alert::new(
            Severity::Medium,
            "High humidity / fungal risk",
            format!("Relative humidity of {:.1}%. Risk of fungal diseases.", humidity)));
        recommendations.push("Improve ventilation in greenhouse crops".to_string());
        recommendations.push("Apply preventive fungicide treatments".to_string());
    }

    if precipitation > HEAVY_PRECIPITATION {
        alerts.push(Alert::new(
            Severity::Medium,
            "Heavy precipitation",
            format!("Precipitation of {:.1}mm. Monitor drainage.", precipitation)));
        recommendations.push("Check drainage systems in crop fields".to_string());
        recommendations.push("Postpone foliar fertilizer applications".to_string());
    } else if precipitation == 0.0 && humidity < DRY_HUMIDITY {
        recommendations.push("Plan supplemental irrigation due to dry conditions".to_string());
    }

    if wind_speed > STRONG_WIND {
        alerts.push(Alert::new(
            Severity::High,
            "Strong wind",
            format!("Wind speed of {:.1} km/h. Risk of mechanical damage.", wind_speed)));
        recommendations.push("Install windbreaks to protect young crops".to_string());
        recommendations.push("Postpone pesticide and foliar fertilizer applications".to_string());
    }

    if et0 > HIGH_ET0 {
        recommendations.push(format!("High evapotranspiration ({:.1} mm/day). Increase irrigation according to crop type", et0));
    } else if et0 < LOW_ET0 {
        recommendations.push(format!("Low evapotranspiration ({:.1} mm/day). Reduce irrigation frequency", et0));
    }

    if alerts.is_empty() {
        alerts.push(Alert::new(
            Severity::Low,
            "Favorable conditions",
            "Current weather conditions are favorable for agriculture.".to_string()));
        recommendations.push("Ideal conditions for general agricultural work".to_string());
        recommendations.push("Good time for foliar applications and crop maintenance".to_string());
    }

    (recommendations, alerts)
}
