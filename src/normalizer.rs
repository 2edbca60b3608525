use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use crate::coercion::try_coerce;
use crate::errors::ProcessingError;
use crate::evapotranspiration::{compute_et0, STANDARD_PRESSURE_KPA};
use crate::models::forecast::{DailyRecord, HourlyRecord};
use crate::models::open_meteo::*;

/// Radiation in W/m² assumed when the source doesn't report any
pub const DEFAULT_RADIATION: f64 = 200.0;

/// Surface pressure in hPa assumed when the source doesn't report any
pub const DEFAULT_PRESSURE_HPA: f64 = 1013.0;

/// Pressures above this are taken to be in hPa rather than kPa
const HPA_THRESHOLD: f64 = 200.0;

const HOURLY_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Same as HOURLY_TIME_FORMATS but with a trailing UTC offset
const OFFSET_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%:z"];

/// Validates a raw forecast document and builds normalized hourly and daily series from it.
///
/// # Arguments
///
/// * 'payload' - the forecast document as returned by the weather API
pub fn normalize(payload: &Value) -> Result<(Vec<HourlyRecord>, Vec<DailyRecord>), ProcessingError> {
    let raw = RawForecast::deserialize(payload)
        .map_err(|e| ProcessingError::MalformedData(e.to_string()))?;

    normalize_raw(&raw)
}

/// Builds normalized hourly and daily series from an already deserialized forecast.
///
/// All required fields of both sections are checked before anything else is done, the first
/// one missing is reported through ProcessingError::IncompleteData. Values that can't be read
/// as numbers resolve to per-field defaults. Both series keep the chronological order
/// of the source.
///
/// # Arguments
///
/// * 'raw' - the deserialized forecast
pub fn normalize_raw(raw: &RawForecast) -> Result<(Vec<HourlyRecord>, Vec<DailyRecord>), ProcessingError> {
    let hourly = raw.hourly.as_ref()
        .ok_or_else(|| ProcessingError::IncompleteData("hourly".to_string()))?;
    let daily = raw.daily.as_ref()
        .ok_or_else(|| ProcessingError::IncompleteData("daily".to_string()))?;

    check_required(hourly, &HOURLY_REQUIRED)?;
    check_required(daily, &DAILY_REQUIRED)?;

    let hourly_records = build_hourly(hourly)?;
    let daily_records = build_daily(daily)?;

    debug!("normalized {} hourly and {} daily records", hourly_records.len(), daily_records.len());

    Ok((hourly_records, daily_records))
}

/// Converts a pressure to kPa, values above 200 are assumed to be given in hPa
///
/// # Arguments
///
/// * 'pressure' - pressure in either kPa or hPa
pub fn pressure_to_kpa(pressure: f64) -> f64 {
    if pressure > HPA_THRESHOLD { pressure / 10.0 } else { pressure }
}

fn check_required(section: &Map<String, Value>, fields: &[&str]) -> Result<(), ProcessingError> {
    match fields.iter().find(|f| !section.contains_key(**f)) {
        Some(missing) => Err(ProcessingError::IncompleteData(missing.to_string())),
        None => Ok(()),
    }
}

/// Returns the raw values of a field, checking that it is a sequence of the expected length
fn sequence<'a>(section: &'a Map<String, Value>, name: &str, len: Option<usize>) -> Result<&'a [Value], ProcessingError> {
    let values = match section.get(name) {
        Some(Value::Array(values)) => values.as_slice(),
        Some(_) => return Err(ProcessingError::MalformedData(format!("{} is not a sequence", name))),
        None => return Err(ProcessingError::IncompleteData(name.to_string())),
    };

    match len {
        Some(len) if values.len() != len => Err(ProcessingError::MalformedData(
            format!("{} has {} values, expected {}", name, values.len(), len))),
        _ => Ok(values),
    }
}

/// Coerces every value of a field, None marks values that couldn't be read as a finite number
fn field(section: &Map<String, Value>, name: &str, len: usize) -> Result<Vec<Option<f64>>, ProcessingError> {
    Ok(sequence(section, name, Some(len))?
        .iter()
        .map(try_coerce)
        .collect())
}

/// Same as field but an absent field is replaced by a constant series
fn optional_field(section: &Map<String, Value>, name: &str, len: usize, absent: f64) -> Result<Vec<Option<f64>>, ProcessingError> {
    if section.contains_key(name) {
        field(section, name, len)
    } else {
        Ok(vec![Some(absent); len])
    }
}

fn or_default(values: Vec<Option<f64>>, default: f64) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(default)).collect()
}

fn build_hourly(section: &Map<String, Value>) -> Result<Vec<HourlyRecord>, ProcessingError> {
    let times = sequence(section, HOURLY_TIME, None)?
        .iter()
        .map(parse_hour)
        .collect::<Result<Vec<NaiveDateTime>, ProcessingError>>()?;
    let len = times.len();

    let temperature = or_default(field(section, HOURLY_TEMPERATURE, len)?, 20.0);
    let humidity = or_default(field(section, HOURLY_HUMIDITY, len)?, 50.0);
    let precipitation = or_default(field(section, HOURLY_PRECIPITATION, len)?, 0.0);
    let wind_speed = or_default(field(section, HOURLY_WIND_SPEED, len)?, 10.0);
    let radiation = or_default(optional_field(section, HOURLY_RADIATION, len, DEFAULT_RADIATION)?, DEFAULT_RADIATION);

    Ok(times.into_iter()
        .enumerate()
        .map(|(i, time)| HourlyRecord {
            time,
            temperature: temperature[i],
            humidity: humidity[i].clamp(0.0, 100.0),
            precipitation: precipitation[i].max(0.0),
            wind_speed: wind_speed[i].max(0.0),
            radiation: radiation[i].max(0.0),
        })
        .collect())
}

fn build_daily(section: &Map<String, Value>) -> Result<Vec<DailyRecord>, ProcessingError> {
    let dates = sequence(section, DAILY_TIME, None)?
        .iter()
        .map(parse_day)
        .collect::<Result<Vec<NaiveDate>, ProcessingError>>()?;
    let len = dates.len();

    let temp_max = or_default(field(section, DAILY_TEMP_MAX, len)?, 25.0);
    let temp_min = or_default(field(section, DAILY_TEMP_MIN, len)?, 15.0);
    let precipitation = or_default(field(section, DAILY_PRECIPITATION, len)?, 0.0);
    let wind_speed = or_default(field(section, DAILY_WIND_SPEED, len)?, 10.0);
    let humidity = or_default(field(section, DAILY_HUMIDITY, len)?, 50.0);
    let radiation = or_default(optional_field(section, DAILY_RADIATION, len, DEFAULT_RADIATION)?, DEFAULT_RADIATION);
    let pressure = optional_field(section, DAILY_PRESSURE, len, DEFAULT_PRESSURE_HPA)?
        .into_iter()
        .map(|p| p.map_or(STANDARD_PRESSURE_KPA, pressure_to_kpa))
        .collect::<Vec<f64>>();

    let mut days = dates.into_iter()
        .enumerate()
        .map(|(i, date)| {
            let temp_mean = (temp_max[i] + temp_min[i]) / 2.0;
            let et0 = compute_et0(temp_mean, humidity[i], radiation[i], wind_speed[i], pressure[i]);

            let mut day = DailyRecord {
                date,
                temp_max: temp_max[i].clamp(-50.0, 60.0),
                temp_min: temp_min[i].clamp(-60.0, 50.0),
                temp_mean: temp_mean.clamp(-55.0, 55.0),
                precipitation: precipitation[i].max(0.0),
                wind_speed: wind_speed[i].max(0.0),
                humidity: humidity[i].clamp(0.0, 100.0),
                radiation: radiation[i].max(0.0),
                pressure: pressure[i],
                et0,
            };
            if day.temp_max < day.temp_min {
                std::mem::swap(&mut day.temp_max, &mut day.temp_min);
            }
            day
        })
        .collect::<Vec<DailyRecord>>();

    repair_non_finite(&mut days);

    Ok(days)
}

/// Replaces non finite values with the value of the day before, or with 0.0 if there is
/// no day before
fn repair_non_finite(days: &mut [DailyRecord]) {
    let mut previous: Option<[f64; 9]> = None;

    for day in days.iter_mut() {
        let mut fields = numeric_fields(day);
        for (i, value) in fields.iter_mut().enumerate() {
            if !value.is_finite() {
                **value = previous.map_or(0.0, |p| p[i]);
            }
        }
        previous = Some(fields.map(|v| *v));
    }
}

fn numeric_fields(day: &mut DailyRecord) -> [&mut f64; 9] {
    [
        &mut day.temp_max,
        &mut day.temp_min,
        &mut day.temp_mean,
        &mut day.precipitation,
        &mut day.wind_speed,
        &mut day.humidity,
        &mut day.radiation,
        &mut day.pressure,
        &mut day.et0,
    ]
}

fn parse_hour(value: &Value) -> Result<NaiveDateTime, ProcessingError> {
    let text = value.as_str()
        .ok_or_else(|| ProcessingError::MalformedData(format!("invalid hourly time: {}", value)))?;

    HOURLY_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_with_offset(text))
        .ok_or_else(|| ProcessingError::MalformedData(format!("invalid hourly time: {}", text)))
}

/// Parses a timestamp carrying a UTC offset or a trailing 'Z', keeping its local wall clock time
fn parse_with_offset(text: &str) -> Option<NaiveDateTime> {
    let text = match text.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => text.to_string(),
    };

    OFFSET_TIME_FORMATS.iter()
        .find_map(|format| DateTime::parse_from_str(&text, format).ok())
        .map(|t| t.naive_local())
}

fn parse_day(value: &Value) -> Result<NaiveDate, ProcessingError> {
    let text = value.as_str()
        .ok_or_else(|| ProcessingError::MalformedData(format!("invalid daily date: {}", value)))?;

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| parse_hour(value).map(|t| t.date()))
        .map_err(|_| ProcessingError::MalformedData(format!("invalid daily date: {}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "latitude": -38.74,
            "longitude": -72.59,
            "hourly": {
                "time": ["2025-01-15T00:00", "2025-01-15T01:00", "2025-01-15T02:00"],
                "temperature_2m": [14.2, "13.8°C", null],
                "relative_humidity_2m": [80, 82, 140],
                "precipitation": [0.0, "0.4mm", -1.0],
                "wind_speed_10m": [5.0, "N/A", 7.5],
                "shortwave_radiation": [0.0, 0.0, 12.0]
            },
            "daily": {
                "time": ["2025-01-15", "2025-01-16"],
                "temperature_2m_max": [24.0, 27.5],
                "temperature_2m_min": [9.0, 11.0],
                "precipitation_sum": [0.0, 2.5],
                "wind_speed_10m_max": [14.0, 18.0],
                "relative_humidity_2m_mean": [62, 58],
                "shortwave_radiation_sum": [25.1, 27.3],
                "surface_pressure_mean": [1008.2, 100.4]
            }
        })
    }

    #[test]
    fn builds_both_series_in_source_order() {
        let (hourly, daily) = normalize(&payload()).unwrap();

        assert_eq!(hourly.len(), 3);
        assert_eq!(daily.len(), 2);
        assert!(hourly.windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
    }

    #[test]
    fn hourly_values_are_coerced_with_defaults() {
        let (hourly, _) = normalize(&payload()).unwrap();

        assert_eq!(hourly[1].temperature, 13.8);
        assert_eq!(hourly[2].temperature, 20.0);
        assert_eq!(hourly[1].precipitation, 0.4);
        assert_eq!(hourly[1].wind_speed, 10.0);
        assert_eq!(hourly[2].humidity, 100.0);
        assert_eq!(hourly[2].precipitation, 0.0);
    }

    #[test]
    fn pressure_is_normalized_to_kpa() {
        let (_, daily) = normalize(&payload()).unwrap();

        assert!((daily[0].pressure - 100.82).abs() < 1e-9);
        assert_eq!(daily[1].pressure, 100.4);
    }

    #[test]
    fn mean_temperature_and_et0_are_derived() {
        let (_, daily) = normalize(&payload()).unwrap();

        assert_eq!(daily[0].temp_mean, 16.5);
        let expected = compute_et0(16.5, 62.0, 25.1, 14.0, pressure_to_kpa(1008.2));
        assert_eq!(daily[0].et0, expected);
        assert!(daily.iter().all(|d| (0.0..=15.0).contains(&d.et0)));
    }

    #[test]
    fn missing_hourly_field_is_reported_by_name() {
        let mut raw = payload();
        raw["hourly"].as_object_mut().unwrap().remove("relative_humidity_2m");

        assert_eq!(
            normalize(&raw),
            Err(ProcessingError::IncompleteData("relative_humidity_2m".to_string()))
        );
    }

    #[test]
    fn missing_daily_field_is_reported_by_name() {
        let mut raw = payload();
        raw["daily"].as_object_mut().unwrap().remove("wind_speed_10m_max");

        assert_eq!(
            normalize(&raw),
            Err(ProcessingError::IncompleteData("wind_speed_10m_max".to_string()))
        );
    }

    #[test]
    fn missing_section_is_incomplete() {
        let mut raw = payload();
        raw.as_object_mut().unwrap().remove("daily");

        assert_eq!(normalize(&raw), Err(ProcessingError::IncompleteData("daily".to_string())));
    }

    #[test]
    fn length_mismatch_is_malformed() {
        let mut raw = payload();
        raw["daily"]["precipitation_sum"] = json!([0.0]);

        assert!(matches!(normalize(&raw), Err(ProcessingError::MalformedData(_))));
    }

    #[test]
    fn bad_timestamps_are_malformed() {
        let mut raw = payload();
        raw["hourly"]["time"][1] = json!("yesterday");

        assert!(matches!(normalize(&raw), Err(ProcessingError::MalformedData(_))));
    }

    #[test]
    fn non_sequence_field_is_malformed() {
        let mut raw = payload();
        raw["hourly"]["precipitation"] = json!(3.0);

        assert!(matches!(normalize(&raw), Err(ProcessingError::MalformedData(_))));
    }

    #[test]
    fn inverted_temperatures_are_swapped() {
        let mut raw = payload();
        raw["daily"]["temperature_2m_max"] = json!([5.0, 27.5]);
        raw["daily"]["temperature_2m_min"] = json!([12.0, 11.0]);

        let (_, daily) = normalize(&raw).unwrap();
        assert_eq!(daily[0].temp_max, 12.0);
        assert_eq!(daily[0].temp_min, 5.0);
        assert_eq!(daily[1].temp_max, 27.5);
        assert_eq!(daily[1].temp_min, 11.0);
    }

    #[test]
    fn extreme_temperatures_are_clamped() {
        let mut raw = payload();
        raw["daily"]["temperature_2m_max"] = json!([75.0, 27.5]);
        raw["daily"]["temperature_2m_min"] = json!([-80.0, 11.0]);

        let (_, daily) = normalize(&raw).unwrap();
        assert_eq!(daily[0].temp_max, 60.0);
        assert_eq!(daily[0].temp_min, -60.0);
        assert_eq!(daily[0].temp_mean, -2.5);
    }

    #[test]
    fn non_finite_values_are_forward_filled() {
        let mut days = vec![
            DailyRecord {
                date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                temp_max: f64::NAN,
                temp_min: 10.0,
                temp_mean: 15.0,
                precipitation: 1.0,
                wind_speed: 5.0,
                humidity: 60.0,
                radiation: 200.0,
                pressure: 101.3,
                et0: 3.0,
            },
            DailyRecord {
                date: NaiveDate::from_ymd_opt(2025, 1, 16).unwrap(),
                temp_max: 22.0,
                temp_min: f64::INFINITY,
                temp_mean: 16.0,
                precipitation: f64::NEG_INFINITY,
                wind_speed: 6.0,
                humidity: 61.0,
                radiation: 210.0,
                pressure: 101.2,
                et0: f64::NAN,
            },
        ];

        repair_non_finite(&mut days);

        assert_eq!(days[0].temp_max, 0.0);
        assert_eq!(days[1].temp_min, 10.0);
        assert_eq!(days[1].precipitation, 1.0);
        assert_eq!(days[1].et0, 3.0);
        assert_eq!(days[1].temp_max, 22.0);
    }

    #[test]
    fn odd_location_metadata_is_ignored() {
        let mut raw = payload();
        raw["latitude"] = json!("-33.45");
        raw["longitude"] = json!([1, 2]);
        raw["timezone"] = json!(0);

        let (hourly, daily) = normalize(&raw).unwrap();
        assert_eq!(hourly.len(), 3);
        assert_eq!(daily.len(), 2);
    }

    #[test]
    fn timestamps_with_offsets_are_accepted() {
        let mut raw = payload();
        raw["hourly"]["time"] = json!(["2025-01-15T00:00Z", "2025-01-15T01:00+00:00", "2025-01-15T02:00:00-03:00"]);
        raw["daily"]["time"] = json!(["2025-01-15T00:00Z", "2025-01-16"]);

        let (hourly, daily) = normalize(&raw).unwrap();
        let hours = hourly.iter()
            .map(|h| h.time.format("%Y-%m-%d %H:%M").to_string())
            .collect::<Vec<String>>();
        assert_eq!(hours, vec!["2025-01-15 00:00", "2025-01-15 01:00", "2025-01-15 02:00"]);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn unreadable_pressure_defaults_to_standard_kpa() {
        let mut raw = payload();
        raw["daily"]["surface_pressure_mean"] = json!([null, 1013]);

        let (_, daily) = normalize(&raw).unwrap();
        assert_eq!(daily[0].pressure, STANDARD_PRESSURE_KPA);
        assert_eq!(daily[1].pressure, 101.3);
    }

    #[test]
    fn pressure_conversion_threshold() {
        assert_eq!(pressure_to_kpa(1013.0), 101.3);
        assert_eq!(pressure_to_kpa(200.0), 200.0);
        assert_eq!(pressure_to_kpa(95.0), 95.0);
    }
}
