use std::fmt;
use std::fmt::Formatter;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use crate::coercion::truncate_decimals;

/// One hour of normalized forecast data
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HourlyRecord {
    pub time: NaiveDateTime,
    /// °C
    pub temperature: f64,
    /// %, 0-100
    pub humidity: f64,
    /// mm
    pub precipitation: f64,
    /// km/h
    pub wind_speed: f64,
    /// W/m²
    pub radiation: f64,
}

/// One day of normalized forecast data including the derived mean temperature and ET0
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub temp_mean: f64,
    /// mm
    pub precipitation: f64,
    /// km/h
    pub wind_speed: f64,
    /// %, 0-100
    pub humidity: f64,
    /// W/m²
    pub radiation: f64,
    /// kPa
    pub pressure: f64,
    /// Reference evapotranspiration in mm/day
    pub et0: f64,
}

/// Implementation of the Display Trait for pretty print, one table row per day
impl fmt::Display for DailyRecord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} | Max: {:>5.1} °C | Min: {:>5.1} °C | Precip: {:>5.1} mm | Wind: {:>5.1} km/h | Hum: {:>3.0} % | ET0: {:>5.2} mm/day",
               self.date.format("%Y-%m-%d"),
               self.temp_max,
               self.temp_min,
               self.precipitation,
               self.wind_speed,
               self.humidity,
               self.et0)
    }
}

/// Rough temperature band of a day, used to highlight the day summary
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TempBand {
    Hot,
    Mild,
    Cold,
}

impl fmt::Display for TempBand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TempBand::Hot  => write!(f, "Hot "),
            TempBand::Mild => write!(f, "Mild"),
            TempBand::Cold => write!(f, "Cold"),
        }
    }
}

/// Headline figures for a single day, amplitude and ET0 are truncated to 3 decimals
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub amplitude: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub et0: f64,
    pub band: TempBand,
}

impl From<&DailyRecord> for DaySummary {
    fn from(day: &DailyRecord) -> Self {
        let band = if day.temp_max > 30.0 {
            TempBand::Hot
        } else if day.temp_max < 10.0 {
            TempBand::Cold
        } else {
            TempBand::Mild
        };

        DaySummary {
            date: day.date,
            temp_max: day.temp_max,
            temp_min: day.temp_min,
            amplitude: truncate_decimals(day.temp_max - day.temp_min, 3),
            humidity: day.humidity,
            wind_speed: day.wind_speed,
            et0: truncate_decimals(day.et0, 3),
            band,
        }
    }
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{}] Max/Min: {:.1}° / {:.1}° (amplitude {:.1}°), Humidity: {:.0}%, Wind: {:.1} km/h, ET0: {:.2} mm/day",
               self.band, self.temp_max, self.temp_min, self.amplitude, self.humidity, self.wind_speed, self.et0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(temp_max: f64, temp_min: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            temp_max,
            temp_min,
            temp_mean: (temp_max + temp_min) / 2.0,
            precipitation: 1.25,
            wind_speed: 12.0,
            humidity: 64.6,
            radiation: 200.0,
            pressure: 101.3,
            et0: 4.25,
        }
    }

    #[test]
    fn summary_bands_follow_max_temperature() {
        assert_eq!(DaySummary::from(&day(31.0, 15.0)).band, TempBand::Hot);
        assert_eq!(DaySummary::from(&day(30.0, 15.0)).band, TempBand::Mild);
        assert_eq!(DaySummary::from(&day(9.5, 2.0)).band, TempBand::Cold);
    }

    #[test]
    fn summary_display_formats_figures() {
        let summary = DaySummary::from(&day(28.0, 12.5));
        assert_eq!(summary.amplitude, 15.5);
        assert_eq!(
            summary.to_string(),
            "[Mild] Max/Min: 28.0° / 12.5° (amplitude 15.5°), Humidity: 65%, Wind: 12.0 km/h, ET0: 4.25 mm/day"
        );
    }

    #[test]
    fn summary_truncates_instead_of_rounding() {
        let mut record = day(20.0, 10.0);
        record.et0 = 4.56789;
        let summary = DaySummary::from(&record);

        assert_eq!(summary.et0, 4.567);
        assert_eq!(summary.amplitude, 10.0);
    }

    #[test]
    fn daily_row_starts_with_date() {
        let row = day(20.0, 10.0).to_string();
        assert!(row.starts_with("2025-01-15 |"));
        assert!(row.ends_with("ET0:  4.25 mm/day"));
    }
}
