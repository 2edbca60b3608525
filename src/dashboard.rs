use std::thread;
use std::time::Duration;
use chrono::Local;
use log::{error, info};
use serde_json::Value;
use crate::advisory::evaluate;
use crate::config::City;
use crate::errors::{ClimaError, OpenMeteoError, ProcessingError};
use crate::manager_open_meteo::OpenMeteo;
use crate::models::advisory::Alert;
use crate::models::forecast::{DailyRecord, DaySummary, HourlyRecord};
use crate::normalizer::normalize;

/// Anything able to deliver raw forecast documents for a point
pub trait ForecastSource {
    fn get_forecast(&self, lat: f64, long: f64, days: u32) -> Result<Value, OpenMeteoError>;
}

impl ForecastSource for OpenMeteo {
    fn get_forecast(&self, lat: f64, long: f64, days: u32) -> Result<Value, OpenMeteoError> {
        OpenMeteo::get_forecast(self, lat, long, days)
    }
}

/// Normalized series together with the advisories derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastAnalysis {
    pub hourly: Vec<HourlyRecord>,
    pub daily: Vec<DailyRecord>,
    pub recommendations: Vec<String>,
    pub alerts: Vec<Alert>,
}

impl ForecastAnalysis {
    /// Headline figures for the current day, if there is one
    pub fn summary(&self) -> Option<DaySummary> {
        self.daily.first().map(DaySummary::from)
    }
}

/// Outcome for one city, analysis is None when no data could be produced
#[derive(Debug)]
pub struct CityReport {
    pub city: City,
    pub analysis: Option<ForecastAnalysis>,
}

/// Normalizes a raw forecast and evaluates the advisory rules on it
///
/// # Arguments
///
/// * 'payload' - raw forecast document
pub fn analyze(payload: &Value) -> Result<ForecastAnalysis, ProcessingError> {
    let (hourly, daily) = normalize(payload)?;
    let (recommendations, alerts) = evaluate(&daily);

    Ok(ForecastAnalysis { hourly, daily, recommendations, alerts })
}

/// Fetches and analyzes the forecast for a single city
///
/// # Arguments
///
/// * 'source' - where to get the raw forecast from
/// * 'city' - the city to process
/// * 'days' - number of forecast days
pub fn process_city(source: &impl ForecastSource, city: &City, days: u32) -> Result<ForecastAnalysis, ClimaError> {
    let payload = source.get_forecast(city.lat, city.long, days)?;

    Ok(analyze(&payload)?)
}

/// Processes each city in turn. A failing city is logged and reported without data, it never
/// stops the remaining cities from being processed.
///
/// # Arguments
///
/// * 'source' - where to get the raw forecasts from
/// * 'cities' - cities to process, reports are returned in the same order
/// * 'days' - number of forecast days
/// * 'delay' - pause between two consecutive requests
pub fn process_cities(source: &impl ForecastSource, cities: &[City], days: u32, delay: Duration) -> Vec<CityReport> {
    let mut reports: Vec<CityReport> = Vec::with_capacity(cities.len());

    for (i, city) in cities.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }

        info!("fetching forecast for {}", city.name);
        let analysis = match process_city(source, city, days) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                error!("no data available for {}: {}", city.name, e);
                None
            }
        };

        reports.push(CityReport { city: city.clone(), analysis });
    }

    reports
}

/// Formats a city report as plain text with a caption
///
/// # Arguments
///
/// * 'report' - the report to format
pub fn format_report(report: &CityReport) -> String {
    let report_time = format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let caption = format!("{} {} ({}) ", report_time, report.city.name.to_uppercase(), report.city.region);
    let mut msg = format!("{:=<120}\n", caption);

    let Some(analysis) = &report.analysis else {
        msg += "No data available\n";
        return msg;
    };

    if let Some(summary) = analysis.summary() {
        msg += &format!("{}\n\n", summary);
    }

    for day in &analysis.daily {
        msg += &format!("{}\n", day);
    }

    msg += "\nAlerts:\n";
    for alert in &analysis.alerts {
        msg += &format!("  {}\n", alert);
    }

    if !analysis.recommendations.is_empty() {
        msg += "\nRecommendations:\n";
        for (i, r) in analysis.recommendations.iter().enumerate() {
            msg += &format!("  {}. {}\n", i + 1, r);
        }
    }

    msg
}
