use std::env;
use std::time::Duration;
use anyhow::Result;
use log::info;
use climatracker::config::load_config;
use climatracker::dashboard::{format_report, process_cities};
use climatracker::logging::setup_logger;
use climatracker::manager_open_meteo::OpenMeteo;

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

fn main() -> Result<()> {
    let config_path = env::args().nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = load_config(&config_path)?;
    let _handle = setup_logger(&config.general)?;

    info!("climatracker version: {}", env!("CARGO_PKG_VERSION"));

    let cities = config.selected_cities()?;
    let client = OpenMeteo::new(&config.forecast.base_url, config.forecast.timeout_secs);

    let reports = process_cities(
        &client,
        &cities,
        config.forecast.days,
        Duration::from_millis(config.selection.request_delay_ms));

    for report in &reports {
        println!("{}", format_report(report));
    }

    let with_data = reports.iter().filter(|r| r.analysis.is_some()).count();
    info!("processed {} cities, {} with data", reports.len(), with_data);

    Ok(())
}
