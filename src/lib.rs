pub mod advisory;
pub mod coercion;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod evapotranspiration;
pub mod logging;
pub mod manager_open_meteo;
pub mod models;
pub mod normalizer;
