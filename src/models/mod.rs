pub mod advisory;
pub mod forecast;
pub mod open_meteo;
