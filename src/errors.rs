use thiserror::Error;

/// Errors raised while turning a raw forecast payload into normalized series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("incomplete forecast data, missing field: {0}")]
    IncompleteData(String),
    #[error("malformed forecast data: {0}")]
    MalformedData(String),
}

/// Degradation raised by the evapotranspiration formula
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Et0Error {
    #[error("ET0 evaluated to a non finite value (numerator: {numerator}, denominator: {denominator})")]
    NonFinite { numerator: f64, denominator: f64 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("error parsing config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config error: {0}")]
    Message(String),
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self {
        ConfigError::Message(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum OpenMeteoError {
    #[error("OpenMeteoError::Http: {0}")]
    Http(String),
    #[error("OpenMeteoError::Document: {0}")]
    Document(String),
}
impl From<ureq::Error> for OpenMeteoError {
    fn from(e: ureq::Error) -> Self {
        OpenMeteoError::Http(e.to_string())
    }
}
impl From<serde_json::Error> for OpenMeteoError {
    fn from(e: serde_json::Error) -> Self {
        OpenMeteoError::Document(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("error creating log file appender: {0}")]
    Appender(#[from] std::io::Error),
    #[error("error building log configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("error setting logger: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// Top level error for the climatracker application
#[derive(Error, Debug)]
#[error("ClimaError: {0}")]
pub struct ClimaError(pub String);
impl From<ConfigError> for ClimaError {
    fn from(e: ConfigError) -> Self {
        ClimaError(e.to_string())
    }
}
impl From<LoggingError> for ClimaError {
    fn from(e: LoggingError) -> Self {
        ClimaError(e.to_string())
    }
}
impl From<OpenMeteoError> for ClimaError {
    fn from(e: OpenMeteoError) -> Self {
        ClimaError(e.to_string())
    }
}
impl From<ProcessingError> for ClimaError {
    fn from(e: ProcessingError) -> Self {
        ClimaError(e.to_string())
    }
}
