use std::fmt;
use std::fmt::Formatter;
use serde::Serialize;

/// Alert severity
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Severity::High   => write!(f, "HIGH  "),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low    => write!(f, "LOW   "),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Alert {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(severity: Severity, title: &str, message: String) -> Alert {
        Alert { severity, title: title.to_string(), message }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Alert {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.title, self.message)
    }
}
