use serde_json::Value;

/// Unit marks that the weather sources may leave in textual values
const UNIT_MARKS: [&str; 4] = ["°C", "%", "mm", "km/h"];

/// Placeholder some sources use for a missing reading
const PLACEHOLDER: &str = "N/A";

/// Converts a raw payload value into a finite f64, falling back to the given default
/// whenever the value is missing, unparsable or not finite.
///
/// This is the one boundary between untrusted payload data and the numeric pipeline, hence
/// it never fails.
///
/// # Arguments
///
/// * 'value' - the raw value, None if absent from the payload
/// * 'default' - value to use when no finite number can be extracted
pub fn coerce(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(try_coerce).unwrap_or(default)
}

/// Tries to extract a finite number from a raw payload value
///
/// Sequences resolve to their first element that converts on its own, nested sequences
/// are never descended into.
///
/// # Arguments
///
/// * 'value' - the raw value
pub fn try_coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Array(items) => items.iter().find_map(try_coerce_scalar),
        _ => try_coerce_scalar(value),
    }
}

/// Returns the given value if it is finite, otherwise the default
///
/// # Arguments
///
/// * 'value' - value to check
/// * 'default' - replacement for NaN and infinities
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

/// Truncates a value to the given number of decimals without rounding.
/// Non finite values truncate to 0.0
///
/// # Arguments
///
/// * 'value' - value to truncate
/// * 'decimals' - number of decimals to keep
pub fn truncate_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let multiplier = 10f64.powi(decimals as i32);
    finite_or((value * multiplier).trunc() / multiplier, 0.0)
}

fn try_coerce_scalar(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_text(s),
        Value::Array(_) | Value::Object(_) => None,
    }?;

    number.is_finite().then_some(number)
}

fn parse_text(text: &str) -> Option<f64> {
    let mut clean = text.trim().to_string();
    for mark in UNIT_MARKS {
        clean = clean.replace(mark, "");
    }
    let clean = clean.trim();

    if clean.is_empty() || clean == PLACEHOLDER {
        None
    } else {
        clean.parse::<f64>().ok()
    }
}
