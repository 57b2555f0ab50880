//! Amount handling
//!
//! Amounts are plain `f64` values accumulated without intermediate rounding.
//! Anything that is not a usable number is read as zero, and rounding to two
//! decimals happens only when a value is shown to the user.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treat non-finite values as zero
pub fn coerce(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Read an arbitrary JSON value as an amount
///
/// Numbers pass through, numeric strings are parsed, everything else
/// (null, booleans, arrays, objects, garbage strings) becomes 0.
pub fn coerce_value(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    coerce(raw)
}

/// Serde helper: `#[serde(default, deserialize_with = "lenient")]`
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_value(&value))
}

/// Round to cents; only for presentation and stored presets
pub fn round2(value: f64) -> f64 {
    (coerce(value) * 100.0).round() / 100.0
}

/// Format an amount with two decimals and a trailing currency symbol
pub fn format_amount(value: f64, symbol: &str) -> String {
    let rounded = round2(value);
    // avoid printing "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if symbol.is_empty() {
        format!("{:.2}", rounded)
    } else {
        format!("{:.2} {}", rounded, symbol)
    }
}
