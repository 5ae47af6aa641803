//! Scalar coercion.
//!
//! Turns one native value into exactly one wire string for a scalar shape.
//! Values of the wrong runtime type are rejected, never stringified.

use base64::Engine;
use chrono::{DateTime, Utc};

use crate::error::{QueryError, Result};
use crate::types::{ParamValue, ScalarShape, ScalarType, TimestampFormat};

/// Coerce `value` for the scalar shape found at wire key `path`.
///
/// `default_timestamp_format` applies when the shape does not pin one.
pub fn coerce_scalar(
    scalar: &ScalarShape,
    value: &ParamValue,
    default_timestamp_format: TimestampFormat,
    path: &str,
) -> Result<String> {
    let mismatch =
        || QueryError::type_mismatch(path, scalar.scalar_type.as_str(), value.type_name());

    match (scalar.scalar_type, value) {
        (ScalarType::String, ParamValue::String(s)) => Ok(s.clone()),
        (ScalarType::Integer, ParamValue::Integer(i)) => Ok(i.to_string()),
        (ScalarType::Float, ParamValue::Float(f)) => Ok(format_float(*f)),
        (ScalarType::Float, ParamValue::Integer(i)) => Ok(i.to_string()),
        (ScalarType::Boolean, ParamValue::Boolean(b)) => Ok(format_bool(*b).to_string()),
        (ScalarType::Blob, ParamValue::Blob(bytes)) => {
            Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        (ScalarType::Blob, ParamValue::String(s)) => {
            Ok(base64::engine::general_purpose::STANDARD.encode(s.as_bytes()))
        }
        (ScalarType::Timestamp, ParamValue::String(s)) => {
            let parsed = DateTime::parse_from_rfc3339(s).map_err(|_| {
                QueryError::type_mismatch(path, "timestamp", "unparseable timestamp string")
            })?;
            let format = scalar.timestamp_format.unwrap_or(default_timestamp_format);
            Ok(format.format(&parsed.with_timezone(&Utc)))
        }
        (ScalarType::Timestamp, value) => {
            let ts = to_datetime(value).ok_or_else(mismatch)?;
            let format = scalar.timestamp_format.unwrap_or(default_timestamp_format);
            Ok(format.format(&ts))
        }
        _ => Err(mismatch()),
    }
}

/// Turn a caller map key into the native value its key shape expects.
///
/// Map keys always arrive as strings; numeric and boolean key shapes parse
/// them so that `{"22": ..}` serializes against an `integer` key.
pub fn map_key_value(scalar: &ScalarShape, key: &str, path: &str) -> Result<ParamValue> {
    let unparseable = || {
        QueryError::type_mismatch(path, scalar.scalar_type.as_str(), "unparseable map key")
    };
    match scalar.scalar_type {
        ScalarType::Integer => key
            .parse::<i64>()
            .map(ParamValue::Integer)
            .map_err(|_| unparseable()),
        ScalarType::Float => key
            .parse::<f64>()
            .map(ParamValue::Float)
            .map_err(|_| unparseable()),
        ScalarType::Boolean => match key {
            "true" => Ok(ParamValue::Boolean(true)),
            "false" => Ok(ParamValue::Boolean(false)),
            _ => Err(unparseable()),
        },
        ScalarType::String | ScalarType::Blob | ScalarType::Timestamp => {
            Ok(ParamValue::String(key.to_string()))
        }
    }
}

const fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Epoch seconds (integral or fractional) and native timestamps.
fn to_datetime(value: &ParamValue) -> Option<DateTime<Utc>> {
    match value {
        ParamValue::Timestamp(ts) => Some(*ts),
        ParamValue::Integer(secs) => DateTime::from_timestamp(*secs, 0),
        ParamValue::Float(secs) if secs.is_finite() => {
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
            DateTime::from_timestamp(whole as i64, nanos)
        }
        _ => None,
    }
}
