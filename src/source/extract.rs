//! Pulling the row array and total row count out of a list response.

use serde_json::Value;

use super::config::SourceConfig;
use crate::error::{ListSourceError, Result};
use crate::json_path::{get_path, take_path};
use crate::transport::HttpResponse;

/// Total row count: a response header named `total_key` wins; otherwise the
/// body is searched at the `total_key` dot-path, defaulting to 0.
///
/// A header that is present but not valid text is an error, not a reason to
/// fall back to the body.
pub fn extract_total(config: &SourceConfig, response: &HttpResponse) -> Result<u64> {
    let key = &config.total_key;

    if let Some(value) = response.headers().get(key.as_str()) {
        let raw = value
            .to_str()
            .map_err(|_| invalid_total(key, &String::from_utf8_lossy(value.as_bytes())))?;
        return parse_total(raw).ok_or_else(|| invalid_total(key, raw));
    }

    match get_path(response.body(), key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(integral_total))
            .ok_or_else(|| invalid_total(key, &n.to_string())),
        Some(Value::String(s)) => parse_total(s).ok_or_else(|| invalid_total(key, s)),
        Some(other) => Err(invalid_total(key, &other.to_string())),
    }
}

/// Numeric text as a count: `42`, ` 42 `, `42.0` and `4.2e1` all read as 42.
fn parse_total(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral_total))
}

/// Non-negative integral floats that fit a `u64`. 2^64 itself does not.
fn integral_total(f: f64) -> Option<u64> {
    (f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then_some(f as u64)
}

/// Row array: the value at `data_key` (missing means `[]`), or the whole
/// body when no data key is configured. Anything but an array is an error.
pub fn extract_data(config: &SourceConfig, body: Value) -> Result<Vec<Value>> {
    let data = match config.data_key() {
        Some(key) => {
            let mut body = body;
            take_path(&mut body, key).unwrap_or_else(|| Value::Array(Vec::new()))
        }
        None => body,
    };

    match data {
        Value::Array(items) => Ok(items),
        _ => Err(ListSourceError::DataShape {
            data_key: config.data_key().unwrap_or_default().to_string(),
        }),
    }
}

fn invalid_total(key: &str, value: &str) -> ListSourceError {
    ListSourceError::InvalidTotal {
        total_key: key.to_string(),
        value: value.to_string(),
    }
}
