//! Prediction rows served by `/get_prediction_data`.
//!
//! The server owns this shape; we only read it. Rows are never validated:
//! a missing or odd field becomes `None` and flows on to the chart, so one
//! bad row never costs the whole batch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// Naive layouts tried after RFC 3339 and RFC 2822. Naive values are UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A timestamp exactly as it appeared in the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// A date/time string (RFC 3339, HTTP-date, `YYYY-MM-DD`...).
    Text(String),
    /// Milliseconds since the Unix epoch.
    Millis(f64),
}

impl RawTimestamp {
    /// Resolve to an instant, or `None` when the value is not a date.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Text(text) => parse_timestamp(text),
            RawTimestamp::Millis(ms) if ms.is_finite() => {
                DateTime::from_timestamp_millis(ms.trunc() as i64)
            }
            RawTimestamp::Millis(_) => None,
        }
    }
}

/// Parse the date/time layouts the prediction server is known to emit.
///
/// Flask's `jsonify` writes datetimes as HTTP-dates
/// (`Mon, 01 Jan 2024 00:00:00 GMT`), hand-built rows tend to use ISO-8601.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// One row of the prediction table.
///
/// Only `timestamp` and `curah_hujan` (rainfall, mm) feed the chart. The
/// weather inputs the model was run on are kept when the server sends them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub curah_hujan: Option<f64>,
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Air temperature.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub suhu: Option<f64>,
    /// Relative humidity.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub kelembaban_udara: Option<f64>,
    /// Air pressure.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub tekanan_udara: Option<f64>,
    /// Wind direction.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub arah_angin: Option<f64>,
    /// Wind speed.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub kecepatan_angin: Option<f64>,
}

impl PredictionRecord {
    pub fn new(timestamp: &str, curah_hujan: f64) -> Self {
        Self {
            timestamp: Some(RawTimestamp::Text(timestamp.to_string())),
            curah_hujan: Some(curah_hujan),
            ..Default::default()
        }
    }
}

/// Parse a `/get_prediction_data` response body.
///
/// The body must be a JSON array. Elements that are not objects (nested
/// arrays included) become empty records so the output keeps one entry per
/// array element.
pub fn parse_records(body: &str) -> Result<Vec<PredictionRecord>, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    records_from_value(value)
}

/// Same as [`parse_records`] for an already-decoded JSON value.
pub fn records_from_value(value: Value) -> Result<Vec<PredictionRecord>, FetchError> {
    let Value::Array(items) = value else {
        return Err(FetchError::Decode(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
            _ => PredictionRecord::default(),
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(RawTimestamp::Text(text)),
        Value::Number(n) => n.as_f64().map(RawTimestamp::Millis),
        // An explicit null reads as the epoch, like `new Date(null)`.
        Value::Null => Some(RawTimestamp::Millis(0.0)),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        _ => None,
    })
}
