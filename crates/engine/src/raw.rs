//! Ingestion boundary for loosely-typed store records.
//!
//! The document store keeps money records as free-form maps written by the
//! mobile entry forms over the years, so the two fields the reports depend on
//! arrive in heterogeneous shapes:
//!
//! - `amount` is a JSON number or a decimal string;
//! - `date` is an RFC 3339 string, a date-only string, an epoch-milliseconds
//!   number, or a structured timestamp map (`{"seconds": .., "nanoseconds": ..}`,
//!   underscored spellings included).
//!
//! Everything is converted to one strict shape here; parse failures are
//! returned as errors so the aggregator can apply its per-field leniency
//! policy explicitly.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::EngineError;

/// One record as returned by the store for `branch/moneyInRecords` or
/// `branch/moneyOutRecords`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Option<String>,
    pub amount: Option<Value>,
    pub date: Option<Value>,
    pub category: Option<String>,
    pub remarks: Option<String>,
}

/// Normalizes a raw `date` field into a UTC instant.
pub fn parse_instant(value: &Value) -> Result<DateTime<Utc>, EngineError> {
    match value {
        Value::String(s) => parse_instant_str(s),
        // Entry forms written before the ISO migration stored epoch millis.
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| EngineError::MalformedDate(format!("invalid epoch value: {n}"))),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)
                .ok_or_else(|| {
                    EngineError::MalformedDate("timestamp map without seconds".to_string())
                })?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            u32::try_from(nanos)
                .ok()
                .and_then(|nanos| DateTime::from_timestamp(seconds, nanos))
                .ok_or_else(|| {
                    EngineError::MalformedDate(format!("timestamp out of range: {seconds}"))
                })
        }
        other => Err(EngineError::MalformedDate(format!(
            "unsupported date shape: {other}"
        ))),
    }
}

fn parse_instant_str(s: &str) -> Result<DateTime<Utc>, EngineError> {
    let trimmed = s.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    // ISO strings without an offset are taken as UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(day.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(EngineError::MalformedDate(format!(
        "unparseable date: {trimmed}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parses_rfc3339_with_offset() {
        let instant = parse_instant(&json!("2025-01-05T10:30:00+08:00")).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 1, 5, 2, 30, 0).unwrap());
    }

    #[test]
    fn parses_naive_iso_and_date_only() {
        let instant = parse_instant(&json!("2025-01-05T10:30:00.500")).unwrap();
        assert_eq!(
            instant,
            Utc.with_ymd_and_hms(2025, 1, 5, 10, 30, 0).unwrap()
                + chrono::Duration::milliseconds(500)
        );

        let midnight = parse_instant(&json!("2025-01-05")).unwrap();
        assert_eq!(midnight, Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_timestamp_maps_both_spellings() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        let seconds = expected.timestamp();
        assert_eq!(
            parse_instant(&json!({"seconds": seconds, "nanoseconds": 0})).unwrap(),
            expected
        );
        assert_eq!(
            parse_instant(&json!({"_seconds": seconds, "_nanoseconds": 0})).unwrap(),
            expected
        );
    }

    #[test]
    fn parses_epoch_millis() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(
            parse_instant(&json!(expected.timestamp_millis())).unwrap(),
            expected
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant(&json!("not-a-date")).is_err());
        assert!(parse_instant(&json!(null)).is_err());
        assert!(parse_instant(&json!(["2025"]))
            .is_err());
        assert!(parse_instant(&json!({"minutes": 3})).is_err());
    }
}
