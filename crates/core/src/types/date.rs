//! Lenient date decoding for backend timestamps.
//!
//! The backend stores `date` fields as `YYYY-MM-DD` and bookkeeping fields as
//! full timestamps, sometimes without an offset. Both shapes decode here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

/// Deserialize an optional timestamp.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognised timestamp: {raw}"))),
    }
}

/// Deserialize an optional calendar date, accepting full timestamps too.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(timestamp(deserializer)?.map(|ts| ts.date_naive()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        for raw in [
            "2025-03-14T09:30:00.000Z",
            "2025-03-14T11:30:00+02:00",
            "2025-03-14 09:30:00",
            "2025-03-14",
        ] {
            assert_eq!(parse_timestamp(raw).unwrap().date_naive(), expected, "{raw}");
        }
        assert!(parse_timestamp("14/03/2025").is_none());
    }
}
