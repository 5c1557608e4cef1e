//! Serde helpers for timestamps stored inside documents.
//!
//! Stored timestamps always use RFC 3339 in UTC with microsecond precision so
//! that `json_extract` comparisons and `ORDER BY` on the raw strings follow
//! chronological order.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Canonical storage form of a timestamp.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 timestamp, or a naive one which is taken to be UTC.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => super::serialize(ts, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(500);

        assert_eq!(format(&whole), "2026-03-01T18:00:00.000000Z");
        assert_eq!(format(&fractional), "2026-03-01T18:00:00.500000Z");
        assert!(format(&whole) < format(&fractional));
    }

    #[test]
    fn parses_offsets_and_naive_inputs() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();

        assert_eq!(parse("2026-03-01T18:00:00Z"), Some(expected));
        assert_eq!(parse("2026-03-01T20:00:00+02:00"), Some(expected));
        assert_eq!(parse("2026-03-01T18:00:00"), Some(expected));
        assert_eq!(parse("2026-03-01T18:00"), Some(expected));
        assert_eq!(
            parse("2026-03-01T18:00:00.250"),
            Some(expected + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse("next tuesday"), None);
    }
}
