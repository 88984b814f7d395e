//! Date/time handling for remote timestamp fields.
//!
//! The service reports times in several shapes (RFC 3339, RFC 2822 and
//! bare `YYYY-MM-DD HH:MM:SS`). Bare times are local to the service, which
//! runs at a fixed UTC-04:00 offset; everything is normalised to UTC.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::ParseError;

/// Offset of the service's clock west of UTC, in seconds.
pub const SERVICE_UTC_OFFSET_WEST_SECS: i32 = 4 * 3600;

/// Format of the `time` attribute in a message sending schedule.
pub const SEND_TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// The service's fixed time zone.
pub fn service_offset() -> FixedOffset {
    FixedOffset::west_opt(SERVICE_UTC_OFFSET_WEST_SECS).expect("offset is within a day")
}

/// Parse a timestamp as reported by the service.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            if let Some(dt) = service_offset().from_local_datetime(&naive).single() {
                return Ok(dt.with_timezone(&Utc));
            }
        }
    }

    Err(ParseError::Timestamp {
        value: value.to_string(),
    })
}

/// Render a send instant in the service's zone for a sending schedule.
pub fn format_send_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&service_offset())
        .format(SEND_TIME_FORMAT)
        .to_string()
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_vec<'de, D>(deserializer: D) -> Result<Vec<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|value| parse_timestamp(value).map_err(serde::de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_rfc3339() {
        let dt = parse_timestamp("2008-06-01T12:30:00+02:00").unwrap();
        assert_eq!(dt, utc(2008, 6, 1, 10, 30, 0));
    }

    #[test]
    fn parses_rfc2822() {
        let dt = parse_timestamp("Sun, 01 Jun 2008 08:00:00 -0400").unwrap();
        assert_eq!(dt, utc(2008, 6, 1, 12, 0, 0));
    }

    #[test]
    fn bare_time_is_in_service_zone() {
        let dt = parse_timestamp("2008-06-01 08:00:00").unwrap();
        assert_eq!(dt, utc(2008, 6, 1, 12, 0, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { .. }));
    }

    #[test]
    fn send_time_is_rendered_at_minus_four() {
        assert_eq!(
            format_send_time(utc(2008, 6, 1, 12, 0, 0)),
            "Sun, 01 Jun 2008 08:00:00 -0400"
        );
    }

    #[test]
    fn send_time_crosses_midnight_backwards() {
        assert_eq!(
            format_send_time(utc(2009, 1, 1, 2, 15, 0)),
            "Wed, 31 Dec 2008 22:15:00 -0400"
        );
    }
}
