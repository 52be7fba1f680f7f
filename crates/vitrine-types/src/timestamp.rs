//! Creation timestamps as stored in documents.
//!
//! Timestamps are written as RFC 3339 strings in UTC with millisecond
//! precision and a `Z` suffix. The fixed width means lexical order equals
//! chronological order, so stores can order by the raw string.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::TypeError;

/// Current time truncated to the stored precision, so a timestamp read
/// back from a document equals the one that was written.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Format a timestamp in the canonical document form.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp written by [`format_timestamp`] (or any RFC 3339
/// string with an offset).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TypeError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TypeError::malformed(format!("invalid timestamp `{raw}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_is_fixed_width_utc() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_timestamp(&at), "2024-03-05T07:08:09.000Z");
    }

    #[test]
    fn parse_accepts_offsets() {
        let parsed = parse_timestamp("2024-03-05T09:08:09+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, TypeError::MalformedDocument { .. }));
    }

    #[test]
    fn now_survives_a_round_trip() {
        let at = now();
        assert_eq!(parse_timestamp(&format_timestamp(&at)).unwrap(), at);
    }

    #[test]
    fn lexical_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let later = earlier + chrono::Duration::milliseconds(1);
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }
}
