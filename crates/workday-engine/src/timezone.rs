//! Conversion between UTC instants and the single local civil timezone.
//!
//! The calculation core works on [`NaiveDateTime`] values that are implicitly
//! in this zone; everything crossing the outer boundary is UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, WorkdayError};

/// IANA name of the default civil timezone.
pub const DEFAULT_TIMEZONE: &str = "America/Bogota";

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The one civil timezone all calendar reasoning happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilZone {
    tz: Tz,
}

impl CivilZone {
    pub fn new(tz: Tz) -> Self {
        CivilZone { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Local wall-clock time for a UTC instant.
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// UTC instant for a local wall-clock time.
    ///
    /// Ambiguous local times (clocks turned back) resolve to the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::Internal`] for local times that do not exist in the zone.
    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                WorkdayError::Internal(format!(
                    "local time {local} does not exist in {}",
                    self.tz.name()
                ))
            })
    }
}

impl Default for CivilZone {
    fn default() -> Self {
        CivilZone { tz: Tz::America__Bogota }
    }
}

impl FromStr for CivilZone {
    type Err = WorkdayError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<Tz>()
            .map(CivilZone::new)
            .map_err(|_| WorkdayError::InvalidParameters(format!("invalid timezone '{s}'")))
    }
}

impl fmt::Display for CivilZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tz.name())
    }
}

/// Parse a UTC timestamp such as `2025-08-19T14:00:00Z`.
///
/// Fractional seconds are accepted. The `Z` designator is required; explicit
/// offsets such as `+00:00` or `-05:00` are rejected.
///
/// # Errors
///
/// Returns [`WorkdayError::InvalidParameters`] for anything else.
pub fn parse_utc(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if !s.ends_with('Z') {
        return Err(WorkdayError::InvalidParameters(format!(
            "date must be an ISO 8601 UTC timestamp ending in 'Z', got '{s}'"
        )));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| WorkdayError::InvalidParameters(format!("invalid date '{s}': {e}")))
}

/// Format as `YYYY-MM-DDTHH:MM:SSZ`, without fractional seconds.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format(UTC_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_default_is_bogota() {
        assert_eq!(CivilZone::default().to_string(), DEFAULT_TIMEZONE);
        assert_eq!(
            DEFAULT_TIMEZONE.parse::<CivilZone>().unwrap(),
            CivilZone::default()
        );
    }

    #[test]
    fn test_to_local_bogota_is_minus_five() {
        let zone = CivilZone::default();
        let utc = parse_utc("2025-08-15T22:00:00Z").unwrap();
        assert_eq!(zone.to_local(utc), local(2025, 8, 15, 17, 0));
    }

    #[test]
    fn test_to_utc_round_trips() {
        let zone = CivilZone::default();
        let utc = zone.to_utc(local(2025, 8, 18, 9, 0)).unwrap();
        assert_eq!(format_utc(utc), "2025-08-18T14:00:00Z");
    }

    #[test]
    fn test_to_utc_gap_is_error() {
        // 2026-03-08 02:30 does not exist in New York.
        let zone: CivilZone = "America/New_York".parse().unwrap();
        let err = zone.to_utc(local(2026, 3, 8, 2, 30)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InternalError);
    }

    #[test]
    fn test_to_utc_overlap_takes_earliest() {
        // 2026-11-01 01:30 happens twice in New York; EDT (UTC-4) comes first.
        let zone: CivilZone = "America/New_York".parse().unwrap();
        let utc = zone.to_utc(local(2026, 11, 1, 1, 30)).unwrap();
        assert_eq!(format_utc(utc), "2026-11-01T05:30:00Z");
    }

    #[test]
    fn test_invalid_zone_name() {
        assert!("Mars/Olympus_Mons".parse::<CivilZone>().is_err());
    }

    #[test]
    fn test_parse_utc_requires_z() {
        assert!(parse_utc("2025-08-19T14:00:00Z").is_ok());
        assert!(parse_utc("2025-08-19T14:00:00.000Z").is_ok());
        assert!(parse_utc("2025-08-19T14:00:00+00:00").is_err());
        assert!(parse_utc("2025-08-19T09:00:00-05:00").is_err());
        assert!(parse_utc("fecha-invalida").is_err());
        assert!(parse_utc("2025-13-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_format_drops_fraction() {
        let utc = parse_utc("2025-08-19T14:00:00.123Z").unwrap();
        assert_eq!(format_utc(utc), "2025-08-19T14:00:00Z");
    }
}
