//! Creation timestamp parsing
//!
//! `CREATED` values are `xsd:dateTime` strings. Scanning stations write them with
//! or without a UTC offset, so offset-less values are interpreted in a configured
//! zone. Parsed values are compared as instants, never as strings.

use crate::domain::{RenumberError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::str::FromStr;

/// Zone used for timestamps that carry no UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NaiveTimezone {
    /// Interpret as UTC
    #[default]
    Utc,
    /// Interpret in the host's local zone
    Local,
}

impl FromStr for NaiveTimezone {
    type Err = RenumberError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(RenumberError::Configuration(format!(
                "Invalid naive timezone: {s}. Expected 'utc' or 'local'"
            ))),
        }
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a creation timestamp into an instant
///
/// Accepts RFC 3339 values, offset-less date-times (`T` or space separated,
/// optional fractional seconds) and bare dates (midnight). Returns `None` for
/// anything else, including local times that do not exist because of a DST gap.
///
/// # Examples
///
/// ```
/// use renumber::domain::timestamp::{parse_created, NaiveTimezone};
///
/// let a = parse_created("2023-01-01T10:00:00Z", NaiveTimezone::Utc).unwrap();
/// let b = parse_created("2023-01-01T12:00:00+02:00", NaiveTimezone::Utc).unwrap();
/// assert_eq!(a, b);
/// assert!(parse_created("not a date", NaiveTimezone::Utc).is_none());
/// ```
pub fn parse_created(value: &str, zone: NaiveTimezone) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    match zone {
        NaiveTimezone::Utc => Some(Utc.from_utc_datetime(&naive)),
        NaiveTimezone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
