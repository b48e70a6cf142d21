//! UTC instants and their lenient text form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// A point in time, always UTC.
pub type Instant = DateTime<Utc>;

/// Returns the current instant.
pub fn now() -> Instant {
    Utc::now()
}

/// Parses an instant.
///
/// Accepts RFC 3339 (`2025-05-20T12:00:00Z`, offsets allowed), a naive
/// date-time taken as UTC (`2025-05-20T12:00:00`) and a bare date taken as
/// UTC midnight (`2025-05-20`).
pub fn parse_instant(text: &str) -> Result<Instant> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::InvalidTimestamp(text.to_string()))
}

/// Formats an instant as RFC 3339 with a `Z` suffix.
pub fn format_instant(instant: &Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(feature = "serde")]
/// Serde adapter for [`Instant`] fields using the lenient text form.
pub mod serde_instant {
    use super::{format_instant, parse_instant, Instant};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Instant, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_instant(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Instant, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_instant(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
/// Serde adapter for optional [`Instant`] fields; empty strings read as `None`.
pub mod serde_instant_opt {
    use super::{format_instant, parse_instant, Instant};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Instant>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(instant) => serializer.serialize_str(&format_instant(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Instant>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => parse_instant(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
