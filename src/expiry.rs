use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

pub fn parse_expiration(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| Error::Parse {
            value: text.to_string(),
            source,
        })
}

/// Renders an expiration in the wire format stored in the credentials file,
/// e.g. `2020-01-01T00:00:00Z`.
pub fn format_expiration(expiration: &DateTime<Utc>) -> String {
    expiration.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whether credentials expiring at `expiry` can still be used at `now`.
///
/// Absent or empty expirations are never valid. An expiration equal to `now`
/// is still valid; only a strictly later `now` forces a refresh.
pub fn is_valid(expiry: Option<&str>, now: DateTime<Utc>) -> Result<bool> {
    let text = match expiry {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(false),
    };
    let expiration = parse_expiration(text)?;
    Ok(now <= expiration)
}
