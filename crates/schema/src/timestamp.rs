use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::TimestampError;

/// Parses an ISO-8601 date-time in its RFC 3339 profile, e.g. `2024-01-01T00:00:00.000Z`.
pub fn parse_iso8601(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339).ok()
}

/// Formats `at` in UTC with millisecond precision and a `Z` suffix.
pub fn format_iso8601(at: OffsetDateTime) -> Result<String, TimestampError> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );

    Ok(at.to_offset(UtcOffset::UTC).format(&format)?)
}

/// Current UTC time, formatted as by [`format_iso8601`].
pub fn now_iso8601() -> Result<String, TimestampError> {
    format_iso8601(OffsetDateTime::now_utc())
}
