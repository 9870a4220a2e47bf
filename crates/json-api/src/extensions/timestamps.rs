//! Timestamp parsing for request payloads.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as
/// midnight UTC.
pub(crate) fn parse_timestamp(value: &str, field: &str) -> Result<Timestamp, StatusError> {
    let brief = format!("could not parse \"{field}\"");

    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    value
        .parse::<Date>()
        .and_then(|date| date.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .or_400(&brief)
}
