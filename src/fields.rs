//! Parsing and (de)serialization helpers for the fields shared by forms, JSON bodies and
//! database rows.

use std::ops::RangeInclusive;

use rusqlite::{Row, types::Type};
use serde::{Deserialize, Deserializer, de::Error as _};
use time::{
    Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::Error;

/// The number of rows returned by list endpoints when no `limit` is given.
pub const DEFAULT_LIMIT: i64 = 100;

/// RFC 3339, and therefore the stored text, only has room for four digit years.
const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// The value format of a `datetime-local` input, e.g. "2024-01-01T09:30:00".
const DATETIME_INPUT_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Convert `timestamp` to UTC and drop the fractional seconds.
///
/// Stored timestamps must all have the same shape so that sorting the text
/// column sorts them chronologically.
pub fn normalize_timestamp(timestamp: OffsetDateTime) -> OffsetDateTime {
    let timestamp = timestamp.to_offset(UtcOffset::UTC);

    timestamp - Duration::nanoseconds(timestamp.nanosecond().into())
}

/// The current time, normalized with [normalize_timestamp].
pub fn now() -> OffsetDateTime {
    normalize_timestamp(OffsetDateTime::now_utc())
}

/// Parse a date or date-time entered by a user.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DD`. Inputs without an offset are taken to be UTC, and plain dates are
/// midnight UTC.
///
/// # Errors
/// Returns [Error::InvalidDate] if `input` matches none of the formats, or if the
/// timestamp in UTC falls outside the years 0 to 9999.
pub fn parse_timestamp(input: &str) -> Result<OffsetDateTime, Error> {
    let input = input.trim();

    parse_any_format(input)
        .and_then(|timestamp| timestamp.checked_to_offset(UtcOffset::UTC))
        .filter(|timestamp| STORABLE_YEARS.contains(&timestamp.year()))
        .map(normalize_timestamp)
        .ok_or_else(|| Error::InvalidDate(input.to_owned()))
}

fn parse_any_format(input: &str) -> Option<OffsetDateTime> {
    if let Ok(timestamp) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(timestamp);
    }

    let date_time_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ];

    for format in date_time_formats {
        if let Ok(date_time) = PrimitiveDateTime::parse(input, format) {
            return Some(date_time.assume_utc());
        }
    }

    Date::parse(input, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Format `timestamp` as the text stored in the database, e.g. "2024-01-01T09:30:00Z".
///
/// # Errors
/// Returns [Error::InvalidDate] if the timestamp in UTC falls outside the years 0 to 9999.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, Error> {
    timestamp
        .checked_to_offset(UtcOffset::UTC)
        .map(normalize_timestamp)
        .and_then(|timestamp| timestamp.format(&Rfc3339).ok())
        .ok_or_else(|| Error::InvalidDate(timestamp.to_string()))
}

/// Format `timestamp` in UTC as the value of a `datetime-local` input.
pub fn format_datetime_input(timestamp: OffsetDateTime) -> String {
    let timestamp = normalize_timestamp(timestamp);

    timestamp
        .format(DATETIME_INPUT_FORMAT)
        .unwrap_or_else(|_| timestamp.date().to_string())
}

/// Read a timestamp stored by [format_timestamp] from column `index` of `row`.
pub fn read_timestamp(row: &Row, index: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let text: String = row.get(index)?;

    OffsetDateTime::parse(&text, &Rfc3339).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

/// Deserialize a field that is present in the input, even if it is `null`.
///
/// Combined with `#[serde(default)]` this distinguishes a missing field (`None`)
/// from an explicit `null` (`Some(None)`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Deserialize an optional date or date-time accepted by [parse_timestamp].
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => {
            parse_timestamp(&text).map(Some).map_err(D::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Treat an empty or whitespace-only form field as missing.
pub fn non_empty(text: Option<String>) -> Option<String> {
    text.and_then(|text| {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}
