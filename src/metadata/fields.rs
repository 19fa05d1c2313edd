//! Field decoders for the irregular value encodings used by TheTVDB XML.
//!
//! Every decoder exists twice: as a plain `parse_*` function working on the
//! raw element text, and as a `deserialize_*` adapter for use with
//! `#[serde(deserialize_with = ...)]` on the wire types.

use super::ImageFlag;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Format of the combined date and time fields (`added`, `thumb_added`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the date-only fields (`FirstAired`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors produced while decoding a single field value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Text is neither empty nor a valid number
    #[error("invalid number '{text}': {reason}")]
    InvalidNumber { text: String, reason: String },

    /// Text is not a representable count of seconds since the Unix epoch
    #[error("invalid unix timestamp '{0}'")]
    InvalidUnixTime(String),

    /// Text does not match `YYYY-MM-DD HH:MM:SS`
    #[error("invalid timestamp '{text}' (expected YYYY-MM-DD HH:MM:SS): {reason}")]
    InvalidTimestamp { text: String, reason: String },

    /// Text does not match `YYYY-MM-DD`
    #[error("invalid date '{text}' (expected YYYY-MM-DD): {reason}")]
    InvalidDate { text: String, reason: String },
}

/// Splits a pipe-delimited list such as `|Animation|Comedy|`
///
/// Leading and trailing pipes are trimmed before splitting. Empty input
/// yields an empty list rather than a list holding one empty string.
pub fn parse_pipe_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim_matches('|');
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed.split('|').map(str::to_string).collect()
}

/// Parses a number that the service may leave empty
///
/// Empty (or whitespace-only) text is `None`; any other text must parse.
pub fn parse_nullable<T>(raw: &str) -> Result<Option<T>, FieldError>
where
    T: FromStr,
    T::Err: Display,
{
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    text.parse::<T>()
        .map(Some)
        .map_err(|e| FieldError::InvalidNumber {
            text: text.to_string(),
            reason: e.to_string(),
        })
}

/// Parses an image flag, following the same empty-is-absent rule
pub fn parse_image_flag(raw: &str) -> Result<Option<ImageFlag>, FieldError> {
    Ok(parse_nullable::<u8>(raw)?.map(ImageFlag::from))
}

/// Parses seconds since the Unix epoch into a UTC timestamp
pub fn parse_unix_time(raw: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let seconds: i64 = text
        .parse()
        .map_err(|_| FieldError::InvalidUnixTime(text.to_string()))?;

    Utc.timestamp_opt(seconds, 0)
        .single()
        .map(Some)
        .ok_or_else(|| FieldError::InvalidUnixTime(text.to_string()))
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp; empty text is `None`
pub fn parse_timestamp(raw: &str) -> Result<Option<NaiveDateTime>, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(Some)
        .map_err(|e| FieldError::InvalidTimestamp {
            text: text.to_string(),
            reason: e.to_string(),
        })
}

/// Parses a `YYYY-MM-DD` date; empty text is `None`
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Some)
        .map_err(|e| FieldError::InvalidDate {
            text: text.to_string(),
            reason: e.to_string(),
        })
}

/// Reads the text content of the current element
fn element_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer)
}

pub(crate) fn deserialize_pipe_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse_pipe_list(&element_text(deserializer)?))
}

pub(crate) fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    parse_nullable(&element_text(deserializer)?).map_err(D::Error::custom)
}

/// Numeric field where empty text stands for zero (ids, episode numbers)
pub(crate) fn deserialize_number_or_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    Ok(deserialize_nullable(deserializer)?.unwrap_or_default())
}

/// Repeated id elements; empty elements carry no id and are dropped
pub(crate) fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut ids = Vec::new();
    for text in Vec::<String>::deserialize(deserializer)? {
        if let Some(id) = parse_nullable(&text).map_err(D::Error::custom)? {
            ids.push(id);
        }
    }
    Ok(ids)
}

pub(crate) fn deserialize_image_flag<'de, D>(
    deserializer: D,
) -> Result<Option<ImageFlag>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_image_flag(&element_text(deserializer)?).map_err(D::Error::custom)
}

pub(crate) fn deserialize_unix_time<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_unix_time(&element_text(deserializer)?).map_err(D::Error::custom)
}

pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_timestamp(&element_text(deserializer)?).map_err(D::Error::custom)
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_date(&element_text(deserializer)?).map_err(D::Error::custom)
}
