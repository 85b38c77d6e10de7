use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use super::post::PostId;

/// Validation errors for edit-form fields.
///
/// Each variant maps to a single field; composition failures surface on the
/// publish-date field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("description is required")]
    EmptyDescription,
    #[error("publish date is required")]
    MissingPublishDate,
    #[error("invalid publish date: {0}")]
    InvalidPublishDate(String),
    #[error("publish time is required")]
    MissingPublishTime,
    #[error("invalid publish time: {0}")]
    InvalidPublishTime(String),
    #[error("post id must be numeric: {0}")]
    NonNumericId(String),
    #[error("no such local time: {0}")]
    UnrepresentableInstant(String),
}

/// Strict 24-hour `HH:mm`: hours 00-23, minutes 00-59, both zero-padded.
static PUBLISH_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid hardcoded regex"));

/// Validates that a title is non-empty after trimming.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        Err(ValidationError::EmptyTitle)
    } else {
        Ok(())
    }
}

/// Validates that a description body is non-empty after trimming.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        Err(ValidationError::EmptyDescription)
    } else {
        Ok(())
    }
}

/// Validates a publish date, returning the parsed calendar date.
pub fn validate_publish_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingPublishDate);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidPublishDate(raw.to_string()))
}

/// Validates a publish time, returning `(hour, minute)`.
pub fn validate_publish_time(raw: &str) -> Result<(u32, u32), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingPublishTime);
    }
    if !PUBLISH_TIME_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidPublishTime(raw.to_string()));
    }
    let (hh, mm) = trimmed.split_once(':').expect("pattern guarantees a colon");
    Ok((
        hh.parse().expect("pattern guarantees digits"),
        mm.parse().expect("pattern guarantees digits"),
    ))
}

/// Validates that a post id is numeric (string ids must parse as integers).
pub fn validate_post_id(id: &PostId) -> Result<(), ValidationError> {
    id.as_number()
        .map(|_| ())
        .ok_or_else(|| ValidationError::NonNumericId(id.to_string()))
}
