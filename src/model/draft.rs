//! The transient edit-form draft: initialization from a post, whole-draft
//! validation, and composition of the publish instant.

use chrono::{DateTime, LocalResult, TimeZone, Utc};

use super::post::{Post, PostId};
use super::settings::ScheduleSettings;
use super::validation::{
    ValidationError, validate_description, validate_post_id, validate_publish_date,
    validate_publish_time, validate_title,
};

/// Editable snapshot of a post while its form session is open.
///
/// Created once at form open, destroyed at close. Date and time are kept as
/// the raw strings under edit; they only become an instant in [`compose`].
///
/// [`compose`]: PostDraft::compose
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub id: Option<PostId>,
    pub title: String,
    pub description: String,
    /// Calendar date string, `"YYYY-MM-DD"`.
    pub publish_date: String,
    /// 24-hour time string, `"HH:mm"`.
    pub publish_time: String,
}

/// Per-field validation outcome for a draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftErrors {
    pub title: Option<ValidationError>,
    pub description: Option<ValidationError>,
    pub publish_date: Option<ValidationError>,
    pub publish_time: Option<ValidationError>,
    pub id: Option<ValidationError>,
}

impl DraftErrors {
    /// Returns `true` if no field has an error.
    pub fn is_valid(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.publish_date.is_none()
            && self.publish_time.is_none()
            && self.id.is_none()
    }

    /// Number of failing fields.
    pub fn count(&self) -> usize {
        [
            self.title.is_some(),
            self.description.is_some(),
            self.publish_date.is_some(),
            self.publish_time.is_some(),
            self.id.is_some(),
        ]
        .into_iter()
        .filter(|&set| set)
        .count()
    }
}

impl PostDraft {
    /// Builds a draft from an existing post, splitting `published_at` into
    /// local date and zero-padded time strings. An unscheduled post leaves
    /// both fields empty.
    pub fn from_post(post: &Post, settings: &ScheduleSettings) -> Self {
        let (publish_date, publish_time) = match post.published_at {
            Some(at) => {
                let local = at.with_timezone(&settings.zone);
                (
                    local.format("%Y-%m-%d").to_string(),
                    local.format("%H:%M").to_string(),
                )
            }
            None => (String::new(), String::new()),
        };
        Self {
            id: Some(post.id.clone()),
            title: post.title.clone(),
            description: post.description.clone(),
            publish_date,
            publish_time,
        }
    }

    /// Validates every field, reporting all failures at once.
    ///
    /// Run eagerly (at form open and after each edit) so the caller can show
    /// field-level errors and block saving without waiting for a submit.
    pub fn validate(&self) -> DraftErrors {
        DraftErrors {
            title: validate_title(&self.title).err(),
            description: validate_description(&self.description).err(),
            publish_date: validate_publish_date(&self.publish_date).err(),
            publish_time: validate_publish_time(&self.publish_time).err(),
            id: self.id.as_ref().and_then(|id| validate_post_id(id).err()),
        }
    }

    /// Combines the date and time fields into a single UTC instant at
    /// seconds zero in the configured zone.
    ///
    /// A local time skipped by a DST transition is an error on the date
    /// field, never coerced to another instant; an ambiguous local time
    /// (repeated fall-back hour) resolves to the earliest occurrence.
    pub fn compose(&self, settings: &ScheduleSettings) -> Result<DateTime<Utc>, ValidationError> {
        let date = validate_publish_date(&self.publish_date)?;
        let (hh, mm) = validate_publish_time(&self.publish_time)?;
        let naive = date.and_hms_opt(hh, mm, 0).ok_or_else(|| {
            ValidationError::UnrepresentableInstant(format!(
                "{} {}",
                self.publish_date, self.publish_time
            ))
        })?;

        match settings.zone.from_local_datetime(&naive) {
            LocalResult::Single(at) => Ok(at.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(ValidationError::UnrepresentableInstant(naive.to_string())),
        }
    }
}

/// Two-step cancel confirmation for the edit form.
///
/// Requesting cancel never closes the form by itself; the guard waits for an
/// explicit "leave" or "keep editing" and never resolves on its own. It is
/// independent of validation state and can open on a pristine draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsavedGuard {
    #[default]
    Editing,
    ConfirmingDiscard,
}

impl UnsavedGuard {
    /// First cancel step: open the confirmation prompt.
    pub fn request_cancel(&mut self) {
        *self = Self::ConfirmingDiscard;
    }

    /// Resume editing with the draft intact.
    pub fn keep_editing(&mut self) {
        *self = Self::Editing;
    }

    /// Resolve the prompt towards leaving; the caller closes the form and
    /// discards the draft.
    pub fn confirm_leave(&mut self) {
        *self = Self::Editing;
    }

    /// Returns `true` while the confirmation prompt is open.
    pub fn is_confirming(self) -> bool {
        matches!(self, Self::ConfirmingDiscard)
    }
}
