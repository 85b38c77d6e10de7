mod draft;
mod grouping;
mod post;
mod settings;
mod validation;

pub use draft::{DraftErrors, PostDraft, UnsavedGuard};
pub use grouping::{
    DayGroup, UNSCHEDULED_KEY, UNSCHEDULED_LABEL, group_by_day, is_active_group, is_active_post,
};
pub use post::{Post, PostId, PostPayload};
pub use settings::{ScheduleSettings, zone_label_at};
pub use validation::{
    ValidationError, validate_description, validate_post_id, validate_publish_date,
    validate_publish_time, validate_title,
};
