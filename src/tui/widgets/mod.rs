//! Reusable TUI widgets.

pub mod form;
pub mod modal;
pub mod sidebar;

pub use form::{Form, FormField, draw_form};
pub use modal::draw_confirm_modal;
pub use sidebar::draw_sidebar;
