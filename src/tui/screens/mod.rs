//! TUI screen implementations.

pub mod post_form;
pub mod post_list;

pub use post_form::{PostFormState, draw_post_form};
pub use post_list::{PostListState, draw_post_list};
