//! Actions returned by screen event handlers.

use crate::model::{Post, PostId, PostPayload};

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to mutate storage and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Open the editor, prefilled from an existing post or blank for a new one.
    OpenForm(Option<Post>),
    /// Persist the payload: update when it carries an id, create otherwise.
    SavePost(PostPayload),
    /// Delete the post with the given id from storage.
    DeletePost(PostId),
    /// Close the editor and return to the list without saving.
    CloseForm,
    /// Quit the application.
    Quit,
}
