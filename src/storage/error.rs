use crate::model::PostId;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing the posts file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// No stored post has the requested id.
    ///
    /// Produced by [`crate::storage::PostStore::update`] and
    /// [`crate::storage::PostStore::delete`].
    #[error("no post with id {0}")]
    NotFound(PostId),
}
