//! Post persistence (JSONL).
//!
//! All posts live in a single `posts.jsonl` file, one record per line, so
//! creating a post is a single-line append with no read/rewrite.

mod error;
mod store;

pub use error::StorageError;
pub use store::PostStore;
