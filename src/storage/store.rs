use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::model::{Post, PostId, PostPayload};

use super::error::StorageError;

/// Manages JSONL-based post persistence.
///
/// All posts live in one `posts.jsonl` file, one [`Post`] record per line.
/// Reads are whole-file; `create` is an append, `update`/`delete` rewrite.
pub struct PostStore {
    data_path: PathBuf,
}

impl PostStore {
    /// Creates a store using the XDG data directory.
    ///
    /// The data directory (`~/.local/share/relnotes/`) is created if it does
    /// not already exist.
    pub fn new() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        let base_path = data_dir.join("relnotes");
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            data_path: base_path.join("posts.jsonl"),
        })
    }

    /// Creates a store rooted at the given directory.
    #[cfg(test)]
    pub(crate) fn with_path(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = dir.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            data_path: base_path.join("posts.jsonl"),
        })
    }

    /// Reads all posts, in file (insertion) order.
    ///
    /// A missing file is an empty store, not an error.
    pub fn list(&self) -> Result<Vec<Post>, StorageError> {
        let file = match fs::File::open(&self.data_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut posts = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            posts.push(serde_json::from_str(&line)?);
        }
        Ok(posts)
    }

    /// Creates a new post from a payload, assigning the next numeric id and
    /// stamping `created_by` from the current user.
    pub fn create(&self, payload: &PostPayload) -> Result<Post, StorageError> {
        let next_id = self
            .list()?
            .iter()
            .filter_map(|post| post.id.as_number())
            .max()
            .unwrap_or(0)
            + 1;

        let post = Post {
            id: PostId::from(next_id),
            title: payload.title.clone(),
            description: payload.description.clone(),
            published_at: payload.published_at,
            created_by: std::env::var("USER").ok(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.data_path)?;
        serde_json::to_writer(&mut file, &post)?;
        writeln!(file)?;

        Ok(post)
    }

    /// Replaces the editable fields of an existing post.
    ///
    /// `id` and `created_by` are preserved. Returns the updated post, or
    /// [`StorageError::NotFound`] for an unknown id.
    pub fn update(&self, id: &PostId, payload: &PostPayload) -> Result<Post, StorageError> {
        let mut posts = self.list()?;
        let slot = posts
            .iter_mut()
            .find(|post| post.id == *id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;

        slot.title = payload.title.clone();
        slot.description = payload.description.clone();
        slot.published_at = payload.published_at;
        let updated = slot.clone();

        self.rewrite(&posts)?;
        Ok(updated)
    }

    /// Deletes a post by id, or fails with [`StorageError::NotFound`].
    pub fn delete(&self, id: &PostId) -> Result<(), StorageError> {
        let mut posts = self.list()?;
        let before = posts.len();
        posts.retain(|post| post.id != *id);
        if posts.len() == before {
            return Err(StorageError::NotFound(id.clone()));
        }
        self.rewrite(&posts)
    }

    /// Rewrites the whole posts file.
    fn rewrite(&self, posts: &[Post]) -> Result<(), StorageError> {
        let mut file = fs::File::create(&self.data_path)?;
        for post in posts {
            serde_json::to_writer(&mut file, post)?;
            writeln!(file)?;
        }
        Ok(())
    }
}
