use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A post identifier as delivered by upstream layers: numeric or string.
///
/// Comparison and hashing normalize both forms to their string rendering,
/// so `PostId::from(2)` equals `PostId::from("2")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Num(i64),
    Text(String),
}

impl PostId {
    /// Returns the id as a number, parsing string ids when possible.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Canonical string form used for comparison and hashing.
    fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Num(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl PartialEq for PostId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for PostId {}

impl Hash for PostId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<i64> for PostId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A single release-note post record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub description: String,
    /// Publish instant, or `None` for an unscheduled post.
    ///
    /// Stored as RFC 3339. Deserialization is lenient: anything that is not
    /// a parseable timestamp becomes `None`, so a corrupt value degrades to
    /// "unscheduled" instead of poisoning the whole record.
    #[serde(
        default,
        serialize_with = "instant_to_rfc3339",
        deserialize_with = "lenient_instant"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// The normalized payload produced by the edit form and handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPayload {
    /// `Some` for an edit, `None` for a newly created post.
    pub id: Option<PostId>,
    pub title: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
}

fn instant_to_rfc3339<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(at) => serializer.serialize_some(&at.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|at| at.with_timezone(&Utc)),
        _ => None,
    }))
}
