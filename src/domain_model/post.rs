use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub uuid::Uuid);

impl PostId {
    pub fn generate() -> Self {
        PostId(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(PostId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub sent_by: UserId,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub liked: Vec<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    /// Set once at creation; ownership checks read it, nothing rewrites it.
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message: String,
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn new(created_by: UserId, message: String, now: DateTime<Utc>) -> Self {
        Post {
            id: PostId::generate(),
            created_by,
            created_at: now,
            updated_at: now,
            message,
            comments: Vec::new(),
        }
    }
}

/// Mutating operations that require ownership of the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Update,
    Delete,
}

impl fmt::Display for PostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostAction::Update => write!(f, "update"),
            PostAction::Delete => write!(f, "delete"),
        }
    }
}
