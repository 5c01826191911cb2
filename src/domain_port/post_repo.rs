use super::RepoError;
use crate::domain_model::{Post, PostId};

#[async_trait::async_trait]
pub trait PostRepo: Send + Sync {
    /// Oldest first.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;
    async fn insert(&self, post: &Post) -> Result<(), RepoError>;
    async fn find(&self, id: PostId) -> Result<Option<Post>, RepoError>;
    /// Persists `message` and `updated_at`. Returns false if the post vanished.
    async fn update(&self, post: &Post) -> Result<bool, RepoError>;
    async fn delete(&self, id: PostId) -> Result<bool, RepoError>;
}
