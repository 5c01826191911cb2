use crate::domain_model::{Identity, Post, PostAction, PostId};

#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("post not found")]
    NotFound,
    #[error("unauthorized to {0} this post")]
    Forbidden(PostAction),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait PostService: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>, PostError>;
    async fn create(&self, author: &Identity, message: String) -> Result<Post, PostError>;
    /// `None` or an empty message keeps the current text but still bumps `updated_at`.
    async fn update(
        &self,
        requester: &Identity,
        id: PostId,
        message: Option<String>,
    ) -> Result<Post, PostError>;
    async fn delete(&self, requester: &Identity, id: PostId) -> Result<(), PostError>;
}
