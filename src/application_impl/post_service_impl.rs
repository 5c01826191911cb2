use super::ownership_guard::ensure_owner;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::{PostRepo, RepoError};
use crate::logger::*;
use chrono::Utc;
use std::sync::Arc;

pub struct RealPostService {
    post_repo: Arc<dyn PostRepo>,
}

impl RealPostService {
    pub fn new(post_repo: Arc<dyn PostRepo>) -> Self {
        Self { post_repo }
    }

    async fn find_owned(
        &self,
        requester: &Identity,
        id: PostId,
        action: PostAction,
    ) -> Result<Post, PostError> {
        let post = self.post_repo.find(id).await?.ok_or(PostError::NotFound)?;
        if let Err(e) = ensure_owner(&post, requester, action) {
            info!(post_id = %id, requester = %requester.user_id, %action, "ownership check denied");
            return Err(e);
        }
        Ok(post)
    }
}

impl From<RepoError> for PostError {
    fn from(error: RepoError) -> Self {
        PostError::Store(error.to_string())
    }
}

#[async_trait::async_trait]
impl PostService for RealPostService {
    async fn list(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.post_repo.list().await?)
    }

    async fn create(&self, author: &Identity, message: String) -> Result<Post, PostError> {
        if message.trim().is_empty() {
            return Err(PostError::Validation("message is required".to_string()));
        }
        let post = Post::new(author.user_id.clone(), message, Utc::now());
        self.post_repo.insert(&post).await?;
        debug!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn update(
        &self,
        requester: &Identity,
        id: PostId,
        message: Option<String>,
    ) -> Result<Post, PostError> {
        let mut post = self.find_owned(requester, id, PostAction::Update).await?;

        if let Some(message) = message.filter(|m| !m.is_empty()) {
            post.message = message;
        }
        post.updated_at = Utc::now();

        if !self.post_repo.update(&post).await? {
            return Err(PostError::NotFound);
        }
        Ok(post)
    }

    async fn delete(&self, requester: &Identity, id: PostId) -> Result<(), PostError> {
        self.find_owned(requester, id, PostAction::Delete).await?;

        if !self.post_repo.delete(id).await? {
            return Err(PostError::NotFound);
        }
        Ok(())
    }
}
