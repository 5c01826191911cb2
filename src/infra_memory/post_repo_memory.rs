use crate::domain_model::{Post, PostId};
use crate::domain_port::{PostRepo, RepoError};
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct MemoryPostRepo {
    posts: DashMap<PostId, Post>,
}

impl MemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PostRepo for MemoryPostRepo {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.posts.iter().map(|e| e.value().clone()).collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }

    async fn insert(&self, post: &Post) -> Result<(), RepoError> {
        self.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.get(&id).map(|e| e.value().clone()))
    }

    async fn update(&self, post: &Post) -> Result<bool, RepoError> {
        match self.posts.get_mut(&post.id) {
            Some(mut stored) => {
                stored.message = post.message.clone();
                stored.updated_at = post.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: PostId) -> Result<bool, RepoError> {
        Ok(self.posts.remove(&id).is_some())
    }
}
