use super::RepoError;
use crate::domain_model::{User, UserId, UserPatch};

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, RepoError>;
    /// Fails with `RepoError::Duplicate` when the email is already taken.
    async fn insert(&self, user: &User) -> Result<(), RepoError>;
    /// Returns the updated record, or `None` when no user has this id.
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<Option<User>, RepoError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, RepoError>;
}
