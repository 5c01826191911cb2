use crate::domain_model::{NewUser, User, UserId, UserPatch};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, UserError>;
    async fn create(&self, new_user: NewUser) -> Result<User, UserError>;
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, UserError>;
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
