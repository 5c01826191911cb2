use crate::application_port::AuthError;
use crate::domain_model::UserId;

/// Holds the single trusted refresh token per user. Records never expire on
/// their own; the token's embedded `exp` and explicit deletion bound them.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Unconditionally replaces any previous token for `user_id`.
    async fn put(&self, user_id: &UserId, refresh_token: &str) -> Result<(), AuthError>;
    async fn get(&self, user_id: &UserId) -> Result<Option<String>, AuthError>;
    /// Removing an absent record is not an error.
    async fn delete(&self, user_id: &UserId) -> Result<(), AuthError>;
}
