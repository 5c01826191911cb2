use crate::domain_model::{Identity, UserId};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no credentials provided")]
    Unauthenticated,
    #[error("token invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RefreshToken(pub String);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Which secret a token was signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

pub trait TokenCodec: Send + Sync {
    fn issue_access_token(&self, identity: &Identity) -> Result<AccessToken, AuthError>;
    fn issue_refresh_token(&self, identity: &Identity) -> Result<RefreshToken, AuthError>;
    /// Checks signature, issuer, audience and expiry. Never touches a store.
    fn verify(&self, token: &str, kind: TokenKind) -> Result<Identity, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Issues an access/refresh pair and records the refresh token as the
    /// only trusted one for `user_id`.
    async fn issue(&self, user_id: UserId) -> Result<TokenPair, AuthError>;
    async fn refresh(&self, user_id: UserId, refresh_token: &str)
    -> Result<AccessToken, AuthError>;
    async fn logout(&self, user_id: UserId) -> Result<(), AuthError>;
    async fn verify_access_token(&self, token: &str) -> Result<Identity, AuthError>;
}
