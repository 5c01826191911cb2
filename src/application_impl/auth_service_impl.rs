use crate::application_port::*;
use crate::domain_model::{Identity, UserId};
use crate::domain_port::SessionStore;
use crate::logger::*;
use std::sync::Arc;

pub struct RealAuthService {
    token_codec: Arc<dyn TokenCodec>,
    session_store: Arc<dyn SessionStore>,
}

impl RealAuthService {
    pub fn new(token_codec: Arc<dyn TokenCodec>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            token_codec,
            session_store,
        }
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn issue(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let identity = Identity::new(user_id);
        let access_token = self.token_codec.issue_access_token(&identity)?;
        let refresh_token = self.token_codec.issue_refresh_token(&identity)?;

        // Overwrites whatever was trusted before; last writer wins.
        self.session_store
            .put(&identity.user_id, &refresh_token.0)
            .await?;

        info!(user_id = %identity.user_id, "issued token pair");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(
        &self,
        user_id: UserId,
        refresh_token: &str,
    ) -> Result<AccessToken, AuthError> {
        // Store equality is the only check; the candidate is not re-decoded.
        let stored = self.session_store.get(&user_id).await?;
        if stored.as_deref() != Some(refresh_token) {
            debug!(%user_id, "refresh rejected");
            return Err(AuthError::InvalidRefreshToken);
        }

        let access_token = self
            .token_codec
            .issue_access_token(&Identity::new(user_id))?;
        Ok(access_token)
    }

    async fn logout(&self, user_id: UserId) -> Result<(), AuthError> {
        self.session_store.delete(&user_id).await?;
        info!(%user_id, "logged out");
        Ok(())
    }

    async fn verify_access_token(&self, token: &str) -> Result<Identity, AuthError> {
        self.token_codec.verify(token, TokenKind::Access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::{JwtConfig, JwtHs256Codec};
    use crate::infra_memory::MemorySessionStore;

    fn service() -> RealAuthService {
        RealAuthService::new(
            Arc::new(JwtHs256Codec::new(JwtConfig::for_tests())),
            Arc::new(MemorySessionStore::new()),
        )
    }

    fn uid(s: &str) -> UserId {
        UserId::from(s)
    }

    #[tokio::test]
    async fn refresh_accepts_only_the_stored_token() {
        let auth = service();
        let pair = auth.issue(uid("u1")).await.unwrap();

        let access = auth.refresh(uid("u1"), &pair.refresh_token.0).await.unwrap();
        let identity = auth.verify_access_token(&access.0).await.unwrap();
        assert_eq!(identity.user_id, uid("u1"));

        assert!(matches!(
            auth.refresh(uid("u1"), "something-else").await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn refresh_token_is_bound_to_its_user() {
        let auth = service();
        let pair = auth.issue(uid("u1")).await.unwrap();
        auth.issue(uid("u2")).await.unwrap();

        assert!(matches!(
            auth.refresh(uid("u2"), &pair.refresh_token.0).await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn reissuing_invalidates_the_previous_refresh_token() {
        let auth = service();
        let first = auth.issue(uid("u1")).await.unwrap();
        let second = auth.issue(uid("u1")).await.unwrap();

        assert!(matches!(
            auth.refresh(uid("u1"), &first.refresh_token.0).await,
            Err(AuthError::InvalidRefreshToken)
        ));
        assert!(auth.refresh(uid("u1"), &second.refresh_token.0).await.is_ok());
    }

    #[tokio::test]
    async fn logout_revokes_and_is_idempotent() {
        let auth = service();
        let pair = auth.issue(uid("u1")).await.unwrap();

        auth.logout(uid("u1")).await.unwrap();
        auth.logout(uid("u1")).await.unwrap();

        assert!(matches!(
            auth.refresh(uid("u1"), &pair.refresh_token.0).await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn issue_refresh_logout_scenario() {
        let auth = service();
        let pair = auth.issue(uid("u1")).await.unwrap();

        let access2 = auth.refresh(uid("u1"), &pair.refresh_token.0).await.unwrap();
        assert_ne!(access2, pair.access_token);

        auth.logout(uid("u1")).await.unwrap();
        assert!(matches!(
            auth.refresh(uid("u1"), &pair.refresh_token.0).await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn refresh_token_is_not_an_access_token() {
        let auth = service();
        let pair = auth.issue(uid("u1")).await.unwrap();
        assert!(matches!(
            auth.verify_access_token(&pair.refresh_token.0).await,
            Err(AuthError::TokenInvalid)
        ));
    }
}
