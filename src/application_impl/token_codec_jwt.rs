use crate::application_port::*;
use crate::domain_model::{Identity, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub access_secret: Vec<u8>,
    pub refresh_secret: Vec<u8>,
}

#[cfg(test)]
impl JwtConfig {
    pub(crate) fn for_tests() -> Self {
        JwtConfig {
            issuer: "feedgate.test".to_string(),
            audience: "feedgate-client".to_string(),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            access_secret: b"access-secret".to_vec(),
            refresh_secret: b"refresh-secret".to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,
    iat: i64,
    iss: String,
    aud: String,
    jti: String, // keeps tokens issued within the same second distinct
}

pub struct JwtHs256Codec {
    cfg: JwtConfig,
}

impl JwtHs256Codec {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtHs256Codec { cfg }
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => &self.cfg.access_secret,
            TokenKind::Refresh => &self.cfg.refresh_secret,
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.cfg.access_ttl,
            TokenKind::Refresh => self.cfg.refresh_ttl,
        }
    }

    pub fn issue_at(
        &self,
        identity: &Identity,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let exp = TimeDelta::from_std(self.ttl(kind))
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::InternalError(format!("{kind:?} token ttl out of range")))?;
        let claims = Claims {
            sub: identity.user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.cfg.issuer.clone(),
            aud: self.cfg.audience.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
        .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Expiry is checked here against `now` rather than by jsonwebtoken,
    /// with no leeway.
    pub fn verify_at(
        &self,
        token: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthError> {
        let mut v = Validation::new(Algorithm::HS256);
        v.validate_exp = false;
        v.set_audience(&[self.cfg.audience.clone()]);
        v.set_issuer(&[self.cfg.issuer.clone()]);
        let data = decode::<Claims>(token, &DecodingKey::from_secret(self.secret(kind)), &v)
            .map_err(|_| AuthError::TokenInvalid)?;

        if now.timestamp() >= data.claims.exp {
            return Err(AuthError::TokenExpired);
        }
        if data.claims.sub.is_empty() {
            return Err(AuthError::TokenInvalid);
        }

        Ok(Identity::new(UserId(data.claims.sub)))
    }
}

impl TokenCodec for JwtHs256Codec {
    fn issue_access_token(&self, identity: &Identity) -> Result<AccessToken, AuthError> {
        self.issue_at(identity, TokenKind::Access, Utc::now())
            .map(AccessToken)
    }

    fn issue_refresh_token(&self, identity: &Identity) -> Result<RefreshToken, AuthError> {
        self.issue_at(identity, TokenKind::Refresh, Utc::now())
            .map(RefreshToken)
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<Identity, AuthError> {
        self.verify_at(token, kind, Utc::now())
    }
}
