use crate::application_port::AuthError;
use crate::domain_model::UserId;
use crate::domain_port::SessionStore;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Refresh tokens as plain string keys `"{prefix}:{user_id}"`, without TTL.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisSessionStore {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, user_id: &UserId) -> String {
        session_key(&self.prefix, user_id)
    }
}

fn session_key(prefix: &str, user_id: &UserId) -> String {
    if prefix.is_empty() {
        user_id.to_string()
    } else {
        format!("{}:{}", prefix, user_id)
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, user_id: &UserId, refresh_token: &str) -> Result<(), AuthError> {
        let key = self.key(user_id);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(&key, refresh_token)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<String>, AuthError> {
        let key = self.key(user_id);
        let mut conn = self.conn.clone();
        let val: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(val)
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), AuthError> {
        let key = self.key(user_id);
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_prefix() {
        assert_eq!(session_key("refresh", &UserId::from("42")), "refresh:42");
        assert_eq!(session_key("", &UserId::from("42")), "42");
    }
}
