use crate::application_port::AuthError;
use crate::domain_model::UserId;
use crate::domain_port::SessionStore;
use dashmap::DashMap;

/// Process-local session store. Each key lives in a single dashmap shard, so
/// operations on one user are atomic.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tokens: DashMap<UserId, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, user_id: &UserId, refresh_token: &str) -> Result<(), AuthError> {
        self.tokens.insert(user_id.clone(), refresh_token.to_string());
        Ok(())
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<String>, AuthError> {
        Ok(self.tokens.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), AuthError> {
        self.tokens.remove(user_id);
        Ok(())
    }
}
