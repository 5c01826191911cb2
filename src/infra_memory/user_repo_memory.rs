use crate::domain_model::{User, UserId, UserPatch};
use crate::domain_port::{RepoError, UserRepo};
use tokio::sync::RwLock;

/// Keeps insertion order and checks email uniqueness under one write lock.
#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &[User], email: &str, except: Option<&UserId>) -> bool {
    users
        .iter()
        .any(|u| u.email == email && Some(&u.id) != except)
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, user: &User) -> Result<(), RepoError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, None) {
            return Err(RepoError::Duplicate(format!("email {}", user.email)));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<Option<User>, RepoError> {
        let mut users = self.users.write().await;
        if let Some(email) = &patch.email {
            if email_taken(&users, email, Some(id)) {
                return Err(RepoError::Duplicate(format!("email {}", email)));
            }
        }
        let Some(user) = users.iter_mut().find(|u| &u.id == id) else {
            return Ok(None);
        };
        patch.apply(user);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepoError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| &u.id != id);
        Ok(users.len() != before)
    }
}
