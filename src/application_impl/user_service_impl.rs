use crate::application_port::{UserError, UserService};
use crate::domain_model::*;
use crate::domain_port::{RepoError, UserRepo};
use std::sync::Arc;

pub struct RealUserService {
    user_repo: Arc<dyn UserRepo>,
}

impl RealUserService {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> RealUserService {
        RealUserService { user_repo }
    }
}

impl From<RepoError> for UserError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::Duplicate(what) => UserError::Validation(format!("{what} already exists")),
            RepoError::Backend(e) => UserError::Store(e),
        }
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    async fn list(&self) -> Result<Vec<User>, UserError> {
        Ok(self.user_repo.list().await?)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        if new_user.email.trim().is_empty() {
            return Err(UserError::Validation("email is required".to_string()));
        }
        let user = User {
            id: UserId::generate(),
            name: new_user.name,
            email: new_user.email,
            mobile: new_user.mobile,
            password: new_user.password,
        };
        self.user_repo.insert(&user).await?;
        Ok(user)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, UserError> {
        self.user_repo
            .update(id, patch)
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        if !self.user_repo.delete(id).await? {
            return Err(UserError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra_memory::MemoryUserRepo;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            mobile: "555-0100".into(),
            password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_validation_error() {
        let users = RealUserService::new(Arc::new(MemoryUserRepo::new()));
        users.create(new_user("ada@example.com")).await.unwrap();

        assert!(matches!(
            users.create(new_user("ada@example.com")).await,
            Err(UserError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_user() {
        let users = RealUserService::new(Arc::new(MemoryUserRepo::new()));
        let ghost = UserId::from("ghost");

        assert!(matches!(
            users.update(&ghost, UserPatch::default()).await,
            Err(UserError::NotFound)
        ));
        assert!(matches!(users.delete(&ghost).await, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids() {
        let users = RealUserService::new(Arc::new(MemoryUserRepo::new()));
        let a = users.create(new_user("a@example.com")).await.unwrap();
        let b = users.create(new_user("b@example.com")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(users.list().await.unwrap().len(), 2);
    }
}
