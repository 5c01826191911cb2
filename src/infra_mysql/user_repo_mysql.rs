use super::util::{backend, is_dup_key};
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }

    fn row_to_user(row: MySqlRow) -> Result<User, RepoError> {
        Ok(User {
            id: UserId(row.try_get("user_id").map_err(backend)?),
            name: row.try_get("name").map_err(backend)?,
            email: row.try_get("email").map_err(backend)?,
            mobile: row.try_get("mobile").map_err(backend)?,
            password: row.try_get("password").map_err(backend)?,
        })
    }

    fn dup_or_backend(err: sqlx::Error, email: &str) -> RepoError {
        if is_dup_key(&err) {
            RepoError::Duplicate(format!("email {}", email))
        } else {
            backend(err)
        }
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let rows = sqlx::query(
            "SELECT user_id, name, email, mobile, password FROM user ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    async fn insert(&self, user: &User) -> Result<(), RepoError> {
        sqlx::query(
            r#"
INSERT INTO user (user_id, name, email, mobile, password)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.mobile)
        .bind(&user.password)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::dup_or_backend(e, &user.email))?;

        Ok(())
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<Option<User>, RepoError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let row = sqlx::query(
            "SELECT user_id, name, email, mobile, password FROM user WHERE user_id = ? FOR UPDATE",
        )
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(backend)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut user = Self::row_to_user(row)?;
        patch.apply(&mut user);

        sqlx::query(
            r#"
UPDATE user SET name = ?, email = ?, mobile = ?, password = ?
WHERE user_id = ?
"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.mobile)
        .bind(&user.password)
        .bind(id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::dup_or_backend(e, &user.email))?;

        tx.commit().await.map_err(backend)?;

        Ok(Some(user))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM user WHERE user_id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }
}
