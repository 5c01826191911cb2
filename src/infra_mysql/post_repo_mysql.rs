use super::util::backend;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::types::Json;
use sqlx::{MySqlPool, Row};

/// Posts keep their comments inline as a JSON column.
pub struct MySqlPostRepo {
    pool: MySqlPool,
}

impl MySqlPostRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlPostRepo { pool }
    }

    fn row_to_post(row: MySqlRow) -> Result<Post, RepoError> {
        let id: String = row.try_get("post_id").map_err(backend)?;
        let id = id
            .parse::<PostId>()
            .map_err(|e| RepoError::Backend(format!("invalid post_id: {e}")))?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(backend)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(backend)?;
        let Json(comments): Json<Vec<Comment>> = row.try_get("comments").map_err(backend)?;

        Ok(Post {
            id,
            created_by: UserId(row.try_get("created_by").map_err(backend)?),
            created_at,
            updated_at,
            message: row.try_get("message").map_err(backend)?,
            comments,
        })
    }
}

const SELECT_POST: &str =
    "SELECT post_id, created_by, created_at, updated_at, message, comments FROM post";

#[async_trait::async_trait]
impl PostRepo for MySqlPostRepo {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let rows = sqlx::query(&format!("{SELECT_POST} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn insert(&self, post: &Post) -> Result<(), RepoError> {
        sqlx::query(
            r#"
INSERT INTO post (post_id, created_by, created_at, updated_at, message, comments)
VALUES (?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(post.id.to_string())
        .bind(post.created_by.as_str())
        .bind(post.created_at)
        .bind(post.updated_at)
        .bind(&post.message)
        .bind(Json(&post.comments))
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_POST} WHERE post_id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.map(Self::row_to_post).transpose()
    }

    async fn update(&self, post: &Post) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE post SET message = ?, updated_at = ? WHERE post_id = ?")
            .bind(&post.message)
            .bind(post.updated_at)
            .bind(post.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: PostId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM post WHERE post_id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }
}
