//! Postgres 用户存储

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use super::model::{NewUser, User, UserPatch};
use super::store::{StoreError, UserStore};

const USER_COLUMNS: &str = "id, name, email, age, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (id, name, email, age) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.age)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError> {
        // 单条语句完成读改写，缺省字段保持原值
        let query = format!(
            r#"
            UPDATE users SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                age = COALESCE($3, age),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(patch.name)
            .bind(patch.email)
            .bind(patch.age)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
