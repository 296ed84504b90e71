//! 数据库基础设施
//!
//! 进程内只持有一个连接句柄，启动时建立，关闭服务后释放。

use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Error,
};
use tracing::info;

use crate::config::DatabaseConfig;

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// 建立连接并确保 `users` 表存在
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        info!("正在连接数据库: {}", config.redacted_url());

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        ensure_schema(&pool).await?;

        info!("数据库已连接");
        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// 关闭连接，等待借出的连接归还
    pub async fn disconnect(self) {
        self.pool.close().await;
        info!("数据库连接已关闭");
    }
}

/// 建表，email 上的唯一约束保证并发创建时不会重复
async fn ensure_schema(pool: &PgPool) -> Result<(), Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            age INTEGER NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
