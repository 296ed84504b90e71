//! 用户存储
//!
//! 每个操作都必须是原子的：email 唯一性由存储层保证，
//! 处理器之间不做任何额外加锁。

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::model::{NewUser, User, UserPatch};

/// 存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("邮箱地址已存在")]
    DuplicateEmail,
    #[cfg(feature = "database")]
    #[error("数据库错误: {0}")]
    Database(sqlx::Error),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail
            }
            _ => StoreError::Database(err),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// 不存在时返回 `Ok(None)`
    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError>;

    /// 返回是否删除了记录
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// 内存存储，用于测试和无数据库运行
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Option<Uuid>) -> bool {
    users
        .values()
        .any(|user| Some(user.id) != except && user.email == email)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().await;

        if email_taken(&users, &new_user.email, None) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            age: new_user.age,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let mut users = self.users.lock().await;

        if !users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &patch.email {
            if email_taken(&users, email, Some(id)) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        Ok(users.get_mut(&id).map(|user| {
            patch.apply(user);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.users.lock().await.remove(&id).is_some())
    }
}
