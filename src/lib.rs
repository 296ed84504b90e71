//! # Testing-Tutorial 用户服务
//!
//! 基于 Axum 的教学用 REST 服务：
//! - 基础路由 `/`、`/hello/:name`、`/sum`
//! - 单一 `User` 实体的 CRUD，email 唯一
//! - Postgres 存储（`database` 特性）与内存存储两种实现

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
