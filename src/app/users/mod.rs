//! 用户模块：模型、存储与处理器

pub mod handler;
pub mod model;
#[cfg(feature = "database")]
pub mod pg_store;
pub mod store;
