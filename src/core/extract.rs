//! 带校验的 JSON 提取器

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use super::error::AppError;

/// 解析请求体并执行 `validator` 规则，任何失败都返回 400
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // 先解析为 Value，字段级的类型错误才能带上自定义消息
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let value: T =
            serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
