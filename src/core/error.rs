//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{debug, error};

use crate::app::users::store::StoreError;

pub const EMAIL_TAKEN: &str = "E-Mail bereits vergeben";
pub const USER_NOT_FOUND: &str = "Benutzer nicht gefunden";
pub const ROUTE_NOT_FOUND: &str = "Route nicht gefunden";
pub const METHOD_NOT_ALLOWED: &str = "Methode nicht erlaubt";
pub const INVALID_JSON: &str = "Ungültiger JSON-Body";
pub const SERVER_ERROR: &str = "Serverfehler";

/// 应用错误类型
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
            AppError::InternalServerError(detail) => {
                // 内部细节只写日志，不返回给客户端
                error!("内部错误: {}", detail);
                SERVER_ERROR.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::BadRequest(EMAIL_TAKEN.to_string()),
            #[cfg(feature = "database")]
            StoreError::Database(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("Ungültiger Wert für {}", field))
                })
            })
            .collect();
        messages.sort();

        AppError::BadRequest(messages.join(", "))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("请求体解析失败: {}", rejection.body_text());
        AppError::BadRequest(INVALID_JSON.to_string())
    }
}
