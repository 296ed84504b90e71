//! 应用层：路由与共享状态

pub mod basics;
pub mod users;

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::{
    error::{METHOD_NOT_ALLOWED, ROUTE_NOT_FOUND},
    middleware::request_logging_middleware,
};
use users::store::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

/// 构建完整路由，测试直接驱动它而不绑定端口
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(basics::handler::welcome))
        .route("/hello/:name", get(basics::handler::hello))
        .route("/sum", post(basics::handler::sum))
        .route("/users", post(users::handler::create_user))
        .route(
            "/users/:id",
            get(users::handler::get_user)
                .put(users::handler::update_user)
                .delete(users::handler::delete_user),
        )
        .fallback(fallback)
        .layer(middleware::map_response(json_method_not_allowed))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": ROUTE_NOT_FOUND })))
}

// 路径存在但方法不匹配时，axum 默认返回空响应体，这里换成 JSON 并保留 Allow 头
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut json_response = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": METHOD_NOT_ALLOWED })),
    )
        .into_response();
    if let Some(allow) = allow {
        json_response.headers_mut().insert(header::ALLOW, allow);
    }
    json_response
}
