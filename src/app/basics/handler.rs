//! 基础示例路由：欢迎、问候、求和

use axum::{
    extract::{rejection::JsonRejection, Path},
    response::Json,
};
use serde_json::{json, Value};

use crate::core::error::AppError;

pub const WELCOME: &str = "Willkommen zum Testing-Tutorial!";
pub const SUM_ERROR: &str = "Bitte geben Sie zwei Zahlen ein";

/// 欢迎信息
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": WELCOME }))
}

/// 带路径参数的问候
pub async fn hello(Path(name): Path<String>) -> Json<Value> {
    Json(json!({ "message": format!("Hallo {}!", name) }))
}

/// 两数求和，任一操作数不是数字时返回 400
pub async fn sum(payload: Result<Json<Value>, JsonRejection>) -> Result<Json<Value>, AppError> {
    let sum_error = || AppError::BadRequest(SUM_ERROR.to_string());

    let Json(body) = payload.map_err(|_| sum_error())?;
    let result = add_numbers(&body["a"], &body["b"]).ok_or_else(sum_error)?;

    Ok(Json(json!({ "result": result })))
}

/// 两个整数相加保持整数，溢出或含小数时按浮点计算
fn add_numbers(a: &Value, b: &Value) -> Option<Value> {
    if !a.is_number() || !b.is_number() {
        return None;
    }

    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Some(Value::from(sum));
        }
    }

    let sum = a.as_f64()? + b.as_f64()?;
    serde_json::Number::from_f64(sum).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_integers() {
        assert_eq!(add_numbers(&json!(5), &json!(3)), Some(json!(8)));
        assert_eq!(add_numbers(&json!(-5), &json!(3)), Some(json!(-2)));
    }

    #[test]
    fn test_add_floats() {
        assert_eq!(add_numbers(&json!(1.5), &json!(2)), Some(json!(3.5)));
    }

    #[test]
    fn test_add_overflow_falls_back_to_float() {
        let result = add_numbers(&json!(i64::MAX), &json!(1)).unwrap();
        assert!(result.is_f64());
    }

    #[test]
    fn test_add_rejects_non_numbers() {
        assert_eq!(add_numbers(&json!("keine Zahl"), &json!(3)), None);
        assert_eq!(add_numbers(&json!(3), &Value::Null), None);
        assert_eq!(add_numbers(&json!(true), &json!(false)), None);
    }
}
