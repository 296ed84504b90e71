//! 用户数据模型

use chrono::{DateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

pub const AGE_NOT_NUMERIC: &str = "Alter muss eine Zahl sein";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 创建用户请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Name ist erforderlich"))]
    pub name: String,

    #[validate(email(message = "Ungültige E-Mail-Adresse"))]
    pub email: String,

    #[serde(deserialize_with = "deserialize_age")]
    #[validate(range(min = 0, max = 150, message = "Alter muss zwischen 0 und 150 liegen"))]
    pub age: i32,
}

// 部分更新请求，缺省字段保持不变
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, message = "Name ist erforderlich"))]
    pub name: Option<String>,

    #[validate(email(message = "Ungültige E-Mail-Adresse"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_age")]
    #[validate(range(min = 0, max = 150, message = "Alter muss zwischen 0 und 150 liegen"))]
    pub age: Option<i32>,
}

/// 写入存储前的用户数据
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// 规范化后的部分更新
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: normalize_email(&req.email),
            age: req.age,
        }
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email.as_deref().map(normalize_email),
            age: req.age,
        }
    }
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// 先去掉首尾空白再交给 `validator`，纯空白的名字按空值拒绝
fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

fn age_from_value(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    age_from_value(&value).ok_or_else(|| D::Error::custom(AGE_NOT_NUMERIC))
}

fn deserialize_optional_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => age_from_value(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(AGE_NOT_NUMERIC)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_rejects_string_age() {
        let err = serde_json::from_value::<CreateUserRequest>(json!({
            "name": "Samir",
            "email": "samir@example.com",
            "age": "dreißig"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), AGE_NOT_NUMERIC);
    }

    #[test]
    fn test_create_request_rejects_fractional_age() {
        assert!(serde_json::from_value::<CreateUserRequest>(json!({
            "name": "Samir",
            "email": "samir@example.com",
            "age": 30.5
        }))
        .is_err());
    }

    #[test]
    fn test_update_request_age_is_optional() {
        let req: UpdateUserRequest = serde_json::from_value(json!({ "name": "Neu" })).unwrap();
        assert_eq!(req.age, None);

        let req: UpdateUserRequest = serde_json::from_value(json!({ "age": null })).unwrap();
        assert_eq!(req.age, None);

        let req: UpdateUserRequest = serde_json::from_value(json!({ "age": 42 })).unwrap();
        assert_eq!(req.age, Some(42));
    }

    #[test]
    fn test_validation_rules() {
        let req = CreateUserRequest {
            name: "".to_string(),
            email: "keine-email".to_string(),
            age: 200,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("age"));
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "name": "   ",
            "email": "samir@example.com",
            "age": 30
        }))
        .unwrap();
        assert_eq!(req.name, "");
        assert!(req.validate().unwrap_err().field_errors().contains_key("name"));

        let req: UpdateUserRequest = serde_json::from_value(json!({ "name": "  " })).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateUserRequest =
            serde_json::from_value(json!({ "name": "  Samira " })).unwrap();
        assert_eq!(req.name.as_deref(), Some("Samira"));
    }

    #[test]
    fn test_new_user_normalizes_email() {
        let user = NewUser::from(CreateUserRequest {
            name: "Samir".to_string(),
            email: " Samir@Example.COM ".to_string(),
            age: 30,
        });
        assert_eq!(user.name, "Samir");
        assert_eq!(user.email, "samir@example.com");
    }

    #[test]
    fn test_patch_apply_keeps_missing_fields() {
        let now = Utc::now();
        let mut user = User {
            id: Uuid::new_v4(),
            name: "Samir".to_string(),
            email: "samir@example.com".to_string(),
            age: 30,
            created_at: now,
            updated_at: now,
        };
        UserPatch {
            age: Some(31),
            ..Default::default()
        }
        .apply(&mut user);
        assert_eq!(user.age, 31);
        assert_eq!(user.name, "Samir");
    }
}
