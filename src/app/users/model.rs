//! 用户数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: u64,
}

/// 请求体中与用户相关的字段
///
/// `None` 表示请求中没有这个键；显式的 `null` 保留为 `Some(Value::Null)`，
/// 由存储层决定它是否合法。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFields {
    pub name: Option<Value>,
    pub age: Option<Value>,
}

impl UserFields {
    /// 从 JSON 对象中取出 `name` 和 `age`，其余键忽略
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        Self {
            name: object.remove("name"),
            age: object.remove("age"),
        }
    }

    pub fn new(name: impl Into<Value>, age: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age.into()),
        }
    }

    pub fn with_name(name: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            age: None,
        }
    }

    pub fn with_age(age: impl Into<Value>) -> Self {
        Self {
            name: None,
            age: Some(age.into()),
        }
    }
}

/// 产生错误的操作，用于在边界处选择错误文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_from_object_keeps_explicit_null() {
        let fields = UserFields::from_object(object(json!({"name": null})));
        assert_eq!(fields.name, Some(Value::Null));
        assert_eq!(fields.age, None);
    }

    #[test]
    fn test_from_object_ignores_unknown_keys() {
        let fields =
            UserFields::from_object(object(json!({"name": "Alice", "age": 25, "email": "a@b.c"})));
        assert_eq!(fields, UserFields::new("Alice", 25));
    }

    #[test]
    fn test_user_serializes_three_fields() {
        let user = User {
            id: "abc".to_string(),
            name: "Alice".to_string(),
            age: 25,
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"id": "abc", "name": "Alice", "age": 25})
        );
    }
}
