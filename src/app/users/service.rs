//! 用户存储服务
//!
//! `UserStore` 是所有用户记录的唯一持有者：负责字段校验、生成 id，
//! 并保证列表按创建顺序返回。

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use super::model::{Operation, User, UserFields};

/// 存储层错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("name is required")]
    NameRequired,
    #[error("name must be a non-blank string")]
    InvalidNameValue,
    #[error("age must be a non-negative integer ({0:?})")]
    InvalidAgeValue(Operation),
    #[error("user {0} not found")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建用户，先校验 name 再校验 age
    pub fn create(&self, fields: UserFields) -> Result<User, StoreError> {
        let name = fields
            .name
            .as_ref()
            .and_then(trimmed_name)
            .ok_or(StoreError::NameRequired)?;
        let age = fields
            .age
            .as_ref()
            .and_then(non_negative_age)
            .ok_or(StoreError::InvalidAgeValue(Operation::Create))?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            age,
        };

        let mut users = self.write();
        users.push(user.clone());
        info!(user_id = %user.id, total = users.len(), "user created");

        Ok(user)
    }

    /// 按创建顺序返回全部用户
    pub fn list(&self) -> Vec<User> {
        let users = self.read();
        debug!(total = users.len(), "listing users");
        users.clone()
    }

    pub fn get(&self, id: &str) -> Result<User, StoreError> {
        self.read()
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// 部分更新：只修改请求中出现的字段
    ///
    /// 所有出现的字段都校验通过后才会写入，任何一个字段不合法时记录保持不变。
    /// 记录在列表中的位置不会改变。
    pub fn update(&self, id: &str, fields: UserFields) -> Result<User, StoreError> {
        let mut users = self.write();
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let name = fields
            .name
            .as_ref()
            .map(|value| trimmed_name(value).ok_or(StoreError::InvalidNameValue))
            .transpose()?;
        let age = fields
            .age
            .as_ref()
            .map(|value| {
                non_negative_age(value).ok_or(StoreError::InvalidAgeValue(Operation::Update))
            })
            .transpose()?;

        if let Some(name) = name {
            user.name = name;
        }
        if let Some(age) = age {
            user.age = age;
        }
        debug!(user_id = %user.id, "user updated");

        Ok(user.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut users = self.write();
        let index = users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Vec::remove 保留其余记录的相对顺序
        users.remove(index);
        info!(user_id = %id, total = users.len(), "user deleted");

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // 写操作只在校验通过后才修改集合，中毒的锁里的数据仍然一致
    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn trimmed_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => {
            let trimmed = name.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// 只接受 JSON 整数；浮点数（包括 `25.0`）、字符串、布尔值都不算
fn non_negative_age(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        _ => None,
    }
}
