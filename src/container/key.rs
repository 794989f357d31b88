//! 绑定键
//!
//! 键由类型标识与可选的限定名组成，同一类型可以按不同名称绑定多次。

use crate::errors::ContainerError;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 绑定查找键
#[derive(Clone)]
pub struct Key {
    type_id: TypeId,
    type_name: &'static str,
    name: Option<Arc<str>>,
}

impl Key {
    /// 以类型为键（支持 `dyn Trait` 等非定长类型）
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            name: None,
        }
    }

    /// 以类型 + 限定名为键，名称不能为空
    pub fn named<T: ?Sized + 'static>(name: &str) -> Result<Self, ContainerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContainerError::invalid_argument(format!(
                "binding name for '{}' must not be empty",
                std::any::type_name::<T>()
            )));
        }

        Ok(Self {
            name: Some(Arc::from(name)),
            ..Self::of::<T>()
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 是否与类型 `T` 对应（忽略限定名）
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}#{}", self.type_name, name),
            None => f.write_str(self.type_name),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self)
    }
}
