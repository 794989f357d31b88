//! 递归解析
//!
//! 每次顶层 `resolve` 创建一个 [`Resolver`]，它记录当前调用链上正在构造的键，
//! 用于循环依赖检测。解析栈属于调用链而非容器，因此多个线程同时解析互不干扰。

use super::binding::{ErasedValue, Instance};
use super::key::Key;
use super::{Container, Lookup};
use crate::errors::ContainerError;
use std::sync::Arc;
use tracing::debug;

/// 解析上下文，传给工厂闭包以解析其依赖
pub struct Resolver<'c> {
    container: &'c Container,
    stack: Vec<Key>,
}

impl<'c> Resolver<'c> {
    pub(crate) fn new(container: &'c Container) -> Self {
        Self {
            container,
            stack: Vec::new(),
        }
    }

    /// 解析类型 `K` 的服务
    pub fn resolve<K: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<K>, ContainerError> {
        self.resolve_as::<K>(Key::of::<K>())
    }

    /// 解析按名称注册的服务
    pub fn resolve_named<K: ?Sized + Send + Sync + 'static>(
        &mut self,
        name: &str,
    ) -> Result<Arc<K>, ContainerError> {
        self.resolve_as::<K>(Key::named::<K>(name)?)
    }

    /// 当前正在构造的键（由外到内）
    pub fn path(&self) -> &[Key] {
        &self.stack
    }

    fn resolve_as<K: ?Sized + Send + Sync + 'static>(
        &mut self,
        key: Key,
    ) -> Result<Arc<K>, ContainerError> {
        let value = self.resolve_key(&key)?;
        Instance::downcast::<K>(&value).ok_or_else(|| ContainerError::TypeMismatch {
            expected: std::any::type_name::<K>().to_string(),
            actual: "value registered under a different type".to_string(),
            key,
        })
    }

    pub(crate) fn resolve_key(&mut self, key: &Key) -> Result<ErasedValue, ContainerError> {
        if self.stack.contains(key) {
            let mut chain = self.stack.clone();
            chain.push(key.clone());
            debug!(service = %key, depth = self.stack.len(), "检测到循环依赖");
            return Err(ContainerError::CircularDependency { chain });
        }

        let max_depth = self.container.config().max_depth;
        if self.stack.len() >= max_depth {
            return Err(ContainerError::DepthExceeded {
                key: key.clone(),
                max_depth,
            });
        }

        match self.container.lookup(key)? {
            Lookup::Ready(value) => Ok(value),
            Lookup::Pending { id, factory, gate } => {
                let _gate = gate.lock();
                if let Some(value) = self.container.cached(key, id) {
                    return Ok(value);
                }

                self.stack.push(key.clone());
                let built = factory(self);
                self.stack.pop();

                let instance = built.inspect_err(|e| {
                    debug!(service = %key, error = %e, "服务构造失败");
                })?;
                Ok(self.container.memoize(key, id, instance))
            }
        }
    }
}
