//! 绑定存储的条目

use super::dispose::Disposer;
use super::resolver::Resolver;
use crate::errors::ContainerError;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

/// 类型擦除的实例，内部保存 `Arc<K>`
pub(crate) type ErasedValue = Arc<dyn Any + Send + Sync>;

/// 未解析的工厂
pub(crate) type Factory =
    Arc<dyn Fn(&mut Resolver<'_>) -> Result<Instance, ContainerError> + Send + Sync>;

/// 构造完成的实例及其释放回调
#[derive(Clone)]
pub(crate) struct Instance {
    pub value: ErasedValue,
    pub disposer: Option<Disposer>,
}

impl Instance {
    pub fn new<K: ?Sized + Send + Sync + 'static>(value: Arc<K>, disposer: Option<Disposer>) -> Self {
        Self {
            value: Arc::new(value),
            disposer,
        }
    }

    /// 取回 `Arc<K>`，类型不符时返回 `None`
    pub fn downcast<K: ?Sized + 'static>(value: &ErasedValue) -> Option<Arc<K>> {
        value.downcast_ref::<Arc<K>>().cloned()
    }
}

/// 已缓存的实例
pub(crate) struct Stored {
    pub instance: Instance,
    /// 解析序号，用于决定释放顺序
    pub seq: u64,
    pub disposed: bool,
}

/// 一个键对应的绑定
pub(crate) struct Binding {
    /// 注册编号，重新注册后改变
    pub id: u64,
    /// 直接注册的实例没有工厂
    pub factory: Option<Factory>,
    pub stored: Option<Stored>,
    /// 构造闸门，同一绑定同时只有一个调用运行工厂
    pub gate: Arc<Mutex<()>>,
}

impl Binding {
    pub fn is_resolved(&self) -> bool {
        self.stored.is_some()
    }
}
