//! 可注入类型
//!
//! [`Injectable`] 代替运行时反射：类型自行声明构造参数的键，容器按声明顺序
//! 递归解析后，通过 [`Dependencies`] 按位置把参数交给构造函数。
//! 一般通过 [`injectable!`](crate::injectable) 宏实现。

use super::binding::{ErasedValue, Instance};
use super::dispose::Disposer;
use super::key::Key;
use crate::errors::ContainerError;
use std::sync::Arc;

/// 可由容器构造的类型
pub trait Injectable: Sized + Send + Sync + 'static {
    /// 构造参数的键（声明顺序）
    fn dependencies() -> Vec<Key> {
        Vec::new()
    }

    /// 使用已解析的依赖构造实例
    fn construct(deps: &mut Dependencies<'_>) -> Result<Self, ContainerError>;

    /// 可选的释放回调，默认无
    fn disposer(_this: &Arc<Self>) -> Option<Disposer> {
        None
    }
}

/// 已解析的构造参数，按位置依次取出
pub struct Dependencies<'a> {
    owner: &'a Key,
    args: Vec<(Key, ErasedValue)>,
    position: usize,
}

impl<'a> Dependencies<'a> {
    pub(crate) fn new(owner: &'a Key, args: Vec<(Key, ErasedValue)>) -> Self {
        Self {
            owner,
            args,
            position: 0,
        }
    }

    /// 取出下一个位置参数
    pub fn next<T: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<T>, ContainerError> {
        let position = self.position;
        let (declared, value) =
            self.args
                .get(position)
                .ok_or_else(|| ContainerError::MissingMetadata {
                    key: self.owner.clone(),
                    position,
                })?;

        if !declared.is::<T>() {
            return Err(ContainerError::TypeMismatch {
                key: self.owner.clone(),
                expected: declared.to_string(),
                actual: std::any::type_name::<T>().to_string(),
            });
        }

        let resolved = Instance::downcast::<T>(value).ok_or_else(|| ContainerError::TypeMismatch {
            key: declared.clone(),
            expected: std::any::type_name::<T>().to_string(),
            actual: "value of another type".to_string(),
        })?;
        self.position += 1;
        Ok(resolved)
    }

    /// 尚未取出的参数个数
    pub fn remaining(&self) -> usize {
        self.args.len() - self.position
    }
}

/// 声明一个可注入类型
///
/// ```
/// use di_container::{injectable, Container};
/// use std::sync::Arc;
///
/// struct Settings { url: String }
/// struct Repository { settings: Arc<Settings> }
///
/// impl Repository {
///     fn new(settings: Arc<Settings>) -> Self {
///         Self { settings }
///     }
/// }
///
/// injectable!(Repository => Repository::new(Settings));
///
/// let container = Container::new();
/// container.register_instance(Arc::new(Settings { url: "db://local".into() })).unwrap();
/// container.register_type::<Repository>().unwrap();
///
/// let repo = container.resolve::<Repository>().unwrap();
/// assert_eq!(repo.settings.url, "db://local");
/// ```
///
/// 末尾加 `; dispose` 时，类型需实现 [`Dispose`](crate::Dispose)，容器释放时会调用它。
#[macro_export]
macro_rules! injectable {
    ($ty:ty => $($ctor:ident)::+ ( $($dep:ty),* $(,)? )) => {
        impl $crate::Injectable for $ty {
            fn dependencies() -> ::std::vec::Vec<$crate::Key> {
                ::std::vec![$($crate::Key::of::<$dep>()),*]
            }

            fn construct(
                _deps: &mut $crate::Dependencies<'_>,
            ) -> ::std::result::Result<Self, $crate::ContainerError> {
                ::std::result::Result::Ok($($ctor)::+($(_deps.next::<$dep>()?),*))
            }
        }
    };
    ($ty:ty => $($ctor:ident)::+ ( $($dep:ty),* $(,)? ); dispose) => {
        impl $crate::Injectable for $ty {
            fn dependencies() -> ::std::vec::Vec<$crate::Key> {
                ::std::vec![$($crate::Key::of::<$dep>()),*]
            }

            fn construct(
                _deps: &mut $crate::Dependencies<'_>,
            ) -> ::std::result::Result<Self, $crate::ContainerError> {
                ::std::result::Result::Ok($($ctor)::+($(_deps.next::<$dep>()?),*))
            }

            fn disposer(this: &::std::sync::Arc<Self>) -> ::std::option::Option<$crate::Disposer> {
                ::std::option::Option::Some($crate::container::disposer_for(this))
            }
        }
    };
}
