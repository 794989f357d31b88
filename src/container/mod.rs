//! 依赖注入容器
//!
//! 所有绑定在首次解析后成为容器级单例：
//! - 直接注册的实例原样返回，从不重新构造
//! - 工厂（含 [`Injectable`] 类型）首次解析时递归构造依赖并缓存结果
//! - `dispose()` 对已解析实例级联调用释放回调，未解析的工厂不受影响

mod binding;
mod dispose;
mod injectable;
mod key;
mod resolver;
mod stats;

pub use dispose::{disposer_for, Dispose, Disposer};
pub use injectable::{Dependencies, Injectable};
pub use key::Key;
pub use resolver::Resolver;
pub use stats::ContainerStats;

use crate::config::{ContainerConfig, DisposeOrder, PostDisposePolicy};
use crate::errors::ContainerError;
use binding::{Binding, ErasedValue, Factory, Instance, Stored};
use parking_lot::{Mutex, RwLock};
use stats::InnerStats;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// 查找结果
pub(crate) enum Lookup {
    /// 已有实例
    Ready(ErasedValue),
    /// 需要调用工厂构造，构造前须持有 `gate`
    Pending {
        id: u64,
        factory: Factory,
        gate: Arc<Mutex<()>>,
    },
}

/// 依赖注入容器
///
/// 通常在程序入口创建一次（组合根），以 `Arc<Container>` 形式传递。
/// 工厂运行期间不持有存储锁，因此工厂可以递归解析其他服务；
/// 每个绑定各有一个构造闸门，多个线程同时首次解析同一服务时工厂只运行一次。
/// 跨线程的循环依赖会在闸门上互相等待，循环依赖应在单线程启动阶段暴露。
pub struct Container {
    /// 绑定存储
    bindings: RwLock<HashMap<Key, Binding>>,
    config: ContainerConfig,
    stats: InnerStats,
    next_id: AtomicU64,
    next_seq: AtomicU64,
    disposed: AtomicBool,
}

impl Container {
    /// 使用默认配置创建容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
            config,
            stats: InnerStats::default(),
            next_id: AtomicU64::new(0),
            next_seq: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 注册已构造的实例，解析时原样返回
    pub fn register_instance<K>(&self, value: Arc<K>) -> Result<(), ContainerError>
    where
        K: ?Sized + Send + Sync + 'static,
    {
        self.insert(Key::of::<K>(), None, Some(Instance::new(value, None)))
    }

    pub fn register_instance_named<K>(&self, name: &str, value: Arc<K>) -> Result<(), ContainerError>
    where
        K: ?Sized + Send + Sync + 'static,
    {
        self.insert(Key::named::<K>(name)?, None, Some(Instance::new(value, None)))
    }

    /// 注册已构造且需要在容器释放时清理的实例
    pub fn register_disposable<T: Dispose>(&self, value: Arc<T>) -> Result<(), ContainerError> {
        let disposer = disposer_for(&value);
        self.insert(Key::of::<T>(), None, Some(Instance::new(value, Some(disposer))))
    }

    /// 以类型自身为键注册可注入类型
    pub fn register_type<T: Injectable>(&self) -> Result<(), ContainerError> {
        let key = Key::of::<T>();
        self.insert(key.clone(), Some(type_factory::<T, T>(key, |value| value)), None)
    }

    pub fn register_type_named<T: Injectable>(&self, name: &str) -> Result<(), ContainerError> {
        let key = Key::named::<T>(name)?;
        self.insert(key.clone(), Some(type_factory::<T, T>(key, |value| value)), None)
    }

    /// 以接口类型（如 `dyn Trait`）为键注册可注入类型
    ///
    /// ```
    /// use di_container::{injectable, Container};
    /// use std::sync::Arc;
    ///
    /// trait Clock: Send + Sync {
    ///     fn now(&self) -> u64;
    /// }
    ///
    /// struct FixedClock;
    /// impl FixedClock {
    ///     fn new() -> Self { FixedClock }
    /// }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> u64 { 42 }
    /// }
    /// injectable!(FixedClock => FixedClock::new());
    ///
    /// let container = Container::new();
    /// container
    ///     .register_type_as::<dyn Clock, FixedClock>(|clock| clock)
    ///     .unwrap();
    /// assert_eq!(container.resolve::<dyn Clock>().unwrap().now(), 42);
    /// ```
    pub fn register_type_as<K, T>(&self, upcast: fn(Arc<T>) -> Arc<K>) -> Result<(), ContainerError>
    where
        K: ?Sized + Send + Sync + 'static,
        T: Injectable,
    {
        let key = Key::of::<K>();
        self.insert(key.clone(), Some(type_factory::<K, T>(key, upcast)), None)
    }

    /// 注册工厂闭包，闭包通过 [`Resolver`] 自行解析依赖
    pub fn register_factory<K, F>(&self, factory: F) -> Result<(), ContainerError>
    where
        K: ?Sized + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<Arc<K>, ContainerError> + Send + Sync + 'static,
    {
        self.insert(Key::of::<K>(), Some(closure_factory(factory)), None)
    }

    pub fn register_factory_named<K, F>(&self, name: &str, factory: F) -> Result<(), ContainerError>
    where
        K: ?Sized + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<Arc<K>, ContainerError> + Send + Sync + 'static,
    {
        self.insert(Key::named::<K>(name)?, Some(closure_factory(factory)), None)
    }

    /// 注册工厂闭包，构造出的实例在容器释放时清理
    pub fn register_disposable_factory<T, F>(&self, build: F) -> Result<(), ContainerError>
    where
        T: Dispose,
        F: Fn(&mut Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.insert(Key::of::<T>(), Some(disposable_factory(build, |value| value)), None)
    }

    pub fn register_disposable_factory_named<T, F>(
        &self,
        name: &str,
        build: F,
    ) -> Result<(), ContainerError>
    where
        T: Dispose,
        F: Fn(&mut Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.insert(
            Key::named::<T>(name)?,
            Some(disposable_factory(build, |value| value)),
            None,
        )
    }

    /// 以接口 `K` 为键注册可释放的工厂；释放时调用具体类型 `T` 的 [`Dispose`]
    pub fn register_disposable_factory_as<K, T, F>(
        &self,
        upcast: fn(Arc<T>) -> Arc<K>,
        build: F,
    ) -> Result<(), ContainerError>
    where
        K: ?Sized + Send + Sync + 'static,
        T: Dispose,
        F: Fn(&mut Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.insert(Key::of::<K>(), Some(disposable_factory(build, upcast)), None)
    }

    /// 移除绑定；不存在时无操作。被移除的实例不会被释放。
    pub fn unregister<K: ?Sized + 'static>(&self) -> bool {
        self.remove(&Key::of::<K>())
    }

    pub fn unregister_named<K: ?Sized + 'static>(&self, name: &str) -> bool {
        Key::named::<K>(name).is_ok_and(|key| self.remove(&key))
    }

    /// 检查服务是否已注册
    pub fn has<K: ?Sized + 'static>(&self) -> bool {
        self.bindings.read().contains_key(&Key::of::<K>())
    }

    pub fn has_named<K: ?Sized + 'static>(&self, name: &str) -> bool {
        Key::named::<K>(name).is_ok_and(|key| self.bindings.read().contains_key(&key))
    }

    /// 检查绑定当前是否持有实例
    pub fn is_resolved<K: ?Sized + 'static>(&self) -> bool {
        self.bindings
            .read()
            .get(&Key::of::<K>())
            .is_some_and(Binding::is_resolved)
    }

    /// 解析服务
    pub fn resolve<K: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<K>, ContainerError> {
        Resolver::new(self).resolve::<K>()
    }

    pub fn resolve_named<K: ?Sized + Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<Arc<K>, ContainerError> {
        Resolver::new(self).resolve_named::<K>(name)
    }

    /// 释放所有已解析的实例
    ///
    /// 默认按解析顺序的逆序调用释放回调（先释放依赖方，再释放被依赖方）。
    /// 绑定存储不会被清空。某个回调失败时立即返回，剩余实例保持未释放状态。
    pub fn dispose(&self) -> Result<(), ContainerError> {
        let mut pending: Vec<(Key, u64, Option<Disposer>)> = self
            .bindings
            .read()
            .iter()
            .filter_map(|(key, binding)| {
                binding
                    .stored
                    .as_ref()
                    .filter(|stored| !stored.disposed)
                    .map(|stored| (key.clone(), stored.seq, stored.instance.disposer.clone()))
            })
            .collect();

        pending.sort_by_key(|(_, seq, _)| *seq);
        if self.config.dispose_order == DisposeOrder::Reverse {
            pending.reverse();
        }

        let mut disposed = 0usize;
        for (key, seq, disposer) in pending {
            if let Some(disposer) = disposer {
                if let Err(source) = disposer() {
                    warn!(service = %key, error = %source, "服务释放失败");
                    return Err(ContainerError::DisposeFailed { key, source });
                }
                self.stats.record_disposal();
                disposed += 1;
                debug!(service = %key, "服务已释放");
            }
            self.mark_disposed(&key, seq);
        }

        match self.config.post_dispose {
            PostDisposePolicy::Fail => {
                self.disposed.store(true, Ordering::SeqCst);
            }
            PostDisposePolicy::Reconstruct => {
                // 工厂绑定回到未解析状态，下次解析重新构造
                for binding in self.bindings.write().values_mut() {
                    if binding.factory.is_some() {
                        binding.stored = None;
                    }
                }
            }
        }

        info!(disposed, policy = ?self.config.post_dispose, "容器已释放");
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// 已注册的键（按名称排序）
    pub fn registered_keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.bindings.read().keys().cloned().collect();
        keys.sort_by_cached_key(ToString::to_string);
        keys
    }

    /// 获取容器统计信息
    pub fn stats(&self) -> ContainerStats {
        let bindings = self.bindings.read();
        let resolved = bindings.values().filter(|b| b.is_resolved()).count();
        self.stats.snapshot(bindings.len(), resolved)
    }

    fn ensure_live(&self, key: &Key) -> Result<(), ContainerError> {
        if self.is_disposed() {
            return Err(ContainerError::Disposed { key: key.clone() });
        }
        Ok(())
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    fn insert(
        &self,
        key: Key,
        factory: Option<Factory>,
        instance: Option<Instance>,
    ) -> Result<(), ContainerError> {
        self.ensure_live(&key)?;

        let binding = Binding {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            factory,
            stored: instance.map(|instance| Stored {
                instance,
                seq: self.next_seq(),
                disposed: false,
            }),
            gate: Arc::new(Mutex::new(())),
        };

        let replaced = self.bindings.write().insert(key.clone(), binding).is_some();
        if replaced {
            debug!(service = %key, "覆盖已有绑定");
        } else {
            debug!(service = %key, "注册服务");
        }
        Ok(())
    }

    fn remove(&self, key: &Key) -> bool {
        let removed = self.bindings.write().remove(key).is_some();
        if removed {
            debug!(service = %key, "移除绑定");
        }
        removed
    }

    fn mark_disposed(&self, key: &Key, seq: u64) {
        if let Some(stored) = self
            .bindings
            .write()
            .get_mut(key)
            .and_then(|binding| binding.stored.as_mut())
        {
            if stored.seq == seq {
                stored.disposed = true;
            }
        }
    }

    /// 查找绑定，命中缓存时直接返回实例
    pub(crate) fn lookup(&self, key: &Key) -> Result<Lookup, ContainerError> {
        self.stats.record_resolution();
        self.ensure_live(key)?;

        let bindings = self.bindings.read();
        let binding = match bindings.get(key) {
            Some(binding) => binding,
            None => {
                let mut available: Vec<String> = bindings.keys().map(ToString::to_string).collect();
                available.sort();
                return Err(ContainerError::NotFound {
                    key: key.clone(),
                    available,
                });
            }
        };

        match (&binding.stored, &binding.factory) {
            (Some(stored), _) => {
                self.stats.record_hit();
                trace!(service = %key, "命中单例缓存");
                Ok(Lookup::Ready(Arc::clone(&stored.instance.value)))
            }
            (None, Some(factory)) => {
                self.stats.record_miss();
                Ok(Lookup::Pending {
                    id: binding.id,
                    factory: Arc::clone(factory),
                    gate: Arc::clone(&binding.gate),
                })
            }
            (None, None) => Err(ContainerError::NotFound {
                key: key.clone(),
                available: Vec::new(),
            }),
        }
    }

    /// 持有构造闸门后再次检查：等待期间其他调用可能已完成构造
    pub(crate) fn cached(&self, key: &Key, id: u64) -> Option<ErasedValue> {
        self.bindings
            .read()
            .get(key)
            .filter(|binding| binding.id == id)
            .and_then(|binding| binding.stored.as_ref())
            .map(|stored| Arc::clone(&stored.instance.value))
    }

    /// 缓存新构造的实例
    ///
    /// 若同一绑定已有缓存实例，本次结果会先被释放再丢弃；若绑定在构造期间被移除或替换，
    /// 实例直接返回给调用方而不缓存。
    pub(crate) fn memoize(&self, key: &Key, id: u64, instance: Instance) -> ErasedValue {
        self.stats.record_construction();

        let mut bindings = self.bindings.write();
        match bindings.get_mut(key) {
            Some(binding) if binding.id == id => {
                if let Some(existing) = &binding.stored {
                    let value = Arc::clone(&existing.instance.value);
                    drop(bindings);
                    debug!(service = %key, "实例已被缓存，释放本次构造结果");
                    if let Some(disposer) = instance.disposer {
                        if let Err(e) = disposer() {
                            warn!(service = %key, error = %e, "重复构造的实例释放失败");
                        }
                    }
                    return value;
                }
                let value = Arc::clone(&instance.value);
                binding.stored = Some(Stored {
                    instance,
                    seq: self.next_seq(),
                    disposed: false,
                });
                debug!(service = %key, "服务已构造并缓存");
                value
            }
            _ => {
                debug!(service = %key, "绑定在构造期间被移除或替换，实例未缓存");
                instance.value
            }
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registered_keys", &self.registered_keys())
            .field("disposed", &self.is_disposed())
            .field("config", &self.config)
            .finish()
    }
}

/// 为可注入类型生成工厂：按声明顺序解析依赖，再按位置交给构造函数
fn type_factory<K, T>(owner: Key, upcast: fn(Arc<T>) -> Arc<K>) -> Factory
where
    K: ?Sized + Send + Sync + 'static,
    T: Injectable,
{
    Arc::new(move |resolver: &mut Resolver<'_>| {
        let declared = T::dependencies();
        let mut args = Vec::with_capacity(declared.len());
        for dependency in declared {
            let value = resolver.resolve_key(&dependency)?;
            args.push((dependency, value));
        }

        let mut deps = Dependencies::new(&owner, args);
        let value = Arc::new(T::construct(&mut deps)?);
        if deps.remaining() > 0 {
            trace!(service = %owner, unused = deps.remaining(), "部分声明的依赖未被构造函数使用");
        }

        let disposer = T::disposer(&value);
        Ok(Instance::new(upcast(value), disposer))
    })
}

fn disposable_factory<K, T, F>(build: F, upcast: fn(Arc<T>) -> Arc<K>) -> Factory
where
    K: ?Sized + Send + Sync + 'static,
    T: Dispose,
    F: Fn(&mut Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &mut Resolver<'_>| {
        let value = build(resolver)?;
        let disposer = disposer_for(&value);
        Ok(Instance::new(upcast(value), Some(disposer)))
    })
}

fn closure_factory<K, F>(factory: F) -> Factory
where
    K: ?Sized + Send + Sync + 'static,
    F: Fn(&mut Resolver<'_>) -> Result<Arc<K>, ContainerError> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &mut Resolver<'_>| Ok(Instance::new(factory(resolver)?, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    trait Logger: Send + Sync {
        fn name(&self) -> &str;
    }

    struct ConsoleLogger {
        name: String,
    }

    impl Logger for ConsoleLogger {
        fn name(&self) -> &str {
            &self.name
        }
    }

    struct Service {
        logger: Arc<dyn Logger>,
    }

    impl Service {
        fn new(logger: Arc<dyn Logger>) -> Self {
            Self { logger }
        }
    }

    crate::injectable!(Service => Service::new(dyn Logger));

    struct Standalone;

    impl Standalone {
        fn new() -> Self {
            Standalone
        }
    }

    crate::injectable!(Standalone => Standalone::new());

    /// 构造函数需要参数但没有声明依赖
    struct Undeclared {
        _logger: Arc<dyn Logger>,
    }

    impl Injectable for Undeclared {
        fn construct(deps: &mut Dependencies<'_>) -> Result<Self, ContainerError> {
            Ok(Self {
                _logger: deps.next::<dyn Logger>()?,
            })
        }
    }

    fn console_logger(name: &str) -> Arc<dyn Logger> {
        Arc::new(ConsoleLogger {
            name: name.to_string(),
        })
    }

    #[test]
    fn test_service_not_registered() {
        let container = Container::new();

        let result = container.resolve::<Standalone>();

        assert!(matches!(result, Err(ContainerError::NotFound { .. })));
    }

    #[test]
    fn test_overwrite_replaces_binding() {
        let container = Container::new();
        container.register_instance(console_logger("first")).unwrap();
        container.register_instance(console_logger("second")).unwrap();

        let logger = container.resolve::<dyn Logger>().unwrap();

        assert_eq!(logger.name(), "second");
        assert_eq!(container.registered_keys().len(), 1);
    }

    #[test]
    fn test_singleton_memoization() {
        let container = Container::new();
        container.register_type::<Standalone>().unwrap();

        let first = container.resolve::<Standalone>().unwrap();
        let second = container.resolve::<Standalone>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(container.stats().constructions, 1);
    }

    #[test]
    fn test_instance_pass_through() {
        let container = Container::new();
        let logger = console_logger("direct");
        container.register_instance(Arc::clone(&logger)).unwrap();

        let resolved = container.resolve::<dyn Logger>().unwrap();

        assert!(Arc::ptr_eq(&logger, &resolved));
    }

    #[test]
    fn test_dependency_wiring() {
        let container = Container::new();
        let logger = console_logger("wired");
        container.register_instance(Arc::clone(&logger)).unwrap();
        container.register_type::<Service>().unwrap();

        let service = container.resolve::<Service>().unwrap();

        assert!(Arc::ptr_eq(&service.logger, &logger));
    }

    #[test]
    fn test_missing_metadata() {
        let container = Container::new();
        container.register_instance(console_logger("unused")).unwrap();
        container.register_type::<Undeclared>().unwrap();

        let result = container.resolve::<Undeclared>();

        assert!(matches!(
            result,
            Err(ContainerError::MissingMetadata { position: 0, .. })
        ));
        assert!(!container.is_resolved::<Undeclared>());
    }

    #[test]
    fn test_failed_dependency_is_not_memoized() {
        let container = Container::new();
        container.register_type::<Service>().unwrap();

        let result = container.resolve::<Service>();
        assert!(matches!(result, Err(ContainerError::NotFound { .. })));
        assert!(!container.is_resolved::<Service>());

        container.register_instance(console_logger("late")).unwrap();
        let service = container.resolve::<Service>().unwrap();
        assert_eq!(service.logger.name(), "late");
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let container = Container::new();
        assert!(!container.unregister::<Standalone>());

        container.register_type::<Standalone>().unwrap();
        assert!(container.has::<Standalone>());
        assert!(container.unregister::<Standalone>());
        assert!(!container.has::<Standalone>());
        assert!(!container.unregister::<Standalone>());
    }

    #[test]
    fn test_named_bindings() {
        let container = Container::new();
        container.register_instance(console_logger("default")).unwrap();
        container
            .register_instance_named::<dyn Logger>("audit", console_logger("audit"))
            .unwrap();

        assert_eq!(container.resolve::<dyn Logger>().unwrap().name(), "default");
        assert_eq!(
            container.resolve_named::<dyn Logger>("audit").unwrap().name(),
            "audit"
        );
        assert!(container.has_named::<dyn Logger>("audit"));
        assert!(!container.has_named::<dyn Logger>(""));

        let result = container.register_type_named::<Standalone>(" ");
        assert!(matches!(result, Err(ContainerError::InvalidArgument { .. })));
    }

    #[test]
    fn test_factory_is_invoked_once() {
        let container = Container::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        container
            .register_factory::<Service, _>(move |resolver| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(Service::new(resolver.resolve::<dyn Logger>()?)))
            })
            .unwrap();
        container.register_instance(console_logger("factory")).unwrap();

        for _ in 0..5 {
            container.resolve::<Service>().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = container.stats();
        assert_eq!(stats.total_resolutions, 6);
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.cache_hits, 5);
    }

    #[test]
    fn test_duplicate_construction_is_disposed() {
        let container = Container::new();
        container
            .register_factory::<Standalone, _>(|_| Ok(Arc::new(Standalone)))
            .unwrap();
        let key = Key::of::<Standalone>();
        let id = container.bindings.read()[&key].id;

        let disposed = Arc::new(AtomicUsize::new(0));
        let build = || {
            let counter = Arc::clone(&disposed);
            let disposer: Disposer = Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            Instance::new(Arc::new(Standalone), Some(disposer))
        };

        let kept = container.memoize(&key, id, build());
        let again = container.memoize(&key, id, build());

        assert!(Arc::ptr_eq(&kept, &again));
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
        assert!(container.cached(&key, id).is_some());
        assert!(container.cached(&key, id + 1).is_none());

        container.dispose().unwrap();
        assert_eq!(disposed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_disposable_factory_variants() {
        struct Pool {
            closed: Arc<AtomicUsize>,
        }

        impl Logger for Pool {
            fn name(&self) -> &str {
                "pool"
            }
        }

        impl Dispose for Pool {
            fn dispose(&self) -> anyhow::Result<()> {
                self.closed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let container = Container::new();
        let closed = Arc::new(AtomicUsize::new(0));
        let named = Arc::clone(&closed);
        container
            .register_disposable_factory_named::<Pool, _>("replica", move |_| {
                Ok(Arc::new(Pool {
                    closed: Arc::clone(&named),
                }))
            })
            .unwrap();
        let as_logger = Arc::clone(&closed);
        container
            .register_disposable_factory_as::<dyn Logger, Pool, _>(
                |pool| pool,
                move |_| {
                    Ok(Arc::new(Pool {
                        closed: Arc::clone(&as_logger),
                    }))
                },
            )
            .unwrap();

        assert!(container.resolve::<Pool>().is_err());
        container.resolve_named::<Pool>("replica").unwrap();
        assert_eq!(container.resolve::<dyn Logger>().unwrap().name(), "pool");

        let result = container.register_disposable_factory_named::<Pool, _>("", |_| {
            Err(ContainerError::invalid_argument("unreachable"))
        });
        assert!(matches!(result, Err(ContainerError::InvalidArgument { .. })));

        container.dispose().unwrap();
        assert_eq!(closed.load(Ordering::SeqCst), 2);
    }
}
