use std::sync::Arc;

/// 需要在容器释放时清理资源的服务
///
/// 容器在 `dispose()` 时按解析顺序的逆序调用，每个已解析实例至多调用一次。
pub trait Dispose: Send + Sync + 'static {
    /// 释放资源；返回错误会中断级联释放
    fn dispose(&self) -> anyhow::Result<()>;
}

/// 类型擦除的释放回调
pub type Disposer = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// 为实现了 [`Dispose`] 的实例生成释放回调
pub fn disposer_for<T: Dispose>(instance: &Arc<T>) -> Disposer {
    let instance = Arc::clone(instance);
    Arc::new(move || instance.dispose())
}
