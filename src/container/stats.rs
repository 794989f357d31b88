use std::sync::atomic::{AtomicUsize, Ordering};

/// 内部容器统计信息（原子计数器）
#[derive(Default)]
pub(crate) struct InnerStats {
    total_resolutions: AtomicUsize,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
    constructions: AtomicUsize,
    disposals: AtomicUsize,
}

impl InnerStats {
    pub fn record_resolution(&self) {
        self.total_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_construction(&self) {
        self.constructions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disposal(&self) {
        self.disposals.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, registered_services: usize, resolved_services: usize) -> ContainerStats {
        ContainerStats {
            total_resolutions: self.total_resolutions.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            constructions: self.constructions.load(Ordering::Relaxed),
            disposals: self.disposals.load(Ordering::Relaxed),
            registered_services,
            resolved_services,
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 总解析次数（包含递归解析的依赖）
    pub total_resolutions: usize,
    /// 命中已缓存实例的次数
    pub cache_hits: usize,
    /// 需要调用工厂的次数
    pub cache_misses: usize,
    /// 成功构造的实例数
    pub constructions: usize,
    /// 已调用的释放回调数
    pub disposals: usize,
    /// 当前绑定数量
    pub registered_services: usize,
    /// 当前持有实例的绑定数量
    pub resolved_services: usize,
}

impl ContainerStats {
    /// 获取缓存命中率
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// 获取性能指标摘要
    pub fn summary(&self) -> String {
        format!(
            "{} resolutions, {:.1}% cache hit rate, {} constructed, {} disposed, {}/{} services resolved",
            self.total_resolutions,
            self.hit_rate() * 100.0,
            self.constructions,
            self.disposals,
            self.resolved_services,
            self.registered_services
        )
    }
}
