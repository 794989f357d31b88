//! 进程级依赖注入容器
//!
//! 提供：
//! - 按类型（可选名称限定）注册实例、类型与工厂
//! - 构造函数依赖的递归解析与单例缓存
//! - 循环依赖检测
//! - 级联释放（dispose）

pub mod config;
pub mod container;
pub mod errors;
pub mod logging;

pub use config::{ContainerConfig, DisposeOrder, PostDisposePolicy, Settings};
pub use container::{
    Container, ContainerStats, Dependencies, Dispose, Disposer, Injectable, Key, Resolver,
};
pub use errors::{ConfigError, ContainerError};
