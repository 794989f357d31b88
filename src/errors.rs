use crate::container::Key;
use thiserror::Error;

/// 容器错误
#[derive(Debug, Error)]
pub enum ContainerError {
    /// 参数非法（例如空的限定名）
    #[error("Invalid arguments: {reason}")]
    InvalidArgument { reason: String },

    /// 服务未注册
    #[error("Service '{key}' is not registered{}", format_available(.available))]
    NotFound { key: Key, available: Vec<String> },

    /// 构造函数消费了未声明的位置参数
    #[error(
        "Missing dependency metadata for '{key}': constructor argument #{position} was not declared"
    )]
    MissingMetadata { key: Key, position: usize },

    /// 类型不匹配
    #[error("Type mismatch while resolving '{key}': expected '{expected}', found '{actual}'")]
    TypeMismatch {
        key: Key,
        expected: String,
        actual: String,
    },

    /// 循环依赖
    #[error("Circular dependency detected: {}", format_chain(.chain))]
    CircularDependency { chain: Vec<Key> },

    /// 解析深度超限
    #[error("Resolution depth limit ({max_depth}) exceeded while resolving '{key}'")]
    DepthExceeded { key: Key, max_depth: usize },

    /// 服务创建失败
    #[error("Failed to create service '{key}': {source}")]
    CreationFailed {
        key: Key,
        #[source]
        source: anyhow::Error,
    },

    /// 释放失败
    #[error("Failed to dispose service '{key}': {source}")]
    DisposeFailed {
        key: Key,
        #[source]
        source: anyhow::Error,
    },

    /// 容器已释放
    #[error("Container has been disposed; cannot access '{key}'")]
    Disposed { key: Key },
}

impl ContainerError {
    /// 将外部错误包装为创建失败
    pub fn creation(key: Key, source: impl Into<anyhow::Error>) -> Self {
        ContainerError::CreationFailed {
            key,
            source: source.into(),
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        ContainerError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(". Available services: {}", available.join(", "))
    }
}

fn format_chain(chain: &[Key]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Alpha;
    struct Beta;

    #[test]
    fn test_not_found_display() {
        let err = ContainerError::NotFound {
            key: Key::of::<Alpha>(),
            available: vec![],
        };
        assert!(err.to_string().ends_with("Alpha' is not registered"));

        let err = ContainerError::NotFound {
            key: Key::of::<Alpha>(),
            available: vec!["Beta".to_string(), "Gamma".to_string()],
        };
        assert!(err.to_string().ends_with("Available services: Beta, Gamma"));
    }

    #[test]
    fn test_circular_dependency_display() {
        let err = ContainerError::CircularDependency {
            chain: vec![Key::of::<Alpha>(), Key::of::<Beta>(), Key::of::<Alpha>()],
        };
        let message = err.to_string();
        assert!(message.starts_with("Circular dependency detected: "));
        assert_eq!(message.matches(" -> ").count(), 2);
    }

    #[test]
    fn test_creation_failed_keeps_source() {
        let err = ContainerError::creation(Key::of::<Alpha>(), io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::FileRead("di.toml".to_string(), io_err);
        assert_eq!(
            err.to_string(),
            "Failed to read file 'di.toml': file not found"
        );

        let err = ConfigError::Invalid {
            field: "container.max_depth".to_string(),
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'container.max_depth': must be greater than zero"
        );
    }
}
