//! 容器与日志配置
//!
//! 配置文件为 TOML：
//!
//! ```toml
//! [container]
//! post_dispose = "fail"      # 或 "reconstruct"
//! max_depth = 64
//! dispose_order = "reverse"  # 或 "forward"
//!
//! [logging]
//! level = "info"
//! format = "pretty"          # 或 "compact" / "json"
//! show_target = true
//! show_thread_ids = false
//! ansi = true
//! ```

mod loader;

pub use loader::{ConfigLoader, CONFIG_FILE_NAME, LOG_LEVEL_ENV};

use crate::errors::ConfigError;
use crate::logging::{LogFormat, LoggingConfig};
use serde::Deserialize;
use tracing::Level;

/// 容器释放后再次访问的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostDisposePolicy {
    /// 释放后的解析与注册返回 `Disposed` 错误
    #[default]
    Fail,
    /// 工厂绑定回到未解析状态，下次解析时重新构造
    Reconstruct,
}

/// 释放顺序（按解析序号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisposeOrder {
    /// 后解析的先释放
    #[default]
    Reverse,
    /// 先解析的先释放
    Forward,
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub post_dispose: PostDisposePolicy,
    /// 递归解析的最大深度
    pub max_depth: usize,
    pub dispose_order: DisposeOrder,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            post_dispose: PostDisposePolicy::Fail,
            max_depth: 64,
            dispose_order: DisposeOrder::Reverse,
        }
    }
}

impl ContainerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "container.max_depth".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// 日志设置（配置文件中的 `[logging]`）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub show_target: bool,
    pub show_thread_ids: bool,
    pub ansi: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        let defaults = LoggingConfig::default();
        Self {
            level: "info".to_string(),
            format: defaults.format,
            show_target: defaults.show_target,
            show_thread_ids: defaults.show_thread_ids,
            ansi: defaults.ansi,
        }
    }
}

impl LogSettings {
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.level.parse::<Level>().map_err(|_| ConfigError::Invalid {
            field: "logging.level".to_string(),
            reason: format!("unknown log level '{}'", self.level),
        })
    }

    pub fn to_logging_config(&self) -> Result<LoggingConfig, ConfigError> {
        Ok(LoggingConfig {
            level: self.level()?,
            format: self.format,
            show_target: self.show_target,
            show_thread_ids: self.show_thread_ids,
            ansi: self.ansi && self.format != LogFormat::Json,
        })
    }
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub container: ContainerConfig,
    pub logging: LogSettings,
}

impl Settings {
    /// 从 TOML 文本解析并校验
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(source)
            .map_err(|e| ConfigError::TomlParse(origin.to_string(), e))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.container.validate()?;
        self.logging.level()?;
        Ok(())
    }
}
