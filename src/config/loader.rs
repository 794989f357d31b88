use super::Settings;
use crate::errors::ConfigError;
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "di-container.toml";

/// 覆盖日志级别的环境变量
pub const LOG_LEVEL_ENV: &str = "DI_LOG_LEVEL";

/// 配置加载器：配置文件 + 环境变量覆盖
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    /// 替代系统配置目录
    config_dir: Option<PathBuf>,
    /// 替代进程环境变量
    env: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// 使用默认路径（`<config_dir>/di-container/di-container.toml`）
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定文件
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// 以 `dir` 代替系统配置目录（测试用）
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// 以给定的变量代替进程环境（测试用）
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// 默认配置文件位置
    pub fn default_path(&self) -> Option<PathBuf> {
        self.config_dir
            .clone()
            .or_else(dirs::config_dir)
            .map(|dir| dir.join("di-container").join(CONFIG_FILE_NAME))
    }

    /// 加载配置
    ///
    /// 显式指定的文件必须存在；默认路径不存在时使用默认配置。
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.path {
            Some(path) => Self::read_file(path)?,
            None => match self.default_path().filter(|path| path.exists()) {
                Some(path) => Self::read_file(&path)?,
                None => {
                    tracing::debug!("未找到配置文件，使用默认配置");
                    Settings::default()
                }
            },
        };

        let env_map = self.collect_env_vars();
        if let Some(level) = env_map.get(LOG_LEVEL_ENV).map(|level| level.trim()) {
            if !level.is_empty() {
                tracing::debug!(level, "日志级别由 {} 覆盖", LOG_LEVEL_ENV);
                settings.logging.level = level.to_string();
                settings.validate()?;
            }
        }

        Ok(settings)
    }

    fn collect_env_vars(&self) -> HashMap<String, String> {
        if let Some(vars) = &self.env {
            return vars.clone();
        }

        let mut env_map = HashMap::new();
        if let Ok(value) = env::var(LOG_LEVEL_ENV) {
            env_map.insert(LOG_LEVEL_ENV.to_string(), value);
        }
        env_map
    }

    fn read_file(path: &Path) -> Result<Settings, ConfigError> {
        let origin = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(origin.clone(), e))?;
        let settings = Settings::from_toml_str(&content, &origin)?;
        tracing::debug!(path = %origin, "配置已加载");
        Ok(settings)
    }
}
