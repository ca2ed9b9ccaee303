//! 服务配置
//!
//! 配置来自 TOML 文件，所有字段都有默认值，文件里可以只写需要覆盖的部分。

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "USER_REGISTRY_CONFIG";

const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)，`RUST_LOG` 优先
    pub level: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!("invalid bind address: {}", self.bind_address))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("http.port must be greater than 0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("http.bind_address must not be empty".to_string()));
        }
        self.http.socket_addr()?;
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "invalid log level: {}, expected one of {:?}",
                self.logging.level, VALID_LEVELS
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),
    #[error("failed to write config file: {0}")]
    FileWrite(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("failed to serialize config: {0}")]
    Serialize(String),
    #[error("invalid config: {0}")]
    Validation(String),
}

/// 从文件或默认值加载配置
///
/// 设置了 [`CONFIG_ENV`] 时只读取它指向的文件；否则依次尝试默认路径，
/// 都不存在就使用默认配置。返回值附带实际读取的文件路径。
pub fn load_config() -> Result<(Config, Option<PathBuf>), ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        return Config::load_from_file(&path).map(|config| (config, Some(path)));
    }

    load_config_from(&CONFIG_PATHS)
}

fn load_config_from<P: AsRef<Path>>(
    candidates: &[P],
) -> Result<(Config, Option<PathBuf>), ConfigError> {
    for path in candidates {
        let path = path.as_ref();
        if path.exists() {
            return Config::load_from_file(path).map(|config| (config, Some(path.to_path_buf())));
        }
    }

    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.http.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.bind_address = "not-an-ip".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http]\nport = 8081\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.logging.level = "debug".to_string();
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http\nport = ").unwrap();

        assert!(matches!(
            Config::load_from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let (config, source) = load_config_from(&[missing]).unwrap();
        assert_eq!(config, Config::default());
        assert!(source.is_none());
    }

    #[test]
    fn test_load_config_picks_first_existing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("present.toml");
        fs::write(&present, "[logging]\nlevel = \"warn\"\n").unwrap();

        let (config, source) = load_config_from(&[missing, present.clone()]).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(source, Some(present));
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpConfig {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            timeout_seconds: 5,
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }
}
