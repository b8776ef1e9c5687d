//! 应用配置管理
//!
//! 提供配置的加载、保存、更新功能，使用全局单例模式管理配置状态。
//! 加载顺序：配置文件 → 环境变量覆盖。

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::AppError;

/// 配置文件路径环境变量
const CONFIG_PATH_ENV: &str = "STACK_ADVISOR_CONFIG";

/// 获取配置文件路径
fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }

    // 配置文件位于可执行文件同级目录
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 应用配置结构体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 补全服务 API 密钥
    #[serde(default)]
    pub api_key: String,

    /// 补全服务基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// 请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 界面监听地址
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// 是否记录请求日志
    #[serde(default)]
    pub request_log: bool,

    /// 请求日志目录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_bind_addr() -> String {
    "127.0.0.1:8765".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            bind_addr: default_bind_addr(),
            request_log: false,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// 应用环境变量覆盖
    ///
    /// `lookup` 返回变量值，测试中可替换为固定表。
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.api_key = key;
        }
        if let Some(model) = non_empty("STACK_ADVISOR_MODEL") {
            self.model = model;
        }
        if let Some(base_url) = non_empty("STACK_ADVISOR_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(bind) = non_empty("STACK_ADVISOR_BIND") {
            self.bind_addr = bind;
        }
    }
}

/// 全局配置单例
static CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| RwLock::new(load_config()));

/// 加载配置（文件 + 环境变量）
fn load_config() -> AppConfig {
    let mut config = load_config_from_file(&get_config_path()).unwrap_or_default();
    config.apply_env(|key| std::env::var(key).ok());
    config
}

/// 从文件加载配置
fn load_config_from_file(path: &Path) -> Option<AppConfig> {
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring invalid config file {}: {}", path.display(), e);
            None
        }
    }
}

/// 保存配置到文件
fn save_config_to_file(path: &Path, config: &AppConfig) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| AppError::Config(format!("序列化配置失败: {}", e)))?;
    fs::write(path, content).map_err(|e| AppError::Config(format!("写入配置文件失败: {}", e)))?;
    Ok(())
}

/// 把修改写入配置文件
///
/// 以文件内容为基础，环境变量覆盖的值不落盘。
fn persist_update<F>(path: &Path, updater: &F) -> Result<AppConfig, AppError>
where
    F: Fn(&mut AppConfig),
{
    let mut persisted = load_config_from_file(path).unwrap_or_default();
    updater(&mut persisted);
    save_config_to_file(path, &persisted)?;
    Ok(persisted)
}

/// 获取当前配置（克隆）
pub fn get_config() -> AppConfig {
    CONFIG.read().clone()
}

/// 更新配置
///
/// 接收一个闭包来修改配置，修改同时作用于内存配置和配置文件。
/// 内存配置保留环境变量覆盖；文件只记录文件原有内容加本次修改。
pub fn update_config<F>(updater: F) -> Result<AppConfig, AppError>
where
    F: Fn(&mut AppConfig),
{
    let mut config = CONFIG.write();
    persist_update(&get_config_path(), &updater)?;
    updater(&mut config);
    Ok(config.clone())
}

/// 重新加载配置
pub fn reload_config() {
    *CONFIG.write() = load_config();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.bind_addr, "127.0.0.1:8765");
        assert!(!config.request_log);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"api_key": "k", "model": "gemini-pro"}"#).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("API_KEY", "from-api-key"),
            ("STACK_ADVISOR_MODEL", "gemini-2.0-flash"),
            ("STACK_ADVISOR_BIND", " "),
        ]);
        let mut config = AppConfig::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_key, "from-api-key");
        assert_eq!(config.model, "gemini-2.0-flash");
        // 空白值不覆盖
        assert_eq!(config.bind_addr, "127.0.0.1:8765");

        let env: HashMap<&str, &str> =
            HashMap::from([("API_KEY", "fallback"), ("GEMINI_API_KEY", "preferred")]);
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_key, "preferred");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            api_key: "secret".to_string(),
            request_log: true,
            ..AppConfig::default()
        };

        save_config_to_file(&path, &config).unwrap();
        assert_eq!(load_config_from_file(&path), Some(config));
    }

    #[test]
    fn test_update_does_not_persist_env_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let on_disk = AppConfig {
            model: "file-model".to_string(),
            ..AppConfig::default()
        };
        save_config_to_file(&path, &on_disk).unwrap();

        let env: HashMap<&str, &str> =
            HashMap::from([("GEMINI_API_KEY", "env-secret"), ("STACK_ADVISOR_MODEL", "env-model")]);
        let mut effective = load_config_from_file(&path).unwrap();
        effective.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(effective.api_key, "env-secret");

        persist_update(&path, &|c: &mut AppConfig| c.timeout_secs = 30).unwrap();

        let saved = load_config_from_file(&path).unwrap();
        assert_eq!(saved.timeout_secs, 30);
        assert_eq!(saved.model, "file-model");
        assert!(saved.api_key.is_empty());
        assert!(!fs::read_to_string(&path).unwrap().contains("env-secret"));
    }

    #[test]
    fn test_update_persists_explicit_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let saved = persist_update(&path, &|c: &mut AppConfig| c.api_key = "typed-key".to_string()).unwrap();
        assert_eq!(saved.api_key, "typed-key");
        assert_eq!(load_config_from_file(&path), Some(saved));
    }

    #[test]
    fn test_invalid_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();
        assert_eq!(load_config_from_file(&path), None);
        assert_eq!(load_config_from_file(&dir.path().join("missing.json")), None);
    }
}
