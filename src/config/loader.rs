//! Configuration Loader
//!
//! 两条加载路径:
//! - `load_settings`: 把宿主持久化的 JSON 覆盖到默认合成参数上（超集合并）
//! - `load_config`: 宿主进程配置, 多源合并
//!
//! 进程配置优先级（从高到低）:
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::domain::{AudioFormat, ProviderEndpoint};

use super::types::{AdapterConfig, SynthesisSettings};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 合并持久化的合成参数
///
/// 持久化键胜出, 缺失键由默认值补齐; 合并结果保证每个字段都有值。
/// 持久化记录里类型对不上的键（如 `"top_k": "abc"`）整体拒绝,
/// 不会静默写进记录。
pub fn load_settings(persisted: Option<&Value>) -> Result<SynthesisSettings, ConfigError> {
    let settings = match persisted {
        None => {
            info!("Using default synthesis settings");
            SynthesisSettings::default()
        }
        Some(Value::Object(map)) if map.is_empty() => {
            info!("Using default synthesis settings");
            SynthesisSettings::default()
        }
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize persisted settings: {}", e))
        })?,
    };

    validate_settings(&settings)?;
    Ok(settings)
}

/// 验证合成参数
pub fn validate_settings(settings: &SynthesisSettings) -> Result<(), ConfigError> {
    ProviderEndpoint::new(&settings.provider_endpoint)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    // 服务端规则: 非流式模式不支持 ogg 容器
    if settings.format == AudioFormat::Ogg && !settings.streaming {
        return Err(ConfigError::ValidationError(
            "ogg format requires streaming mode".to_string(),
        ));
    }

    if settings.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "batch_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 加载宿主进程配置
///
/// # 环境变量示例
/// - `VOXLINK_ENGINE__TIMEOUT_SECS=60`
/// - `VOXLINK_SETTINGS_PATH=/data/settings.json`
/// - `VOXLINK_LOG__LEVEL=debug`
pub fn load_config() -> Result<AdapterConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载宿主进程配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径, None 时使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AdapterConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("engine.timeout_secs", 120)?
        .set_default("settings_path", "data/settings.json")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: VOXLINK_, 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("VOXLINK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let adapter_config: AdapterConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    validate_config(&adapter_config)?;

    Ok(adapter_config)
}

/// 验证宿主进程配置
fn validate_config(config: &AdapterConfig) -> Result<(), ConfigError> {
    if config.engine.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Engine timeout cannot be 0".to_string(),
        ));
    }

    if config.settings_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Settings path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AdapterConfig) {
    info!("=== Adapter Configuration ===");
    info!("Engine Timeout: {}s", config.engine.timeout_secs);
    info!("Settings Path: {:?}", config.settings_path);
    info!("Log Level: {}", config.log.level);
    info!("=============================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TextLang;
    use serde_json::json;

    #[test]
    fn test_merge_fills_missing_keys_with_defaults() {
        let persisted = json!({"lang": "en", "top_k": 12});
        let settings = load_settings(Some(&persisted)).unwrap();

        // 持久化键胜出
        assert_eq!(settings.lang, TextLang::En);
        assert_eq!(settings.top_k, 12);

        // 缺失键由默认值补齐
        assert_eq!(settings.provider_endpoint, "http://localhost:9880");
        assert_eq!(settings.batch_size, 1);
        assert_eq!(settings.repetition_penalty, 1.35);
    }

    #[test]
    fn test_empty_persisted_object_uses_defaults() {
        let persisted = json!({});
        let settings = load_settings(Some(&persisted)).unwrap();
        assert_eq!(settings, SynthesisSettings::default());

        let settings = load_settings(None).unwrap();
        assert_eq!(settings, SynthesisSettings::default());
    }

    #[test]
    fn test_mistyped_persisted_value_is_rejected() {
        let persisted = json!({"top_k": "abc"});
        assert!(matches!(
            load_settings(Some(&persisted)),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_persisted_keys_are_ignored() {
        let persisted = json!({"lang": "ja", "legacy_field": true});
        let settings = load_settings(Some(&persisted)).unwrap();
        assert_eq!(settings.lang, TextLang::Ja);
    }

    #[test]
    fn test_validation_rejects_ogg_without_streaming() {
        let persisted = json!({"format": "ogg"});
        assert!(matches!(
            load_settings(Some(&persisted)),
            Err(ConfigError::ValidationError(_))
        ));

        let persisted = json!({"format": "ogg", "streaming": true});
        assert!(load_settings(Some(&persisted)).is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let persisted = json!({"provider_endpoint": "not-a-url"});
        assert!(matches!(
            load_settings(Some(&persisted)),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AdapterConfig::default();
        config.engine.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_passes_for_default_config() {
        assert!(validate_config(&AdapterConfig::default()).is_ok());
    }
}
