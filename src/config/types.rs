//! Configuration Types
//!
//! 定义合成参数记录与宿主进程配置结构体

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{AudioFormat, TextLang, TextSplitMethod};

/// 合成参数记录
///
/// 不变量: 加载后任何字段都不缺失 —— 始终是默认记录与持久化覆盖的
/// 超集合并, 持久化键胜出, 缺失键由默认值补齐（见 `load_settings`）。
/// 加载时构造一次, 之后每次表单变更原地改写并交给宿主持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisSettings {
    /// 远端合成服务的基础 URL
    #[serde(default = "default_provider_endpoint")]
    pub provider_endpoint: String,

    /// 待合成文本的语种
    #[serde(default)]
    pub lang: TextLang,

    /// 参考音频提示文本的语种
    #[serde(default)]
    pub prompt_lang: TextLang,

    /// 输出音频容器格式
    #[serde(default)]
    pub format: AudioFormat,

    /// 是否流式返回
    #[serde(default)]
    pub streaming: bool,

    /// 服务端文本切分策略
    #[serde(default)]
    pub text_split_method: TextSplitMethod,

    /// 推理批大小
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// 分批阈值
    #[serde(default = "default_batch_threshold")]
    pub batch_threshold: f32,

    /// 语速倍率
    #[serde(default = "default_speed_factor")]
    pub speed_factor: f32,

    /// 采样 top-k
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// 采样 top-p
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 重复惩罚
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f32,
}

fn default_provider_endpoint() -> String {
    "http://localhost:9880".to_string()
}

fn default_batch_size() -> u32 {
    1
}

fn default_batch_threshold() -> f32 {
    0.75
}

fn default_speed_factor() -> f32 {
    1.0
}

fn default_top_k() -> u32 {
    5
}

fn default_top_p() -> f32 {
    1.0
}

fn default_temperature() -> f32 {
    1.0
}

fn default_repetition_penalty() -> f32 {
    1.35
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            provider_endpoint: default_provider_endpoint(),
            lang: TextLang::default(),
            prompt_lang: TextLang::default(),
            format: AudioFormat::default(),
            streaming: false,
            text_split_method: TextSplitMethod::default(),
            batch_size: default_batch_size(),
            batch_threshold: default_batch_threshold(),
            speed_factor: default_speed_factor(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            temperature: default_temperature(),
            repetition_penalty: default_repetition_penalty(),
        }
    }
}

/// 宿主进程配置
#[derive(Debug, Clone, Deserialize)]
pub struct AdapterConfig {
    /// 引擎客户端配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 合成参数记录的持久化路径
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("data/settings.json")
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            settings_path: default_settings_path(),
            log: LogConfig::default(),
        }
    }
}

/// 引擎客户端配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

fn default_engine_timeout() -> u64 {
    120
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_engine_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
