//! Voxlink - GPT-SoVITS TTS 供应商适配器
//!
//! 为聊天客户端宿主接入远端 GPT-SoVITS V2 合成服务:
//!
//! 配置层 (config/):
//! - SynthesisSettings: 合成参数记录, 默认值与持久化覆盖的超集合并
//! - AdapterConfig: 宿主进程配置（环境变量 > 配置文件 > 默认值）
//!
//! 领域层 (domain/):
//! - 值对象: 端点、语种、音频格式、文本切分方式
//! - 远端音色记录与模型权重目录
//!
//! 表单层 (form/):
//! - 声明式字段规格表 + 表单状态 + 类型化回读
//!
//! 适配层 (provider/):
//! - TtsProvider 门面
//! - 宿主端口: SettingsSink（持久化）, Notifier（toast 通知）
//!
//! 引擎层 (engine/):
//! - SpeechEnginePort 抽象 + reqwest 实现 + 测试用 Fake

pub mod config;
pub mod domain;
pub mod engine;
pub mod form;
pub mod provider;

pub use config::{load_config, AdapterConfig, SynthesisSettings};
pub use provider::{ProviderError, TtsProvider};
