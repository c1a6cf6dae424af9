//! Configuration Module
//!
//! 两类配置:
//! - SynthesisSettings: 面板持有的合成参数记录, 默认值与持久化覆盖的超集合并
//! - AdapterConfig: 宿主进程配置, 多层级来源（环境变量 > 配置文件 > 默认值）

mod loader;
mod types;

pub use loader::{
    load_config, load_config_from_path, load_settings, print_config, validate_settings,
    ConfigError,
};
pub use types::{AdapterConfig, EngineConfig, LogConfig, SynthesisSettings};
