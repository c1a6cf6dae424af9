//! Provider - 适配器门面与宿主端口
//!
//! - adapter: TtsProvider, 组合设置存储、目录拉取与合成客户端
//! - ports: 宿主必须提供的出站端口（持久化、通知）
//! - error: 统一错误分类

mod adapter;
mod error;
mod ports;

pub use adapter::TtsProvider;
pub use error::ProviderError;
pub use ports::{FileSettingsSink, LogNotifier, Notifier, SettingsSink};
