//! Host Ports - 宿主提供的出站端口
//!
//! 适配器不关心设置持久化到哪、toast 弹在哪; 宿主注入实现

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::SynthesisSettings;

/// 设置持久化端口
///
/// 每次表单变更后都会被调用一次
pub trait SettingsSink: Send + Sync {
    fn persist(&self, settings: &SynthesisSettings) -> anyhow::Result<()>;
}

/// 通知端口, 对应宿主的 toast 弹窗
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, title: &str, message: &str);
}

/// 默认通知实现: 写进日志
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
    }
}

/// 文件持久化实现: 设置记录序列化为 JSON 写入固定路径
pub struct FileSettingsSink {
    path: PathBuf,
}

impl FileSettingsSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取已持久化的设置记录, 文件不存在时返回 None
    pub fn load(&self) -> anyhow::Result<Option<serde_json::Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

impl SettingsSink for FileSettingsSink {
    fn persist(&self, settings: &SynthesisSettings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
