//! Provider Errors - 统一错误分类
//!
//! 音色未命中与模型未选齐都是带标签的变体, 和结构化的 HTTP 错误
//! 在同一套分类里, 不再出现裸字符串错误

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::form::FormError;

/// 适配器错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 远端音色列表中没有这个名字
    #[error("TTS voice not found: {0}")]
    VoiceNotFound(String),

    /// 四个权重下拉框没有凑出完整的 v1 或 v2 对
    #[error("No complete model weight pair selected")]
    NoModelSelected,

    /// 宿主持久化钩子失败
    #[error("Failed to persist settings: {0}")]
    Persist(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_not_found_is_tagged_with_name() {
        let err = ProviderError::VoiceNotFound("narrator".to_string());
        assert_eq!(err.to_string(), "TTS voice not found: narrator");
    }

    #[test]
    fn test_engine_error_passes_through_transparently() {
        let err: ProviderError = EngineError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        }
        .into();
        assert!(err.to_string().contains("502"));
    }
}
