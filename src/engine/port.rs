//! Speech Engine Port - 远端语音服务抽象
//!
//! 定义适配器对远端服务的全部调用面, 具体实现在同级模块

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ModelCatalog, ModelSelection, ProviderEndpoint, Voice};

use super::request::SynthesisRequest;

/// 引擎调用错误
///
/// 每次失败都是终态, 不重试; 由调用方决定如何呈现
#[derive(Debug, Error)]
pub enum EngineError {
    /// 远端返回非 2xx, 携带状态码与响应体
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesisAudio {
    /// 音频原始字节
    pub data: Vec<u8>,
    /// 响应声明的媒体类型, 如 audio/wav
    pub media_type: String,
}

/// Speech Engine Port
///
/// 端点作为参数传入: 它是用户可随时改动的设置项, 不在实现里固化
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// GET /speakers - 音色列表
    async fn fetch_voices(&self, endpoint: &ProviderEndpoint) -> Result<Vec<Voice>, EngineError>;

    /// GET /available_models - 模型权重目录
    async fn fetch_models(&self, endpoint: &ProviderEndpoint)
        -> Result<ModelCatalog, EngineError>;

    /// GET /cut_methods - 服务端文本切分方式
    async fn fetch_cut_methods(
        &self,
        endpoint: &ProviderEndpoint,
    ) -> Result<Vec<String>, EngineError>;

    /// POST / - 合成一段音频
    async fn synthesize(
        &self,
        endpoint: &ProviderEndpoint,
        request: &SynthesisRequest,
    ) -> Result<SynthesisAudio, EngineError>;

    /// GET /set_model - 切换加载的模型权重对
    async fn switch_model(
        &self,
        endpoint: &ProviderEndpoint,
        selection: &ModelSelection,
    ) -> Result<(), EngineError>;

    /// GET /set_refer_audio - 设置服务端默认参考音频
    async fn set_reference_audio(
        &self,
        endpoint: &ProviderEndpoint,
        path: &str,
    ) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_contains_status_and_body() {
        let err = EngineError::Http {
            status: 404,
            body: "{\"message\": \"not found\"}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_timeout_error_message() {
        assert_eq!(EngineError::Timeout.to_string(), "Request timeout");
    }
}
