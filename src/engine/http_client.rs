//! HTTP Speech Engine - 调用 GPT-SoVITS WebAPI
//!
//! 端点:
//! - GET  /speakers          音色列表
//! - GET  /available_models  模型权重目录
//! - GET  /cut_methods       文本切分方式
//! - POST /                  合成音频
//! - GET  /set_model         切换模型权重对
//! - GET  /set_refer_audio   设置默认参考音频

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::{ModelCatalog, ModelSelection, ProviderEndpoint, Voice};

use super::port::{EngineError, SpeechEnginePort, SynthesisAudio};
use super::request::SynthesisRequest;

/// HTTP 引擎配置
#[derive(Debug, Clone)]
pub struct HttpEngineConfig {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpEngineConfig {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

/// HTTP Speech Engine
///
/// 无重试、无去重、无取消; 慢响应只受客户端超时约束
pub struct HttpSpeechEngine {
    client: Client,
    config: HttpEngineConfig,
}

impl HttpSpeechEngine {
    pub fn new(config: HttpEngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建
    pub fn with_default_config() -> Result<Self, EngineError> {
        Self::new(HttpEngineConfig::default())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.config.timeout_secs
    }

    fn map_send_error(e: reqwest::Error) -> EngineError {
        if e.is_timeout() {
            EngineError::Timeout
        } else if e.is_connect() {
            EngineError::Network(format!("Cannot connect to TTS service: {}", e))
        } else {
            EngineError::Network(e.to_string())
        }
    }

    /// 非 2xx 响应转为结构化错误, 携带状态码与响应体
    async fn check_status(response: Response) -> Result<Response, EngineError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SpeechEnginePort for HttpSpeechEngine {
    async fn fetch_voices(&self, endpoint: &ProviderEndpoint) -> Result<Vec<Voice>, EngineError> {
        let url = endpoint.join("speakers");
        debug!(url = %url, "Fetching TTS voice list");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::check_status(response).await?;

        let voices: Vec<Voice> = response.json().await.map_err(|e| {
            EngineError::InvalidResponse(format!("Failed to decode voice list: {}", e))
        })?;

        debug!(count = voices.len(), "Voice list fetched");
        Ok(voices)
    }

    async fn fetch_models(
        &self,
        endpoint: &ProviderEndpoint,
    ) -> Result<ModelCatalog, EngineError> {
        let url = endpoint.join("available_models");
        debug!(url = %url, "Fetching available model weights");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| {
            EngineError::InvalidResponse(format!("Failed to decode model catalog: {}", e))
        })
    }

    async fn fetch_cut_methods(
        &self,
        endpoint: &ProviderEndpoint,
    ) -> Result<Vec<String>, EngineError> {
        let response = self
            .client
            .get(endpoint.join("cut_methods"))
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| {
            EngineError::InvalidResponse(format!("Failed to decode cut method list: {}", e))
        })
    }

    async fn synthesize(
        &self,
        endpoint: &ProviderEndpoint,
        request: &SynthesisRequest,
    ) -> Result<SynthesisAudio, EngineError> {
        let url = endpoint.join("/");
        debug!(
            url = %url,
            text_len = request.text.len(),
            ref_audio_path = %request.ref_audio_path,
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::check_status(response).await?;

        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/wav")
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| EngineError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        info!(
            audio_size = data.len(),
            media_type = %media_type,
            "Synthesis completed"
        );

        Ok(SynthesisAudio { data, media_type })
    }

    async fn switch_model(
        &self,
        endpoint: &ProviderEndpoint,
        selection: &ModelSelection,
    ) -> Result<(), EngineError> {
        let url = endpoint.join("set_model");
        info!(url = %url, selection = ?selection, "Switching model weights");

        let response = self
            .client
            .get(&url)
            .query(&selection.query_pairs())
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response).await?;

        Ok(())
    }

    async fn set_reference_audio(
        &self,
        endpoint: &ProviderEndpoint,
        path: &str,
    ) -> Result<(), EngineError> {
        let response = self
            .client
            .get(endpoint.join("set_refer_audio"))
            .query(&[("refer_audio_path", path)])
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpEngineConfig::default();
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_engine_builds_with_custom_timeout() {
        let engine = HttpSpeechEngine::new(HttpEngineConfig { timeout_secs: 5 }).unwrap();
        assert_eq!(engine.timeout_secs(), 5);
    }
}
