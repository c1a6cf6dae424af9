//! Fake Speech Engine - 测试用引擎实现
//!
//! 不发真实请求: 返回预置的音色/模型/音频, 记录收到的调用,
//! 并支持按调用面注入失败

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::{ModelCatalog, ModelSelection, ProviderEndpoint, Voice};

use super::port::{EngineError, SpeechEnginePort, SynthesisAudio};
use super::request::SynthesisRequest;

/// Fake Speech Engine
#[derive(Default)]
pub struct FakeSpeechEngine {
    voices: Vec<Voice>,
    catalog: ModelCatalog,
    cut_methods: Vec<String>,
    audio: Vec<u8>,

    fail_voices: Option<(u16, String)>,
    fail_models: Option<(u16, String)>,
    fail_synthesis: Option<(u16, String)>,
    fail_switch: Option<(u16, String)>,

    /// 音色列表被拉取的次数
    pub voice_fetches: AtomicUsize,
    /// 收到的合成请求
    pub synthesis_log: Mutex<Vec<SynthesisRequest>>,
    /// 收到的模型切换选择
    pub switch_log: Mutex<Vec<ModelSelection>>,
    /// 收到的参考音频路径
    pub reference_log: Mutex<Vec<String>>,
}

impl FakeSpeechEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voices(mut self, names: &[&str]) -> Self {
        self.voices = names.iter().map(|name| Voice::new(*name)).collect();
        self
    }

    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_cut_methods(mut self, methods: &[&str]) -> Self {
        self.cut_methods = methods.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = audio;
        self
    }

    pub fn failing_voices(mut self, status: u16, body: &str) -> Self {
        self.fail_voices = Some((status, body.to_string()));
        self
    }

    pub fn failing_models(mut self, status: u16, body: &str) -> Self {
        self.fail_models = Some((status, body.to_string()));
        self
    }

    pub fn failing_synthesis(mut self, status: u16, body: &str) -> Self {
        self.fail_synthesis = Some((status, body.to_string()));
        self
    }

    pub fn failing_switch(mut self, status: u16, body: &str) -> Self {
        self.fail_switch = Some((status, body.to_string()));
        self
    }

    fn injected(failure: &Option<(u16, String)>) -> Result<(), EngineError> {
        match failure {
            Some((status, body)) => Err(EngineError::Http {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechEngine {
    async fn fetch_voices(&self, _endpoint: &ProviderEndpoint) -> Result<Vec<Voice>, EngineError> {
        self.voice_fetches.fetch_add(1, Ordering::SeqCst);
        Self::injected(&self.fail_voices)?;
        Ok(self.voices.clone())
    }

    async fn fetch_models(
        &self,
        _endpoint: &ProviderEndpoint,
    ) -> Result<ModelCatalog, EngineError> {
        Self::injected(&self.fail_models)?;
        Ok(self.catalog.clone())
    }

    async fn fetch_cut_methods(
        &self,
        _endpoint: &ProviderEndpoint,
    ) -> Result<Vec<String>, EngineError> {
        Ok(self.cut_methods.clone())
    }

    async fn synthesize(
        &self,
        _endpoint: &ProviderEndpoint,
        request: &SynthesisRequest,
    ) -> Result<SynthesisAudio, EngineError> {
        Self::injected(&self.fail_synthesis)?;
        self.synthesis_log.lock().unwrap().push(request.clone());
        Ok(SynthesisAudio {
            data: self.audio.clone(),
            media_type: format!("audio/{}", request.media_type),
        })
    }

    async fn switch_model(
        &self,
        _endpoint: &ProviderEndpoint,
        selection: &ModelSelection,
    ) -> Result<(), EngineError> {
        Self::injected(&self.fail_switch)?;
        self.switch_log.lock().unwrap().push(selection.clone());
        Ok(())
    }

    async fn set_reference_audio(
        &self,
        _endpoint: &ProviderEndpoint,
        path: &str,
    ) -> Result<(), EngineError> {
        self.reference_log.lock().unwrap().push(path.to_string());
        Ok(())
    }
}
