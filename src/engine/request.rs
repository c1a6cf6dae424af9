//! Synthesis Request - 类型化请求构造
//!
//! 字段名即线上 JSON 键名, 由编译器保证不再出现手写键名笔误。
//! 面板不设置的可选字段缺省时不进请求体。

use serde::Serialize;

use crate::config::SynthesisSettings;
use crate::domain::{AudioFormat, TextLang, TextSplitMethod};

/// 参考音频目录, 服务端按 `{目录}/{voice_id}.wav` 定位参考音频
pub const REF_AUDIO_DIR: &str = "./参考音频";

/// POST / 的请求体
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub ref_audio_path: String,
    pub text_lang: TextLang,
    pub prompt_lang: TextLang,
    pub text_split_method: TextSplitMethod,
    pub batch_size: u32,
    pub batch_threshold: f32,
    pub speed_factor: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
    pub media_type: AudioFormat,
    pub streaming_mode: bool,
    pub repetition_penalty: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux_ref_audio_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_bucket: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment_interval: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_infer: Option<bool>,
}

impl SynthesisRequest {
    /// 由当前设置、待合成文本与音色标识构造请求体
    ///
    /// 音色标识按固定模板投影成参考音频路径
    pub fn from_settings(
        settings: &SynthesisSettings,
        text: impl Into<String>,
        voice_id: &str,
    ) -> Self {
        Self {
            text: text.into(),
            ref_audio_path: format!("{}/{}.wav", REF_AUDIO_DIR, voice_id),
            text_lang: settings.lang,
            prompt_lang: settings.prompt_lang,
            text_split_method: settings.text_split_method,
            batch_size: settings.batch_size,
            batch_threshold: settings.batch_threshold,
            speed_factor: settings.speed_factor,
            top_k: settings.top_k,
            top_p: settings.top_p,
            temperature: settings.temperature,
            media_type: settings.format,
            streaming_mode: settings.streaming,
            repetition_penalty: settings.repetition_penalty,
            prompt_text: None,
            aux_ref_audio_paths: None,
            split_bucket: None,
            fragment_interval: None,
            seed: None,
            parallel_infer: None,
        }
    }

    /// 参考音频的提示文本
    pub fn with_prompt_text(mut self, prompt_text: impl Into<String>) -> Self {
        self.prompt_text = Some(prompt_text.into());
        self
    }

    /// 多说话人融合的辅助参考音频
    pub fn with_aux_ref_audio_paths(mut self, paths: Vec<String>) -> Self {
        self.aux_ref_audio_paths = Some(paths);
        self
    }

    /// 固定随机种子
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 是否把批次再切桶
    pub fn with_split_bucket(mut self, split_bucket: bool) -> Self {
        self.split_bucket = Some(split_bucket);
        self
    }
}
