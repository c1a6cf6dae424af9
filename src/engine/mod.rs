//! Engine - 远端语音服务客户端
//!
//! - port: SpeechEnginePort 抽象, 具体实现可替换
//! - request: 类型化的合成请求构造
//! - http_client: reqwest 实现, 调用 GPT-SoVITS WebAPI
//! - fake_client: 测试用实现, 不发真实请求

mod fake_client;
mod http_client;
mod port;
mod request;

pub use fake_client::FakeSpeechEngine;
pub use http_client::{HttpEngineConfig, HttpSpeechEngine};
pub use port::{EngineError, SpeechEnginePort, SynthesisAudio};
pub use request::{SynthesisRequest, REF_AUDIO_DIR};
