//! TTS Provider - 适配器门面
//!
//! 组合三个职责:
//! - 设置存储: 默认值与持久化覆盖合并, 写入/回读表单
//! - 目录拉取: 音色列表与模型权重目录, 驱动选择控件
//! - 合成客户端: 每句话一次同步请求, 外加显式的模型切换
//!
//! 加载流程: 合并设置 -> 写入表单 -> 并发执行两个启动检查 ->
//! 拉取模型目录。宿主按 get_voice -> generate_tts 的顺序驱动一次发声。
//!
//! 设置记录、表单状态与音色缓存都由适配器独占, 只在宿主的单事件循环里
//! 通过 &mut self 改写, 不需要锁

use futures_util::future;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{self, ConfigError, SynthesisSettings};
use crate::domain::{ProviderEndpoint, TextSplitMethod, Voice};
use crate::engine::{EngineError, SpeechEnginePort, SynthesisAudio, SynthesisRequest};
use crate::form::FormState;

use super::error::ProviderError;
use super::ports::{Notifier, SettingsSink};

/// GPT-SoVITS 供应商适配器
pub struct TtsProvider {
    settings: SynthesisSettings,
    form: FormState,
    /// 音色缓存: 为空时惰性拉取一次, 也可显式刷新
    voices: Vec<Voice>,
    engine: Arc<dyn SpeechEnginePort>,
    sink: Arc<dyn SettingsSink>,
    notifier: Arc<dyn Notifier>,
    /// load_settings 完成后置位
    ready: bool,
}

impl TtsProvider {
    pub fn new(
        engine: Arc<dyn SpeechEnginePort>,
        sink: Arc<dyn SettingsSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings: SynthesisSettings::default(),
            form: FormState::new(),
            voices: Vec::new(),
            engine,
            sink,
            notifier,
            ready: false,
        }
    }

    /// 当前设置记录
    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    /// 表单状态
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// 表单状态, 宿主改动控件用
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn endpoint(&self) -> Result<ProviderEndpoint, ProviderError> {
        ProviderEndpoint::new(&self.settings.provider_endpoint)
            .map_err(|e| ProviderError::Config(ConfigError::ValidationError(e.to_string())))
    }

    /// 合并持久化设置并初始化表单, 然后执行启动检查与模型目录拉取
    ///
    /// 启动检查的失败只记日志; 模型目录拉取失败向上传播
    pub async fn load_settings(&mut self, persisted: Option<&Value>) -> Result<(), ProviderError> {
        self.settings = config::load_settings(persisted)?;
        self.form.apply_settings(&self.settings);

        self.check_ready().await;
        self.fetch_available_models().await?;

        self.ready = true;
        info!("GPT-SoVITS provider: settings loaded");
        Ok(())
    }

    /// 启动检查: 并发拉取音色列表与同步远端设置, 等两者都落定
    ///
    /// 任一失败都不向上传播
    pub async fn check_ready(&mut self) {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!(error = %e, "Skipping startup checks: endpoint not usable");
                return;
            }
        };

        let (voices, sync) = future::join(
            self.engine.fetch_voices(&endpoint),
            self.sync_remote_settings(),
        )
        .await;

        match voices {
            Ok(list) => {
                debug!(count = list.len(), "Voice list fetched during startup");
                self.voices = list;
            }
            Err(e) => warn!(error = %e, "Voice list fetch failed during startup"),
        }
        if let Err(e) = sync {
            warn!(error = %e, "Settings sync failed during startup");
        }
    }

    /// 表单变更回调: 回读控件 -> 校验 -> 刷新显示标签 -> 持久化 -> 远端同步
    ///
    /// 回读或校验失败时设置记录保持原值
    pub async fn on_settings_change(&mut self) -> Result<(), ProviderError> {
        let settings = self.form.read_settings()?;
        config::validate_settings(&settings)?;

        self.settings = settings;
        self.form.refresh_outputs(&self.settings);

        self.sink
            .persist(&self.settings)
            .map_err(|e| ProviderError::Persist(e.to_string()))?;

        if let Err(e) = self.sync_remote_settings().await {
            warn!(error = %e, "Settings sync failed");
        }
        Ok(())
    }

    /// 刷新按钮回调, 本供应商无须处理
    pub async fn on_refresh_click(&self) {}

    /// 远端设置同步
    ///
    /// GPT-SoVITS 没有独立的设置同步接口, 参数随每次合成请求下发;
    /// 这里是预留的扩展点
    async fn sync_remote_settings(&self) -> Result<(), EngineError> {
        Ok(())
    }

    /// 拉取远端音色列表并刷新缓存
    pub async fn fetch_voice_objects(&mut self) -> Result<Vec<Voice>, ProviderError> {
        let endpoint = self.endpoint()?;
        let voices = self.engine.fetch_voices(&endpoint).await?;
        self.voices = voices.clone();
        Ok(voices)
    }

    /// 按名字取音色
    ///
    /// 缓存为空时先拉取一次; 首个同名命中即胜出, 找不到返回 VoiceNotFound
    pub async fn get_voice(&mut self, voice_name: &str) -> Result<Voice, ProviderError> {
        if self.voices.is_empty() {
            self.fetch_voice_objects().await?;
        }

        self.voices
            .iter()
            .find(|voice| voice.name == voice_name)
            .cloned()
            .ok_or_else(|| ProviderError::VoiceNotFound(voice_name.to_string()))
    }

    /// 交给远端之前的文本预处理
    fn process_text(text: &str) -> String {
        text.replace("<br>", "\n")
    }

    /// 为一段文本发起一次同步合成请求
    ///
    /// 失败时通过通知端口弹错误 toast, 并返回结构化错误
    pub async fn generate_tts(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<SynthesisAudio, ProviderError> {
        info!(voice_id, "Generating new TTS");

        let endpoint = self.endpoint()?;
        let request =
            SynthesisRequest::from_settings(&self.settings, Self::process_text(text), voice_id);

        match self.engine.synthesize(&endpoint, &request).await {
            Ok(audio) => Ok(audio),
            Err(e) => {
                self.notifier.error("TTS Generation Failed", &e.to_string());
                Err(e.into())
            }
        }
    }

    /// 历史音频直接透传
    pub async fn fetch_tts_from_history(&self, history_item_id: String) -> String {
        history_item_id
    }

    /// 拉取可用模型目录并重建四个权重下拉框, 保持服务端顺序
    pub async fn fetch_available_models(&mut self) -> Result<(), ProviderError> {
        let endpoint = self.endpoint()?;
        let catalog = self.engine.fetch_models(&endpoint).await?;
        debug!(
            gpt = catalog.gpt_weights.len(),
            sovits = catalog.sovits_weights.len(),
            gpt_v2 = catalog.gpt_weights_v2.len(),
            sovits_v2 = catalog.sovits_weights_v2.len(),
            "Model catalog fetched"
        );
        self.form.populate_model_options(&catalog);
        Ok(())
    }

    /// 按下拉框当前选择切换远端模型, 完整的 v1 对优先
    ///
    /// 没有完整权重对时直接报错, 不发空请求
    pub async fn change_model(&self) -> Result<(), ProviderError> {
        let selection = self
            .form
            .model_selection()
            .ok_or(ProviderError::NoModelSelected)?;
        let endpoint = self.endpoint()?;

        match self.engine.switch_model(&endpoint, &selection).await {
            Ok(()) => {
                self.notifier.success("Model Changed Successfully");
                Ok(())
            }
            Err(e) => {
                self.notifier.error("Failed to Change Model", &e.to_string());
                Err(e.into())
            }
        }
    }

    /// 拉取服务端文本切分方式, 失败或为空时退回内建列表
    pub async fn fetch_cut_methods(&self) -> Vec<String> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(_) => return builtin_cut_methods(),
        };

        match self.engine.fetch_cut_methods(&endpoint).await {
            Ok(methods) if !methods.is_empty() => methods,
            Ok(_) => builtin_cut_methods(),
            Err(e) => {
                warn!(error = %e, "Cut method fetch failed, using built-in list");
                builtin_cut_methods()
            }
        }
    }

    /// 设置服务端默认参考音频
    pub async fn set_reference_audio(&self, path: &str) -> Result<(), ProviderError> {
        let endpoint = self.endpoint()?;
        self.engine.set_reference_audio(&endpoint, path).await?;
        Ok(())
    }
}

fn builtin_cut_methods() -> Vec<String> {
    TextSplitMethod::ALL
        .iter()
        .map(|method| method.code().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelCatalog, ModelSelection};
    use crate::engine::FakeSpeechEngine;
    use crate::form::FieldId;
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        saved: Mutex<Vec<SynthesisSettings>>,
    }

    impl SettingsSink for RecordingSink {
        fn persist(&self, settings: &SynthesisSettings) -> anyhow::Result<()> {
            self.saved.lock().unwrap().push(settings.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        successes: Mutex<Vec<String>>,
        errors: Mutex<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.successes.lock().unwrap().push(message.to_string());
        }

        fn error(&self, title: &str, message: &str) {
            self.errors
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
        }
    }

    struct Harness {
        provider: TtsProvider,
        engine: Arc<FakeSpeechEngine>,
        sink: Arc<RecordingSink>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(engine: FakeSpeechEngine) -> Harness {
        let engine = Arc::new(engine);
        let sink = Arc::new(RecordingSink::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let provider = TtsProvider::new(engine.clone(), sink.clone(), notifier.clone());
        Harness {
            provider,
            engine,
            sink,
            notifier,
        }
    }

    fn two_pair_catalog() -> ModelCatalog {
        ModelCatalog {
            gpt_weights: vec!["g1.ckpt".to_string()],
            sovits_weights: vec!["s1.pth".to_string()],
            gpt_weights_v2: vec!["g2.ckpt".to_string()],
            sovits_weights_v2: vec!["s2.pth".to_string()],
        }
    }

    #[tokio::test]
    async fn test_load_settings_merges_and_populates() {
        let mut h = harness(
            FakeSpeechEngine::new()
                .with_voices(&["narrator"])
                .with_catalog(two_pair_catalog()),
        );

        let persisted = json!({"lang": "en", "top_k": 12});
        h.provider.load_settings(Some(&persisted)).await.unwrap();

        assert!(h.provider.is_ready());
        assert_eq!(h.provider.settings().top_k, 12);
        assert_eq!(h.provider.settings().batch_size, 1);
        assert_eq!(h.provider.form().value(FieldId::TopK), "12");
        assert_eq!(h.provider.form().gpt_weights.selected(), Some("g1.ckpt"));
        assert_eq!(h.engine.voice_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_settings_swallows_startup_voice_failure() {
        let mut h = harness(
            FakeSpeechEngine::new()
                .failing_voices(500, "boom")
                .with_catalog(two_pair_catalog()),
        );

        h.provider.load_settings(None).await.unwrap();
        assert!(h.provider.is_ready());
    }

    #[tokio::test]
    async fn test_load_settings_propagates_catalog_failure() {
        let mut h = harness(FakeSpeechEngine::new().failing_models(500, "boom"));

        let result = h.provider.load_settings(None).await;
        assert!(matches!(
            result,
            Err(ProviderError::Engine(EngineError::Http { status: 500, .. }))
        ));
        assert!(!h.provider.is_ready());
    }

    #[tokio::test]
    async fn test_get_voice_fetches_lazily_exactly_once() {
        let mut h = harness(FakeSpeechEngine::new().with_voices(&["alice", "bob"]));

        let voice = h.provider.get_voice("bob").await.unwrap();
        assert_eq!(voice.name, "bob");

        h.provider.get_voice("alice").await.unwrap();
        assert_eq!(h.engine.voice_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_voice_unknown_name_is_tagged_error() {
        let mut h = harness(FakeSpeechEngine::new().with_voices(&["alice"]));

        match h.provider.get_voice("ghost").await {
            Err(ProviderError::VoiceNotFound(name)) => assert_eq!(name, "ghost"),
            other => panic!("expected VoiceNotFound, got {:?}", other.map(|v| v.name)),
        }
    }

    #[tokio::test]
    async fn test_generate_tts_builds_expected_body() {
        let mut h = harness(FakeSpeechEngine::new().with_audio(vec![1, 2, 3]));

        h.provider.form_mut().set_value(FieldId::Lang, "en");
        h.provider.on_settings_change().await.unwrap();

        let audio = h.provider.generate_tts("hello", "voiceA").await.unwrap();
        assert_eq!(audio.data, vec![1, 2, 3]);
        assert_eq!(audio.media_type, "audio/wav");

        let log = h.engine.synthesis_log.lock().unwrap();
        let body = serde_json::to_value(&log[0]).unwrap();
        assert_eq!(body["text_lang"], "en");
        assert_eq!(body["media_type"], "wav");
        assert!(body["ref_audio_path"].as_str().unwrap().contains("voiceA"));
    }

    #[tokio::test]
    async fn test_generate_tts_normalizes_line_breaks() {
        let h = harness(FakeSpeechEngine::new());

        h.provider
            .generate_tts("one<br>two<br>three", "voiceA")
            .await
            .unwrap();

        let log = h.engine.synthesis_log.lock().unwrap();
        assert_eq!(log[0].text, "one\ntwo\nthree");
    }

    #[tokio::test]
    async fn test_generate_tts_failure_raises_toast() {
        let h = harness(FakeSpeechEngine::new().failing_synthesis(502, "bad gateway"));

        let result = h.provider.generate_tts("hello", "voiceA").await;
        assert!(matches!(
            result,
            Err(ProviderError::Engine(EngineError::Http { status: 502, .. }))
        ));

        let errors = h.notifier.errors.lock().unwrap();
        assert_eq!(errors[0].0, "TTS Generation Failed");
        assert!(errors[0].1.contains("502"));
    }

    #[tokio::test]
    async fn test_change_model_prefers_legacy_pair_and_toasts() {
        let mut h = harness(FakeSpeechEngine::new().with_catalog(two_pair_catalog()));

        h.provider.fetch_available_models().await.unwrap();
        h.provider.change_model().await.unwrap();

        let log = h.engine.switch_log.lock().unwrap();
        assert_eq!(
            log[0],
            ModelSelection::Legacy {
                gpt: "g1.ckpt".to_string(),
                sovits: "s1.pth".to_string(),
            }
        );
        assert_eq!(
            h.notifier.successes.lock().unwrap()[0],
            "Model Changed Successfully"
        );
    }

    #[tokio::test]
    async fn test_change_model_with_only_v2_options() {
        let mut h = harness(FakeSpeechEngine::new().with_catalog(ModelCatalog {
            gpt_weights: vec![],
            sovits_weights: vec![],
            gpt_weights_v2: vec!["g2.ckpt".to_string()],
            sovits_weights_v2: vec!["s2.pth".to_string()],
        }));

        h.provider.fetch_available_models().await.unwrap();
        h.provider.change_model().await.unwrap();

        let log = h.engine.switch_log.lock().unwrap();
        assert_eq!(
            log[0],
            ModelSelection::V2 {
                gpt: "g2.ckpt".to_string(),
                sovits: "s2.pth".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_change_model_without_selection_is_error() {
        let h = harness(FakeSpeechEngine::new());

        assert!(matches!(
            h.provider.change_model().await,
            Err(ProviderError::NoModelSelected)
        ));
        assert!(h.engine.switch_log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_change_model_failure_raises_toast() {
        let mut h = harness(
            FakeSpeechEngine::new()
                .with_catalog(two_pair_catalog())
                .failing_switch(400, "Cannot select both v1 and v2 models."),
        );

        h.provider.fetch_available_models().await.unwrap();
        assert!(h.provider.change_model().await.is_err());

        let errors = h.notifier.errors.lock().unwrap();
        assert_eq!(errors[0].0, "Failed to Change Model");
    }

    #[tokio::test]
    async fn test_on_settings_change_persists_last_write() {
        let mut h = harness(FakeSpeechEngine::new());

        h.provider.form_mut().set_value(FieldId::SpeedFactor, "1.2");
        h.provider.on_settings_change().await.unwrap();
        h.provider.form_mut().set_value(FieldId::SpeedFactor, "1.7");
        h.provider.on_settings_change().await.unwrap();

        assert_eq!(h.provider.settings().speed_factor, 1.7);
        assert_eq!(h.provider.form().output(FieldId::SpeedFactor), Some("1.7"));

        let saved = h.sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].speed_factor, 1.7);
    }

    #[tokio::test]
    async fn test_on_settings_change_rejects_bad_input_and_keeps_settings() {
        let mut h = harness(FakeSpeechEngine::new());

        h.provider.form_mut().set_value(FieldId::TopK, "abc");
        let result = h.provider.on_settings_change().await;

        assert!(matches!(result, Err(ProviderError::Form(_))));
        assert_eq!(h.provider.settings().top_k, 5);
        assert!(h.sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cut_methods_fall_back_to_builtin_list() {
        let h = harness(FakeSpeechEngine::new());

        let methods = h.provider.fetch_cut_methods().await;
        assert_eq!(methods, vec!["cut0", "cut1", "cut2", "cut3", "cut4", "cut5"]);

        let h = harness(FakeSpeechEngine::new().with_cut_methods(&["cut0", "cut9"]));
        assert_eq!(h.provider.fetch_cut_methods().await, vec!["cut0", "cut9"]);
    }

    #[tokio::test]
    async fn test_history_items_pass_through() {
        let h = harness(FakeSpeechEngine::new());
        let item = h.provider.fetch_tts_from_history("item-7".to_string()).await;
        assert_eq!(item, "item-7");
    }
}
