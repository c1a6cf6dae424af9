//! Voxlink - GPT-SoVITS TTS 供应商适配器的最小宿主
//!
//! 用法:
//!   voxlink voices                     列出远端音色
//!   voxlink models                     列出可用模型权重
//!   voxlink say <voice> <text...>      合成一段语音写入当前目录
//!   voxlink set-model <gpt> <sovits>   切换 v1 模型权重对

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use voxlink::config::{load_config, print_config};
use voxlink::engine::{HttpEngineConfig, HttpSpeechEngine};
use voxlink::provider::{FileSettingsSink, LogNotifier, TtsProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},voxlink={}", config.log.level, config.log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(env_filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    print_config(&config);

    // 组装宿主端口与引擎
    let engine = Arc::new(HttpSpeechEngine::new(HttpEngineConfig {
        timeout_secs: config.engine.timeout_secs,
    })?);
    let sink = Arc::new(FileSettingsSink::new(&config.settings_path));
    let notifier = Arc::new(LogNotifier);

    let mut provider = TtsProvider::new(engine, sink.clone(), notifier);

    // 合并持久化设置并初始化（启动检查 + 模型目录）
    let persisted = sink.load().context("Failed to read persisted settings")?;
    provider.load_settings(persisted.as_ref()).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("voices") => {
            for voice in provider.fetch_voice_objects().await? {
                println!("{}", voice.name);
            }
        }
        Some("models") => {
            let form = provider.form();
            println!("gpt_weights:       {:?}", form.gpt_weights.options());
            println!("sovits_weights:    {:?}", form.sovits_weights.options());
            println!("gpt_weights_v2:    {:?}", form.gpt_weights_v2.options());
            println!("sovits_weights_v2: {:?}", form.sovits_weights_v2.options());
        }
        Some("say") if args.len() >= 3 => {
            let voice = provider.get_voice(&args[1]).await?;
            let text = args[2..].join(" ");
            let audio = provider.generate_tts(&text, &voice.name).await?;

            let out = format!("out.{}", provider.settings().format.extension());
            tokio::fs::write(&out, &audio.data)
                .await
                .with_context(|| format!("Failed to write {}", out))?;
            info!(path = %out, bytes = audio.data.len(), "Audio written");
        }
        Some("set-model") if args.len() == 3 => {
            if !provider.form_mut().gpt_weights.select(&args[1]) {
                anyhow::bail!("Unknown gpt weight: {}", args[1]);
            }
            if !provider.form_mut().sovits_weights.select(&args[2]) {
                anyhow::bail!("Unknown sovits weight: {}", args[2]);
            }
            provider.change_model().await?;
        }
        _ => {
            eprintln!("Usage: voxlink <voices|models|say <voice> <text...>|set-model <gpt> <sovits>>");
        }
    }

    Ok(())
}
