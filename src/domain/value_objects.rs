//! Domain - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// 远端合成服务的基础 URL
///
/// 不变量:
/// - 非空, 且以 http:// 或 https:// 开头
/// - 不带尾部斜杠（join 时统一补）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint(String);

impl ProviderEndpoint {
    pub fn new(url: impl Into<String>) -> Result<Self, &'static str> {
        let url = url.into();
        if url.is_empty() {
            return Err("端点不能为空");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err("端点必须以 http:// 或 https:// 开头");
        }
        Ok(Self(url.trim_end_matches('/').to_string()))
    }

    /// 拼接路径, 对两侧斜杠都安全
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文本语种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLang {
    Zh,
    En,
    Ja,
    Ko,
}

impl TextLang {
    /// 全部语种, 按面板展示顺序
    pub const ALL: [TextLang; 4] = [TextLang::Zh, TextLang::En, TextLang::Ja, TextLang::Ko];

    /// 线上协议里的语种代码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
            Self::Ja => "ja",
            Self::Ko => "ko",
        }
    }

    /// 下拉框显示名
    pub fn label(&self) -> &'static str {
        match self {
            Self::Zh => "中文",
            Self::En => "英文",
            Self::Ja => "日文",
            Self::Ko => "韩文",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "zh" => Some(Self::Zh),
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            "ko" => Some(Self::Ko),
            _ => None,
        }
    }
}

impl Default for TextLang {
    fn default() -> Self {
        Self::Zh
    }
}

impl fmt::Display for TextLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 输出音频容器格式
///
/// 服务端约束: ogg 只在流式模式下可用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Ogg,
    Aac,
    Raw,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 4] = [
        AudioFormat::Wav,
        AudioFormat::Ogg,
        AudioFormat::Aac,
        AudioFormat::Raw,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Aac => "aac",
            Self::Raw => "raw",
        }
    }

    /// 输出文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Raw => "pcm",
            other => other.code(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "ogg" => Some(Self::Ogg),
            "aac" => Some(Self::Aac),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::Wav
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 服务端文本切分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSplitMethod {
    Cut0,
    Cut1,
    Cut2,
    Cut3,
    Cut4,
    Cut5,
}

impl TextSplitMethod {
    pub const ALL: [TextSplitMethod; 6] = [
        TextSplitMethod::Cut0,
        TextSplitMethod::Cut1,
        TextSplitMethod::Cut2,
        TextSplitMethod::Cut3,
        TextSplitMethod::Cut4,
        TextSplitMethod::Cut5,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Cut0 => "cut0",
            Self::Cut1 => "cut1",
            Self::Cut2 => "cut2",
            Self::Cut3 => "cut3",
            Self::Cut4 => "cut4",
            Self::Cut5 => "cut5",
        }
    }

    /// 下拉框显示名
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cut0 => "不切",
            Self::Cut1 => "凑四句一切",
            Self::Cut2 => "凑50字一切",
            Self::Cut3 => "按中文句号。切",
            Self::Cut4 => "按英文句号.切",
            Self::Cut5 => "按标点符号切",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "cut0" => Some(Self::Cut0),
            "cut1" => Some(Self::Cut1),
            "cut2" => Some(Self::Cut2),
            "cut3" => Some(Self::Cut3),
            "cut4" => Some(Self::Cut4),
            "cut5" => Some(Self::Cut5),
            _ => None,
        }
    }
}

impl Default for TextSplitMethod {
    fn default() -> Self {
        Self::Cut5
    }
}

impl fmt::Display for TextSplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
