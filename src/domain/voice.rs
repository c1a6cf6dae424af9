//! Voice - 远端音色记录

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 远端 /speakers 返回的音色记录
///
/// 只要求带 name 字段, 其余字段原样保留不做约束;
/// 本地不保证名字唯一, 查找时首个同名命中即胜出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,

    /// 远端附带的其他字段（如 voice_id）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Voice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_keeps_unknown_fields() {
        let json = r#"{"name": "narrator", "voice_id": "narrator", "lang": "zh"}"#;
        let voice: Voice = serde_json::from_str(json).unwrap();
        assert_eq!(voice.name, "narrator");
        assert_eq!(voice.extra["voice_id"], "narrator");
        assert_eq!(voice.extra["lang"], "zh");
    }

    #[test]
    fn test_voice_requires_name() {
        let json = r#"{"voice_id": "narrator"}"#;
        assert!(serde_json::from_str::<Voice>(json).is_err());
    }
}
