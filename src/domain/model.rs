//! Model - 模型权重目录与切换选择

use serde::{Deserialize, Serialize};

/// /available_models 返回的权重目录
///
/// 四组序列保持服务端顺序, 不排序不去重;
/// 只用于重建四个权重下拉框, 之后不再保留
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub gpt_weights: Vec<String>,
    #[serde(default)]
    pub sovits_weights: Vec<String>,
    #[serde(default)]
    pub gpt_weights_v2: Vec<String>,
    #[serde(default)]
    pub sovits_weights_v2: Vec<String>,
}

/// 模型切换选择
///
/// 服务端要求 GPT 与 SoVITS 权重成对切换, 半对在类型上不可表达
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelection {
    /// v1 权重对
    Legacy { gpt: String, sovits: String },
    /// v2 权重对
    V2 { gpt: String, sovits: String },
}

impl ModelSelection {
    /// 从四个下拉框的当前选择构造, 完整的 v1 对优先于 v2 对
    ///
    /// 空字符串视同未选择; 凑不出完整对时返回 None
    pub fn from_choices(
        gpt: Option<&str>,
        sovits: Option<&str>,
        gpt_v2: Option<&str>,
        sovits_v2: Option<&str>,
    ) -> Option<Self> {
        fn present(choice: Option<&str>) -> Option<&str> {
            choice.filter(|value| !value.is_empty())
        }

        if let (Some(gpt), Some(sovits)) = (present(gpt), present(sovits)) {
            return Some(Self::Legacy {
                gpt: gpt.to_string(),
                sovits: sovits.to_string(),
            });
        }
        if let (Some(gpt), Some(sovits)) = (present(gpt_v2), present(sovits_v2)) {
            return Some(Self::V2 {
                gpt: gpt.to_string(),
                sovits: sovits.to_string(),
            });
        }
        None
    }

    /// /set_model 的查询参数
    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        match self {
            Self::Legacy { gpt, sovits } => {
                [("gpt_weights", gpt.as_str()), ("sovits_weights", sovits.as_str())]
            }
            Self::V2 { gpt, sovits } => [
                ("gpt_weights_v2", gpt.as_str()),
                ("sovits_weights_v2", sovits.as_str()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_pair_wins_over_v2() {
        let selection = ModelSelection::from_choices(
            Some("g1.ckpt"),
            Some("s1.pth"),
            Some("g2.ckpt"),
            Some("s2.pth"),
        )
        .unwrap();
        assert_eq!(
            selection,
            ModelSelection::Legacy {
                gpt: "g1.ckpt".to_string(),
                sovits: "s1.pth".to_string(),
            }
        );
    }

    #[test]
    fn test_v2_pair_used_when_legacy_incomplete() {
        let selection =
            ModelSelection::from_choices(Some("g1.ckpt"), None, Some("g2.ckpt"), Some("s2.pth"))
                .unwrap();
        assert_eq!(
            selection,
            ModelSelection::V2 {
                gpt: "g2.ckpt".to_string(),
                sovits: "s2.pth".to_string(),
            }
        );
    }

    #[test]
    fn test_half_pairs_yield_nothing() {
        assert!(ModelSelection::from_choices(Some("g1.ckpt"), None, None, Some("s2.pth")).is_none());
        assert!(ModelSelection::from_choices(None, None, None, None).is_none());
    }

    #[test]
    fn test_empty_string_counts_as_unselected() {
        assert!(ModelSelection::from_choices(Some(""), Some("s1.pth"), None, None).is_none());
    }

    #[test]
    fn test_query_pairs_use_version_specific_keys() {
        let legacy = ModelSelection::Legacy {
            gpt: "g1.ckpt".to_string(),
            sovits: "s1.pth".to_string(),
        };
        assert_eq!(
            legacy.query_pairs(),
            [("gpt_weights", "g1.ckpt"), ("sovits_weights", "s1.pth")]
        );

        let v2 = ModelSelection::V2 {
            gpt: "g2.ckpt".to_string(),
            sovits: "s2.pth".to_string(),
        };
        assert_eq!(
            v2.query_pairs(),
            [("gpt_weights_v2", "g2.ckpt"), ("sovits_weights_v2", "s2.pth")]
        );
    }

    #[test]
    fn test_catalog_tolerates_missing_groups() {
        let catalog: ModelCatalog =
            serde_json::from_str(r#"{"gpt_weights": ["a.ckpt"]}"#).unwrap();
        assert_eq!(catalog.gpt_weights, vec!["a.ckpt"]);
        assert!(catalog.sovits_weights_v2.is_empty());
    }
}
