//! Form Schema - 字段规格表

use crate::domain::{AudioFormat, TextLang, TextSplitMethod};

/// 表单字段标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Endpoint,
    Lang,
    PromptLang,
    Format,
    Streaming,
    TextSplitMethod,
    BatchSize,
    BatchThreshold,
    SpeedFactor,
    TopK,
    TopP,
    Temperature,
    RepetitionPenalty,
}

impl FieldId {
    /// 全部字段, 按面板展示顺序
    pub const ALL: [FieldId; 13] = [
        FieldId::Endpoint,
        FieldId::Lang,
        FieldId::PromptLang,
        FieldId::Format,
        FieldId::Streaming,
        FieldId::TextSplitMethod,
        FieldId::BatchSize,
        FieldId::BatchThreshold,
        FieldId::SpeedFactor,
        FieldId::TopK,
        FieldId::TopP,
        FieldId::Temperature,
        FieldId::RepetitionPenalty,
    ];

    /// 控件标识, 与原面板的 DOM id 保持一致, 宿主可直接用于定位控件
    pub fn control_id(&self) -> &'static str {
        match self {
            Self::Endpoint => "tts_endpoint",
            Self::Lang => "lang",
            Self::PromptLang => "prompt_lang",
            Self::Format => "format",
            Self::Streaming => "streaming",
            Self::TextSplitMethod => "text_split_method",
            Self::BatchSize => "batch_size",
            Self::BatchThreshold => "batch_threshold",
            Self::SpeedFactor => "speed_factor",
            Self::TopK => "top_k",
            Self::TopP => "top_p",
            Self::Temperature => "temperature",
            Self::RepetitionPenalty => "repetition_penalty",
        }
    }
}

/// 下拉选项: 提交值 + 显示名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// 控件类型
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// 单行文本
    Text { max_len: usize },
    /// 下拉选择
    Select { options: Vec<ChoiceOption> },
    /// 复选框
    Checkbox,
    /// 滑块, 带相邻数值显示标签
    Range { min: f32, max: f32, step: f32 },
}

/// 字段规格
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: ControlKind,
}

fn lang_options() -> Vec<ChoiceOption> {
    TextLang::ALL
        .iter()
        .map(|lang| ChoiceOption {
            value: lang.code(),
            label: lang.label(),
        })
        .collect()
}

/// 单个字段的规格
pub fn field_spec(id: FieldId) -> FieldSpec {
    let (label, kind) = match id {
        FieldId::Endpoint => ("Provider Endpoint:", ControlKind::Text { max_len: 250 }),
        FieldId::Lang => (
            "Text Language:",
            ControlKind::Select {
                options: lang_options(),
            },
        ),
        FieldId::PromptLang => (
            "Prompt Language:",
            ControlKind::Select {
                options: lang_options(),
            },
        ),
        FieldId::Format => (
            "Audio Format:",
            ControlKind::Select {
                options: AudioFormat::ALL
                    .iter()
                    .map(|format| ChoiceOption {
                        value: format.code(),
                        label: format.code(),
                    })
                    .collect(),
            },
        ),
        FieldId::Streaming => ("Streaming", ControlKind::Checkbox),
        FieldId::TextSplitMethod => (
            "切分:",
            ControlKind::Select {
                options: TextSplitMethod::ALL
                    .iter()
                    .map(|method| ChoiceOption {
                        value: method.code(),
                        label: method.label(),
                    })
                    .collect(),
            },
        ),
        FieldId::BatchSize => (
            "并行 数量:",
            ControlKind::Range {
                min: 1.0,
                max: 50.0,
                step: 1.0,
            },
        ),
        FieldId::BatchThreshold => (
            "Batch Threshold:",
            ControlKind::Range {
                min: 0.1,
                max: 1.0,
                step: 0.05,
            },
        ),
        FieldId::SpeedFactor => (
            "语速:",
            ControlKind::Range {
                min: 0.5,
                max: 2.0,
                step: 0.05,
            },
        ),
        FieldId::TopK => (
            "Top K:",
            ControlKind::Range {
                min: 0.0,
                max: 100.0,
                step: 1.0,
            },
        ),
        FieldId::TopP => (
            "Top P:",
            ControlKind::Range {
                min: 0.0,
                max: 1.0,
                step: 0.01,
            },
        ),
        FieldId::Temperature => (
            "Temperature:",
            ControlKind::Range {
                min: 0.01,
                max: 2.0,
                step: 0.01,
            },
        ),
        FieldId::RepetitionPenalty => (
            "重复惩罚:",
            ControlKind::Range {
                min: 1.0,
                max: 2.0,
                step: 0.01,
            },
        ),
    };

    FieldSpec { id, label, kind }
}

/// 设置面板的完整字段规格表, 按展示顺序
pub fn settings_schema() -> Vec<FieldSpec> {
    FieldId::ALL.iter().copied().map(field_spec).collect()
}

/// 滑块字段的取值范围
pub(crate) fn range_bounds(id: FieldId) -> Option<(f32, f32)> {
    match field_spec(id).kind {
        ControlKind::Range { min, max, .. } => Some((min, max)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_every_field_in_order() {
        let schema = settings_schema();
        assert_eq!(schema.len(), FieldId::ALL.len());
        for (spec, id) in schema.iter().zip(FieldId::ALL) {
            assert_eq!(spec.id, id);
        }
    }

    #[test]
    fn test_lang_select_carries_display_labels() {
        let spec = field_spec(FieldId::Lang);
        match spec.kind {
            ControlKind::Select { options } => {
                assert_eq!(options[0].value, "zh");
                assert_eq!(options[0].label, "中文");
                assert_eq!(options.len(), 4);
            }
            other => panic!("unexpected control kind: {:?}", other),
        }
    }

    #[test]
    fn test_range_bounds_match_panel() {
        assert_eq!(range_bounds(FieldId::BatchSize), Some((1.0, 50.0)));
        assert_eq!(range_bounds(FieldId::SpeedFactor), Some((0.5, 2.0)));
        assert_eq!(range_bounds(FieldId::RepetitionPenalty), Some((1.0, 2.0)));
        assert_eq!(range_bounds(FieldId::Endpoint), None);
    }
}
