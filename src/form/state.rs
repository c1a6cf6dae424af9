//! Form State - 控件当前值与类型化回读
//!
//! 控件值一律以字符串保存（对应宿主控件的原始值）, 回读时按字段规格解析:
//! - 解析失败的输入被拒绝并携带字段标识, 不会写进设置记录
//! - 滑块字段回读时收敛到规格表声明的范围（与 range 控件行为一致）

use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::SynthesisSettings;
use crate::domain::{
    AudioFormat, ModelCatalog, ModelSelection, ProviderEndpoint, TextLang, TextSplitMethod,
};

use super::schema::{range_bounds, FieldId};

/// 表单回读错误
#[derive(Debug, Error)]
pub enum FormError {
    /// 控件值解析失败, 设置记录保持原值
    #[error("Invalid value for field {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// 模型权重下拉框
#[derive(Debug, Clone, Default)]
pub struct WeightsDropdown {
    options: Vec<String>,
    selected: Option<String>,
}

impl WeightsDropdown {
    /// 清空重建; 重建后选中项回到首个选项（与 DOM select 行为一致）
    pub fn populate(&mut self, options: &[String]) {
        self.options = options.to_vec();
        self.selected = self.options.first().cloned();
    }

    /// 选中一个选项, 不在选项里时返回 false 且不改变当前选择
    pub fn select(&mut self, value: &str) -> bool {
        if self.options.iter().any(|option| option == value) {
            self.selected = Some(value.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// 设置表单状态
#[derive(Debug, Clone)]
pub struct FormState {
    /// 控件原始值, 以字段标识索引
    values: BTreeMap<FieldId, String>,
    /// 滑块相邻的数值显示标签
    outputs: BTreeMap<FieldId, String>,
    pub gpt_weights: WeightsDropdown,
    pub sovits_weights: WeightsDropdown,
    pub gpt_weights_v2: WeightsDropdown,
    pub sovits_weights_v2: WeightsDropdown,
}

impl FormState {
    pub fn new() -> Self {
        let mut form = Self {
            values: BTreeMap::new(),
            outputs: BTreeMap::new(),
            gpt_weights: WeightsDropdown::default(),
            sovits_weights: WeightsDropdown::default(),
            gpt_weights_v2: WeightsDropdown::default(),
            sovits_weights_v2: WeightsDropdown::default(),
        };
        form.apply_settings(&SynthesisSettings::default());
        form
    }

    /// 把设置记录写进每个控件, 并刷新显示标签
    pub fn apply_settings(&mut self, settings: &SynthesisSettings) {
        for id in FieldId::ALL {
            self.values.insert(id, control_value(settings, id));
        }
        self.refresh_outputs(settings);
    }

    /// 宿主改动单个控件
    pub fn set_value(&mut self, id: FieldId, raw: impl Into<String>) {
        self.values.insert(id, raw.into());
    }

    /// 控件当前值
    pub fn value(&self, id: FieldId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or("")
    }

    /// 滑块相邻显示标签的当前内容
    pub fn output(&self, id: FieldId) -> Option<&str> {
        self.outputs.get(&id).map(String::as_str)
    }

    /// 把每个控件回读成设置记录
    ///
    /// 任一字段解析失败则整体失败, 调用方的设置记录保持原值
    pub fn read_settings(&self) -> Result<SynthesisSettings, FormError> {
        let mut settings = SynthesisSettings::default();
        for id in FieldId::ALL {
            if let Some(raw) = self.values.get(&id) {
                apply_control_value(&mut settings, id, raw)?;
            }
        }
        Ok(settings)
    }

    /// 把设置记录里的数值刷进滑块显示标签
    pub fn refresh_outputs(&mut self, settings: &SynthesisSettings) {
        for id in FieldId::ALL {
            if range_bounds(id).is_some() {
                self.outputs.insert(id, control_value(settings, id));
            }
        }
    }

    /// 用权重目录清空重建四个下拉框, 保持服务端顺序
    pub fn populate_model_options(&mut self, catalog: &ModelCatalog) {
        self.gpt_weights.populate(&catalog.gpt_weights);
        self.sovits_weights.populate(&catalog.sovits_weights);
        self.gpt_weights_v2.populate(&catalog.gpt_weights_v2);
        self.sovits_weights_v2.populate(&catalog.sovits_weights_v2);
    }

    /// 四个下拉框的当前选择, v1 完整对优先
    pub fn model_selection(&self) -> Option<ModelSelection> {
        ModelSelection::from_choices(
            self.gpt_weights.selected(),
            self.sovits_weights.selected(),
            self.gpt_weights_v2.selected(),
            self.sovits_weights_v2.selected(),
        )
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 字段在控件里的字符串表示
fn control_value(settings: &SynthesisSettings, id: FieldId) -> String {
    match id {
        FieldId::Endpoint => settings.provider_endpoint.clone(),
        FieldId::Lang => settings.lang.code().to_string(),
        FieldId::PromptLang => settings.prompt_lang.code().to_string(),
        FieldId::Format => settings.format.code().to_string(),
        FieldId::Streaming => settings.streaming.to_string(),
        FieldId::TextSplitMethod => settings.text_split_method.code().to_string(),
        FieldId::BatchSize => settings.batch_size.to_string(),
        FieldId::BatchThreshold => settings.batch_threshold.to_string(),
        FieldId::SpeedFactor => settings.speed_factor.to_string(),
        FieldId::TopK => settings.top_k.to_string(),
        FieldId::TopP => settings.top_p.to_string(),
        FieldId::Temperature => settings.temperature.to_string(),
        FieldId::RepetitionPenalty => settings.repetition_penalty.to_string(),
    }
}

/// 把单个控件值解析进设置记录
fn apply_control_value(
    settings: &mut SynthesisSettings,
    id: FieldId,
    raw: &str,
) -> Result<(), FormError> {
    let invalid = || FormError::InvalidField {
        field: id.control_id(),
        value: raw.to_string(),
    };

    match id {
        FieldId::Endpoint => {
            ProviderEndpoint::new(raw).map_err(|_| invalid())?;
            settings.provider_endpoint = raw.to_string();
        }
        FieldId::Lang => settings.lang = TextLang::from_code(raw).ok_or_else(invalid)?,
        FieldId::PromptLang => {
            settings.prompt_lang = TextLang::from_code(raw).ok_or_else(invalid)?;
        }
        FieldId::Format => settings.format = AudioFormat::from_code(raw).ok_or_else(invalid)?,
        FieldId::Streaming => settings.streaming = raw.parse().map_err(|_| invalid())?,
        FieldId::TextSplitMethod => {
            settings.text_split_method = TextSplitMethod::from_code(raw).ok_or_else(invalid)?;
        }
        FieldId::BatchSize => settings.batch_size = parse_int_field(id, raw).ok_or_else(invalid)?,
        FieldId::TopK => settings.top_k = parse_int_field(id, raw).ok_or_else(invalid)?,
        FieldId::BatchThreshold => {
            settings.batch_threshold = parse_float_field(id, raw).ok_or_else(invalid)?;
        }
        FieldId::SpeedFactor => {
            settings.speed_factor = parse_float_field(id, raw).ok_or_else(invalid)?;
        }
        FieldId::TopP => settings.top_p = parse_float_field(id, raw).ok_or_else(invalid)?,
        FieldId::Temperature => {
            settings.temperature = parse_float_field(id, raw).ok_or_else(invalid)?;
        }
        FieldId::RepetitionPenalty => {
            settings.repetition_penalty = parse_float_field(id, raw).ok_or_else(invalid)?;
        }
    }
    Ok(())
}

fn parse_int_field(id: FieldId, raw: &str) -> Option<u32> {
    let value: u32 = raw.trim().parse().ok()?;
    let (min, max) = range_bounds(id)?;
    Some(value.clamp(min as u32, max as u32))
}

fn parse_float_field(id: FieldId, raw: &str) -> Option<f32> {
    let value: f32 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let (min, max) = range_bounds(id)?;
    Some(value.clamp(min, max))
}
