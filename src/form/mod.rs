//! Form - 设置面板的声明式表单层
//!
//! 原始面板把字段写成一段 HTML 字符串并逐字段手写读写;
//! 这里改为一张类型化的字段规格表, 加载与回读统一按表迭代:
//! - schema: 字段标识、控件类型、展示标签
//! - state: 控件当前值、相邻显示标签、权重下拉框, 以及类型化回读

mod schema;
mod state;

pub use schema::{field_spec, settings_schema, ChoiceOption, ControlKind, FieldId, FieldSpec};
pub use state::{FormError, FormState, WeightsDropdown};
