use super::entities::ComponentCategory;
use serde::Deserialize;
use ts_rs::TS;

// 创建考核项请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/test_component.ts")]
pub struct CreateTestComponentRequest {
    pub name: String,
    pub category: ComponentCategory,
    pub max_marks: f64,
    // 默认 1
    pub weightage: Option<f64>,
    pub sort_order: Option<i32>,
}

// 更新考核项请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/test_component.ts")]
pub struct UpdateTestComponentRequest {
    pub name: Option<String>,
    pub category: Option<ComponentCategory>,
    pub max_marks: Option<f64>,
    pub weightage: Option<f64>,
    pub sort_order: Option<i32>,
}
