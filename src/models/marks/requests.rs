use serde::{Deserialize, Deserializer};
use ts_rs::TS;

// 录入单项成绩请求，marks_obtained 为 null 表示清空为未评分
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct RecordMarkRequest {
    #[serde(deserialize_with = "required_nullable")]
    pub marks_obtained: Option<f64>,
}

// 批量录入中的一项
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct MarkEntry {
    pub test_component_id: i64,
    #[serde(deserialize_with = "required_nullable")]
    pub marks_obtained: Option<f64>,
}

// 字段必须出现，显式 null 才表示未评分
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}

// 批量录入成绩请求（全部校验通过才写入）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct BulkRecordMarksRequest {
    pub entries: Vec<MarkEntry>,
}

// 课程成绩报表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct CourseResultParams {
    pub term: Option<String>,
}
