use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生成绩：某选课记录在某考核项上的得分
//
// marks_obtained 为空表示"尚未评分"，与 0 分不同
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct StudentMark {
    pub id: i64,
    pub enrollment_id: i64,
    pub test_component_id: i64,
    pub marks_obtained: Option<f64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl StudentMark {
    /// 考核项尚无成绩记录时使用的占位成绩（未评分）
    pub fn ungraded(enrollment_id: i64, test_component_id: i64) -> Self {
        Self {
            id: 0,
            enrollment_id,
            test_component_id,
            marks_obtained: None,
            updated_at: chrono::DateTime::<chrono::Utc>::default(),
        }
    }
}
