use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课记录：一名学生在一个学期对一门课程的注册
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    // 学期，如 "2025-ODD"
    pub term: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
