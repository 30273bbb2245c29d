use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::CourseType;

// 学生选课列表项（附带课程信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct StudentEnrollment {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub course_type: CourseType,
    pub term: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct StudentEnrollmentListResponse {
    pub student_id: i64,
    pub items: Vec<StudentEnrollment>,
}
