use serde::Serialize;
use ts_rs::TS;

use crate::grading::{AggregatedResult, ComponentMarkRow, Grade, round2};
use crate::models::courses::entities::{Course, CourseType};

/// 单个选课记录的成绩汇总（学生端成绩页使用）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct MarksSummary {
    pub enrollment_id: i64,
    pub term: String,
    pub course_code: String,
    pub course_name: String,
    pub course_type: CourseType,
    #[serde(rename = "theoryMarks")]
    pub theory_marks: Vec<ComponentMarkRow>,
    #[serde(rename = "labMarks")]
    pub lab_marks: Vec<ComponentMarkRow>,
    #[serde(rename = "theoryTotal")]
    pub theory_total: f64,
    #[serde(rename = "theoryMaxMarks")]
    pub theory_max_marks: f64,
    #[serde(rename = "labTotal")]
    pub lab_total: f64,
    #[serde(rename = "labMaxMarks")]
    pub lab_max_marks: f64,
    #[serde(rename = "totalMarks")]
    pub total_marks: f64,
    #[serde(rename = "maxTotalMarks")]
    pub max_total_marks: f64,
    pub percentage: f64,
    pub grade: Grade,
}

impl MarksSummary {
    /// 展示用的小计与总分保留两位小数
    pub fn new(
        enrollment_id: i64,
        term: String,
        course: &Course,
        result: AggregatedResult,
    ) -> Self {
        Self {
            enrollment_id,
            term,
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            course_type: course.course_type,
            theory_total: round2(result.theory.obtained),
            theory_max_marks: round2(result.theory.max),
            lab_total: round2(result.lab.obtained),
            lab_max_marks: round2(result.lab.max),
            total_marks: round2(result.combined_obtained),
            max_total_marks: round2(result.combined_max),
            percentage: result.percentage,
            grade: result.grade,
            theory_marks: result.theory.rows,
            lab_marks: result.lab.rows,
        }
    }
}

/// 学生全部选课的成绩汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct StudentResultsResponse {
    pub student_id: i64,
    pub roll_number: String,
    pub name: String,
    pub results: Vec<MarksSummary>,
}

/// 课程成绩报表中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct CourseResultRow {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub roll_number: String,
    pub name: String,
    pub term: String,
    #[serde(rename = "totalMarks")]
    pub total_marks: f64,
    #[serde(rename = "maxTotalMarks")]
    pub max_total_marks: f64,
    pub percentage: f64,
    pub grade: Grade,
}

/// 等级分布
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct GradeCount {
    pub grade: Grade,
    pub count: i64,
}

/// 百分比统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct PercentageStats {
    pub average: f64,
    pub max: f64,
    pub min: f64,
}

/// 课程成绩报表（教师/管理员视角）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct CourseResultReport {
    pub course: Course,
    pub term: Option<String>,
    pub rows: Vec<CourseResultRow>,
    pub grade_distribution: Vec<GradeCount>,
    pub stats: Option<PercentageStats>,
}
