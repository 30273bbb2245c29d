use serde::Serialize;

/// 业务错误码
///
/// 0 表示成功；1xxx 为通用错误，其余按资源分段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 课程
    CourseNotFound = 2000,
    CourseAlreadyExists = 2001,
    CourseCodeInvalid = 2002,

    // 考核项
    ComponentNotFound = 3000,
    ComponentInvalid = 3001,
    ComponentAlreadyExists = 3002,

    // 学生
    StudentNotFound = 4000,
    StudentAlreadyExists = 4001,
    RollNumberInvalid = 4002,

    // 选课
    EnrollmentNotFound = 5000,
    EnrollmentAlreadyExists = 5001,
    TermInvalid = 5002,

    // 成绩
    MarksOutOfRange = 6000,
    MarksAggregationFailed = 6001,
    ComponentNotInCourse = 6002,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
