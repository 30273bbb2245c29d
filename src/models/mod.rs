pub mod common;
pub mod courses;
pub mod enrollments;
pub mod marks;
pub mod students;
pub mod system;
pub mod test_components;

pub use common::{
    ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery, normalize_page,
};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
