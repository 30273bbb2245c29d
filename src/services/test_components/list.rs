use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TestComponentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_components(
    service: &TestComponentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    match storage.list_test_components_by_course(course_id).await {
        Ok(components) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            components,
            "Test components retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
