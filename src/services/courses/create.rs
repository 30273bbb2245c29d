use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::CourseService;
use crate::errors::ErpError;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{normalize_course_code, validate_display_name};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 课程代码统一转为大写
    course_data.course_code = match normalize_course_code(&course_data.course_code) {
        Ok(code) => code,
        Err(msg) => {
            warn!("Rejected course code '{}': {}", course_data.course_code, msg);
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::CourseCodeInvalid, msg)));
        }
    };

    if let Err(msg) = validate_display_name(&course_data.course_name, 128) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    course_data.course_name = course_data.course_name.trim().to_string();

    match storage.get_course_by_code(&course_data.course_code).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                format!("Course code {} already exists", course_data.course_code),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            info!("Course {} created", course.course_code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => {
            error!("Course creation failed: {}", e);
            if matches!(e, ErpError::Conflict(_)) {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::CourseAlreadyExists,
                    "Course code already exists",
                )))
            } else {
                Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed))
            }
        }
    }
}
