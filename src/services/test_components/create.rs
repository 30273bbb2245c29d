use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{TestComponentService, check_positive};
use crate::models::test_components::requests::CreateTestComponentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_display_name;

pub async fn create_component(
    service: &TestComponentService,
    request: &HttpRequest,
    course_id: i64,
    mut component_data: CreateTestComponentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_display_name(&component_data.name, 64) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ComponentInvalid, msg)));
    }
    component_data.name = component_data.name.trim().to_string();

    let weightage = component_data.weightage.unwrap_or(1.0);
    if let Err(msg) = check_positive("max_marks", component_data.max_marks)
        .and_then(|_| check_positive("weightage", weightage))
    {
        warn!(
            "Rejected component '{}' for course {}: {}",
            component_data.name, course_id, msg
        );
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ComponentInvalid, msg)));
    }

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

    // 同一课程内名称唯一
    match storage.list_test_components_by_course(course_id).await {
        Ok(existing) if existing.iter().any(|c| c.name == component_data.name) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ComponentAlreadyExists,
                format!(
                    "Component '{}' already exists in this course",
                    component_data.name
                ),
            )));
        }
        Ok(_) => {}
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    match storage.create_test_component(course_id, component_data).await {
        Ok(component) => {
            info!(
                "Component '{}' ({}, max {}) added to course {}",
                component.name, component.category, component.max_marks, course_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                component,
                "Test component created successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
