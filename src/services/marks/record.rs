use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::MarksService;
use crate::grading::validate_mark;
use crate::models::marks::requests::{MarkEntry, RecordMarkRequest};
use crate::models::{ApiResponse, ErrorCode};

pub async fn record_mark(
    service: &MarksService,
    request: &HttpRequest,
    enrollment_id: i64,
    component_id: i64,
    mark_data: RecordMarkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let enrollment = match storage.get_enrollment_by_id(enrollment_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let component = match storage.get_test_component_by_id(component_id).await {
        Ok(Some(component)) => component,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ComponentNotFound,
                "Test component not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    if component.course_id != enrollment.course_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ComponentNotInCourse,
            format!(
                "Component {} does not belong to the course of enrollment {}",
                component_id, enrollment_id
            ),
        )));
    }

    if let Err(e) = validate_mark(&component, mark_data.marks_obtained) {
        warn!(
            "Rejected mark {:?} for enrollment {} component {}: {}",
            mark_data.marks_obtained, enrollment_id, component_id, e
        );
        return Ok(ApiResponse::from_erp_error(&e, ErrorCode::MarksOutOfRange));
    }

    let entry = MarkEntry {
        test_component_id: component_id,
        marks_obtained: mark_data.marks_obtained,
    };

    match storage
        .upsert_student_marks(enrollment_id, std::slice::from_ref(&entry))
        .await
    {
        Ok(mut saved) => match saved.pop() {
            Some(mark) => {
                info!(
                    "Mark {:?} recorded for enrollment {} component {}",
                    mark.marks_obtained, enrollment_id, component_id
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    mark,
                    "Mark recorded successfully",
                )))
            }
            None => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Mark was not saved",
            ))),
        },
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
