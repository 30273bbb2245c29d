use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::EnrollmentService;
use crate::errors::ErpError;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_term;

pub async fn create_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    mut enrollment_data: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    enrollment_data.term = enrollment_data.term.trim().to_ascii_uppercase();
    if let Err(msg) = validate_term(&enrollment_data.term) {
        warn!("Rejected term '{}': {}", enrollment_data.term, msg);
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TermInvalid, msg)));
    }

    match storage.get_student_by_id(enrollment_data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    match storage.get_course_by_id(enrollment_data.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    // 同一学生同一学期同一课程只能选一次
    match storage
        .find_enrollment(
            enrollment_data.student_id,
            enrollment_data.course_id,
            &enrollment_data.term,
        )
        .await
    {
        Ok(Some(existing)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentAlreadyExists,
                format!(
                    "Student is already enrolled in this course for {} (enrollment {})",
                    existing.term, existing.id
                ),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    match storage.create_enrollment(enrollment_data).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in course {} for {}",
                enrollment.student_id, enrollment.course_id, enrollment.term
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Enrollment created successfully",
            )))
        }
        Err(ErpError::Conflict(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentAlreadyExists,
                "Student is already enrolled in this course for this term",
            )))
        }
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
