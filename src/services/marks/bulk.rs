use std::collections::{HashMap, HashSet};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::MarksService;
use crate::grading::validate_mark;
use crate::models::marks::requests::BulkRecordMarksRequest;
use crate::models::{ApiResponse, ErrorCode};

// 先校验全部条目，任一失败则整体拒绝，写入在同一事务内完成
pub async fn bulk_record_marks(
    service: &MarksService,
    request: &HttpRequest,
    enrollment_id: i64,
    marks_data: BulkRecordMarksRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if marks_data.entries.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "entries must not be empty",
        )));
    }

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

    let components = match storage
        .list_test_components_by_course(enrollment.course_id)
        .await
    {
        Ok(components) => components,
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };
    let by_id: HashMap<i64, _> = components.iter().map(|c| (c.id, c)).collect();

    let mut seen = HashSet::new();
    for entry in &marks_data.entries {
        if !seen.insert(entry.test_component_id) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!(
                    "Component {} appears more than once",
                    entry.test_component_id
                ),
            )));
        }

        let Some(component) = by_id.get(&entry.test_component_id) else {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ComponentNotInCourse,
                format!(
                    "Component {} does not belong to the course of enrollment {}",
                    entry.test_component_id, enrollment_id
                ),
            )));
        };

        if let Err(e) = validate_mark(component, entry.marks_obtained) {
            warn!(
                "Rejected bulk marks for enrollment {}: {}",
                enrollment_id, e
            );
            return Ok(ApiResponse::from_erp_error(&e, ErrorCode::MarksOutOfRange));
        }
    }

    match storage
        .upsert_student_marks(enrollment_id, &marks_data.entries)
        .await
    {
        Ok(saved) => {
            info!(
                "{} marks recorded for enrollment {}",
                saved.len(),
                enrollment_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                saved,
                "Marks recorded successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
