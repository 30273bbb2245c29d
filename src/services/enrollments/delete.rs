use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_enrollment(enrollment_id).await {
        Ok(true) => {
            warn!("Enrollment {} deleted with its marks", enrollment_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Enrollment deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        ))),
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
