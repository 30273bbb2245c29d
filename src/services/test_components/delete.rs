use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::TestComponentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_component(
    service: &TestComponentService,
    request: &HttpRequest,
    component_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_test_component(component_id).await {
        Ok(true) => {
            warn!("Component {} deleted with its marks", component_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Test component deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ComponentNotFound,
            "Test component not found",
        ))),
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
