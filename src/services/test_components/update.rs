use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{TestComponentService, check_positive};
use crate::models::test_components::requests::UpdateTestComponentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_display_name;

pub async fn update_component(
    service: &TestComponentService,
    request: &HttpRequest,
    component_id: i64,
    mut update_data: UpdateTestComponentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    if let Some(ref name) = update_data.name {
        if let Err(msg) = validate_display_name(name, 64) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ComponentInvalid, msg)));
        }
        let name = name.trim().to_string();

        if name != component.name {
            match storage
                .list_test_components_by_course(component.course_id)
                .await
            {
                Ok(existing) if existing.iter().any(|c| c.id != component_id && c.name == name) => {
                    return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                        ErrorCode::ComponentAlreadyExists,
                        format!("Component '{name}' already exists in this course"),
                    )));
                }
                Ok(_) => {}
                Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
            }
        }
        update_data.name = Some(name);
    }

    if let Some(weightage) = update_data.weightage
        && let Err(msg) = check_positive("weightage", weightage)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ComponentInvalid, msg)));
    }

    if let Some(max_marks) = update_data.max_marks {
        if let Err(msg) = check_positive("max_marks", max_marks) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ComponentInvalid, msg)));
        }

        // 已录入的成绩必须仍在新满分范围内
        match storage.max_recorded_mark(component_id).await {
            Ok(Some(recorded)) if recorded > max_marks => {
                warn!(
                    "Rejected lowering max_marks of component {} to {} below recorded {}",
                    component_id, max_marks, recorded
                );
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ComponentInvalid,
                    format!(
                        "max_marks {max_marks} is below an already recorded mark of {recorded}"
                    ),
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
        }
    }

    match storage.update_test_component(component_id, update_data).await {
        Ok(Some(component)) => {
            info!("Component {} updated", component.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                component,
                "Test component updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ComponentNotFound,
            "Test component not found",
        ))),
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
