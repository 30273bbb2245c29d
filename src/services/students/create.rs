use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::StudentService;
use crate::errors::ErpError;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_display_name, validate_email, validate_roll_number};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    student_data.roll_number = student_data.roll_number.trim().to_string();
    if let Err(msg) = validate_roll_number(&student_data.roll_number) {
        warn!("Rejected roll number '{}': {}", student_data.roll_number, msg);
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::RollNumberInvalid, msg)));
    }

    if let Err(msg) = validate_display_name(&student_data.name, 128) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    student_data.name = student_data.name.trim().to_string();

    // 空字符串视为未填写
    student_data.email = student_data
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    if let Some(ref email) = student_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    student_data.department = student_data
        .department
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    match storage
        .get_student_by_roll_number(&student_data.roll_number)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                format!("Roll number {} already exists", student_data.roll_number),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} created", student.roll_number);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(ErpError::Conflict(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "Roll number already exists",
            )))
        }
        Err(e) => Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }
}
