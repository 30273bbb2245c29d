use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::responses::{StudentEnrollment, StudentEnrollmentListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_student_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    }

    let enrollments = match storage.list_enrollments_by_student(student_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    // 同一课程可能在多个学期出现，课程信息只查一次
    let mut courses = HashMap::new();
    let mut items = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        if !courses.contains_key(&enrollment.course_id) {
            match storage.get_course_by_id(enrollment.course_id).await {
                Ok(Some(course)) => {
                    courses.insert(enrollment.course_id, course);
                }
                Ok(None) => continue,
                Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
            }
        }
        let Some(course) = courses.get(&enrollment.course_id) else {
            continue;
        };
        items.push(StudentEnrollment {
            enrollment_id: enrollment.id,
            course_id: course.id,
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            course_type: course.course_type,
            term: enrollment.term,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentEnrollmentListResponse { student_id, items },
        "Enrollments retrieved successfully",
    )))
}
