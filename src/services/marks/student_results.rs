use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::summary::summarize_enrollment;
use super::{MarksService, aggregation_error_response};
use crate::models::marks::responses::StudentResultsResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_student_results(
    service: &MarksService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let enrollments = match storage.list_enrollments_by_student(student_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    // 课程及其考核项按课程缓存
    let mut course_cache = HashMap::new();
    let mut results = Vec::with_capacity(enrollments.len());

    for enrollment in &enrollments {
        if !course_cache.contains_key(&enrollment.course_id) {
            let course = match storage.get_course_by_id(enrollment.course_id).await {
                Ok(Some(course)) => course,
                Ok(None) => continue,
                Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
            };
            let components = match storage.list_test_components_by_course(course.id).await {
                Ok(components) => components,
                Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
            };
            course_cache.insert(enrollment.course_id, (course, components));
        }
        let Some((course, components)) = course_cache.get(&enrollment.course_id) else {
            continue;
        };

        match summarize_enrollment(&storage, enrollment, course, components).await {
            Ok(summary) => results.push(summary),
            Err(e) => {
                warn!(
                    "Aggregation failed for student {} enrollment {}: {}",
                    student_id, enrollment.id, e
                );
                return Ok(aggregation_error_response(&e));
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentResultsResponse {
            student_id: student.id,
            roll_number: student.roll_number,
            name: student.name,
            results,
        },
        "Results computed successfully",
    )))
}
