use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, warn};

use super::summary::pair_marks;
use super::{MarksService, aggregation_error_response};
use crate::grading::{aggregate, grade_distribution, percentage_stats, round2};
use crate::models::marks::requests::CourseResultParams;
use crate::models::marks::responses::{CourseResultReport, CourseResultRow};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_term;

pub async fn get_course_report(
    service: &MarksService,
    request: &HttpRequest,
    course_id: i64,
    params: CourseResultParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let term = params
        .term
        .map(|t| t.trim().to_ascii_uppercase())
        .filter(|t| !t.is_empty());
    if let Some(ref term) = term
        && let Err(msg) = validate_term(term)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TermInvalid, msg)));
    }

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let enrollments = match storage
        .list_enrollments_by_course(course_id, term.as_deref())
        .await
    {
        Ok(enrollments) => enrollments,
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let components = match storage.list_test_components_by_course(course_id).await {
        Ok(components) => components,
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let student_ids: Vec<i64> = enrollments.iter().map(|e| e.student_id).collect();
    let students: HashMap<i64, _> = match storage.list_students_by_ids(&student_ids).await {
        Ok(students) => students.into_iter().map(|s| (s.id, s)).collect(),
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let enrollment_ids: Vec<i64> = enrollments.iter().map(|e| e.id).collect();
    let marks = match storage.list_marks_by_enrollments(&enrollment_ids).await {
        Ok(marks) => marks,
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let mut rows = Vec::with_capacity(enrollments.len());
    for enrollment in &enrollments {
        let Some(student) = students.get(&enrollment.student_id) else {
            continue;
        };

        let records = pair_marks(enrollment.id, &components, &marks);
        let result = match aggregate(&records) {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    "Aggregation failed for course {} enrollment {}: {}",
                    course_id, enrollment.id, e
                );
                return Ok(aggregation_error_response(&e));
            }
        };

        rows.push(CourseResultRow {
            enrollment_id: enrollment.id,
            student_id: student.id,
            roll_number: student.roll_number.clone(),
            name: student.name.clone(),
            term: enrollment.term.clone(),
            total_marks: round2(result.combined_obtained),
            max_total_marks: round2(result.combined_max),
            percentage: result.percentage,
            grade: result.grade,
        });
    }

    rows.sort_by(|a, b| {
        a.roll_number
            .cmp(&b.roll_number)
            .then_with(|| a.term.cmp(&b.term))
    });

    let grades: Vec<_> = rows.iter().map(|r| r.grade).collect();
    let percentages: Vec<f64> = rows.iter().map(|r| r.percentage).collect();

    debug!(
        "Course {} report computed for {} enrollments",
        course.course_code,
        rows.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseResultReport {
            course,
            term,
            grade_distribution: grade_distribution(&grades),
            stats: percentage_stats(&percentages),
            rows,
        },
        "Course report computed successfully",
    )))
}
