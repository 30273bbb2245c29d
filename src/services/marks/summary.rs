use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{MarksService, aggregation_error_response};
use crate::errors::Result;
use crate::grading::aggregate;
use crate::models::courses::entities::Course;
use crate::models::enrollments::entities::Enrollment;
use crate::models::marks::entities::StudentMark;
use crate::models::marks::responses::MarksSummary;
use crate::models::test_components::entities::TestComponent;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 将课程的考核项与选课记录的成绩配对
///
/// 按考核项顺序输出；没有成绩记录的考核项以未评分占位。
pub(crate) fn pair_marks(
    enrollment_id: i64,
    components: &[TestComponent],
    marks: &[StudentMark],
) -> Vec<(TestComponent, StudentMark)> {
    let by_component: HashMap<i64, &StudentMark> = marks
        .iter()
        .filter(|m| m.enrollment_id == enrollment_id)
        .map(|m| (m.test_component_id, m))
        .collect();

    components
        .iter()
        .map(|component| {
            let mark = by_component
                .get(&component.id)
                .map(|m| (*m).clone())
                .unwrap_or_else(|| StudentMark::ungraded(enrollment_id, component.id));
            (component.clone(), mark)
        })
        .collect()
}

/// 计算一个选课记录的成绩汇总
pub(crate) async fn summarize_enrollment(
    storage: &Arc<dyn Storage>,
    enrollment: &Enrollment,
    course: &Course,
    components: &[TestComponent],
) -> Result<MarksSummary> {
    let marks = storage.list_marks_by_enrollment(enrollment.id).await?;
    let records = pair_marks(enrollment.id, components, &marks);
    let result = aggregate(&records)?;
    Ok(MarksSummary::new(
        enrollment.id,
        enrollment.term.clone(),
        course,
        result,
    ))
}

pub async fn get_enrollment_result(
    service: &MarksService,
    request: &HttpRequest,
    enrollment_id: i64,
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

    let course = match storage.get_course_by_id(enrollment.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    let components = match storage.list_test_components_by_course(course.id).await {
        Ok(components) => components,
        Err(e) => return Ok(ApiResponse::from_erp_error(&e, ErrorCode::ValidationFailed)),
    };

    match summarize_enrollment(&storage, &enrollment, &course, &components).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Result computed successfully",
        ))),
        Err(e) => {
            warn!("Aggregation failed for enrollment {}: {}", enrollment_id, e);
            Ok(aggregation_error_response(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: i64, name: &str) -> TestComponent {
        TestComponent {
            id,
            course_id: 1,
            name: name.to_string(),
            category: "theory".to_string(),
            max_marks: 20.0,
            weightage: 1.0,
            sort_order: 0,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn mark(enrollment_id: i64, component_id: i64, value: Option<f64>) -> StudentMark {
        StudentMark {
            id: component_id * 100 + enrollment_id,
            enrollment_id,
            test_component_id: component_id,
            marks_obtained: value,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_pair_marks_fills_missing_as_ungraded() {
        let components = vec![component(1, "MSE1"), component(2, "MSE2")];
        let marks = vec![mark(7, 2, Some(15.0))];

        let pairs = pair_marks(7, &components, &marks);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.name, "MSE1");
        assert_eq!(pairs[0].1.marks_obtained, None);
        assert_eq!(pairs[0].1.test_component_id, 1);
        assert_eq!(pairs[1].1.marks_obtained, Some(15.0));
    }

    #[test]
    fn test_pair_marks_ignores_other_enrollments() {
        let components = vec![component(1, "MSE1")];
        let marks = vec![mark(8, 1, Some(19.0))];

        let pairs = pair_marks(7, &components, &marks);
        assert_eq!(pairs[0].1.marks_obtained, None);
        assert_eq!(pairs[0].1.enrollment_id, 7);
    }

    #[test]
    fn test_summary_totals_are_rounded_for_display() {
        let components = vec![component(1, "Quiz1"), component(2, "Quiz2")];
        let marks = vec![mark(7, 1, Some(0.1)), mark(7, 2, Some(0.2))];
        let course = Course {
            id: 1,
            course_code: "CS301".to_string(),
            course_name: "Operating Systems".to_string(),
            course_type: crate::models::courses::entities::CourseType::Theory,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let result = aggregate(&pair_marks(7, &components, &marks)).unwrap();
        let summary = MarksSummary::new(7, "2024-ODD".to_string(), &course, result);
        assert_eq!(summary.theory_total, 0.3);
        assert_eq!(summary.total_marks, 0.3);
        assert_eq!(summary.lab_total, 0.0);
        assert_eq!(summary.theory_total + summary.lab_total, summary.total_marks);
        assert_eq!(summary.max_total_marks, 40.0);
        assert_eq!(summary.theory_marks[0].marks_obtained, Some(0.1));
    }
}
