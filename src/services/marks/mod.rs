//! 成绩录入与成绩汇总
//!
//! 成绩只存原始得分；小计、百分比和等级每次请求时由 [`crate::grading`] 重新计算。

pub mod bulk;
pub mod course_report;
pub mod record;
pub mod student_results;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ErpError;
use crate::models::marks::requests::{BulkRecordMarksRequest, CourseResultParams, RecordMarkRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct MarksService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarksService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 录入/修改单项成绩
    pub async fn record_mark(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
        component_id: i64,
        mark_data: RecordMarkRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_mark(self, request, enrollment_id, component_id, mark_data).await
    }

    // 批量录入成绩
    pub async fn bulk_record_marks(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
        marks_data: BulkRecordMarksRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_record_marks(self, request, enrollment_id, marks_data).await
    }

    // 单个选课记录的成绩汇总
    pub async fn get_enrollment_result(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::get_enrollment_result(self, request, enrollment_id).await
    }

    // 学生全部课程的成绩汇总
    pub async fn get_student_results(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        student_results::get_student_results(self, request, student_id).await
    }

    // 课程成绩报表
    pub async fn get_course_report(
        &self,
        request: &HttpRequest,
        course_id: i64,
        params: CourseResultParams,
    ) -> ActixResult<HttpResponse> {
        course_report::get_course_report(self, request, course_id, params).await
    }
}

/// 汇总失败时的响应：校验错误为 400，不返回部分结果
fn aggregation_error_response(err: &ErpError) -> HttpResponse {
    ApiResponse::from_erp_error(err, ErrorCode::MarksAggregationFailed)
}
