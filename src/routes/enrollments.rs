use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::marks::requests::{BulkRecordMarksRequest, RecordMarkRequest};
use crate::services::{EnrollmentService, MarksService};

// 懒加载的全局服务实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static MARKS_SERVICE: Lazy<MarksService> = Lazy::new(MarksService::new_lazy);

pub async fn create_enrollment(
    req: HttpRequest,
    enrollment_data: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_enrollment(&req, enrollment_data.into_inner())
        .await
}

pub async fn delete_enrollment(
    req: HttpRequest,
    enrollment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .delete_enrollment(&req, enrollment_id.into_inner())
        .await
}

pub async fn record_mark(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    mark_data: web::Json<RecordMarkRequest>,
) -> ActixResult<HttpResponse> {
    let (enrollment_id, component_id) = path.into_inner();
    MARKS_SERVICE
        .record_mark(&req, enrollment_id, component_id, mark_data.into_inner())
        .await
}

pub async fn bulk_record_marks(
    req: HttpRequest,
    enrollment_id: web::Path<i64>,
    marks_data: web::Json<BulkRecordMarksRequest>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE
        .bulk_record_marks(&req, enrollment_id.into_inner(), marks_data.into_inner())
        .await
}

pub async fn get_enrollment_result(
    req: HttpRequest,
    enrollment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE
        .get_enrollment_result(&req, enrollment_id.into_inner())
        .await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .service(web::resource("").route(web::post().to(create_enrollment)))
            .service(web::resource("/{enrollment_id}").route(web::delete().to(delete_enrollment)))
            .service(
                // 批量录入成绩（全部校验通过才写入）
                web::resource("/{enrollment_id}/marks").route(web::put().to(bulk_record_marks)),
            )
            .service(
                web::resource("/{enrollment_id}/marks/{component_id}")
                    .route(web::put().to(record_mark)),
            )
            .service(
                web::resource("/{enrollment_id}/result")
                    .route(web::get().to(get_enrollment_result)),
            ),
    );
}
