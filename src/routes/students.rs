use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::students::requests::{CreateStudentRequest, StudentListParams};
use crate::services::{EnrollmentService, MarksService, StudentService};

// 懒加载的全局服务实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static MARKS_SERVICE: Lazy<MarksService> = Lazy::new(MarksService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(&req, query.into_inner())
        .await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(
    req: HttpRequest,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .get_student(&req, student_id.into_inner())
        .await
}

pub async fn list_student_enrollments(
    req: HttpRequest,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_student_enrollments(&req, student_id.into_inner())
        .await
}

pub async fn get_student_results(
    req: HttpRequest,
    student_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE
        .get_student_results(&req, student_id.into_inner())
        .await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(web::resource("/{student_id}").route(web::get().to(get_student)))
            .service(
                web::resource("/{student_id}/enrollments")
                    .route(web::get().to(list_student_enrollments)),
            )
            .service(
                // 学生成绩看板：每门课一份汇总
                web::resource("/{student_id}/results").route(web::get().to(get_student_results)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use serde_json::json;

    use super::super::test_support::{init_app, memory_storage, send};

    #[actix_web::test]
    async fn test_create_and_list_students() {
        let storage = memory_storage().await;
        let app = init_app!(storage);

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/students").set_json(json!({
                "roll_number": "21CS001",
                "name": "Asha",
                "email": "asha@college.edu",
                "department": "CSE"
            }))
        );
        assert_eq!(status, StatusCode::CREATED);
        let student_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/students").set_json(json!({
                "roll_number": "21CS001",
                "name": "Someone Else"
            }))
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 4001);

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/students").set_json(json!({
                "roll_number": "21 CS",
                "name": "Bad Roll"
            }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 4002);

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/students").set_json(json!({
                "roll_number": "21ME002",
                "name": "Bala",
                "email": "",
                "department": "MECH"
            }))
        );
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"]["email"].is_null());

        let (status, body) = send!(app, TestRequest::get().uri("/api/v1/students?department=CSE"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["roll_number"], "21CS001");

        let (status, body) = send!(
            app,
            TestRequest::get().uri(&format!("/api/v1/students/{student_id}"))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Asha");

        let (status, body) = send!(app, TestRequest::get().uri("/api/v1/students/404"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 4000);
    }

    #[actix_web::test]
    async fn test_student_enrollments_and_results() {
        let storage = memory_storage().await;
        let app = init_app!(storage);

        let (_, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/courses").set_json(json!({
                "course_code": "CS301",
                "course_name": "Operating Systems",
                "course_type": "theory"
            }))
        );
        let course_id = body["data"]["id"].as_i64().unwrap();

        let (_, body) = send!(
            app,
            TestRequest::post()
                .uri(&format!("/api/v1/courses/{course_id}/components"))
                .set_json(json!({ "name": "MSE1", "category": "theory", "max_marks": 20 }))
        );
        let component_id = body["data"]["id"].as_i64().unwrap();

        let (_, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/students").set_json(json!({
                "roll_number": "21CS001",
                "name": "Asha"
            }))
        );
        let student_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/enrollments").set_json(json!({
                "student_id": student_id,
                "course_id": course_id,
                "term": "2025-ODD"
            }))
        );
        assert_eq!(status, StatusCode::CREATED);
        let enrollment_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send!(
            app,
            TestRequest::put()
                .uri(&format!("/api/v1/enrollments/{enrollment_id}/marks/{component_id}"))
                .set_json(json!({ "marks_obtained": 18 }))
        );
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send!(
            app,
            TestRequest::get().uri(&format!("/api/v1/students/{student_id}/enrollments"))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"][0]["course_code"], "CS301");
        assert_eq!(body["data"]["items"][0]["enrollment_id"], enrollment_id);

        let (status, body) = send!(
            app,
            TestRequest::get().uri(&format!("/api/v1/students/{student_id}/results"))
        );
        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["results"][0];
        assert_eq!(body["data"]["roll_number"], "21CS001");
        assert_eq!(result["theoryTotal"].as_f64(), Some(18.0));
        assert_eq!(result["labMaxMarks"].as_f64(), Some(0.0));
        assert_eq!(result["labTotal"].as_f64(), Some(0.0));
        assert_eq!(result["percentage"].as_f64(), Some(90.0));
        assert_eq!(result["grade"], "O");
    }
}
