use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::marks::requests::CourseResultParams;
use crate::models::test_components::requests::CreateTestComponentRequest;
use crate::services::{CourseService, MarksService, TestComponentService};

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static COMPONENT_SERVICE: Lazy<TestComponentService> = Lazy::new(TestComponentService::new_lazy);
static MARKS_SERVICE: Lazy<MarksService> = Lazy::new(MarksService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course(req: HttpRequest, course_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.into_inner()).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: web::Path<i64>,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .delete_course(&req, course_id.into_inner())
        .await
}

pub async fn list_components(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COMPONENT_SERVICE
        .list_components(&req, course_id.into_inner())
        .await
}

pub async fn create_component(
    req: HttpRequest,
    course_id: web::Path<i64>,
    component_data: web::Json<CreateTestComponentRequest>,
) -> ActixResult<HttpResponse> {
    COMPONENT_SERVICE
        .create_component(&req, course_id.into_inner(), component_data.into_inner())
        .await
}

pub async fn get_course_report(
    req: HttpRequest,
    course_id: web::Path<i64>,
    query: web::Query<CourseResultParams>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE
        .get_course_report(&req, course_id.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(web::put().to(update_course))
                    .route(web::delete().to(delete_course)),
            )
            .service(
                // 课程考核项配置
                web::resource("/{course_id}/components")
                    .route(web::get().to(list_components))
                    .route(web::post().to(create_component)),
            )
            .service(
                // 课程成绩报表，可按学期过滤
                web::resource("/{course_id}/results").route(web::get().to(get_course_report)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use sea_orm::{ActiveModelTrait, Set};
    use serde_json::json;

    use super::super::test_support::{init_app, memory_storage, send};
    use crate::entity::test_components;
    use crate::models::courses::entities::CourseType;
    use crate::models::enrollments::requests::CreateEnrollmentRequest;
    use crate::models::marks::requests::MarkEntry;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::test_components::entities::ComponentCategory;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    async fn enroll(storage: &Arc<dyn Storage>, roll: &str, name: &str, course_id: i64) -> i64 {
        let student = storage
            .create_student(CreateStudentRequest {
                roll_number: roll.to_string(),
                name: name.to_string(),
                email: None,
                department: None,
            })
            .await
            .unwrap();
        storage
            .create_enrollment(CreateEnrollmentRequest {
                student_id: student.id,
                course_id,
                term: "2025-ODD".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_create_course_normalizes_and_rejects_duplicates() {
        let storage = memory_storage().await;
        let app = init_app!(storage);

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/courses").set_json(json!({
                "course_code": " cs301 ",
                "course_name": "Operating Systems",
                "course_type": "theory_lab"
            }))
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["course_code"], "CS301");

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/courses").set_json(json!({
                "course_code": "CS301",
                "course_name": "Duplicate",
                "course_type": "theory"
            }))
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 2001);

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/courses").set_json(json!({
                "course_code": "CS 301",
                "course_name": "Bad code",
                "course_type": "theory"
            }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 2002);

        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/v1/courses").set_json(json!({
                "course_code": "CS302",
                "course_name": "Bad type",
                "course_type": "seminar"
            }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 1000);
    }

    #[actix_web::test]
    async fn test_list_and_update_course() {
        let storage = memory_storage().await;
        let app = init_app!(storage);

        for (code, name) in [("CS301", "Operating Systems"), ("MA101", "Calculus")] {
            let (status, _) = send!(
                app,
                TestRequest::post().uri("/api/v1/courses").set_json(json!({
                    "course_code": code,
                    "course_name": name,
                    "course_type": "theory"
                }))
            );
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send!(
            app,
            TestRequest::get().uri("/api/v1/courses?search=calc&page=1&size=10")
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["course_code"], "MA101");

        let (status, body) = send!(
            app,
            TestRequest::put()
                .uri("/api/v1/courses/1")
                .set_json(json!({ "course_type": "lab" }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["course_type"], "lab");
        assert_eq!(body["data"]["course_name"], "Operating Systems");

        let (status, body) = send!(app, TestRequest::get().uri("/api/v1/courses/99"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 2000);
    }

    #[actix_web::test]
    async fn test_course_report_sorted_with_distribution() {
        let storage = memory_storage().await;
        let course = storage
            .create_course(crate::models::courses::requests::CreateCourseRequest {
                course_code: "CS301".to_string(),
                course_name: "Operating Systems".to_string(),
                course_type: CourseType::Theory,
            })
            .await
            .unwrap();
        let mse = storage
            .create_test_component(
                course.id,
                crate::models::test_components::requests::CreateTestComponentRequest {
                    name: "MSE1".to_string(),
                    category: ComponentCategory::Theory,
                    max_marks: 100.0,
                    weightage: None,
                    sort_order: None,
                },
            )
            .await
            .unwrap();

        // 插入顺序与学号顺序相反
        let late = enroll(&storage, "21CS002", "Bala", course.id).await;
        let early = enroll(&storage, "21CS001", "Asha", course.id).await;
        storage
            .upsert_student_marks(
                late,
                &[MarkEntry {
                    test_component_id: mse.id,
                    marks_obtained: Some(45.0),
                }],
            )
            .await
            .unwrap();
        storage
            .upsert_student_marks(
                early,
                &[MarkEntry {
                    test_component_id: mse.id,
                    marks_obtained: Some(92.5),
                }],
            )
            .await
            .unwrap();

        let app = init_app!(storage);
        let (status, body) = send!(
            app,
            TestRequest::get().uri(&format!("/api/v1/courses/{}/results?term=2025-odd", course.id))
        );
        assert_eq!(status, StatusCode::OK);

        let data = &body["data"];
        assert_eq!(data["term"], "2025-ODD");
        assert_eq!(data["rows"][0]["roll_number"], "21CS001");
        assert_eq!(data["rows"][0]["grade"], "O");
        assert_eq!(data["rows"][1]["roll_number"], "21CS002");
        assert_eq!(data["rows"][1]["grade"], "C");

        let distribution = data["grade_distribution"].as_array().unwrap();
        assert_eq!(distribution.len(), 7);
        assert_eq!(distribution[0], json!({ "grade": "O", "count": 1 }));
        assert_eq!(distribution[5], json!({ "grade": "C", "count": 1 }));
        assert_eq!(distribution[6], json!({ "grade": "F", "count": 0 }));

        assert_eq!(data["stats"]["average"].as_f64(), Some(68.75));
        assert_eq!(data["stats"]["max"].as_f64(), Some(92.5));
        assert_eq!(data["stats"]["min"].as_f64(), Some(45.0));

        // 其他学期没有选课：无统计
        let (status, body) = send!(
            app,
            TestRequest::get().uri(&format!("/api/v1/courses/{}/results?term=2024-EVEN", course.id))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["rows"].as_array().map(|r| r.len()), Some(0));
        assert!(body["data"]["stats"].is_null());
    }

    #[actix_web::test]
    async fn test_unknown_category_fails_aggregation() {
        let sea = SeaOrmStorage::in_memory().await;
        let storage: Arc<dyn Storage> = Arc::new(sea.clone());
        let course = storage
            .create_course(crate::models::courses::requests::CreateCourseRequest {
                course_code: "ME201".to_string(),
                course_name: "Thermodynamics".to_string(),
                course_type: CourseType::TheoryLab,
            })
            .await
            .unwrap();

        // 绕过接口校验直接写入非法类别
        let now = chrono::Utc::now().timestamp();
        test_components::ActiveModel {
            course_id: Set(course.id),
            name: Set("Workshop".to_string()),
            category: Set("practical".to_string()),
            max_marks: Set(10.0),
            weightage: Set(1.0),
            sort_order: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&sea.db)
        .await
        .unwrap();

        let enrollment_id = enroll(&storage, "21ME007", "Chitra", course.id).await;
        let app = init_app!(storage);

        let (status, body) = send!(
            app,
            TestRequest::get().uri(&format!("/api/v1/enrollments/{enrollment_id}/result"))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 6001);
        assert!(body["data"].is_null());

        let (status, body) = send!(
            app,
            TestRequest::get().uri(&format!("/api/v1/courses/{}/results", course.id))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 6001);
    }

    #[actix_web::test]
    async fn test_delete_course_cascades() {
        let storage = memory_storage().await;
        let course = storage
            .create_course(crate::models::courses::requests::CreateCourseRequest {
                course_code: "CS301".to_string(),
                course_name: "Operating Systems".to_string(),
                course_type: CourseType::Theory,
            })
            .await
            .unwrap();
        let component = storage
            .create_test_component(
                course.id,
                crate::models::test_components::requests::CreateTestComponentRequest {
                    name: "MSE1".to_string(),
                    category: ComponentCategory::Theory,
                    max_marks: 20.0,
                    weightage: None,
                    sort_order: None,
                },
            )
            .await
            .unwrap();
        let enrollment_id = enroll(&storage, "21CS001", "Asha", course.id).await;
        storage
            .upsert_student_marks(
                enrollment_id,
                &[MarkEntry {
                    test_component_id: component.id,
                    marks_obtained: Some(10.0),
                }],
            )
            .await
            .unwrap();

        let app = init_app!(storage);
        let (status, _) = send!(
            app,
            TestRequest::delete().uri(&format!("/api/v1/courses/{}", course.id))
        );
        assert_eq!(status, StatusCode::OK);

        assert!(storage.get_enrollment_by_id(enrollment_id).await.unwrap().is_none());
        assert!(
            storage
                .get_test_component_by_id(component.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .list_marks_by_enrollment(enrollment_id)
                .await
                .unwrap()
                .is_empty()
        );

        let (status, body) = send!(
            app,
            TestRequest::delete().uri(&format!("/api/v1/courses/{}", course.id))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 2000);
    }
}
