use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::test_components::requests::UpdateTestComponentRequest;
use crate::services::TestComponentService;

// 懒加载的全局 COMPONENT_SERVICE 实例
static COMPONENT_SERVICE: Lazy<TestComponentService> = Lazy::new(TestComponentService::new_lazy);

pub async fn update_component(
    req: HttpRequest,
    component_id: web::Path<i64>,
    update_data: web::Json<UpdateTestComponentRequest>,
) -> ActixResult<HttpResponse> {
    COMPONENT_SERVICE
        .update_component(&req, component_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_component(
    req: HttpRequest,
    component_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COMPONENT_SERVICE
        .delete_component(&req, component_id.into_inner())
        .await
}

// 配置路由
pub fn configure_components_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/components").service(
            web::resource("/{component_id}")
                .route(web::put().to(update_component))
                .route(web::delete().to(delete_component)),
        ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use serde_json::json;

    use super::super::test_support::{init_app, memory_storage, send};
    use crate::models::courses::entities::CourseType;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::enrollments::requests::CreateEnrollmentRequest;
    use crate::models::marks::requests::MarkEntry;
    use crate::models::students::requests::CreateStudentRequest;

    #[actix_web::test]
    async fn test_component_lifecycle() {
        let storage = memory_storage().await;
        let course = storage
            .create_course(CreateCourseRequest {
                course_code: "CS301".to_string(),
                course_name: "Operating Systems".to_string(),
                course_type: CourseType::TheoryLab,
            })
            .await
            .unwrap();
        let app = init_app!(storage);
        let components_uri = format!("/api/v1/courses/{}/components", course.id);

        let (status, body) = send!(
            app,
            TestRequest::post().uri(&components_uri).set_json(json!({
                "name": "Lab Record",
                "category": "lab",
                "max_marks": 30,
                "sort_order": 2
            }))
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["weightage"].as_f64(), Some(1.0));
        let lab_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send!(
            app,
            TestRequest::post().uri(&components_uri).set_json(json!({
                "name": "MSE1",
                "category": "Theory",
                "max_marks": 20,
                "sort_order": 1
            }))
        );
        assert_eq!(status, StatusCode::CREATED);

        // 按 sort_order 排序
        let (status, body) = send!(app, TestRequest::get().uri(&components_uri));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "MSE1");
        assert_eq!(body["data"][0]["category"], "theory");
        assert_eq!(body["data"][1]["name"], "Lab Record");

        // 同名冲突
        let (status, body) = send!(
            app,
            TestRequest::post().uri(&components_uri).set_json(json!({
                "name": " MSE1 ",
                "category": "theory",
                "max_marks": 20
            }))
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 3002);

        // 满分与权重必须为正
        let (status, body) = send!(
            app,
            TestRequest::post().uri(&components_uri).set_json(json!({
                "name": "MSE2",
                "category": "theory",
                "max_marks": 0
            }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 3001);

        let (status, body) = send!(
            app,
            TestRequest::post().uri(&components_uri).set_json(json!({
                "name": "MSE2",
                "category": "theory",
                "max_marks": 20,
                "weightage": -2
            }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 3001);

        // 未知类别在反序列化时拒绝
        let (status, _) = send!(
            app,
            TestRequest::post().uri(&components_uri).set_json(json!({
                "name": "Workshop",
                "category": "practical",
                "max_marks": 10
            }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send!(
            app,
            TestRequest::put()
                .uri(&format!("/api/v1/components/{lab_id}"))
                .set_json(json!({ "name": "Lab Internal", "weightage": 3 }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Lab Internal");
        assert_eq!(body["data"]["max_marks"].as_f64(), Some(30.0));
        assert_eq!(body["data"]["weightage"].as_f64(), Some(3.0));

        let (status, _) = send!(
            app,
            TestRequest::delete().uri(&format!("/api/v1/components/{lab_id}"))
        );
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send!(
            app,
            TestRequest::delete().uri(&format!("/api/v1/components/{lab_id}"))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 3000);
    }

    #[actix_web::test]
    async fn test_lowering_max_marks_below_recorded_mark_is_rejected() {
        let storage = memory_storage().await;
        let course = storage
            .create_course(CreateCourseRequest {
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
                    category: crate::models::test_components::entities::ComponentCategory::Theory,
                    max_marks: 20.0,
                    weightage: None,
                    sort_order: None,
                },
            )
            .await
            .unwrap();
        let student = storage
            .create_student(CreateStudentRequest {
                roll_number: "21CS001".to_string(),
                name: "Asha".to_string(),
                email: None,
                department: None,
            })
            .await
            .unwrap();
        let enrollment = storage
            .create_enrollment(CreateEnrollmentRequest {
                student_id: student.id,
                course_id: course.id,
                term: "2025-ODD".to_string(),
            })
            .await
            .unwrap();
        storage
            .upsert_student_marks(
                enrollment.id,
                &[MarkEntry {
                    test_component_id: component.id,
                    marks_obtained: Some(17.0),
                }],
            )
            .await
            .unwrap();
        assert_eq!(
            storage.max_recorded_mark(component.id).await.unwrap(),
            Some(17.0)
        );

        let app = init_app!(storage);
        let uri = format!("/api/v1/components/{}", component.id);

        let (status, body) = send!(
            app,
            TestRequest::put()
                .uri(&uri)
                .set_json(json!({ "max_marks": 15 }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 3001);

        let (status, body) = send!(
            app,
            TestRequest::put()
                .uri(&uri)
                .set_json(json!({ "max_marks": 17 }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["max_marks"].as_f64(), Some(17.0));
    }
}
