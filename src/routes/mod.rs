pub mod courses;

pub mod students;

pub mod enrollments;

pub mod test_components;

pub mod system;

pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use students::configure_students_routes;
pub use system::configure_system_routes;
pub use test_components::configure_components_routes;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    pub(crate) async fn memory_storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::in_memory().await)
    }

    /// 以给定存储构建完整路由的测试服务
    macro_rules! init_app {
        ($storage:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data(actix_web::web::Data::new($storage.clone()))
                    .app_data(
                        actix_web::web::JsonConfig::default()
                            .error_handler(crate::utils::json_error_handler),
                    )
                    .app_data(
                        actix_web::web::QueryConfig::default()
                            .error_handler(crate::utils::query_error_handler),
                    )
                    .app_data(
                        actix_web::web::PathConfig::default()
                            .error_handler(crate::utils::path_error_handler),
                    )
                    .configure(crate::routes::configure_courses_routes)
                    .configure(crate::routes::configure_components_routes)
                    .configure(crate::routes::configure_students_routes)
                    .configure(crate::routes::configure_enrollments_routes)
                    .configure(crate::routes::configure_system_routes),
            )
            .await
        };
    }

    /// 发送请求并解析 JSON 响应，返回 (状态码, 响应体)
    macro_rules! send {
        ($app:expr, $req:expr) => {{
            let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
            let status = resp.status();
            let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
            (status, body)
        }};
    }

    pub(crate) use init_app;
    pub(crate) use send;
}
