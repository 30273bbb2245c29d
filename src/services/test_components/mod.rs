pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::test_components::requests::{
    CreateTestComponentRequest, UpdateTestComponentRequest,
};
use crate::storage::Storage;

pub struct TestComponentService {
    storage: Option<Arc<dyn Storage>>,
}

impl TestComponentService {
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

    // 课程的考核项列表
    pub async fn list_components(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_components(self, request, course_id).await
    }

    // 为课程新增考核项
    pub async fn create_component(
        &self,
        request: &HttpRequest,
        course_id: i64,
        component_data: CreateTestComponentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_component(self, request, course_id, component_data).await
    }

    // 修改考核项
    pub async fn update_component(
        &self,
        request: &HttpRequest,
        component_id: i64,
        update_data: UpdateTestComponentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_component(self, request, component_id, update_data).await
    }

    // 删除考核项
    pub async fn delete_component(
        &self,
        request: &HttpRequest,
        component_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_component(self, request, component_id).await
    }
}

/// 校验满分与权重：必须为有限正数
pub(crate) fn check_positive(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{field} must be a positive number, got {value}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_positive() {
        assert!(check_positive("max_marks", 20.0).is_ok());
        assert!(check_positive("max_marks", 0.0).is_err());
        assert!(check_positive("weightage", -1.0).is_err());
        assert!(check_positive("weightage", f64::NAN).is_err());
        assert!(check_positive("weightage", f64::INFINITY).is_err());
    }
}
