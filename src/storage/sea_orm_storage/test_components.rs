//! 考核项存储操作

use super::SeaOrmStorage;
use crate::entity::student_marks::{Column as MarkColumn, Entity as StudentMarks};
use crate::entity::test_components::{ActiveModel, Column, Entity as TestComponents};
use crate::errors::{ErpError, Result};
use crate::models::test_components::{
    entities::TestComponent,
    requests::{CreateTestComponentRequest, UpdateTestComponentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建考核项
    pub async fn create_test_component_impl(
        &self,
        course_id: i64,
        req: CreateTestComponentRequest,
    ) -> Result<TestComponent> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            name: Set(req.name),
            category: Set(req.category.to_string()),
            max_marks: Set(req.max_marks),
            weightage: Set(req.weightage.unwrap_or(1.0)),
            sort_order: Set(req.sort_order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ErpError::from_db_write("创建考核项失败", e))?;

        Ok(result.into_test_component())
    }

    /// 通过 ID 获取考核项
    pub async fn get_test_component_by_id_impl(
        &self,
        component_id: i64,
    ) -> Result<Option<TestComponent>> {
        let result = TestComponents::find_by_id(component_id)
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("查询考核项失败: {e}")))?;

        Ok(result.map(|m| m.into_test_component()))
    }

    /// 列出课程的考核项
    pub async fn list_test_components_by_course_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<TestComponent>> {
        let result = TestComponents::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("查询考核项列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_test_component()).collect())
    }

    /// 更新考核项
    pub async fn update_test_component_impl(
        &self,
        component_id: i64,
        update: UpdateTestComponentRequest,
    ) -> Result<Option<TestComponent>> {
        if self
            .get_test_component_by_id_impl(component_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(component_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(category) = update.category {
            model.category = Set(category.to_string());
        }

        if let Some(max_marks) = update.max_marks {
            model.max_marks = Set(max_marks);
        }

        if let Some(weightage) = update.weightage {
            model.weightage = Set(weightage);
        }

        if let Some(sort_order) = update.sort_order {
            model.sort_order = Set(sort_order);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ErpError::from_db_write("更新考核项失败", e))?;

        self.get_test_component_by_id_impl(component_id).await
    }

    /// 删除考核项
    pub async fn delete_test_component_impl(&self, component_id: i64) -> Result<bool> {
        let result = TestComponents::delete_by_id(component_id)
            .exec(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("删除考核项失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 考核项已录入的最高成绩（无成绩时返回 None）
    pub async fn max_recorded_mark_impl(&self, component_id: i64) -> Result<Option<f64>> {
        let max = StudentMarks::find()
            .filter(MarkColumn::TestComponentId.eq(component_id))
            .select_only()
            .column_as(MarkColumn::MarksObtained.max(), "max_marks")
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("查询最高成绩失败: {e}")))?
            .flatten();

        Ok(max)
    }
}
