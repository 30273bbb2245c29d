//! 学生成绩存储操作

use super::SeaOrmStorage;
use crate::entity::student_marks::{ActiveModel, Column, Entity as StudentMarks};
use crate::errors::{ErpError, Result};
use crate::models::marks::{entities::StudentMark, requests::MarkEntry};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出选课记录的全部成绩
    pub async fn list_marks_by_enrollment_impl(
        &self,
        enrollment_id: i64,
    ) -> Result<Vec<StudentMark>> {
        let result = StudentMarks::find()
            .filter(Column::EnrollmentId.eq(enrollment_id))
            .order_by_asc(Column::TestComponentId)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student_mark()).collect())
    }

    /// 批量列出多个选课记录的成绩
    pub async fn list_marks_by_enrollments_impl(
        &self,
        enrollment_ids: &[i64],
    ) -> Result<Vec<StudentMark>> {
        if enrollment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = StudentMarks::find()
            .filter(Column::EnrollmentId.is_in(enrollment_ids.iter().copied()))
            .order_by_asc(Column::EnrollmentId)
            .order_by_asc(Column::TestComponentId)
            .all(&self.db)
            .await
            .map_err(|e| ErpError::database_operation(format!("批量查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student_mark()).collect())
    }

    /// 在同一事务内写入成绩：已有记录则更新，否则插入
    pub async fn upsert_student_marks_impl(
        &self,
        enrollment_id: i64,
        entries: &[MarkEntry],
    ) -> Result<Vec<StudentMark>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ErpError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(entries.len());

        for entry in entries {
            let existing = StudentMarks::find()
                .filter(Column::EnrollmentId.eq(enrollment_id))
                .filter(Column::TestComponentId.eq(entry.test_component_id))
                .one(&txn)
                .await
                .map_err(|e| ErpError::database_operation(format!("查询成绩失败: {e}")))?;

            let model = match existing {
                Some(existing) => {
                    let mut model: ActiveModel = existing.into();
                    model.marks_obtained = Set(entry.marks_obtained);
                    model.updated_at = Set(now);
                    model
                        .update(&txn)
                        .await
                        .map_err(|e| ErpError::database_operation(format!("更新成绩失败: {e}")))?
                }
                None => ActiveModel {
                    enrollment_id: Set(enrollment_id),
                    test_component_id: Set(entry.test_component_id),
                    marks_obtained: Set(entry.marks_obtained),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| ErpError::database_operation(format!("写入成绩失败: {e}")))?,
            };

            saved.push(model.into_student_mark());
        }

        txn.commit()
            .await
            .map_err(|e| ErpError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }
}
