//! 学生成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub enrollment_id: i64,
    pub test_component_id: i64,
    pub marks_obtained: Option<f64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollment,
    #[sea_orm(
        belongs_to = "super::test_components::Entity",
        from = "Column::TestComponentId",
        to = "super::test_components::Column::Id"
    )]
    TestComponent,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl Related<super::test_components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestComponent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_mark(self) -> crate::models::marks::entities::StudentMark {
        use crate::models::marks::entities::StudentMark;
        use chrono::{DateTime, Utc};

        StudentMark {
            id: self.id,
            enrollment_id: self.enrollment_id,
            test_component_id: self.test_component_id,
            marks_obtained: self.marks_obtained,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
