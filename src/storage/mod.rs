use std::sync::Arc;

use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{entities::Enrollment, requests::CreateEnrollmentRequest},
    marks::{entities::StudentMark, requests::MarkEntry},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery},
        responses::StudentListResponse,
    },
    test_components::{
        entities::TestComponent,
        requests::{CreateTestComponentRequest, UpdateTestComponentRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程代码获取课程
    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（级联删除考核项、选课和成绩）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生
    async fn get_student_by_roll_number(&self, roll_number: &str) -> Result<Option<Student>>;
    // 批量获取学生
    async fn list_students_by_ids(&self, student_ids: &[i64]) -> Result<Vec<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;

    /// 选课管理方法
    // 创建选课记录
    async fn create_enrollment(&self, enrollment: CreateEnrollmentRequest) -> Result<Enrollment>;
    // 通过ID获取选课记录
    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>>;
    // 查找学生在某学期的某门课程选课记录
    async fn find_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
        term: &str,
    ) -> Result<Option<Enrollment>>;
    // 列出学生的全部选课
    async fn list_enrollments_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>>;
    // 列出课程的选课（可按学期过滤）
    async fn list_enrollments_by_course(
        &self,
        course_id: i64,
        term: Option<&str>,
    ) -> Result<Vec<Enrollment>>;
    // 删除选课记录（级联删除成绩）
    async fn delete_enrollment(&self, enrollment_id: i64) -> Result<bool>;

    /// 考核项管理方法
    // 创建考核项
    async fn create_test_component(
        &self,
        course_id: i64,
        component: CreateTestComponentRequest,
    ) -> Result<TestComponent>;
    // 通过ID获取考核项
    async fn get_test_component_by_id(&self, component_id: i64) -> Result<Option<TestComponent>>;
    // 列出课程的考核项（按 sort_order, id 排序）
    async fn list_test_components_by_course(&self, course_id: i64) -> Result<Vec<TestComponent>>;
    // 更新考核项
    async fn update_test_component(
        &self,
        component_id: i64,
        update: UpdateTestComponentRequest,
    ) -> Result<Option<TestComponent>>;
    // 删除考核项（级联删除成绩）
    async fn delete_test_component(&self, component_id: i64) -> Result<bool>;
    // 考核项已录入的最高成绩
    async fn max_recorded_mark(&self, component_id: i64) -> Result<Option<f64>>;

    /// 成绩管理方法
    // 列出选课记录的成绩
    async fn list_marks_by_enrollment(&self, enrollment_id: i64) -> Result<Vec<StudentMark>>;
    // 批量列出多个选课记录的成绩
    async fn list_marks_by_enrollments(&self, enrollment_ids: &[i64]) -> Result<Vec<StudentMark>>;
    // 写入成绩（同一事务内按 (选课, 考核项) 插入或更新）
    async fn upsert_student_marks(
        &self,
        enrollment_id: i64,
        entries: &[MarkEntry],
    ) -> Result<Vec<StudentMark>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
