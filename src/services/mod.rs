pub mod courses;
pub mod enrollments;
pub mod marks;
pub mod students;
pub mod system;
pub mod test_components;

pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use marks::MarksService;
pub use students::StudentService;
pub use system::SystemService;
pub use test_components::TestComponentService;
