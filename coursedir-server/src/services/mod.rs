//! Business operations shared by the HTTP handlers and the seeder

pub mod courses;
pub mod users;

pub use courses::CourseService;
pub use users::UserService;
