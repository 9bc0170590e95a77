pub use super::bootcamps::Entity as Bootcamps;
pub use super::courses::Entity as Courses;
pub use super::reviews::Entity as Reviews;
pub use super::users::Entity as Users;
