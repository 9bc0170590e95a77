pub mod prelude;

pub mod bootcamps;
pub mod courses;
pub mod reviews;
pub mod users;
