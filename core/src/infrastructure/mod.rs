pub mod bootcamp;
pub mod collection;
pub mod course;
pub mod db;
pub mod geocoder;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod review;
pub mod user;
