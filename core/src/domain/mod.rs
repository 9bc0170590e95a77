pub mod bootcamp;
pub mod common;
pub mod course;
pub mod geo;
pub mod query;
pub mod review;
pub mod user;
