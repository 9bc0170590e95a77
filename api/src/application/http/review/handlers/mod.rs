pub mod get_reviews;
