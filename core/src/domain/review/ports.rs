use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        entities::{Document, PageResult, QuerySpec},
        ports::Collection,
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait ReviewService: Send + Sync {
    fn get_reviews(
        &self,
        spec: QuerySpec,
        bootcamp_id: Option<Uuid>,
    ) -> impl Future<Output = Result<PageResult<Document>, CoreError>> + Send;
}

/// Reviews are read-only over HTTP and removed together with their bootcamp or user.
pub trait ReviewRepository: Collection {
    fn delete_all(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}
