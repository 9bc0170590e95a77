use uuid::Uuid;

use crate::domain::{
    bootcamp::{
        entities::{Bootcamp, BootcampRemoval},
        value_objects::{CreateBootcampInput, UpdateBootcampInput},
    },
    common::entities::app_errors::CoreError,
    query::{
        entities::{Document, PageResult, QuerySpec},
        ports::Collection,
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait BootcampService: Send + Sync {
    fn get_bootcamps(
        &self,
        spec: QuerySpec,
    ) -> impl Future<Output = Result<PageResult<Document>, CoreError>> + Send;

    fn get_bootcamp(&self, id: Uuid) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    fn create_bootcamp(
        &self,
        input: CreateBootcampInput,
    ) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    fn update_bootcamp(
        &self,
        id: Uuid,
        input: UpdateBootcampInput,
    ) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    /// Removes the bootcamp together with its courses and reviews.
    fn delete_bootcamp(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Every bootcamp located within `distance` miles of `zipcode`, unpaginated.
    fn get_bootcamps_in_radius(
        &self,
        zipcode: String,
        distance: f64,
    ) -> impl Future<Output = Result<PageResult<Document>, CoreError>> + Send;
}

/// Storage for bootcamps. The [`Collection`] side serves listings, the rest is typed access.
pub trait BootcampRepository: Collection {
    fn get_bootcamp_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Bootcamp>, CoreError>> + Send;

    /// Fails with `CoreError::DuplicateField` when the name is taken.
    fn create_bootcamp(
        &self,
        bootcamp: Bootcamp,
    ) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    fn update_bootcamp(
        &self,
        bootcamp: Bootcamp,
    ) -> impl Future<Output = Result<Bootcamp, CoreError>> + Send;

    /// Removes the bootcamp with its courses and reviews as one unit; on failure nothing is
    /// removed. Fails with `CoreError::NotFound` when the bootcamp does not exist.
    fn delete_bootcamp(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<BootcampRemoval, CoreError>> + Send;

    fn set_average_cost(
        &self,
        id: Uuid,
        average_cost: Option<i32>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_all(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}
