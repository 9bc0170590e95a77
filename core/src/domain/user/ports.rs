use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        entities::{Document, PageResult, QuerySpec},
        ports::Collection,
    },
    user::{
        entities::User,
        value_objects::{CreateUserInput, UpdateUserInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait UserService: Send + Sync {
    fn get_users(
        &self,
        spec: QuerySpec,
    ) -> impl Future<Output = Result<PageResult<Document>, CoreError>> + Send;

    fn get_user(&self, id: Uuid) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn create_user(
        &self,
        input: CreateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn update_user(
        &self,
        id: Uuid,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Removes the user and the reviews they wrote.
    fn delete_user(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait UserRepository: Collection {
    fn get_user_by_id(&self, id: Uuid)
    -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Fails with `CoreError::DuplicateField` when the email is taken.
    fn create_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn update_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Removes the user with their reviews as one unit, returning how many reviews went.
    fn delete_user(&self, id: Uuid) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn delete_all(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}
