use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    bootcamp::ports::BootcampRepository,
    common::{entities::app_errors::CoreError, services::Service},
    course::ports::CourseRepository,
    geo::ports::Geocoder,
    query::entities::{Document, PageResult, QuerySpec, SortOrder},
    review::ports::ReviewRepository,
    user::{
        entities::User,
        ports::{UserRepository, UserService},
        value_objects::{CreateUserInput, UpdateUserInput},
    },
};

impl<B, C, R, U, G> UserService for Service<B, C, R, U, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    R: ReviewRepository,
    U: UserRepository,
    G: Geocoder,
{
    async fn get_users(&self, spec: QuerySpec) -> Result<PageResult<Document>, CoreError> {
        self.query
            .execute(&self.user_repository, &spec, &SortOrder::default(), None)
            .await
    }

    async fn get_user(&self, id: Uuid) -> Result<User, CoreError> {
        self.user_repository
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, input))]
    async fn create_user(&self, input: CreateUserInput) -> Result<User, CoreError> {
        let user = self.user_repository.create_user(User::new(input)).await?;
        info!(id = %user.id, role = %user.role, "user created");
        Ok(user)
    }

    #[instrument(skip(self, input))]
    async fn update_user(&self, id: Uuid, input: UpdateUserInput) -> Result<User, CoreError> {
        let mut user = self.get_user(id).await?;
        user.update(input);
        self.user_repository.update_user(user).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: Uuid) -> Result<(), CoreError> {
        self.get_user(id).await?;

        let reviews = self.user_repository.delete_user(id).await?;

        info!(reviews, "user deleted with their reviews");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{geo::ports::MockGeocoder, query::ports::Collection, user::entities::Role};
    use crate::infrastructure::memory::MemoryService;

    fn service() -> MemoryService<MockGeocoder> {
        MemoryService::in_memory(MockGeocoder::new(), Default::default())
    }

    fn input(name: &str, email: &str) -> CreateUserInput {
        CreateUserInput {
            name: name.to_string(),
            email: email.to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_defaults_role_and_normalizes_email() {
        let service = service();

        let user = service
            .create_user(input("John Doe", " John@Gmail.com "))
            .await
            .unwrap();

        assert_eq!(user.role, Role::User);
        assert_eq!(user.email, "john@gmail.com");
        assert_eq!(service.get_user(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_on_create_and_update() {
        let service = service();
        service
            .create_user(input("John Doe", "john@gmail.com"))
            .await
            .unwrap();
        let jane = service
            .create_user(input("Jane Doe", "jane@gmail.com"))
            .await
            .unwrap();

        let err = service
            .create_user(input("Johnny", "JOHN@gmail.com"))
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::DuplicateField);

        let err = service
            .update_user(
                jane.id,
                UpdateUserInput {
                    email: Some("john@gmail.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::DuplicateField);
    }

    #[tokio::test]
    async fn test_update_user_role() {
        let service = service();
        let user = service
            .create_user(input("Kevin Smith", "kevin@gmail.com"))
            .await
            .unwrap();

        let updated = service
            .update_user(
                user.id,
                UpdateUserInput {
                    role: Some(Role::Publisher),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, Role::Publisher);
        assert_eq!(updated.email, "kevin@gmail.com");
    }

    #[tokio::test]
    async fn test_delete_user_removes_their_reviews() {
        let service = service();
        let user = service
            .create_user(input("Sara Smith", "sara@gmail.com"))
            .await
            .unwrap();
        let other = Uuid::new_v4();
        for author in [user.id, other, user.id] {
            service
                .review_repository
                .insert_value(json!({"id": Uuid::new_v4().to_string(), "userId": author.to_string()}))
                .unwrap();
        }

        service.delete_user(user.id).await.unwrap();

        let remaining = service
            .review_repository
            .count(&Default::default())
            .await
            .unwrap();
        assert_eq!(remaining, 1);
        assert_eq!(
            service.get_user(user.id).await.unwrap_err(),
            CoreError::NotFound(user.id.to_string())
        );
    }

    #[tokio::test]
    async fn test_get_users_lists_with_filter() {
        let service = service();
        for (name, email, role) in [
            ("A", "a@gmail.com", Role::User),
            ("B", "b@gmail.com", Role::Publisher),
            ("C", "c@gmail.com", Role::Publisher),
        ] {
            service
                .create_user(CreateUserInput {
                    name: name.to_string(),
                    email: email.to_string(),
                    role: Some(role),
                })
                .await
                .unwrap();
        }

        let page = service
            .get_users(QuerySpec::parse("role=publisher&sort=-name&limit=1"))
            .await
            .unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.items[0]["name"], "C");
        assert!(page.pagination.next.is_some());
    }
}
