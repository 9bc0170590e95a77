use uuid::Uuid;

use crate::domain::{
    bootcamp::ports::BootcampRepository,
    common::{entities::app_errors::CoreError, services::Service},
    course::{
        ports::CourseRepository,
        services::{BOOTCAMP_ID_FIELD, bootcamp_relation},
    },
    geo::ports::Geocoder,
    query::{
        entities::{Document, FilterExpression, PageResult, QuerySpec, SortOrder},
        ports::Scoped,
    },
    review::ports::{ReviewRepository, ReviewService},
    user::ports::UserRepository,
};

impl<B, C, R, U, G> ReviewService for Service<B, C, R, U, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    R: ReviewRepository,
    U: UserRepository,
    G: Geocoder,
{
    async fn get_reviews(
        &self,
        spec: QuerySpec,
        bootcamp_id: Option<Uuid>,
    ) -> Result<PageResult<Document>, CoreError> {
        let relation = bootcamp_relation();
        let default_sort = SortOrder::default();

        let Some(bootcamp_id) = bootcamp_id else {
            return self
                .query
                .execute(&self.review_repository, &spec, &default_sort, Some(&relation))
                .await;
        };

        self.ensure_bootcamp(bootcamp_id).await?;
        let scoped = Scoped::new(
            &self.review_repository,
            FilterExpression::new().equals(BOOTCAMP_ID_FIELD, bootcamp_id.to_string()),
        );

        self.query
            .execute(&scoped, &spec, &default_sort, Some(&relation))
            .await
    }
}
