use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    bootcamp::{
        entities::{Bootcamp, Location},
        ports::{BootcampRepository, BootcampService},
        value_objects::{CreateBootcampInput, UpdateBootcampInput},
    },
    common::{entities::app_errors::CoreError, services::Service},
    course::ports::CourseRepository,
    geo::{
        ports::Geocoder,
        services::{geocode_first, radius_filter},
    },
    query::{
        entities::{Document, FindQuery, PageResult, Pagination, QuerySpec, SortOrder},
        ports::Collection,
    },
    review::ports::ReviewRepository,
    user::ports::UserRepository,
};

/// Newest first unless the request sorts explicitly.
pub const DEFAULT_BOOTCAMP_SORT: &str = "-createdAt";

impl<B, C, R, U, G> BootcampService for Service<B, C, R, U, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    R: ReviewRepository,
    U: UserRepository,
    G: Geocoder,
{
    async fn get_bootcamps(&self, spec: QuerySpec) -> Result<PageResult<Document>, CoreError> {
        self.query
            .execute(
                &self.bootcamp_repository,
                &spec,
                &SortOrder::from_string(DEFAULT_BOOTCAMP_SORT),
                None,
            )
            .await
    }

    async fn get_bootcamp(&self, id: Uuid) -> Result<Bootcamp, CoreError> {
        self.bootcamp_repository
            .get_bootcamp_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_bootcamp(&self, input: CreateBootcampInput) -> Result<Bootcamp, CoreError> {
        let location = Location::from(geocode_first(&self.geocoder, &input.address).await?);
        let bootcamp = Bootcamp::new(input, location);

        let created = self.bootcamp_repository.create_bootcamp(bootcamp).await?;
        info!(id = %created.id, slug = %created.slug, "bootcamp created");

        Ok(created)
    }

    #[instrument(skip(self, input))]
    async fn update_bootcamp(
        &self,
        id: Uuid,
        input: UpdateBootcampInput,
    ) -> Result<Bootcamp, CoreError> {
        let mut bootcamp = self.get_bootcamp(id).await?;

        let relocated = input
            .address
            .as_ref()
            .is_some_and(|address| *address != bootcamp.address);

        bootcamp.update(input);

        if relocated {
            let result = geocode_first(&self.geocoder, &bootcamp.address).await?;
            bootcamp.location = Some(Location::from(result));
        }

        self.bootcamp_repository.update_bootcamp(bootcamp).await
    }

    #[instrument(skip(self))]
    async fn delete_bootcamp(&self, id: Uuid) -> Result<(), CoreError> {
        self.get_bootcamp(id).await?;

        let removed = self.bootcamp_repository.delete_bootcamp(id).await?;

        info!(
            courses = removed.courses,
            reviews = removed.reviews,
            "bootcamp deleted with its courses and reviews"
        );
        Ok(())
    }

    async fn get_bootcamps_in_radius(
        &self,
        zipcode: String,
        distance: f64,
    ) -> Result<PageResult<Document>, CoreError> {
        let filter = radius_filter(&zipcode, distance, &self.geocoder).await?;
        let items = self.bootcamp_repository.find(FindQuery::new(filter)).await?;

        Ok(PageResult::new(items, Pagination::default()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{
        bootcamp::entities::Career,
        geo::{entities::GeocodeResult, ports::MockGeocoder},
        query::entities::FilterExpression,
        review::entities::Review,
    };
    use crate::infrastructure::memory::MemoryService;

    fn geocoded(latitude: f64, longitude: f64, zipcode: &str) -> GeocodeResult {
        GeocodeResult {
            latitude,
            longitude,
            formatted_address: format!("Somewhere, {zipcode}"),
            street: None,
            city: None,
            state: None,
            zipcode: Some(zipcode.to_string()),
            country: Some("US".to_string()),
        }
    }

    fn service(geocoder: MockGeocoder) -> MemoryService<MockGeocoder> {
        MemoryService::in_memory(geocoder, Default::default())
    }

    fn input(name: &str, address: &str) -> CreateBootcampInput {
        CreateBootcampInput {
            name: name.to_string(),
            description: format!("{name} description"),
            address: address.to_string(),
            careers: vec![Career::WebDevelopment, Career::UiUx],
            ..Default::default()
        }
    }

    fn boston_geocoder() -> MockGeocoder {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().returning(|address| {
            let result = if address.contains("02215") {
                geocoded(42.35, -71.1, "02215")
            } else {
                geocoded(40.71, -74.0, "10001")
            };
            Box::pin(std::future::ready(Ok(vec![result])))
        });
        geocoder
    }

    #[tokio::test]
    async fn test_create_bootcamp_geocodes_address_and_slugs_name() {
        let service = service(boston_geocoder());

        let bootcamp = service
            .create_bootcamp(input("Devworks Bootcamp", "233 Bay State Rd Boston MA 02215"))
            .await
            .unwrap();

        assert_eq!(bootcamp.slug, "devworks-bootcamp");
        let location = bootcamp.location.unwrap();
        assert_eq!(location.coordinates, [-71.1, 42.35]);
        assert_eq!(location.zipcode.as_deref(), Some("02215"));
    }

    #[tokio::test]
    async fn test_create_bootcamp_fails_when_address_cannot_be_geocoded() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .returning(|_| Box::pin(std::future::ready(Ok(Vec::new()))));
        let service = service(geocoder);

        let err = service
            .create_bootcamp(input("Nowhere Bootcamp", "nowhere"))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::Geocode("nowhere".to_string()));
        assert!(service.bootcamp_repository.is_empty());
    }

    #[tokio::test]
    async fn test_create_bootcamp_rejects_duplicate_name() {
        let service = service(boston_geocoder());
        service
            .create_bootcamp(input("Devworks Bootcamp", "02215"))
            .await
            .unwrap();

        let err = service
            .create_bootcamp(input("Devworks Bootcamp", "10001"))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::DuplicateField);
    }

    #[tokio::test]
    async fn test_get_bootcamp_missing_is_not_found() {
        let service = service(MockGeocoder::new());
        let id = Uuid::new_v4();

        let err = service.get_bootcamp(id).await.unwrap_err();
        assert_eq!(err, CoreError::NotFound(id.to_string()));
    }

    #[tokio::test]
    async fn test_update_bootcamp_regeocodes_only_on_address_change() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_geocode()
            .times(2)
            .returning(|address| {
                let result = if address.contains("02215") {
                    geocoded(42.35, -71.1, "02215")
                } else {
                    geocoded(40.71, -74.0, "10001")
                };
                Box::pin(std::future::ready(Ok(vec![result])))
            });
        let service = service(geocoder);
        let created = service
            .create_bootcamp(input("Devworks Bootcamp", "Boston 02215"))
            .await
            .unwrap();

        let renamed = service
            .update_bootcamp(
                created.id,
                UpdateBootcampInput {
                    name: Some("Devcentral Bootcamp".to_string()),
                    address: Some("Boston 02215".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.slug, "devcentral-bootcamp");

        let moved = service
            .update_bootcamp(
                created.id,
                UpdateBootcampInput {
                    address: Some("New York 10001".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(moved.location.unwrap().zipcode.as_deref(), Some("10001"));
        assert_eq!(
            service.get_bootcamp(created.id).await.unwrap().address,
            "New York 10001"
        );
    }

    #[tokio::test]
    async fn test_delete_bootcamp_cascades_to_courses_and_reviews() {
        let service = service(boston_geocoder());
        let kept = service
            .create_bootcamp(input("Kept Bootcamp", "02215"))
            .await
            .unwrap();
        let doomed = service
            .create_bootcamp(input("Doomed Bootcamp", "10001"))
            .await
            .unwrap();

        for (i, bootcamp) in [&doomed, &doomed, &kept].into_iter().enumerate() {
            service
                .course_repository
                .insert_value(json!({
                    "id": Uuid::new_v4().to_string(),
                    "title": format!("Course {i}"),
                    "tuition": 1000,
                    "bootcampId": bootcamp.id.to_string(),
                }))
                .unwrap();
        }
        let user_id = Uuid::new_v4();
        for bootcamp in [&doomed, &kept] {
            let review = Review::new(
                bootcamp.id,
                user_id,
                "Great".to_string(),
                "Learned a lot".to_string(),
                8,
            );
            service
                .review_repository
                .insert_value(serde_json::to_value(review).unwrap())
                .unwrap();
        }

        service.delete_bootcamp(doomed.id).await.unwrap();

        let remaining = |collection: Vec<Document>| -> Vec<Value> {
            collection
                .into_iter()
                .filter_map(|d| d.get("bootcampId").cloned())
                .collect()
        };
        let courses = service
            .course_repository
            .find(FindQuery::new(FilterExpression::new()))
            .await
            .unwrap();
        let reviews = service
            .review_repository
            .find(FindQuery::new(FilterExpression::new()))
            .await
            .unwrap();

        assert_eq!(remaining(courses), vec![json!(kept.id.to_string())]);
        assert_eq!(remaining(reviews), vec![json!(kept.id.to_string())]);
        assert_eq!(
            service.get_bootcamp(doomed.id).await.unwrap_err(),
            CoreError::NotFound(doomed.id.to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_missing_bootcamp_leaves_children_alone() {
        let service = service(MockGeocoder::new());
        let id = Uuid::new_v4();
        service
            .course_repository
            .insert_value(json!({"id": "c-1", "bootcampId": id.to_string()}))
            .unwrap();

        let err = service.delete_bootcamp(id).await.unwrap_err();

        assert_eq!(err, CoreError::NotFound(id.to_string()));
        assert_eq!(service.course_repository.len(), 1);
    }

    #[tokio::test]
    async fn test_get_bootcamps_in_radius_returns_only_nearby() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_geocode().returning(|address| {
            let result = match address {
                "02118" => geocoded(42.34, -71.07, "02118"),
                a if a.contains("02215") => geocoded(42.35, -71.1, "02215"),
                _ => geocoded(40.71, -74.0, "10001"),
            };
            Box::pin(std::future::ready(Ok(vec![result])))
        });
        let service = service(geocoder);
        let boston = service
            .create_bootcamp(input("Boston Bootcamp", "Boston 02215"))
            .await
            .unwrap();
        service
            .create_bootcamp(input("New York Bootcamp", "New York 10001"))
            .await
            .unwrap();

        let result = service
            .get_bootcamps_in_radius("02118".to_string(), 10.0)
            .await
            .unwrap();

        assert_eq!(result.count, 1);
        assert_eq!(result.items[0]["id"], json!(boston.id.to_string()));
        assert_eq!(result.pagination, Pagination::default());
    }

    #[tokio::test]
    async fn test_get_bootcamps_defaults_to_newest_first() {
        let service = service(MockGeocoder::new());
        for (id, created_at) in [
            ("a", "2020-01-01T00:00:00Z"),
            ("b", "2020-03-01T00:00:00Z"),
            ("c", "2020-02-01T00:00:00Z"),
        ] {
            service
                .bootcamp_repository
                .insert_value(json!({"id": id, "createdAt": created_at}))
                .unwrap();
        }

        let page = service.get_bootcamps(QuerySpec::new()).await.unwrap();

        let ids: Vec<&str> = page
            .items
            .iter()
            .filter_map(|d| d["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
