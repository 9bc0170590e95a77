use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{
    bootcamp::ports::BootcampRepository,
    common::{entities::app_errors::CoreError, services::Service},
    course::{
        entities::{BootcampSummary, Course, CourseDetails, average_cost},
        ports::{CourseRepository, CourseService},
        value_objects::{CreateCourseInput, UpdateCourseInput},
    },
    geo::ports::Geocoder,
    query::{
        entities::{
            Document, FilterExpression, ID_FIELD, PageResult, QuerySpec, Relation, SortOrder,
        },
        ports::{Collection, Scoped},
    },
    review::ports::ReviewRepository,
    user::ports::UserRepository,
};

/// Field linking courses and reviews to their bootcamp.
pub const BOOTCAMP_ID_FIELD: &str = "bootcampId";

/// Relation inlined into course and review listings.
pub fn bootcamp_relation() -> Relation {
    Relation::new("bootcamp").select("name description")
}

impl<B, C, R, U, G> Service<B, C, R, U, G>
where
    B: BootcampRepository,
    C: CourseRepository,
{
    /// Recompute the bootcamp's average cost from its remaining courses.
    async fn refresh_average_cost(&self, bootcamp_id: Uuid) -> Result<(), CoreError> {
        let average = self
            .course_repository
            .average_tuition(bootcamp_id)
            .await?
            .map(average_cost);

        debug!(%bootcamp_id, ?average, "refreshing bootcamp average cost");

        self.bootcamp_repository
            .set_average_cost(bootcamp_id, average)
            .await
    }

    pub(crate) async fn ensure_bootcamp(&self, bootcamp_id: Uuid) -> Result<(), CoreError> {
        let by_id = FilterExpression::new().equals(ID_FIELD, bootcamp_id.to_string());

        match self.bootcamp_repository.count(&by_id).await? {
            0 => Err(CoreError::NotFound(bootcamp_id.to_string())),
            _ => Ok(()),
        }
    }
}

impl<B, C, R, U, G> CourseService for Service<B, C, R, U, G>
where
    B: BootcampRepository,
    C: CourseRepository,
    R: ReviewRepository,
    U: UserRepository,
    G: Geocoder,
{
    async fn get_courses(
        &self,
        spec: QuerySpec,
        bootcamp_id: Option<Uuid>,
    ) -> Result<PageResult<Document>, CoreError> {
        let relation = bootcamp_relation();
        let default_sort = SortOrder::default();

        match bootcamp_id {
            Some(bootcamp_id) => {
                self.ensure_bootcamp(bootcamp_id).await?;
                let scoped = Scoped::new(
                    &self.course_repository,
                    FilterExpression::new().equals(BOOTCAMP_ID_FIELD, bootcamp_id.to_string()),
                );
                self.query
                    .execute(&scoped, &spec, &default_sort, Some(&relation))
                    .await
            }
            None => {
                self.query
                    .execute(
                        &self.course_repository,
                        &spec,
                        &default_sort,
                        Some(&relation),
                    )
                    .await
            }
        }
    }

    async fn get_course(&self, id: Uuid) -> Result<CourseDetails, CoreError> {
        let course = self
            .course_repository
            .get_course_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let bootcamp = self
            .bootcamp_repository
            .get_bootcamp_by_id(course.bootcamp_id)
            .await?
            .map(|bootcamp| BootcampSummary {
                id: bootcamp.id,
                name: bootcamp.name,
                description: bootcamp.description,
            });

        Ok(CourseDetails { course, bootcamp })
    }

    #[instrument(skip(self, input))]
    async fn add_course(
        &self,
        bootcamp_id: Uuid,
        input: CreateCourseInput,
    ) -> Result<Course, CoreError> {
        self.ensure_bootcamp(bootcamp_id).await?;

        let course = self
            .course_repository
            .create_course(Course::new(bootcamp_id, input))
            .await?;

        self.refresh_average_cost(bootcamp_id).await?;
        Ok(course)
    }

    #[instrument(skip(self, input))]
    async fn update_course(&self, id: Uuid, input: UpdateCourseInput) -> Result<Course, CoreError> {
        let mut course = self
            .course_repository
            .get_course_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        course.update(input);

        let course = self.course_repository.update_course(course).await?;
        self.refresh_average_cost(course.bootcamp_id).await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: Uuid) -> Result<(), CoreError> {
        let course = self
            .course_repository
            .get_course_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        self.course_repository.delete_course(id).await?;
        self.refresh_average_cost(course.bootcamp_id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        bootcamp::entities::Bootcamp, course::entities::MinimumSkill, geo::ports::MockGeocoder,
    };
    use crate::infrastructure::memory::MemoryService;

    fn service() -> MemoryService<MockGeocoder> {
        MemoryService::in_memory(MockGeocoder::new(), Default::default())
    }

    async fn seed_bootcamp(service: &MemoryService<MockGeocoder>, name: &str) -> Bootcamp {
        let bootcamp: Bootcamp = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "name": name,
            "slug": name.to_lowercase(),
            "description": format!("{name} description"),
            "website": null,
            "phone": null,
            "email": null,
            "address": "Boston MA",
            "location": null,
            "careers": ["Web Development"],
            "averageRating": null,
            "averageCost": null,
        }))
        .unwrap();

        service
            .bootcamp_repository
            .create_bootcamp(bootcamp)
            .await
            .unwrap()
    }

    fn course_input(title: &str, tuition: i32) -> CreateCourseInput {
        CreateCourseInput {
            title: title.to_string(),
            description: format!("{title} description"),
            weeks: 8,
            tuition,
            minimum_skill: MinimumSkill::Beginner,
            scholarship_available: false,
        }
    }

    async fn average_cost_of(service: &MemoryService<MockGeocoder>, id: Uuid) -> Option<i32> {
        service
            .bootcamp_repository
            .get_bootcamp_by_id(id)
            .await
            .unwrap()
            .unwrap()
            .average_cost
    }

    #[tokio::test]
    async fn test_average_cost_follows_course_changes() {
        let service = service();
        let bootcamp = seed_bootcamp(&service, "Devworks").await;

        let first = service
            .add_course(bootcamp.id, course_input("Front End", 8000))
            .await
            .unwrap();
        assert_eq!(average_cost_of(&service, bootcamp.id).await, Some(8000));

        service
            .add_course(bootcamp.id, course_input("Back End", 10001))
            .await
            .unwrap();
        // (8000 + 10001) / 2 = 9000.5 -> 9010
        assert_eq!(average_cost_of(&service, bootcamp.id).await, Some(9010));

        service
            .update_course(
                first.id,
                UpdateCourseInput {
                    tuition: Some(12001),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(average_cost_of(&service, bootcamp.id).await, Some(11010));

        service.delete_course(first.id).await.unwrap();
        assert_eq!(average_cost_of(&service, bootcamp.id).await, Some(10010));
    }

    #[tokio::test]
    async fn test_average_cost_cleared_when_last_course_goes() {
        let service = service();
        let bootcamp = seed_bootcamp(&service, "Devworks").await;
        let course = service
            .add_course(bootcamp.id, course_input("Only", 5000))
            .await
            .unwrap();

        service.delete_course(course.id).await.unwrap();

        assert_eq!(average_cost_of(&service, bootcamp.id).await, None);
    }

    #[tokio::test]
    async fn test_add_course_to_missing_bootcamp_is_not_found() {
        let service = service();
        let id = Uuid::new_v4();

        let err = service
            .add_course(id, course_input("Orphan", 1000))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::NotFound(id.to_string()));
        assert!(service.course_repository.is_empty());
    }

    #[tokio::test]
    async fn test_nested_listing_is_scoped_and_expands_bootcamp() {
        let service = service();
        let devworks = seed_bootcamp(&service, "Devworks").await;
        let moderntech = seed_bootcamp(&service, "ModernTech").await;
        for (bootcamp, title) in [(&devworks, "A"), (&moderntech, "B"), (&devworks, "C")] {
            service
                .add_course(bootcamp.id, course_input(title, 1000))
                .await
                .unwrap();
        }

        let page = service
            .get_courses(
                QuerySpec::parse(&format!("sort=title&bootcampId={}", moderntech.id)),
                Some(devworks.id),
            )
            .await
            .unwrap();

        let titles: Vec<_> = page.items.iter().map(|d| d["title"].clone()).collect();
        assert_eq!(titles, vec![json!("A"), json!("C")]);
        assert_eq!(
            page.items[0]["bootcamp"],
            json!({
                "id": devworks.id.to_string(),
                "name": "Devworks",
                "description": "Devworks description",
            })
        );
    }

    #[tokio::test]
    async fn test_listing_all_courses_filters_by_tuition() {
        let service = service();
        let bootcamp = seed_bootcamp(&service, "Devworks").await;
        for (title, tuition) in [("Cheap", 1000), ("Mid", 5000), ("Dear", 9000)] {
            service
                .add_course(bootcamp.id, course_input(title, tuition))
                .await
                .unwrap();
        }

        let page = service
            .get_courses(
                QuerySpec::parse("tuition[gte]=5000&sort=-tuition&select=title,bootcampId"),
                None,
            )
            .await
            .unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.items[0]["title"], "Dear");
        assert!(page.items[0].get("tuition").is_none());
        assert_eq!(page.items[0]["bootcamp"]["name"], "Devworks");
    }

    #[tokio::test]
    async fn test_nested_listing_for_missing_bootcamp_is_not_found() {
        let service = service();
        let id = Uuid::new_v4();

        let err = service
            .get_courses(QuerySpec::new(), Some(id))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::NotFound(id.to_string()));
    }

    #[tokio::test]
    async fn test_get_course_inlines_bootcamp_summary() {
        let service = service();
        let bootcamp = seed_bootcamp(&service, "Devworks").await;
        let course = service
            .add_course(bootcamp.id, course_input("Front End", 8000))
            .await
            .unwrap();

        let details = service.get_course(course.id).await.unwrap();

        assert_eq!(details.course.id, course.id);
        assert_eq!(
            details.bootcamp,
            Some(BootcampSummary {
                id: bootcamp.id,
                name: "Devworks".to_string(),
                description: "Devworks description".to_string(),
            })
        );
    }
}
