use std::ops::Deref;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    bootcamp::{
        entities::{Bootcamp, BootcampRemoval},
        ports::BootcampRepository,
    },
    common::entities::app_errors::CoreError,
    course::{entities::Course, ports::CourseRepository, services::BOOTCAMP_ID_FIELD},
    query::{
        entities::{Document, FilterExpression, FindQuery, ID_FIELD},
        ports::Collection,
    },
    review::ports::ReviewRepository,
    user::{entities::User, ports::UserRepository},
};

use super::InMemoryCollection;

const USER_ID_FIELD: &str = "userId";

fn to_document<T: Serialize>(entity: &T) -> Result<Document, CoreError> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => {
            error!("Entity serialized to a non-object: {}", other);
            Err(CoreError::InternalServerError)
        }
        Err(e) => {
            error!("Failed to serialize entity: {}", e);
            Err(CoreError::InternalServerError)
        }
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, CoreError> {
    serde_json::from_value(Value::Object(document)).map_err(|e| {
        error!("Failed to deserialize stored document: {}", e);
        CoreError::InternalServerError
    })
}

fn by_id(id: Uuid) -> FilterExpression {
    FilterExpression::new().equals(ID_FIELD, id.to_string())
}

fn get_typed<T: DeserializeOwned>(
    collection: &InMemoryCollection,
    id: Uuid,
) -> Result<Option<T>, CoreError> {
    collection
        .get(&id.to_string())?
        .map(from_document)
        .transpose()
}

/// Fails with `DuplicateField` if another document already holds `value` in `field`.
fn ensure_unique(
    collection: &InMemoryCollection,
    id: Uuid,
    field: &str,
    value: &str,
) -> Result<(), CoreError> {
    let taken = collection
        .matching(&FilterExpression::new().equals(field, value))?
        .iter()
        .any(|document| document.get(ID_FIELD) != Some(&Value::String(id.to_string())));

    if taken {
        return Err(CoreError::DuplicateField);
    }
    Ok(())
}

fn replace<T: Serialize>(collection: &InMemoryCollection, id: Uuid, entity: &T) -> Result<(), CoreError> {
    if collection.replace(to_document(entity)?)? {
        Ok(())
    } else {
        Err(CoreError::NotFound(id.to_string()))
    }
}

fn remove_one(collection: &InMemoryCollection, id: Uuid) -> Result<(), CoreError> {
    match collection.remove(&by_id(id))? {
        0 => Err(CoreError::NotFound(id.to_string())),
        _ => Ok(()),
    }
}

macro_rules! in_memory_collection {
    ($name:ident) => {
        impl Deref for $name {
            type Target = InMemoryCollection;

            fn deref(&self) -> &Self::Target {
                &self.collection
            }
        }

        impl Collection for $name {
            async fn find(&self, query: FindQuery) -> Result<Vec<Document>, CoreError> {
                self.collection.find(query).await
            }

            async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
                self.collection.count(filter).await
            }
        }
    };
}

/// Also owns the course and review stores so a bootcamp can be removed with its dependents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBootcampRepository {
    collection: InMemoryCollection,
    courses: InMemoryCollection,
    reviews: InMemoryCollection,
}

in_memory_collection!(InMemoryBootcampRepository);

impl BootcampRepository for InMemoryBootcampRepository {
    async fn get_bootcamp_by_id(&self, id: Uuid) -> Result<Option<Bootcamp>, CoreError> {
        get_typed(&self.collection, id)
    }

    async fn create_bootcamp(&self, bootcamp: Bootcamp) -> Result<Bootcamp, CoreError> {
        ensure_unique(&self.collection, bootcamp.id, "name", &bootcamp.name)?;
        self.collection.insert(to_document(&bootcamp)?)?;
        Ok(bootcamp)
    }

    async fn update_bootcamp(&self, bootcamp: Bootcamp) -> Result<Bootcamp, CoreError> {
        ensure_unique(&self.collection, bootcamp.id, "name", &bootcamp.name)?;
        replace(&self.collection, bootcamp.id, &bootcamp)?;
        Ok(bootcamp)
    }

    async fn delete_bootcamp(&self, id: Uuid) -> Result<BootcampRemoval, CoreError> {
        if self.collection.get(&id.to_string())?.is_none() {
            return Err(CoreError::NotFound(id.to_string()));
        }

        let scope = FilterExpression::new().equals(BOOTCAMP_ID_FIELD, id.to_string());
        let removal = BootcampRemoval {
            courses: self.courses.remove(&scope)?,
            reviews: self.reviews.remove(&scope)?,
        };
        remove_one(&self.collection, id)?;

        Ok(removal)
    }

    async fn set_average_cost(&self, id: Uuid, average_cost: Option<i32>) -> Result<(), CoreError> {
        self.collection.update_where(&by_id(id), |document| {
            document.insert(
                "averageCost".to_string(),
                average_cost.map_or(Value::Null, Value::from),
            );
        })?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, CoreError> {
        self.collection.remove(&FilterExpression::new())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryCourseRepository {
    collection: InMemoryCollection,
}

impl InMemoryCourseRepository {
    /// Shares the course store of `bootcamps` and expands `bootcamp` from it.
    pub fn new(bootcamps: &InMemoryBootcampRepository) -> Self {
        Self {
            collection: bootcamps.courses.clone().with_relation(
                "bootcamp",
                BOOTCAMP_ID_FIELD,
                &bootcamps.collection,
            ),
        }
    }
}

in_memory_collection!(InMemoryCourseRepository);

impl CourseRepository for InMemoryCourseRepository {
    async fn get_course_by_id(&self, id: Uuid) -> Result<Option<Course>, CoreError> {
        get_typed(&self.collection, id)
    }

    async fn create_course(&self, course: Course) -> Result<Course, CoreError> {
        self.collection.insert(to_document(&course)?)?;
        Ok(course)
    }

    async fn update_course(&self, course: Course) -> Result<Course, CoreError> {
        replace(&self.collection, course.id, &course)?;
        Ok(course)
    }

    async fn delete_course(&self, id: Uuid) -> Result<(), CoreError> {
        remove_one(&self.collection, id)
    }

    async fn average_tuition(&self, bootcamp_id: Uuid) -> Result<Option<f64>, CoreError> {
        let tuitions: Vec<f64> = self
            .collection
            .matching(&FilterExpression::new().equals(BOOTCAMP_ID_FIELD, bootcamp_id.to_string()))?
            .iter()
            .filter_map(|document| document.get("tuition").and_then(Value::as_f64))
            .collect();

        if tuitions.is_empty() {
            return Ok(None);
        }
        Ok(Some(tuitions.iter().sum::<f64>() / tuitions.len() as f64))
    }

    async fn delete_all(&self) -> Result<u64, CoreError> {
        self.collection.remove(&FilterExpression::new())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryReviewRepository {
    collection: InMemoryCollection,
}

impl InMemoryReviewRepository {
    /// Shares the review store of `bootcamps` and expands `bootcamp` from it.
    pub fn new(bootcamps: &InMemoryBootcampRepository) -> Self {
        Self {
            collection: bootcamps.reviews.clone().with_relation(
                "bootcamp",
                BOOTCAMP_ID_FIELD,
                &bootcamps.collection,
            ),
        }
    }
}

in_memory_collection!(InMemoryReviewRepository);

impl ReviewRepository for InMemoryReviewRepository {
    async fn delete_all(&self) -> Result<u64, CoreError> {
        self.collection.remove(&FilterExpression::new())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    collection: InMemoryCollection,
    reviews: InMemoryCollection,
}

impl InMemoryUserRepository {
    /// Users take their reviews with them when removed.
    pub fn new(reviews: &InMemoryReviewRepository) -> Self {
        Self {
            collection: InMemoryCollection::default(),
            reviews: reviews.collection.clone(),
        }
    }
}

in_memory_collection!(InMemoryUserRepository);

impl UserRepository for InMemoryUserRepository {
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        get_typed(&self.collection, id)
    }

    async fn create_user(&self, user: User) -> Result<User, CoreError> {
        ensure_unique(&self.collection, user.id, "email", &user.email)?;
        self.collection.insert(to_document(&user)?)?;
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, CoreError> {
        ensure_unique(&self.collection, user.id, "email", &user.email)?;
        replace(&self.collection, user.id, &user)?;
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<u64, CoreError> {
        if self.collection.get(&id.to_string())?.is_none() {
            return Err(CoreError::NotFound(id.to_string()));
        }

        let reviews = self
            .reviews
            .remove(&FilterExpression::new().equals(USER_ID_FIELD, id.to_string()))?;
        remove_one(&self.collection, id)?;

        Ok(reviews)
    }

    async fn delete_all(&self) -> Result<u64, CoreError> {
        self.collection.remove(&FilterExpression::new())
    }
}
