use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Select,
    sea_query::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    course::{entities::Course, ports::CourseRepository, services::BOOTCAMP_ID_FIELD},
    query::{
        entities::{Document, FilterExpression, FindQuery},
        ports::Collection,
    },
};
use crate::entity::courses::{
    ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as CourseEntity,
};
use crate::infrastructure::{
    bootcamp::bootcamp_fields,
    collection::{FieldKind, FieldMap, RelationLink, SeaOrmCollection},
    db::write_error,
};

pub fn course_fields() -> FieldMap<CourseEntity> {
    FieldMap::new()
        .insert("id", CourseColumn::Id, FieldKind::Uuid)
        .insert("title", CourseColumn::Title, FieldKind::String)
        .insert("description", CourseColumn::Description, FieldKind::String)
        .insert("weeks", CourseColumn::Weeks, FieldKind::I32)
        .insert("tuition", CourseColumn::Tuition, FieldKind::I32)
        .insert("minimumSkill", CourseColumn::MinimumSkill, FieldKind::String)
        .insert(
            "scholarshipAvailable",
            CourseColumn::ScholarshipAvailable,
            FieldKind::Bool,
        )
        .insert("createdAt", CourseColumn::CreatedAt, FieldKind::DateTime)
        .insert(BOOTCAMP_ID_FIELD, CourseColumn::BootcampId, FieldKind::Uuid)
}

fn average_tuition_query(bootcamp_id: Uuid) -> Select<CourseEntity> {
    CourseEntity::find()
        .select_only()
        .column_as(
            Expr::cust(r#"CAST(AVG("tuition") AS DOUBLE PRECISION)"#),
            "average_tuition",
        )
        .filter(CourseColumn::BootcampId.eq(bootcamp_id))
}

#[derive(Debug, Clone)]
pub struct PostgresCourseRepository {
    pub db: DatabaseConnection,
    collection: SeaOrmCollection<CourseEntity>,
}

impl PostgresCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        let collection = SeaOrmCollection::new(db.clone(), course_fields()).with_relation(
            RelationLink::new("bootcamp", BOOTCAMP_ID_FIELD, &bootcamp_fields()),
        );

        Self { db, collection }
    }
}

impl Collection for PostgresCourseRepository {
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        self.collection.find(query).await
    }

    async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        self.collection.count(filter).await
    }
}

impl CourseRepository for PostgresCourseRepository {
    async fn get_course_by_id(&self, id: Uuid) -> Result<Option<Course>, CoreError> {
        CourseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get course by id: {}", e);
                CoreError::InternalServerError
            })?
            .map(Course::try_from)
            .transpose()
    }

    async fn create_course(&self, course: Course) -> Result<Course, CoreError> {
        let id = course.id;
        CourseEntity::insert(CourseActiveModel::from(course))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| write_error("create course", id, e))
            .and_then(Course::try_from)
    }

    async fn update_course(&self, course: Course) -> Result<Course, CoreError> {
        let id = course.id;
        CourseEntity::update(CourseActiveModel::from(course))
            .filter(CourseColumn::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error("update course", id, e))
            .and_then(Course::try_from)
    }

    async fn delete_course(&self, id: Uuid) -> Result<(), CoreError> {
        let result = CourseEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete course: {}", e);
                CoreError::InternalServerError
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn average_tuition(&self, bootcamp_id: Uuid) -> Result<Option<f64>, CoreError> {
        let average = average_tuition_query(bootcamp_id)
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to average course tuition: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(average.flatten())
    }

    async fn delete_all(&self) -> Result<u64, CoreError> {
        CourseEntity::delete_many()
            .exec(&self.db)
            .await
            .map(|result| result.rows_affected)
            .map_err(|e| {
                error!("Failed to delete courses: {}", e);
                CoreError::InternalServerError
            })
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn test_fields_use_api_names() {
        let fields = course_fields();
        assert_eq!(fields.get("minimumSkill").unwrap().column_name(), "minimum_skill");
        assert_eq!(fields.get(BOOTCAMP_ID_FIELD).unwrap().kind, FieldKind::Uuid);
        assert!(fields.get("minimum_skill").is_none());
    }

    #[test]
    fn test_average_tuition_query() {
        let sql = average_tuition_query(Uuid::nil())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(
            sql.starts_with(
                r#"SELECT CAST(AVG("tuition") AS DOUBLE PRECISION) AS "average_tuition" FROM "courses""#
            ),
            "{sql}"
        );
        assert!(sql.contains(r#"WHERE "courses"."bootcamp_id" = "#), "{sql}");
    }
}
