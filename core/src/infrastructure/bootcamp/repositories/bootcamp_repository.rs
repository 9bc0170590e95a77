use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait, sea_query::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    bootcamp::{
        entities::{Bootcamp, BootcampRemoval},
        ports::BootcampRepository,
    },
    common::entities::app_errors::CoreError,
    query::{
        entities::{Document, FilterExpression, FindQuery},
        ports::Collection,
    },
};
use crate::entity::{
    bootcamps::{
        ActiveModel as BootcampActiveModel, Column as BootcampColumn, Entity as BootcampEntity,
    },
    courses::{Column as CourseColumn, Entity as CourseEntity},
    reviews::{Column as ReviewColumn, Entity as ReviewEntity},
};
use crate::infrastructure::{
    collection::{FieldKind, FieldMap, SeaOrmCollection},
    db::{db_error, write_error},
};

/// Bootcamp fields reachable from query parameters.
pub fn bootcamp_fields() -> FieldMap<BootcampEntity> {
    FieldMap::new()
        .insert("id", BootcampColumn::Id, FieldKind::Uuid)
        .insert("name", BootcampColumn::Name, FieldKind::String)
        .insert("slug", BootcampColumn::Slug, FieldKind::String)
        .insert("description", BootcampColumn::Description, FieldKind::String)
        .insert("website", BootcampColumn::Website, FieldKind::String)
        .insert("phone", BootcampColumn::Phone, FieldKind::String)
        .insert("email", BootcampColumn::Email, FieldKind::String)
        .insert("address", BootcampColumn::Address, FieldKind::String)
        .insert("location", BootcampColumn::Location, FieldKind::GeoPoint)
        .insert("careers", BootcampColumn::Careers, FieldKind::JsonArray)
        .insert("averageRating", BootcampColumn::AverageRating, FieldKind::F64)
        .insert("averageCost", BootcampColumn::AverageCost, FieldKind::I32)
        .insert("photo", BootcampColumn::Photo, FieldKind::String)
        .insert("housing", BootcampColumn::Housing, FieldKind::Bool)
        .insert("jobAssistance", BootcampColumn::JobAssistance, FieldKind::Bool)
        .insert("jobGuarantee", BootcampColumn::JobGuarantee, FieldKind::Bool)
        .insert("acceptGi", BootcampColumn::AcceptGi, FieldKind::Bool)
        .insert("createdAt", BootcampColumn::CreatedAt, FieldKind::DateTime)
}

#[derive(Debug, Clone)]
pub struct PostgresBootcampRepository {
    pub db: DatabaseConnection,
    collection: SeaOrmCollection<BootcampEntity>,
}

impl PostgresBootcampRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            collection: SeaOrmCollection::new(db.clone(), bootcamp_fields()),
            db,
        }
    }
}

impl Collection for PostgresBootcampRepository {
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        self.collection.find(query).await
    }

    async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        self.collection.count(filter).await
    }
}

impl BootcampRepository for PostgresBootcampRepository {
    async fn get_bootcamp_by_id(&self, id: Uuid) -> Result<Option<Bootcamp>, CoreError> {
        BootcampEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get bootcamp by id: {}", e);
                CoreError::InternalServerError
            })?
            .map(Bootcamp::try_from)
            .transpose()
    }

    async fn create_bootcamp(&self, bootcamp: Bootcamp) -> Result<Bootcamp, CoreError> {
        BootcampEntity::insert(BootcampActiveModel::try_from(&bootcamp)?)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| write_error("create bootcamp", bootcamp.id, e))
            .and_then(Bootcamp::try_from)
    }

    async fn update_bootcamp(&self, bootcamp: Bootcamp) -> Result<Bootcamp, CoreError> {
        BootcampEntity::update(BootcampActiveModel::try_from(&bootcamp)?)
            .filter(BootcampColumn::Id.eq(bootcamp.id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error("update bootcamp", bootcamp.id, e))
            .and_then(Bootcamp::try_from)
    }

    async fn delete_bootcamp(&self, id: Uuid) -> Result<BootcampRemoval, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("begin bootcamp removal", e))?;

        let courses = CourseEntity::delete_many()
            .filter(CourseColumn::BootcampId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete courses of bootcamp", e))?
            .rows_affected;

        let reviews = ReviewEntity::delete_many()
            .filter(ReviewColumn::BootcampId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete reviews of bootcamp", e))?
            .rows_affected;

        let bootcamp = BootcampEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete bootcamp", e))?;

        // dropping txn uncommitted rolls the dependents back
        if bootcamp.rows_affected == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }

        txn.commit()
            .await
            .map_err(|e| db_error("commit bootcamp removal", e))?;

        Ok(BootcampRemoval { courses, reviews })
    }

    async fn set_average_cost(&self, id: Uuid, average_cost: Option<i32>) -> Result<(), CoreError> {
        BootcampEntity::update_many()
            .col_expr(BootcampColumn::AverageCost, Expr::value(average_cost))
            .filter(BootcampColumn::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to set bootcamp average cost: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, CoreError> {
        BootcampEntity::delete_many()
            .exec(&self.db)
            .await
            .map(|result| result.rows_affected)
            .map_err(|e| {
                error!("Failed to delete bootcamps: {}", e);
                CoreError::InternalServerError
            })
    }
}
