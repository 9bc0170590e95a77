use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::{
    common::entities::app_errors::CoreError,
    course::services::BOOTCAMP_ID_FIELD,
    query::{
        entities::{Document, FilterExpression, FindQuery},
        ports::Collection,
    },
    review::ports::ReviewRepository,
};
use crate::entity::reviews::{Column as ReviewColumn, Entity as ReviewEntity};
use crate::infrastructure::{
    bootcamp::bootcamp_fields,
    collection::{FieldKind, FieldMap, RelationLink, SeaOrmCollection},
    db::db_error,
};

pub fn review_fields() -> FieldMap<ReviewEntity> {
    FieldMap::new()
        .insert("id", ReviewColumn::Id, FieldKind::Uuid)
        .insert("title", ReviewColumn::Title, FieldKind::String)
        .insert("text", ReviewColumn::Text, FieldKind::String)
        .insert("rating", ReviewColumn::Rating, FieldKind::I32)
        .insert("createdAt", ReviewColumn::CreatedAt, FieldKind::DateTime)
        .insert(BOOTCAMP_ID_FIELD, ReviewColumn::BootcampId, FieldKind::Uuid)
        .insert("userId", ReviewColumn::UserId, FieldKind::Uuid)
}

#[derive(Debug, Clone)]
pub struct PostgresReviewRepository {
    pub db: DatabaseConnection,
    collection: SeaOrmCollection<ReviewEntity>,
}

impl PostgresReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        let collection = SeaOrmCollection::new(db.clone(), review_fields()).with_relation(
            RelationLink::new("bootcamp", BOOTCAMP_ID_FIELD, &bootcamp_fields()),
        );

        Self { db, collection }
    }

}

impl Collection for PostgresReviewRepository {
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        self.collection.find(query).await
    }

    async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        self.collection.count(filter).await
    }
}

impl ReviewRepository for PostgresReviewRepository {
    async fn delete_all(&self) -> Result<u64, CoreError> {
        ReviewEntity::delete_many()
            .exec(&self.db)
            .await
            .map(|result| result.rows_affected)
            .map_err(|e| db_error("delete reviews", e))
    }
}
