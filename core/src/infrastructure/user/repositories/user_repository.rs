use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        entities::{Document, FilterExpression, FindQuery},
        ports::Collection,
    },
    user::{entities::User, ports::UserRepository},
};
use crate::entity::{
    reviews::{Column as ReviewColumn, Entity as ReviewEntity},
    users::{ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity},
};
use crate::infrastructure::{
    collection::{FieldKind, FieldMap, SeaOrmCollection},
    db::{db_error, write_error},
};

pub fn user_fields() -> FieldMap<UserEntity> {
    FieldMap::new()
        .insert("id", UserColumn::Id, FieldKind::Uuid)
        .insert("name", UserColumn::Name, FieldKind::String)
        .insert("email", UserColumn::Email, FieldKind::String)
        .insert("role", UserColumn::Role, FieldKind::String)
        .insert("createdAt", UserColumn::CreatedAt, FieldKind::DateTime)
}

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
    collection: SeaOrmCollection<UserEntity>,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            collection: SeaOrmCollection::new(db.clone(), user_fields()),
            db,
        }
    }
}

impl Collection for PostgresUserRepository {
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        self.collection.find(query).await
    }

    async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        self.collection.count(filter).await
    }
}

impl UserRepository for PostgresUserRepository {
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user by id: {}", e);
                CoreError::InternalServerError
            })?
            .map(User::try_from)
            .transpose()
    }

    async fn create_user(&self, user: User) -> Result<User, CoreError> {
        let id = user.id;
        UserEntity::insert(UserActiveModel::from(user))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| write_error("create user", id, e))
            .and_then(User::try_from)
    }

    async fn update_user(&self, user: User) -> Result<User, CoreError> {
        let id = user.id;
        UserEntity::update(UserActiveModel::from(user))
            .filter(UserColumn::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error("update user", id, e))
            .and_then(User::try_from)
    }

    async fn delete_user(&self, id: Uuid) -> Result<u64, CoreError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("begin user removal", e))?;

        let reviews = ReviewEntity::delete_many()
            .filter(ReviewColumn::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete reviews of user", e))?
            .rows_affected;

        let user = UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete user", e))?;

        if user.rows_affected == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }

        txn.commit()
            .await
            .map_err(|e| db_error("commit user removal", e))?;

        Ok(reviews)
    }

    async fn delete_all(&self) -> Result<u64, CoreError> {
        UserEntity::delete_many()
            .exec(&self.db)
            .await
            .map(|result| result.rows_affected)
            .map_err(|e| {
                error!("Failed to delete users: {}", e);
                CoreError::InternalServerError
            })
    }
}
