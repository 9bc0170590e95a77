use std::collections::HashMap;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityName, EntityTrait, FromQueryResult, JsonValue,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    sea_query::{Alias, Expr, Query},
};
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        entities::{
            Document, FilterExpression, FindQuery, ID_FIELD, Projection, Relation, SORT_KEY,
            SortDirection,
        },
        ports::Collection,
    },
};

use super::{conditions::filter_condition, fields::FieldMap};

/// Inlines rows of another table, looked up by the id stored under `local_key`.
#[derive(Debug, Clone)]
pub struct RelationLink {
    path: String,
    local_key: String,
    table: String,
    /// `(api name, column name)`
    columns: Vec<(String, String)>,
}

impl RelationLink {
    pub fn new<T: EntityTrait>(
        path: impl Into<String>,
        local_key: impl Into<String>,
        target: &FieldMap<T>,
    ) -> Self {
        Self {
            path: path.into(),
            local_key: local_key.into(),
            table: T::default().table_name().to_string(),
            columns: target
                .iter()
                .map(|field| (field.name.clone(), field.column_name().to_string()))
                .collect(),
        }
    }

    fn selected_columns(&self, select: Option<&Projection>) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(name, _)| select.is_none_or(|projection| projection.contains(name)))
            .map(|(_, column)| column.as_str())
            .collect()
    }

    fn to_document(&self, row: JsonValue) -> Document {
        rename_columns(row, |column| {
            self.columns
                .iter()
                .find(|(_, c)| c == column)
                .map(|(name, _)| name.clone())
        })
    }
}

fn rename_columns(row: JsonValue, name_of: impl Fn(&str) -> Option<String>) -> Document {
    match row {
        JsonValue::Object(columns) => columns
            .into_iter()
            .map(|(column, value)| (name_of(&column).unwrap_or(column), value))
            .collect(),
        _ => Document::new(),
    }
}

/// [`Collection`] over one sea-orm entity. Only fields registered in the [`FieldMap`] can be
/// filtered or sorted on, and documents come back keyed by their API names.
#[derive(Debug, Clone)]
pub struct SeaOrmCollection<E: EntityTrait> {
    db: DatabaseConnection,
    fields: FieldMap<E>,
    relations: Vec<RelationLink>,
}

impl<E: EntityTrait> SeaOrmCollection<E> {
    pub fn new(db: DatabaseConnection, fields: FieldMap<E>) -> Self {
        Self {
            db,
            fields,
            relations: Vec::new(),
        }
    }

    pub fn with_relation(mut self, link: RelationLink) -> Self {
        self.relations.push(link);
        self
    }

    pub fn fields(&self) -> &FieldMap<E> {
        &self.fields
    }

    fn select(&self, query: &FindQuery) -> Result<Select<E>, CoreError> {
        let mut select = E::find().filter(filter_condition(&query.filter, &self.fields)?);

        if let Some(projection) = &query.projection {
            select = select.select_only();
            for field in self.fields.iter().filter(|f| projection.contains(&f.name)) {
                select = select.column(field.col);
            }
        }

        for key in &query.sort {
            let field = self
                .fields
                .get(&key.field)
                .ok_or_else(|| CoreError::validation(SORT_KEY, key.field.as_str()))?;
            let order = match key.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            select = select.order_by(field.col, order);
        }

        // rows tied on every sort key still page deterministically
        if let Some(id) = self.fields.get(ID_FIELD) {
            select = select.order_by(id.col, Order::Asc);
        }

        select = select.offset(query.skip);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        Ok(select)
    }

    fn to_document(&self, row: JsonValue) -> Document {
        rename_columns(row, |column| {
            self.fields.by_column(column).map(|field| field.name.clone())
        })
    }

    async fn expand(
        &self,
        documents: &mut [Document],
        relation: &Relation,
    ) -> Result<(), CoreError> {
        let link = self
            .relations
            .iter()
            .find(|link| link.path == relation.path)
            .ok_or_else(|| CoreError::validation("populate", relation.path.as_str()))?;

        let ids: Vec<Uuid> = documents
            .iter()
            .filter_map(|document| document.get(&link.local_key)?.as_str()?.parse().ok())
            .collect();

        if ids.is_empty() {
            return Ok(());
        }

        let mut statement = Query::select();
        statement.from(Alias::new(link.table.as_str()));
        for column in link.selected_columns(relation.select.as_ref()) {
            statement.column(Alias::new(column));
        }
        statement.and_where(Expr::col(Alias::new(ID_FIELD)).is_in(ids));

        let backend = self.db.get_database_backend();
        let rows = JsonValue::find_by_statement(backend.build(&statement))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to expand relation {}: {}", relation.path, e);
                CoreError::InternalServerError
            })?;

        let related: HashMap<String, Document> = rows
            .into_iter()
            .map(|row| link.to_document(row))
            .filter_map(|document| {
                let id = document.get(ID_FIELD)?.as_str()?.to_string();
                Some((id, document))
            })
            .collect();

        for document in documents.iter_mut() {
            let Some(key) = document.get(&link.local_key).and_then(Value::as_str) else {
                continue;
            };
            let expanded = related
                .get(key)
                .cloned()
                .map_or(Value::Null, Value::Object);
            document.insert(relation.path.clone(), expanded);
        }

        Ok(())
    }
}

impl<E> Collection for SeaOrmCollection<E>
where
    E: EntityTrait,
    E::Model: Sync,
{
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        let rows = self
            .select(&query)?
            .into_json()
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to query {}: {}", E::default().table_name(), e);
                CoreError::InternalServerError
            })?;

        let mut documents: Vec<Document> =
            rows.into_iter().map(|row| self.to_document(row)).collect();

        if let Some(relation) = &query.expand {
            self.expand(&mut documents, relation).await?;
        }

        Ok(documents)
    }

    async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        E::find()
            .filter(filter_condition(filter, &self.fields)?)
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to count {}: {}", E::default().table_name(), e);
                CoreError::InternalServerError
            })
    }
}
