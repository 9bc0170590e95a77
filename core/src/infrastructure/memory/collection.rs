use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        entities::{
            Document, FieldFilter, FilterExpression, FilterOperator, FindQuery, ID_FIELD,
            Projection, SortDirection, SortKey, split_list,
        },
        ports::Collection,
    },
};

type Store = Arc<RwLock<Vec<Document>>>;

#[derive(Debug, Clone)]
struct RelationLink {
    path: String,
    local_key: String,
    target: Store,
}

/// Collection over JSON documents held in memory.
///
/// Literal filters compare against the stored JSON type: numbers and booleans are parsed
/// from the raw value, arrays match when any element matches. Unknown fields simply do
/// not match.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollection {
    documents: Store,
    relations: Vec<RelationLink>,
}

impl InMemoryCollection {
    /// Non-object values are ignored.
    pub fn new(documents: Vec<Value>) -> Self {
        let documents = documents
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(document) => Some(document),
                _ => None,
            })
            .collect();

        Self {
            documents: Arc::new(RwLock::new(documents)),
            relations: Vec::new(),
        }
    }

    /// Resolve `path` by matching `local_key` against the `id` of documents in `target`.
    /// The target's storage is shared, later writes to it are visible.
    pub fn with_relation(
        mut self,
        path: impl Into<String>,
        local_key: impl Into<String>,
        target: &InMemoryCollection,
    ) -> Self {
        self.relations.push(RelationLink {
            path: path.into(),
            local_key: local_key.into(),
            target: Arc::clone(&target.documents),
        });
        self
    }

    pub fn insert(&self, document: Document) -> Result<(), CoreError> {
        self.write()?.push(document);
        Ok(())
    }

    pub fn insert_value(&self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Object(document) => self.insert(document),
            other => Err(CoreError::validation("document", other.to_string())),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Document>, CoreError> {
        let documents = Self::snapshot(&self.documents)?;
        Ok(documents
            .into_iter()
            .find(|document| document.get(ID_FIELD).and_then(Value::as_str) == Some(id)))
    }

    /// Swap the stored document sharing `document`'s id. Returns false when there is none.
    pub fn replace(&self, document: Document) -> Result<bool, CoreError> {
        let id = document.get(ID_FIELD).cloned();
        let mut documents = self.write()?;

        match documents
            .iter_mut()
            .find(|existing| existing.get(ID_FIELD) == id.as_ref())
        {
            Some(existing) => {
                *existing = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply `update` to every document matching `filter`, returning how many were touched.
    pub fn update_where(
        &self,
        filter: &FilterExpression,
        mut update: impl FnMut(&mut Document),
    ) -> Result<u64, CoreError> {
        let mut documents = self.write()?;
        let mut touched = 0;
        for document in documents.iter_mut().filter(|d| matches(d, filter)) {
            update(document);
            touched += 1;
        }
        Ok(touched)
    }

    /// Every stored document matching `filter`, unsorted and unprojected.
    pub fn matching(&self, filter: &FilterExpression) -> Result<Vec<Document>, CoreError> {
        Ok(Self::snapshot(&self.documents)?
            .into_iter()
            .filter(|document| matches(document, filter))
            .collect())
    }

    /// Remove every document matching `filter`, returning how many were removed.
    pub fn remove(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        let mut documents = self.write()?;
        let before = documents.len();
        documents.retain(|document| !matches(document, filter));
        Ok((before - documents.len()) as u64)
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Document>>, CoreError> {
        self.documents.write().map_err(|e| {
            error!("In-memory collection lock poisoned: {}", e);
            CoreError::InternalServerError
        })
    }

    fn snapshot(store: &Store) -> Result<Vec<Document>, CoreError> {
        store.read().map(|d| d.clone()).map_err(|e| {
            error!("In-memory collection lock poisoned: {}", e);
            CoreError::InternalServerError
        })
    }

    fn expand(
        &self,
        documents: &mut [Document],
        path: &str,
        select: Option<&Projection>,
    ) -> Result<(), CoreError> {
        let link = self
            .relations
            .iter()
            .find(|link| link.path == path)
            .ok_or_else(|| CoreError::validation("populate", path))?;

        let related = Self::snapshot(&link.target)?;

        // documents projected without the local key are left as they are
        for document in documents.iter_mut() {
            let Some(key) = document.get(&link.local_key) else {
                continue;
            };
            let expanded = related
                .iter()
                .find(|candidate| candidate.get(ID_FIELD) == Some(key))
                .map(|found| Value::Object(project(found, select)))
                .unwrap_or(Value::Null);

            document.insert(path.to_string(), expanded);
        }

        Ok(())
    }
}

impl Collection for InMemoryCollection {
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        let mut documents: Vec<Document> = Self::snapshot(&self.documents)?
            .into_iter()
            .filter(|document| matches(document, &query.filter))
            .collect();

        // stable, so equal keys keep insertion order
        documents.sort_by(|a, b| compare_documents(a, b, &query.sort));

        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        let mut page: Vec<Document> = documents
            .into_iter()
            .skip(query.skip as usize)
            .take(limit)
            .map(|document| project(&document, query.projection.as_ref()))
            .collect();

        if let Some(relation) = &query.expand {
            self.expand(&mut page, &relation.path, relation.select.as_ref())?;
        }

        Ok(page)
    }

    async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        let documents = self.documents.read().map_err(|e| {
            error!("In-memory collection lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(documents.iter().filter(|d| matches(d, filter)).count() as u64)
    }
}

fn project(document: &Document, projection: Option<&Projection>) -> Document {
    match projection {
        None => document.clone(),
        Some(projection) => document
            .iter()
            .filter(|(key, _)| projection.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}

/// Walk a dotted path such as `location.state`.
fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn matches(document: &Document, filter: &FilterExpression) -> bool {
    filter.iter().all(|(field, condition)| {
        let Some(value) = lookup(document, field) else {
            return false;
        };

        match condition {
            FieldFilter::Equals(raw) => equals(value, raw),
            FieldFilter::Compare(operators) => operators
                .iter()
                .all(|(operator, raw)| satisfies(value, *operator, raw)),
            FieldFilter::WithinSphere(cap) => {
                point(value).is_some_and(|(lng, lat)| cap.contains(lng, lat))
            }
        }
    })
}

fn equals(value: &Value, raw: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| equals(item, raw)),
        Value::String(s) => s == raw,
        Value::Number(n) => match (n.as_f64(), raw.parse::<f64>()) {
            (Some(n), Ok(r)) => n == r,
            _ => false,
        },
        Value::Bool(b) => raw.parse::<bool>().is_ok_and(|r| r == *b),
        Value::Null => raw == "null",
        Value::Object(_) => false,
    }
}

fn satisfies(value: &Value, operator: FilterOperator, raw: &str) -> bool {
    if operator == FilterOperator::In {
        return split_list(raw).into_iter().any(|member| equals(value, member));
    }

    if let Value::Array(items) = value {
        return items.iter().any(|item| satisfies(item, operator, raw));
    }

    let Some(ordering) = compare_raw(value, raw) else {
        return false;
    };

    match operator {
        FilterOperator::Gt => ordering.is_gt(),
        FilterOperator::Gte => ordering.is_ge(),
        FilterOperator::Lt => ordering.is_lt(),
        FilterOperator::Lte => ordering.is_le(),
        FilterOperator::In => false,
    }
}

fn compare_raw(value: &Value, raw: &str) -> Option<Ordering> {
    match value {
        Value::Number(n) => n.as_f64()?.partial_cmp(&raw.parse::<f64>().ok()?),
        Value::String(s) => Some(s.as_str().cmp(raw)),
        Value::Bool(b) => Some(b.cmp(&raw.parse::<bool>().ok()?)),
        _ => None,
    }
}

/// `[lng, lat]` from a GeoJSON point or a bare coordinate pair.
fn point(value: &Value) -> Option<(f64, f64)> {
    let coordinates = match value {
        Value::Object(object) => object.get("coordinates")?,
        other => other,
    };
    let pair = coordinates.as_array()?;
    Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
}

fn compare_documents(a: &Document, b: &Document, sort: &[SortKey]) -> Ordering {
    sort.iter()
        .map(|key| {
            let ordering = compare_values(lookup(a, &key.field), lookup(b, &key.field));
            match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::entities::SphericalCap;
    use serde_json::json;

    fn collection() -> InMemoryCollection {
        InMemoryCollection::new(vec![
            json!({ "id": "1", "name": "Devworks", "averageCost": 10000, "location": { "coordinates": [-71.1097, 42.3736], "state": "MA" } }),
            json!({ "id": "2", "name": "ModernTech", "averageCost": 13000, "location": { "coordinates": [-71.8023, 42.2626], "state": "MA" } }),
            json!({ "id": "3", "name": "Codemasters", "location": { "coordinates": [-73.9249, 40.6943], "state": "NY" } }),
            json!("not a document"),
        ])
    }

    #[tokio::test]
    async fn test_find_within_sphere() {
        let cap = SphericalCap::from_miles(-71.06, 42.36, 10.0);
        let found = collection()
            .find(FindQuery::new(FilterExpression::new().within_sphere("location", cap)))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("name"), Some(&json!("Devworks")));
    }

    #[tokio::test]
    async fn test_find_dotted_path() {
        let found = collection()
            .find(FindQuery::new(FilterExpression::new().equals("location.state", "MA")))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_field_does_not_match() {
        let filter = FilterExpression::new().compare("averageCost", FilterOperator::Lt, "20000");
        assert_eq!(collection().count(&filter).await.unwrap(), 2);
        assert_eq!(collection().count(&FilterExpression::new()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_in_operator() {
        let filter = FilterExpression::new().compare("name", FilterOperator::In, "Devworks,Codemasters");
        assert_eq!(collection().count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sort_puts_missing_values_first() {
        let found = collection()
            .find(FindQuery {
                sort: vec![SortKey::asc("averageCost")],
                ..Default::default()
            })
            .await
            .unwrap();

        let names: Vec<_> = found.iter().map(|d| d.get("name").cloned()).collect();
        assert_eq!(
            names,
            vec![Some(json!("Codemasters")), Some(json!("Devworks")), Some(json!("ModernTech"))]
        );
    }

    #[tokio::test]
    async fn test_unknown_relation_is_rejected() {
        let err = collection()
            .find(FindQuery {
                expand: Some(crate::domain::query::entities::Relation::new("owner")),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::validation("populate", "owner"));
    }

    #[test]
    fn test_remove() {
        let collection = collection();
        let removed = collection
            .remove(&FilterExpression::new().equals("location.state", "MA"))
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(collection.len(), 1);
    }
}
