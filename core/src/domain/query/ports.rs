use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::entities::{Document, FilterExpression, FindQuery},
};

/// Queryable store of documents.
///
/// Implementations own value coercion: filter values arrive as raw strings and must be
/// converted to whatever the underlying field holds. A field or operator the store cannot
/// apply is reported as `CoreError::Validation`.
#[cfg_attr(test, mockall::automock)]
pub trait Collection: Send + Sync {
    /// Filter, sort, skip, limit, project and expand, in that order.
    fn find(
        &self,
        query: FindQuery,
    ) -> impl Future<Output = Result<Vec<Document>, CoreError>> + Send;

    /// Number of documents matching `filter`.
    fn count(
        &self,
        filter: &FilterExpression,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

/// A collection narrowed by a fixed filter the caller cannot override.
#[derive(Debug, Clone)]
pub struct Scoped<'a, C> {
    inner: &'a C,
    scope: FilterExpression,
}

impl<'a, C> Scoped<'a, C> {
    pub fn new(inner: &'a C, scope: FilterExpression) -> Self {
        Self { inner, scope }
    }
}

impl<C: Collection> Collection for Scoped<'_, C> {
    async fn find(&self, mut query: FindQuery) -> Result<Vec<Document>, CoreError> {
        query.filter.merge(self.scope.clone());
        self.inner.find(query).await
    }

    async fn count(&self, filter: &FilterExpression) -> Result<u64, CoreError> {
        let mut filter = filter.clone();
        filter.merge(self.scope.clone());
        self.inner.count(&filter).await
    }
}
