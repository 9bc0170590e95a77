use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use devcamper_core::domain::query::entities::QuerySpec;

/// Raw query string as a [`QuerySpec`]: bracketed keys such as `averageCost[gte]` are kept
/// verbatim for the translator to interpret.
///
/// ```rust,ignore
/// async fn handler(QuerySpecExtractor(spec): QuerySpecExtractor) { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct QuerySpecExtractor(pub QuerySpec);

impl<S> FromRequestParts<S> for QuerySpecExtractor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        Ok(QuerySpecExtractor(QuerySpec::parse(query_string)))
    }
}
