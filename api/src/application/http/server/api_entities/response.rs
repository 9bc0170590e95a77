use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use devcamper_core::domain::query::entities::{Document, PageResult, Pagination};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[allow(clippy::upper_case_acronyms)]
pub enum Response<T: Serialize> {
    OK(T),
    Created(T),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        match self {
            Response::OK(body) => (StatusCode::OK, Json(body)).into_response(),
            Response::Created(body) => (StatusCode::CREATED, Json(body)).into_response(),
        }
    }
}

/// Envelope for listings: `{success, count, pagination, data}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DocumentsResponse {
    pub success: bool,
    pub count: usize,
    pub pagination: Pagination,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Document>,
}

impl From<PageResult<Document>> for DocumentsResponse {
    fn from(page: PageResult<Document>) -> Self {
        Self {
            success: true,
            count: page.count,
            pagination: page.pagination,
            data: page.items,
        }
    }
}

/// Envelope for a single resource: `{success, data}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Empty {}
