use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_uuid_v7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// 1 to 10
    pub rating: i32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    pub bootcamp_id: Uuid,
    pub user_id: Uuid,
}

impl Review {
    pub fn new(bootcamp_id: Uuid, user_id: Uuid, title: String, text: String, rating: i32) -> Self {
        Self {
            id: generate_uuid_v7(),
            title: title.trim().to_string(),
            text,
            rating,
            created_at: Utc::now(),
            bootcamp_id,
            user_id,
        }
    }
}
