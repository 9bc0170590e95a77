use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_uuid_v7,
    user::value_objects::{CreateUserInput, UpdateUserInput},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Publisher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Publisher => "publisher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "publisher" => Ok(Role::Publisher),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(input: CreateUserInput) -> Self {
        Self {
            id: generate_uuid_v7(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            role: input.role.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }

    pub fn update(&mut self, input: UpdateUserInput) {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = input.email {
            self.email = email.trim().to_lowercase();
        }
        if let Some(role) = input.role {
            self.role = role;
        }
    }
}
