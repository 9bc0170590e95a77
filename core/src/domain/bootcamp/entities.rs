use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    bootcamp::value_objects::{CreateBootcampInput, UpdateBootcampInput},
    common::{generate_uuid_v7, slugify},
    geo::entities::GeocodeResult,
};

pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    Business,
    Other,
}

impl Career {
    pub const ALL: [Career; 6] = [
        Career::WebDevelopment,
        Career::MobileDevelopment,
        Career::UiUx,
        Career::DataScience,
        Career::Business,
        Career::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Career::WebDevelopment => "Web Development",
            Career::MobileDevelopment => "Mobile Development",
            Career::UiUx => "UI/UX",
            Career::DataScience => "Data Science",
            Career::Business => "Business",
            Career::Other => "Other",
        }
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Career {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Career::ALL
            .into_iter()
            .find(|career| career.as_str() == s)
            .ok_or_else(|| format!("unknown career '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PointType {
    #[default]
    Point,
}

/// GeoJSON point plus the address parts the geocoder resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "type", default)]
    pub kind: PointType,
    /// `[longitude, latitude]`
    #[schema(value_type = Vec<f64>)]
    pub coordinates: [f64; 2],
    pub formatted_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl Location {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

impl From<GeocodeResult> for Location {
    fn from(result: GeocodeResult) -> Self {
        Self {
            kind: PointType::Point,
            coordinates: [result.longitude, result.latitude],
            formatted_address: result.formatted_address,
            street: result.street,
            city: result.city,
            state: result.state,
            zipcode: result.zipcode,
            country: result.country,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub location: Option<Location>,
    pub careers: Vec<Career>,
    pub average_rating: Option<f64>,
    pub average_cost: Option<i32>,
    #[serde(default = "default_photo")]
    pub photo: String,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_photo() -> String {
    DEFAULT_PHOTO.to_string()
}

impl Bootcamp {
    pub fn new(input: CreateBootcampInput, location: Location) -> Self {
        let name = input.name.trim().to_string();

        Self {
            id: generate_uuid_v7(),
            slug: slugify(&name),
            name,
            description: input.description,
            website: input.website,
            phone: input.phone,
            email: input.email,
            address: input.address,
            location: Some(location),
            careers: input.careers,
            average_rating: None,
            average_cost: None,
            photo: default_photo(),
            housing: input.housing,
            job_assistance: input.job_assistance,
            job_guarantee: input.job_guarantee,
            accept_gi: input.accept_gi,
            created_at: Utc::now(),
        }
    }

    /// Apply the provided fields. The slug follows the name; the caller re-geocodes when
    /// the address changes.
    pub fn update(&mut self, input: UpdateBootcampInput) {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
            self.slug = slugify(&self.name);
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(website) = input.website {
            self.website = Some(website);
        }
        if let Some(phone) = input.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = input.email {
            self.email = Some(email);
        }
        if let Some(address) = input.address {
            self.address = address;
        }
        if let Some(careers) = input.careers {
            self.careers = careers;
        }
        if let Some(housing) = input.housing {
            self.housing = housing;
        }
        if let Some(job_assistance) = input.job_assistance {
            self.job_assistance = job_assistance;
        }
        if let Some(job_guarantee) = input.job_guarantee {
            self.job_guarantee = job_guarantee;
        }
        if let Some(accept_gi) = input.accept_gi {
            self.accept_gi = accept_gi;
        }
    }
}

/// Courses and reviews removed together with a bootcamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootcampRemoval {
    pub courses: u64,
    pub reviews: u64,
}
