use devcamper_core::domain::bootcamp::{
    entities::Career,
    value_objects::{CreateBootcampInput, UpdateBootcampInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBootcampValidator {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Please add a name of at most 50 characters"
    ))]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 500,
        message = "Please add a description of at most 500 characters"
    ))]
    pub description: String,

    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<String>,

    #[validate(length(max = 20, message = "Phone number can not be longer than 20 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Vec<Career>,

    #[serde(default)]
    pub housing: bool,

    #[serde(default)]
    pub job_assistance: bool,

    #[serde(default)]
    pub job_guarantee: bool,

    #[serde(default)]
    pub accept_gi: bool,
}

impl From<CreateBootcampValidator> for CreateBootcampInput {
    fn from(payload: CreateBootcampValidator) -> Self {
        CreateBootcampInput {
            name: payload.name,
            description: payload.description,
            website: payload.website,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
            careers: payload.careers,
            housing: payload.housing,
            job_assistance: payload.job_assistance,
            job_guarantee: payload.job_guarantee,
            accept_gi: payload.accept_gi,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBootcampValidator {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 500,
        message = "Description must be between 1 and 500 characters"
    ))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "Phone number can not be longer than 20 characters"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Option<Vec<Career>>,

    #[serde(default)]
    pub housing: Option<bool>,

    #[serde(default)]
    pub job_assistance: Option<bool>,

    #[serde(default)]
    pub job_guarantee: Option<bool>,

    #[serde(default)]
    pub accept_gi: Option<bool>,
}

impl From<UpdateBootcampValidator> for UpdateBootcampInput {
    fn from(payload: UpdateBootcampValidator) -> Self {
        UpdateBootcampInput {
            name: payload.name,
            description: payload.description,
            website: payload.website,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
            careers: payload.careers,
            housing: payload.housing,
            job_assistance: payload.job_assistance,
            job_guarantee: payload.job_guarantee,
            accept_gi: payload.accept_gi,
        }
    }
}
