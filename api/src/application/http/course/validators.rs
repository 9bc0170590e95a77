use devcamper_core::domain::course::{
    entities::MinimumSkill,
    value_objects::{CreateCourseInput, UpdateCourseInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a course title"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: String,

    #[validate(range(min = 1, message = "Please add number of weeks"))]
    pub weeks: i32,

    #[validate(range(min = 0, message = "Please add a tuition cost"))]
    pub tuition: i32,

    pub minimum_skill: MinimumSkill,

    #[serde(default)]
    pub scholarship_available: bool,
}

impl From<CreateCourseValidator> for CreateCourseInput {
    fn from(payload: CreateCourseValidator) -> Self {
        CreateCourseInput {
            title: payload.title,
            description: payload.description,
            weeks: payload.weeks,
            tuition: payload.tuition,
            minimum_skill: payload.minimum_skill,
            scholarship_available: payload.scholarship_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a course title"))]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Please add number of weeks"))]
    pub weeks: Option<i32>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Please add a tuition cost"))]
    pub tuition: Option<i32>,

    #[serde(default)]
    pub minimum_skill: Option<MinimumSkill>,

    #[serde(default)]
    pub scholarship_available: Option<bool>,
}

impl From<UpdateCourseValidator> for UpdateCourseInput {
    fn from(payload: UpdateCourseValidator) -> Self {
        UpdateCourseInput {
            title: payload.title,
            description: payload.description,
            weeks: payload.weeks,
            tuition: payload.tuition,
            minimum_skill: payload.minimum_skill,
            scholarship_available: payload.scholarship_available,
        }
    }
}
