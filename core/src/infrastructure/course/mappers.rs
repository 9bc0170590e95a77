use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    course::entities::{Course, MinimumSkill},
};
use crate::entity::courses::{ActiveModel as CourseActiveModel, Model as CourseModel};

impl TryFrom<CourseModel> for Course {
    type Error = CoreError;

    fn try_from(model: CourseModel) -> Result<Self, Self::Error> {
        let minimum_skill: MinimumSkill = model.minimum_skill.parse().map_err(|e| {
            error!("Failed to decode course {}: {}", model.id, e);
            CoreError::InternalServerError
        })?;

        Ok(Course {
            id: model.id,
            title: model.title,
            description: model.description,
            weeks: model.weeks,
            tuition: model.tuition,
            minimum_skill,
            scholarship_available: model.scholarship_available,
            created_at: model.created_at.and_utc(),
            bootcamp_id: model.bootcamp_id,
        })
    }
}

impl From<Course> for CourseActiveModel {
    fn from(course: Course) -> Self {
        CourseActiveModel {
            id: Set(course.id),
            title: Set(course.title),
            description: Set(course.description),
            weeks: Set(course.weeks),
            tuition: Set(course.tuition),
            minimum_skill: Set(course.minimum_skill.as_str().to_string()),
            scholarship_available: Set(course.scholarship_available),
            created_at: Set(course.created_at.naive_utc()),
            bootcamp_id: Set(course.bootcamp_id),
        }
    }
}
