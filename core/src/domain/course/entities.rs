use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_uuid_v7,
    course::value_objects::{CreateCourseInput, UpdateCourseInput},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

impl MinimumSkill {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinimumSkill::Beginner => "beginner",
            MinimumSkill::Intermediate => "intermediate",
            MinimumSkill::Advanced => "advanced",
        }
    }
}

impl fmt::Display for MinimumSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MinimumSkill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(MinimumSkill::Beginner),
            "intermediate" => Ok(MinimumSkill::Intermediate),
            "advanced" => Ok(MinimumSkill::Advanced),
            other => Err(format!("unknown skill level '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub weeks: i32,
    pub tuition: i32,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    pub bootcamp_id: Uuid,
}

impl Course {
    pub fn new(bootcamp_id: Uuid, input: CreateCourseInput) -> Self {
        Self {
            id: generate_uuid_v7(),
            title: input.title.trim().to_string(),
            description: input.description,
            weeks: input.weeks,
            tuition: input.tuition,
            minimum_skill: input.minimum_skill,
            scholarship_available: input.scholarship_available,
            created_at: Utc::now(),
            bootcamp_id,
        }
    }

    pub fn update(&mut self, input: UpdateCourseInput) {
        if let Some(title) = input.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(weeks) = input.weeks {
            self.weeks = weeks;
        }
        if let Some(tuition) = input.tuition {
            self.tuition = tuition;
        }
        if let Some(minimum_skill) = input.minimum_skill {
            self.minimum_skill = minimum_skill;
        }
        if let Some(scholarship_available) = input.scholarship_available {
            self.scholarship_available = scholarship_available;
        }
    }
}

/// The owning bootcamp's name and description, inlined into a single course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BootcampSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub bootcamp: Option<BootcampSummary>,
}

/// Bootcamp average cost: mean tuition rounded up to the next multiple of ten.
pub fn average_cost(average_tuition: f64) -> i32 {
    ((average_tuition / 10.0).ceil() * 10.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_cost_rounds_up_to_ten() {
        assert_eq!(average_cost(10000.0), 10000);
        assert_eq!(average_cost(10001.0), 10010);
        assert_eq!(average_cost(8333.33), 8340);
        assert_eq!(average_cost(0.0), 0);
    }

    #[test]
    fn test_minimum_skill_is_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_value(MinimumSkill::Intermediate).unwrap(),
            "intermediate"
        );
        assert_eq!("advanced".parse::<MinimumSkill>(), Ok(MinimumSkill::Advanced));
        assert!("expert".parse::<MinimumSkill>().is_err());
    }

    #[test]
    fn test_course_details_flatten_course_fields() {
        let bootcamp_id = Uuid::new_v4();
        let course = Course::new(
            bootcamp_id,
            CreateCourseInput {
                title: "Front End Web Development".to_string(),
                description: "HTML, CSS and JavaScript".to_string(),
                weeks: 8,
                tuition: 8000,
                minimum_skill: MinimumSkill::Beginner,
                scholarship_available: true,
            },
        );

        let json = serde_json::to_value(CourseDetails {
            course,
            bootcamp: Some(BootcampSummary {
                id: bootcamp_id,
                name: "Devworks Bootcamp".to_string(),
                description: "Full stack".to_string(),
            }),
        })
        .unwrap();

        assert_eq!(json["title"], "Front End Web Development");
        assert_eq!(json["minimumSkill"], "beginner");
        assert_eq!(json["bootcampId"], bootcamp_id.to_string());
        assert_eq!(json["bootcamp"]["name"], "Devworks Bootcamp");
    }
}
