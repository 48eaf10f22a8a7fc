use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub program: String,
    pub semester_id: i64,
    pub lecturer_id: Option<i64>,
}

/// Course with its prerequisite ids resolved from the edge set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseWithPrerequisites {
    #[serde(flatten)]
    pub course: Course,
    pub prerequisite_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub program: String,
    pub semester_id: i64,
    pub lecturer_id: Option<i64>,
    /// Ids of courses that must be completed before registering for this one
    #[serde(default)]
    pub prerequisite_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 10))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub program: Option<String>,
    pub semester_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignLecturerDto {
    pub lecturer_id: i64,
}
