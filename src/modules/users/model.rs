//! User, student-profile and lecturer-profile models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// System roles. Stored as lowercase text in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Student,
    Lecturer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Student => "student",
            UserRole::Lecturer => "lecturer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "student" => Some(UserRole::Student),
            "lecturer" => Some(UserRole::Lecturer),
            _ => None,
        }
    }
}

/// User row without the credential hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentProfile {
    pub id: i64,
    pub user_id: i64,
    /// Unique human-facing registration number, distinct from the numeric id
    pub reg_no: String,
    pub program: String,
    pub year_of_study: i32,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LecturerProfile {
    pub id: i64,
    pub user_id: i64,
    /// Unique human-facing staff number
    pub staff_no: String,
    pub department: String,
    pub phone: Option<String>,
}

/// User together with whichever profile its role owns.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserWithProfile {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_profile: Option<StudentProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecturer_profile: Option<LecturerProfile>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub program: Option<String>,
    pub year_of_study: Option<i32>,
    pub department: Option<String>,
}

/// One page of users plus pagination metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<UserWithProfile>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

/// Lecturer listing entry (profile joined with the user's name).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LecturerListing {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub staff_no: String,
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Student, UserRole::Lecturer] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("registrar"), None);
    }

    #[test]
    fn test_update_user_dto_validation() {
        let dto = UpdateUserDto {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: None,
            program: None,
            year_of_study: None,
            department: None,
        };
        assert!(dto.validate().is_ok());

        let bad_email = UpdateUserDto {
            name: None,
            email: Some("not-an-email".to_string()),
            phone: None,
            program: None,
            year_of_study: None,
            department: None,
        };
        assert!(bad_email.validate().is_err());
    }
}
