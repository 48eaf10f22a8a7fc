use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::UserRole;

/// Signup payload. Profile fields are required depending on `role`:
/// students need `reg_no`, `program` and `year_of_study`; lecturers need
/// `staff_no` and `department`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: UserRole,
    pub reg_no: Option<String>,
    pub program: Option<String>,
    pub year_of_study: Option<i32>,
    pub staff_no: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_dto_validation() {
        let dto = SignupDto {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret123".to_string(),
            role: UserRole::Student,
            reg_no: Some("SC/001/2024".to_string()),
            program: Some("Computer Science".to_string()),
            year_of_study: Some(1),
            staff_no: None,
            department: None,
            phone: None,
        };
        assert!(dto.validate().is_ok());

        let short_password = SignupDto {
            password: "abc".to_string(),
            ..dto.clone()
        };
        assert!(short_password.validate().is_err());

        let bad_email = SignupDto {
            email: "nope".to_string(),
            ..dto
        };
        assert!(bad_email.validate().is_err());
    }
}
