//! Unit-registration models and the prerequisite rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UnitRegistration {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub semester_id: i64,
    pub registered_on: DateTime<Utc>,
}

/// Registration joined with course code/title for listing responses.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RegistrationListing {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub semester_id: i64,
    pub registered_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRegistrationDto {
    pub student_id: i64,
    pub course_id: i64,
    pub semester_id: i64,
}

/// The prerequisite closure rule: every declared prerequisite must appear in
/// the student's historical registration set. An empty requirement is
/// trivially satisfied.
pub fn prerequisites_met(required: &[i64], completed: &HashSet<i64>) -> bool {
    required.iter().all(|id| completed.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prerequisites_is_satisfied() {
        assert!(prerequisites_met(&[], &HashSet::new()));
        assert!(prerequisites_met(&[], &HashSet::from([1, 2])));
    }

    #[test]
    fn test_subset_satisfied() {
        let completed = HashSet::from([1, 2, 3]);
        assert!(prerequisites_met(&[1], &completed));
        assert!(prerequisites_met(&[1, 3], &completed));
        assert!(prerequisites_met(&[1, 2, 3], &completed));
    }

    #[test]
    fn test_missing_prerequisite_fails() {
        let completed = HashSet::from([1, 2]);
        assert!(!prerequisites_met(&[3], &completed));
        assert!(!prerequisites_met(&[1, 3], &completed));
        assert!(!prerequisites_met(&[4], &HashSet::new()));
    }
}
