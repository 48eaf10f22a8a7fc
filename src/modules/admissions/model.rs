//! Admission applications. A single persisted record per application with a
//! status that moves from `pending` to exactly one of `approved` or
//! `rejected` and never moves again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Only pending applications can be decided.
    pub fn can_decide(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("'{}' is not a valid application status", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdmissionApplication {
    pub id: i64,
    pub student_name: String,
    pub student_email: String,
    pub reg_no: String,
    pub program_name: String,
    pub department: String,
    pub batch_year: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitApplicationDto {
    #[validate(length(min = 1, max = 100))]
    pub student_name: String,
    #[validate(email)]
    pub student_email: String,
    #[validate(length(min = 1, max = 50))]
    pub reg_no: String,
    #[validate(length(min = 1, max = 100))]
    pub program_name: String,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    #[validate(length(min = 4, max = 10))]
    pub batch_year: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DecideApplicationDto {
    /// Acting administrator, recorded in the audit trail
    pub admin_id: i64,
    /// Required when rejecting
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_can_be_decided() {
        assert!(ApplicationStatus::Pending.can_decide());
        assert!(!ApplicationStatus::Approved.can_decide());
        assert!(!ApplicationStatus::Rejected.can_decide());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
        assert!("waitlisted".parse::<ApplicationStatus>().is_err());
    }
}
