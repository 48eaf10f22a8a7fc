//! Fee structures, payments and the per-student clearance record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

/// Clearance is an administrative attestation. Moving to `cleared` stamps
/// `cleared_on`; moving anywhere else nulls it. No check against payment
/// totals is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClearanceStatus {
    Pending,
    Cleared,
    Flagged,
}

impl ClearanceStatus {
    pub const ALL: [ClearanceStatus; 3] = [
        ClearanceStatus::Pending,
        ClearanceStatus::Cleared,
        ClearanceStatus::Flagged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClearanceStatus::Pending => "pending",
            ClearanceStatus::Cleared => "cleared",
            ClearanceStatus::Flagged => "flagged",
        }
    }
}

impl fmt::Display for ClearanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClearanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClearanceStatus::Pending),
            "cleared" => Ok(ClearanceStatus::Cleared),
            "flagged" => Ok(ClearanceStatus::Flagged),
            other => Err(format!("'{}' is not a valid clearance status", other)),
        }
    }
}

/// The `cleared_on` timestamp that goes with a status transition.
/// `cleared` gets the supplied instant, every other status gets null.
pub fn cleared_on_for(status: ClearanceStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match status {
        ClearanceStatus::Cleared => Some(now),
        ClearanceStatus::Pending | ClearanceStatus::Flagged => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeeStructure {
    pub id: i64,
    pub course_id: i64,
    pub hostel_id: i64,
    pub semester_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub fee_structure_id: i64,
    pub amount_paid: f64,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeeClearance {
    pub id: i64,
    pub student_id: i64,
    pub amount_due: f64,
    pub status: String,
    pub cleared_on: Option<DateTime<Utc>>,
}

/// Aggregate view for the admin dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClearanceStats {
    pub pending: i64,
    pub cleared: i64,
    pub flagged: i64,
    pub total_amount_due: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeeStructureDto {
    pub course_id: i64,
    pub hostel_id: i64,
    pub semester_id: i64,
    #[validate(range(min = 0.0))]
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentDto {
    pub student_id: i64,
    pub fee_structure_id: i64,
    #[validate(range(min = 0.0))]
    pub amount_paid: f64,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateFeeStructureDto {
    pub course_id: Option<i64>,
    pub hostel_id: Option<i64>,
    pub semester_id: Option<i64>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertClearanceDto {
    pub student_id: i64,
    pub amount_due: Option<f64>,
    /// One of pending, cleared, flagged
    pub status: String,
    /// Administrator recording the change. When present an audit row is
    /// written in the same transaction.
    pub updated_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_sets_timestamp() {
        let now = Utc::now();
        assert_eq!(cleared_on_for(ClearanceStatus::Cleared, now), Some(now));
    }

    #[test]
    fn test_pending_and_flagged_null_the_timestamp() {
        let now = Utc::now();
        assert_eq!(cleared_on_for(ClearanceStatus::Pending, now), None);
        assert_eq!(cleared_on_for(ClearanceStatus::Flagged, now), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in ClearanceStatus::ALL {
            assert_eq!(status.as_str().parse::<ClearanceStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!("approved".parse::<ClearanceStatus>().is_err());
        assert!("Cleared".parse::<ClearanceStatus>().is_err());
        assert!("".parse::<ClearanceStatus>().is_err());
    }
}
