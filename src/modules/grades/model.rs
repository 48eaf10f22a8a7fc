//! Grade models and the letter-grade enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The fixed letter-grade scale. Anything outside this set is rejected
/// before any write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LetterGrade {
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    D,
    E,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 8] = [
        LetterGrade::A,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::E,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::E => "E",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(LetterGrade::A),
            "B+" => Ok(LetterGrade::BPlus),
            "B" => Ok(LetterGrade::B),
            "C+" => Ok(LetterGrade::CPlus),
            "C" => Ok(LetterGrade::C),
            "D+" => Ok(LetterGrade::DPlus),
            "D" => Ok(LetterGrade::D),
            "E" => Ok(LetterGrade::E),
            other => Err(format!("'{}' is not a valid letter grade", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub semester_id: i64,
    pub grade: String,
    pub date_posted: DateTime<Utc>,
}

/// Grade joined with course and semester names for transcript listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GradeListing {
    pub id: i64,
    pub student_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub grade: String,
    pub semester: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateGradeDto {
    pub student_id: i64,
    pub course_id: i64,
    pub semester_id: i64,
    /// One of A, B+, B, C+, C, D+, D, E
    pub grade: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_valid_grades_parse() {
        for grade in LetterGrade::ALL {
            assert_eq!(grade.as_str().parse::<LetterGrade>(), Ok(grade));
        }
    }

    #[test]
    fn test_invalid_grades_rejected() {
        for s in ["F", "A+", "b+", "", "AB", "A-"] {
            assert!(s.parse::<LetterGrade>().is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn test_serde_rename_matches_wire_format() {
        assert_eq!(
            serde_json::to_string(&LetterGrade::BPlus).unwrap(),
            r#""B+""#
        );
        let parsed: LetterGrade = serde_json::from_str(r#""D+""#).unwrap();
        assert_eq!(parsed, LetterGrade::DPlus);
    }
}
