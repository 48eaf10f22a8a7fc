use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DocumentRequest {
    pub id: i64,
    pub student_id: i64,
    pub document_type: String,
    pub status: String,
    pub requested_on: DateTime<Utc>,
    pub processed_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentRequestDto {
    pub student_id: i64,
    /// e.g. transcript, admission letter, fee statement
    #[validate(length(min = 1, max = 100))]
    pub document_type: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDocumentRequestDto {
    #[validate(length(min = 1, max = 50))]
    pub status: String,
}
