use sqlx::PgPool;
use tracing::instrument;

use crate::modules::announcements::model::{
    Announcement, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::utils::errors::AppError;

const ANNOUNCEMENT_COLUMNS: &str = "id, title, content, posted_by_id, date_posted";

pub struct AnnouncementService;

impl AnnouncementService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateAnnouncementDto) -> Result<Announcement, AppError> {
        let poster_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(dto.posted_by_id)
                .fetch_one(db)
                .await?;

        if !poster_exists {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "INSERT INTO announcements (title, content, posted_by_id)
             VALUES ($1, $2, $3)
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(dto.posted_by_id)
        .fetch_one(db)
        .await?;

        Ok(announcement)
    }

    #[instrument(skip(db))]
    pub async fn get_announcements(db: &PgPool) -> Result<Vec<Announcement>, AppError> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements ORDER BY date_posted DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(announcements)
    }

    #[instrument(skip(db))]
    pub async fn get_announcement(db: &PgPool, id: i64) -> Result<Announcement, AppError> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Announcement not found")))?;

        Ok(announcement)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: i64,
        dto: UpdateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        let existing = Self::get_announcement(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let content = dto.content.unwrap_or(existing.content);

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "UPDATE announcements SET title = $1, content = $2
             WHERE id = $3
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        ))
        .bind(&title)
        .bind(&content)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(announcement)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Announcement not found"
            )));
        }

        Ok(())
    }
}
