use crate::models::DbScheduleWindow;
use chrono::{NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// One window to persist when replacing a professional's weekly schedule.
pub struct NewScheduleWindow {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

pub async fn get_windows_by_professional_id(
    pool: &Pool<Postgres>,
    professional_id: Uuid,
) -> Result<Vec<DbScheduleWindow>> {
    tracing::debug!("Getting schedule windows for professional: {}", professional_id);

    let windows = sqlx::query_as::<_, DbScheduleWindow>(
        r#"
        SELECT id, professional_id, day_of_week, start_time, end_time, is_available, created_at
        FROM schedule_windows
        WHERE professional_id = $1
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .bind(professional_id)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

/// Replaces the professional's entire weekly schedule in one transaction.
pub async fn replace_weekly_windows(
    pool: &Pool<Postgres>,
    professional_id: Uuid,
    windows: &[NewScheduleWindow],
) -> Result<Vec<DbScheduleWindow>> {
    tracing::debug!(
        "Replacing weekly schedule for professional {} with {} windows",
        professional_id,
        windows.len()
    );

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM schedule_windows
        WHERE professional_id = $1
        "#,
    )
    .bind(professional_id)
    .execute(&mut *tx)
    .await?;

    let mut stored = Vec::with_capacity(windows.len());
    for window in windows {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let row = sqlx::query_as::<_, DbScheduleWindow>(
            r#"
            INSERT INTO schedule_windows
                (id, professional_id, day_of_week, start_time, end_time, is_available, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, professional_id, day_of_week, start_time, end_time, is_available, created_at
            "#,
        )
        .bind(id)
        .bind(professional_id)
        .bind(window.day_of_week)
        .bind(window.start_time)
        .bind(window.end_time)
        .bind(window.is_available)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        stored.push(row);
    }

    tx.commit().await?;

    Ok(stored)
}
