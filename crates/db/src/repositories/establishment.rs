use crate::models::DbEstablishment;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_establishment(
    pool: &Pool<Postgres>,
    name: &str,
    timezone: &str,
) -> Result<DbEstablishment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating establishment: id={}, name={}", id, name);

    let establishment = sqlx::query_as::<_, DbEstablishment>(
        r#"
        INSERT INTO establishments (id, name, timezone, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, timezone, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(timezone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(establishment)
}

pub async fn get_establishment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbEstablishment>> {
    tracing::debug!("Getting establishment by id: {}", id);

    let establishment = sqlx::query_as::<_, DbEstablishment>(
        r#"
        SELECT id, name, timezone, created_at
        FROM establishments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(establishment)
}
