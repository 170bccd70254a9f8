use crate::models::DbService;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_service(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    name: &str,
    duration_minutes: i32,
    price_cents: i64,
) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating service: id={}, establishment_id={}, name={}, duration_minutes={}",
        id,
        establishment_id,
        name,
        duration_minutes
    );

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, establishment_id, name, duration_minutes, price_cents, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, establishment_id, name, duration_minutes, price_cents, created_at
        "#,
    )
    .bind(id)
    .bind(establishment_id)
    .bind(name)
    .bind(duration_minutes)
    .bind(price_cents)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    tracing::debug!("Getting service by id: {}", id);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, establishment_id, name, duration_minutes, price_cents, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn list_services_by_establishment(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, establishment_id, name, duration_minutes, price_cents, created_at
        FROM services
        WHERE establishment_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}
