use crate::models::DbProfessional;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_professional(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    name: &str,
) -> Result<DbProfessional> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating professional: id={}, establishment_id={}, name={}",
        id,
        establishment_id,
        name
    );

    let professional = sqlx::query_as::<_, DbProfessional>(
        r#"
        INSERT INTO professionals (id, establishment_id, name, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, establishment_id, name, created_at
        "#,
    )
    .bind(id)
    .bind(establishment_id)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(professional)
}

pub async fn get_professional_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbProfessional>> {
    tracing::debug!("Getting professional by id: {}", id);

    let professional = sqlx::query_as::<_, DbProfessional>(
        r#"
        SELECT id, establishment_id, name, created_at
        FROM professionals
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(professional)
}

pub async fn list_professionals_by_establishment(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<DbProfessional>> {
    let professionals = sqlx::query_as::<_, DbProfessional>(
        r#"
        SELECT id, establishment_id, name, created_at
        FROM professionals
        WHERE establishment_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    Ok(professionals)
}
