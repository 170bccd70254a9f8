use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create establishments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS establishments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'America/Sao_Paulo',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create professionals table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professionals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_windows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_windows (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            professional_id UUID NOT NULL REFERENCES professionals(id),
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_window CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id),
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL,
            price_cents BIGINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes > 0),
            CONSTRAINT non_negative_price CHECK (price_cents >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. scheduled_at is a local wall-clock value,
    // stored without a zone on purpose.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            professional_id UUID NOT NULL REFERENCES professionals(id),
            service_id UUID NOT NULL REFERENCES services(id),
            client_name VARCHAR(255) NOT NULL,
            scheduled_at TIMESTAMP NOT NULL,
            duration_minutes INTEGER NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'SCHEDULED',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_appointment_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Backstop against double-booking: at most one active appointment per
    // professional and start time. The transactional overlap check in the
    // appointment repository is the primary guard.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_active_slot
            ON appointments(professional_id, scheduled_at)
            WHERE status = 'SCHEDULED';
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes (one statement per query; prepared statements cannot batch)
    let index_statements = [
        "CREATE INDEX IF NOT EXISTS idx_professionals_establishment_id ON professionals(establishment_id);",
        "CREATE INDEX IF NOT EXISTS idx_schedule_windows_professional_id ON schedule_windows(professional_id);",
        "CREATE INDEX IF NOT EXISTS idx_services_establishment_id ON services(establishment_id);",
        "CREATE INDEX IF NOT EXISTS idx_appointments_professional_id ON appointments(professional_id);",
        "CREATE INDEX IF NOT EXISTS idx_appointments_scheduled_at ON appointments(scheduled_at);",
    ];
    for statement in index_statements {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
