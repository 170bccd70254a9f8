use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEstablishment {
    pub id: Uuid,
    pub name: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfessional {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One weekly recurring window row. `day_of_week` is the Sunday-based index
/// 0-6, matching `agendei_core::models::schedule::DayOfWeek::index`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleWindow {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// An appointment row. `scheduled_at` is a local wall-clock timestamp
/// (TIMESTAMP without zone); `status` holds the canonical status string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub client_name: String,
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
