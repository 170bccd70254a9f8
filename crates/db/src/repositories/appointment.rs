use crate::models::DbAppointment;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Outcome of a guarded appointment insert.
///
/// Client-computed availability is advisory only, so losing the race for a
/// slot is an expected outcome, not a database error.
#[derive(Debug)]
pub enum BookingAttempt {
    Booked(DbAppointment),
    SlotTaken,
}

/// Atomic check-and-insert for a new appointment.
///
/// Runs in one transaction: locks the professional's row to serialize
/// concurrent bookings, re-runs the overlap check against committed data,
/// then inserts. The partial unique index on active slots catches anything
/// that slips through and is reported as [`BookingAttempt::SlotTaken`]
/// rather than an error.
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    professional_id: Uuid,
    service_id: Uuid,
    client_name: &str,
    scheduled_at: NaiveDateTime,
    duration_minutes: i32,
) -> Result<BookingAttempt> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let slot_end = scheduled_at + Duration::minutes(i64::from(duration_minutes));

    tracing::debug!(
        "Booking attempt: professional_id={}, scheduled_at={}, duration_minutes={}",
        professional_id,
        scheduled_at,
        duration_minutes
    );

    let mut tx = pool.begin().await?;

    // Serialize bookings per professional.
    sqlx::query("SELECT id FROM professionals WHERE id = $1 FOR UPDATE")
        .bind(professional_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| eyre::eyre!("Professional {} not found", professional_id))?;

    // Half-open interval overlap against every blocking appointment.
    let conflict: bool = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM appointments
            WHERE professional_id = $1
              AND status = 'SCHEDULED'
              AND scheduled_at < $3
              AND scheduled_at + make_interval(mins => duration_minutes) > $2
        )
        "#,
    )
    .bind(professional_id)
    .bind(scheduled_at)
    .bind(slot_end)
    .fetch_one(&mut *tx)
    .await?;

    if conflict {
        tracing::debug!(
            "Booking conflict for professional {} at {}",
            professional_id,
            scheduled_at
        );
        return Ok(BookingAttempt::SlotTaken);
    }

    let inserted = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (id, professional_id, service_id, client_name, scheduled_at, duration_minutes, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'SCHEDULED', $7)
        RETURNING id, professional_id, service_id, client_name, scheduled_at, duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(professional_id)
    .bind(service_id)
    .bind(client_name)
    .bind(scheduled_at)
    .bind(duration_minutes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(appointment) => {
            tx.commit().await?;
            Ok(BookingAttempt::Booked(appointment))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
            Ok(BookingAttempt::SlotTaken)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn list_appointments_by_professional(
    pool: &Pool<Postgres>,
    professional_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, professional_id, service_id, client_name, scheduled_at, duration_minutes, status, created_at
        FROM appointments
        WHERE professional_id = $1
        ORDER BY scheduled_at ASC
        "#,
    )
    .bind(professional_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Appointments for one professional whose `scheduled_at` falls on the given
/// local calendar date.
pub async fn list_appointments_on_date(
    pool: &Pool<Postgres>,
    professional_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);

    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, professional_id, service_id, client_name, scheduled_at, duration_minutes, status, created_at
        FROM appointments
        WHERE professional_id = $1
          AND scheduled_at >= $2
          AND scheduled_at < $3
        ORDER BY scheduled_at ASC
        "#,
    )
    .bind(professional_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Outcome of a status transition.
///
/// Reviving an appointment into SCHEDULED re-enters the slot race, so it
/// can lose to a booking made since, exactly like a fresh insert.
#[derive(Debug)]
pub enum StatusUpdate {
    Applied(DbAppointment),
    SlotTaken,
}

/// A transition into the blocking status from a non-blocking one re-opens
/// the double-booking question and must re-run the overlap guard.
fn requires_conflict_check(current_status: &str, new_status: &str) -> bool {
    new_status == "SCHEDULED" && current_status != "SCHEDULED"
}

/// Transitions an appointment to a new status.
///
/// Transitions out of SCHEDULED (cancel, complete, no-show) are plain
/// updates. Transitions back into SCHEDULED run inside the same guard as
/// [`create_appointment`]: professional row lock, overlap re-check against
/// every other blocking appointment, and 23505 from the partial unique
/// index reported as [`StatusUpdate::SlotTaken`] rather than an error.
///
/// Returns `None` when no appointment with that id exists.
pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<StatusUpdate>> {
    tracing::debug!("Updating appointment {} to status {}", id, status);

    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, professional_id, service_id, client_name, scheduled_at, duration_minutes, status, created_at
        FROM appointments
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(current) = current else {
        return Ok(None);
    };

    if requires_conflict_check(&current.status, status) {
        // Serialize with concurrent bookings for the same professional.
        sqlx::query("SELECT id FROM professionals WHERE id = $1 FOR UPDATE")
            .bind(current.professional_id)
            .fetch_optional(&mut *tx)
            .await?;

        let slot_end =
            current.scheduled_at + Duration::minutes(i64::from(current.duration_minutes));

        let conflict: bool = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM appointments
                WHERE professional_id = $1
                  AND id <> $2
                  AND status = 'SCHEDULED'
                  AND scheduled_at < $4
                  AND scheduled_at + make_interval(mins => duration_minutes) > $3
            )
            "#,
        )
        .bind(current.professional_id)
        .bind(id)
        .bind(current.scheduled_at)
        .bind(slot_end)
        .fetch_one(&mut *tx)
        .await?;

        if conflict {
            tracing::debug!(
                "Revival conflict for appointment {} at {}",
                id,
                current.scheduled_at
            );
            return Ok(Some(StatusUpdate::SlotTaken));
        }
    }

    let updated = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, professional_id, service_id, client_name, scheduled_at, duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_one(&mut *tx)
    .await;

    match updated {
        Ok(appointment) => {
            tx.commit().await?;
            Ok(Some(StatusUpdate::Applied(appointment)))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
            Ok(Some(StatusUpdate::SlotTaken))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::requires_conflict_check;

    #[rstest]
    #[case("CANCELLED", "SCHEDULED", true)]
    #[case("COMPLETED", "SCHEDULED", true)]
    #[case("NO_SHOW", "SCHEDULED", true)]
    fn reviving_into_scheduled_requires_the_guard(
        #[case] current: &str,
        #[case] new: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(requires_conflict_check(current, new), expected);
    }

    #[rstest]
    #[case("SCHEDULED", "SCHEDULED")]
    #[case("SCHEDULED", "CANCELLED")]
    #[case("SCHEDULED", "CONFIRMED")]
    #[case("CANCELLED", "NO_SHOW")]
    fn other_transitions_are_plain_updates(#[case] current: &str, #[case] new: &str) {
        assert!(!requires_conflict_check(current, new));
    }
}

