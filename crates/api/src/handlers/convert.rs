//! Conversions from database rows to domain models.
//!
//! Row types keep primitive column encodings (day index, status string);
//! these helpers lift them into the typed core models and fail loudly when
//! a row carries an encoding the domain does not recognize, since that
//! indicates data corruption rather than a normal empty result.

use std::str::FromStr;

use agendei_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentResponse, AppointmentStatus},
        schedule::{DayOfWeek, WeeklyScheduleWindow},
    },
};
use agendei_db::models::{DbAppointment, DbScheduleWindow};

pub(crate) fn to_weekly_window(row: &DbScheduleWindow) -> BookingResult<WeeklyScheduleWindow> {
    let day_of_week = DayOfWeek::from_index(row.day_of_week).ok_or_else(|| {
        BookingError::Validation(format!(
            "Stored schedule window {} has invalid day-of-week index {}",
            row.id, row.day_of_week
        ))
    })?;

    Ok(WeeklyScheduleWindow {
        day_of_week,
        start_time: row.start_time,
        end_time: row.end_time,
        is_available: row.is_available,
    })
}

pub(crate) fn to_appointment(row: &DbAppointment) -> BookingResult<Appointment> {
    let status = AppointmentStatus::from_str(&row.status)?;

    Ok(Appointment {
        id: row.id,
        professional_id: row.professional_id,
        service_id: row.service_id,
        client_name: row.client_name.clone(),
        scheduled_at: row.scheduled_at,
        duration_minutes: row.duration_minutes,
        status,
        created_at: row.created_at,
    })
}

pub(crate) fn to_appointment_response(row: &DbAppointment) -> BookingResult<AppointmentResponse> {
    let appointment = to_appointment(row)?;

    Ok(AppointmentResponse {
        id: appointment.id,
        professional_id: appointment.professional_id,
        service_id: appointment.service_id,
        client_name: appointment.client_name,
        scheduled_at: appointment.scheduled_at,
        duration_minutes: appointment.duration_minutes,
        status: appointment.status,
        created_at: appointment.created_at,
    })
}
