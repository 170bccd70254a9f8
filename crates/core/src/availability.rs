//! # Slot Availability Engine
//!
//! This module computes the bookable start times for a professional on a
//! given calendar date. It is the algorithmic core of the booking service:
//! everything else in the system fetches data for it or persists the
//! booking it advised.
//!
//! ## Availability Algorithm
//!
//! Given the professional's weekly recurring schedule, a service duration,
//! and the existing appointments for the target date, the engine works by:
//!
//! 1. Mapping the target date to its day of week (Sunday-indexed)
//! 2. Collecting every window for that day marked available, sorted by start
//! 3. Collecting the blocking appointment intervals for that date
//! 4. Stepping through each window in duration-sized increments and keeping
//!    each candidate slot that fits the window, has not already ended, and
//!    does not overlap a blocking appointment
//! 5. Sorting and deduplicating the surviving start times
//!
//! Slots are duration-aligned by construction: back-to-back bookings of the
//! same service length, not an arbitrary 5/15-minute grid.
//!
//! The computation is pure and synchronous. It performs no I/O, touches no
//! shared state, and never fails: "no availability" and "nothing selected"
//! both resolve to an empty result. Callers inject `now` explicitly so the
//! past-slot cutoff is testable and can be recomputed server-side with a
//! trusted clock.
//!
//! All timestamps are wall-clock values in the establishment's local
//! timezone. Conversion to or from any other zone happens at the system
//! boundary, never in here.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{
    appointment::Appointment,
    schedule::{DayOfWeek, WeeklyScheduleWindow},
};

/// Computes the ordered list of bookable start times for one date.
///
/// # Arguments
///
/// * `date` - Target calendar day, no time component
/// * `duration_minutes` - Length of the service being booked
/// * `windows` - The professional's full weekly recurring schedule; every
///   available window matching the date's day of week is considered
/// * `appointments` - The professional's existing appointments; only those
///   on `date` with a blocking status constrain the result
/// * `now` - The current wall-clock instant, injected for testability
///
/// # Returns
///
/// Chronologically ascending, deduplicated slot start times. Empty when the
/// day has no available window, when every candidate is taken or elapsed,
/// or when `duration_minutes` is not positive (a caller contract violation,
/// deliberately not an error channel).
///
/// # Semantics
///
/// * A slot `[start, start + duration)` must lie fully inside one available
///   window for the day.
/// * A slot is excluded while `slot_end <= now`: a slot already in progress
///   is still offered until it has fully elapsed.
/// * Overlap against an existing appointment uses the half-open interval
///   test `slot_start < appt_end && slot_end > appt_start`. An appointment
///   with a non-positive stored duration is assumed to occupy one service
///   length.
pub fn compute_available_slots(
    date: NaiveDate,
    duration_minutes: i32,
    windows: &[WeeklyScheduleWindow],
    appointments: &[Appointment],
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    if duration_minutes <= 0 {
        return Vec::new();
    }
    let duration = Duration::minutes(i64::from(duration_minutes));

    let day = DayOfWeek::from_weekday(date.weekday());
    let mut day_windows: Vec<&WeeklyScheduleWindow> = windows
        .iter()
        .filter(|w| w.day_of_week == day && w.is_available)
        .collect();
    day_windows.sort_by_key(|w| w.start_time);

    let blocking: Vec<(NaiveDateTime, NaiveDateTime)> = appointments
        .iter()
        .filter(|a| a.status.blocks_booking() && a.scheduled_at.date() == date)
        .map(|a| {
            let booked_minutes = if a.duration_minutes > 0 {
                a.duration_minutes
            } else {
                duration_minutes
            };
            let start = a.scheduled_at;
            (start, start + Duration::minutes(i64::from(booked_minutes)))
        })
        .collect();

    let mut slots = Vec::new();
    for window in day_windows {
        let window_end = date.and_time(window.end_time);
        let mut slot_start = date.and_time(window.start_time);

        while slot_start + duration <= window_end {
            let slot_end = slot_start + duration;

            let already_elapsed = slot_end <= now;
            let taken = blocking
                .iter()
                .any(|&(appt_start, appt_end)| slot_start < appt_end && slot_end > appt_start);

            if !already_elapsed && !taken {
                slots.push(slot_start.time());
            }

            slot_start = slot_end;
        }
    }

    // Windows arrive unordered and may produce duplicate boundaries when a
    // day is split into adjacent intervals.
    slots.sort();
    slots.dedup();
    slots
}

/// Whether a proposed booking interval lies fully within some available
/// window of the weekly schedule.
///
/// Used by the server-side booking guard: the slot list shown to a client
/// is advisory, so the write path re-validates against working hours before
/// checking for conflicts.
pub fn fits_weekly_windows(
    start: NaiveDateTime,
    duration_minutes: i32,
    windows: &[WeeklyScheduleWindow],
) -> bool {
    if duration_minutes <= 0 {
        return false;
    }
    let end = start + Duration::minutes(i64::from(duration_minutes));
    let day = DayOfWeek::from_weekday(start.date().weekday());

    windows.iter().any(|w| {
        w.day_of_week == day
            && w.is_available
            && start.time() >= w.start_time
            && end <= start.date().and_time(w.end_time)
    })
}

/// Formats a slot start time in the wire format, zero-padded 24-hour
/// `"HH:MM"`.
pub fn format_slot(slot: NaiveTime) -> String {
    slot.format("%H:%M").to_string()
}
