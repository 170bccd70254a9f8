use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use agendei_core::availability::{compute_available_slots, fits_weekly_windows, format_slot};
use agendei_core::models::appointment::{Appointment, AppointmentStatus};
use agendei_core::models::schedule::{DayOfWeek, WeeklyScheduleWindow};

// 2026-09-07 is a Monday, 2026-09-12 a Saturday.
const MONDAY: &str = "2026-09-07";
const SATURDAY: &str = "2026-09-12";

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn dt(date: &str, time: &str) -> NaiveDateTime {
    d(date).and_time(t(time))
}

fn window(day: DayOfWeek, start: &str, end: &str, is_available: bool) -> WeeklyScheduleWindow {
    WeeklyScheduleWindow {
        day_of_week: day,
        start_time: t(start),
        end_time: t(end),
        is_available,
    }
}

fn appointment(
    scheduled_at: NaiveDateTime,
    duration_minutes: i32,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        professional_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        client_name: "Maria".to_string(),
        scheduled_at,
        duration_minutes,
        status,
        created_at: DateTime::<Utc>::MIN_UTC,
    }
}

fn as_strings(slots: &[NaiveTime]) -> Vec<String> {
    slots.iter().copied().map(format_slot).collect()
}

#[test]
fn full_day_with_no_appointments() {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];
    let slots = compute_available_slots(d(MONDAY), 60, &windows, &[], dt(MONDAY, "08:00"));

    assert_eq!(
        as_strings(&slots),
        vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
    );
}

#[test]
fn scheduled_appointment_blocks_its_slot() {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];
    let appointments = vec![appointment(
        dt(MONDAY, "10:00"),
        60,
        AppointmentStatus::Scheduled,
    )];

    let slots =
        compute_available_slots(d(MONDAY), 60, &windows, &appointments, dt(MONDAY, "08:00"));
    let strings = as_strings(&slots);

    assert!(!strings.contains(&"10:00".to_string()));
    assert!(strings.contains(&"09:00".to_string()));
    assert!(strings.contains(&"11:00".to_string()));
    assert_eq!(slots.len(), 8);
}

#[test]
fn forty_five_minute_slots_fit_the_window() {
    let windows = vec![window(DayOfWeek::Saturday, "09:00", "14:00", true)];
    let slots = compute_available_slots(d(SATURDAY), 45, &windows, &[], dt(SATURDAY, "07:00"));

    // 13:30 + 45min would exceed 14:00, so it is excluded
    assert_eq!(
        as_strings(&slots),
        vec!["09:00", "09:45", "10:30", "11:15", "12:00", "12:45"]
    );
}

#[test]
fn elapsed_slots_are_excluded_but_in_progress_slots_remain() {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];
    let now = dt(MONDAY, "14:30");

    let slots = compute_available_slots(d(MONDAY), 30, &windows, &[], now);
    let strings = as_strings(&slots);

    // The 14:00 slot ends exactly at 14:30, which is not strictly after now
    assert!(!strings.contains(&"14:00".to_string()));
    assert_eq!(strings.first().map(String::as_str), Some("14:30"));
    assert_eq!(strings.last().map(String::as_str), Some("17:30"));
    assert_eq!(slots.len(), 7);
}

#[test]
fn unavailable_day_yields_no_slots() {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", false)];
    let appointments = vec![appointment(
        dt(MONDAY, "10:00"),
        60,
        AppointmentStatus::Scheduled,
    )];

    let slots =
        compute_available_slots(d(MONDAY), 60, &windows, &appointments, dt(MONDAY, "08:00"));

    assert_eq!(slots, Vec::<NaiveTime>::new());
}

#[test]
fn day_without_a_window_yields_no_slots() {
    let windows = vec![window(DayOfWeek::Tuesday, "09:00", "18:00", true)];
    let slots = compute_available_slots(d(MONDAY), 60, &windows, &[], dt(MONDAY, "08:00"));

    assert_eq!(slots, Vec::<NaiveTime>::new());
}

#[rstest]
#[case(AppointmentStatus::Confirmed)]
#[case(AppointmentStatus::Completed)]
#[case(AppointmentStatus::Cancelled)]
#[case(AppointmentStatus::NoShow)]
fn non_blocking_statuses_do_not_constrain(#[case] status: AppointmentStatus) {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];
    let appointments = vec![appointment(dt(MONDAY, "10:00"), 60, status)];

    let slots =
        compute_available_slots(d(MONDAY), 60, &windows, &appointments, dt(MONDAY, "08:00"));

    assert!(as_strings(&slots).contains(&"10:00".to_string()));
    assert_eq!(slots.len(), 9);
}

#[test]
fn appointments_on_other_dates_do_not_constrain() {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];
    // Same wall-clock time, one week later
    let appointments = vec![appointment(
        dt("2026-09-14", "10:00"),
        60,
        AppointmentStatus::Scheduled,
    )];

    let slots =
        compute_available_slots(d(MONDAY), 60, &windows, &appointments, dt(MONDAY, "08:00"));

    assert_eq!(slots.len(), 9);
}

#[test]
fn all_available_windows_of_the_day_are_used() {
    let windows = vec![
        window(DayOfWeek::Monday, "14:00", "18:00", true),
        window(DayOfWeek::Monday, "09:00", "12:00", true),
    ];

    let slots = compute_available_slots(d(MONDAY), 60, &windows, &[], dt(MONDAY, "08:00"));

    assert_eq!(
        as_strings(&slots),
        vec!["09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00"]
    );
}

#[test]
fn duplicate_windows_produce_deduplicated_slots() {
    let windows = vec![
        window(DayOfWeek::Monday, "09:00", "11:00", true),
        window(DayOfWeek::Monday, "09:00", "11:00", true),
    ];

    let slots = compute_available_slots(d(MONDAY), 60, &windows, &[], dt(MONDAY, "08:00"));

    assert_eq!(as_strings(&slots), vec!["09:00", "10:00"]);
}

#[test]
fn partial_overlap_blocks_only_intersecting_slots() {
    let windows = vec![window(DayOfWeek::Saturday, "09:00", "14:00", true)];
    // A 30-minute booking at 10:00 intersects only the 09:45-10:30 slot
    let appointments = vec![appointment(
        dt(SATURDAY, "10:00"),
        30,
        AppointmentStatus::Scheduled,
    )];

    let slots =
        compute_available_slots(d(SATURDAY), 45, &windows, &appointments, dt(SATURDAY, "07:00"));

    assert_eq!(
        as_strings(&slots),
        vec!["09:00", "10:30", "11:15", "12:00", "12:45"]
    );
}

#[test]
fn appointment_without_stored_duration_occupies_one_service_length() {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];
    let appointments = vec![appointment(
        dt(MONDAY, "10:00"),
        0,
        AppointmentStatus::Scheduled,
    )];

    let slots =
        compute_available_slots(d(MONDAY), 60, &windows, &appointments, dt(MONDAY, "08:00"));
    let strings = as_strings(&slots);

    assert!(!strings.contains(&"10:00".to_string()));
    assert!(strings.contains(&"11:00".to_string()));
}

#[rstest]
#[case(0)]
#[case(-30)]
fn non_positive_duration_yields_no_slots(#[case] duration: i32) {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];
    let slots = compute_available_slots(d(MONDAY), duration, &windows, &[], dt(MONDAY, "08:00"));

    assert_eq!(slots, Vec::<NaiveTime>::new());
}

#[test]
fn identical_inputs_give_identical_output() {
    let windows = vec![
        window(DayOfWeek::Monday, "09:00", "12:00", true),
        window(DayOfWeek::Monday, "13:00", "18:00", true),
    ];
    let appointments = vec![appointment(
        dt(MONDAY, "14:00"),
        60,
        AppointmentStatus::Scheduled,
    )];
    let now = dt(MONDAY, "10:15");

    let first = compute_available_slots(d(MONDAY), 60, &windows, &appointments, now);
    let second = compute_available_slots(d(MONDAY), 60, &windows, &appointments, now);

    assert_eq!(first, second);
}

// Checks every engine guarantee at once on a busy day: containment in a
// window, no overlap with blocking appointments, nothing elapsed, strictly
// increasing output.
#[test]
fn busy_day_satisfies_all_slot_invariants() {
    let duration = 45;
    let windows = vec![
        window(DayOfWeek::Monday, "08:00", "12:00", true),
        window(DayOfWeek::Monday, "13:30", "19:00", true),
        window(DayOfWeek::Monday, "06:00", "07:00", false),
    ];
    let appointments = vec![
        appointment(dt(MONDAY, "09:30"), 45, AppointmentStatus::Scheduled),
        appointment(dt(MONDAY, "14:15"), 90, AppointmentStatus::Scheduled),
        appointment(dt(MONDAY, "16:00"), 45, AppointmentStatus::Cancelled),
    ];
    let now = dt(MONDAY, "08:50");

    let slots = compute_available_slots(d(MONDAY), duration, &windows, &appointments, now);
    assert!(!slots.is_empty());

    let step = Duration::minutes(duration as i64);
    for pair in slots.windows(2) {
        assert!(pair[0] < pair[1], "slots must be strictly increasing");
    }

    for &slot in &slots {
        let start = d(MONDAY).and_time(slot);
        let end = start + step;

        assert!(end > now, "slot {} already elapsed", slot);

        let contained = windows.iter().any(|w| {
            w.is_available && slot >= w.start_time && end <= d(MONDAY).and_time(w.end_time)
        });
        assert!(contained, "slot {} escapes every available window", slot);

        for appt in appointments.iter().filter(|a| a.status.blocks_booking()) {
            let appt_end = appt.scheduled_at + Duration::minutes(appt.duration_minutes as i64);
            assert!(
                start >= appt_end || end <= appt.scheduled_at,
                "slot {} overlaps appointment at {}",
                slot,
                appt.scheduled_at
            );
        }
    }
}

#[test]
fn fits_weekly_windows_accepts_contained_intervals() {
    let windows = vec![window(DayOfWeek::Monday, "09:00", "18:00", true)];

    assert!(fits_weekly_windows(dt(MONDAY, "09:00"), 60, &windows));
    assert!(fits_weekly_windows(dt(MONDAY, "17:00"), 60, &windows));
    // Exact window-length fit
    assert!(fits_weekly_windows(dt(MONDAY, "09:00"), 540, &windows));
}

#[test]
fn fits_weekly_windows_rejects_escaping_intervals() {
    let windows = vec![
        window(DayOfWeek::Monday, "09:00", "18:00", true),
        window(DayOfWeek::Tuesday, "09:00", "18:00", false),
    ];

    // Crosses the window end
    assert!(!fits_weekly_windows(dt(MONDAY, "17:30"), 60, &windows));
    // Before the window opens
    assert!(!fits_weekly_windows(dt(MONDAY, "08:00"), 60, &windows));
    // Right day of week, but marked unavailable
    assert!(!fits_weekly_windows(dt("2026-09-08", "10:00"), 60, &windows));
    // No window at all for Wednesday
    assert!(!fits_weekly_windows(dt("2026-09-09", "10:00"), 60, &windows));
    // Contract violation
    assert!(!fits_weekly_windows(dt(MONDAY, "10:00"), 0, &windows));
}

#[test]
fn slots_format_zero_padded() {
    assert_eq!(format_slot(t("09:05")), "09:05");
    assert_eq!(format_slot(t("14:30")), "14:30");
}
