use chrono::{NaiveTime, Weekday};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, from_value, json, to_value};

use agendei_core::errors::BookingError;
use agendei_core::models::appointment::AppointmentStatus;
use agendei_core::models::schedule::{DayOfWeek, UpdateWeeklyScheduleRequest, WeeklyScheduleWindow};

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn window(day: DayOfWeek, start: &str, end: &str) -> WeeklyScheduleWindow {
    WeeklyScheduleWindow {
        day_of_week: day,
        start_time: t(start),
        end_time: t(end),
        is_available: true,
    }
}

#[rstest]
#[case(DayOfWeek::Sunday, 0)]
#[case(DayOfWeek::Monday, 1)]
#[case(DayOfWeek::Tuesday, 2)]
#[case(DayOfWeek::Wednesday, 3)]
#[case(DayOfWeek::Thursday, 4)]
#[case(DayOfWeek::Friday, 5)]
#[case(DayOfWeek::Saturday, 6)]
fn day_of_week_index_round_trips(#[case] day: DayOfWeek, #[case] index: i16) {
    assert_eq!(day.index(), index);
    assert_eq!(DayOfWeek::from_index(index), Some(day));
}

#[rstest]
#[case(-1)]
#[case(7)]
#[case(42)]
fn day_of_week_rejects_out_of_range_indexes(#[case] index: i16) {
    assert_eq!(DayOfWeek::from_index(index), None);
}

#[test]
fn day_of_week_matches_chrono_weekdays() {
    assert_eq!(DayOfWeek::from_weekday(Weekday::Sun), DayOfWeek::Sunday);
    assert_eq!(DayOfWeek::from_weekday(Weekday::Wed), DayOfWeek::Wednesday);
    assert_eq!(DayOfWeek::from_weekday(Weekday::Sat), DayOfWeek::Saturday);
}

#[test]
fn window_serializes_times_as_hhmm() {
    let value = to_value(window(DayOfWeek::Monday, "09:00", "18:30")).unwrap();

    assert_eq!(
        value,
        json!({
            "day_of_week": "MONDAY",
            "start_time": "09:00",
            "end_time": "18:30",
            "is_available": true,
        })
    );
}

#[test]
fn window_round_trips_through_json() {
    let original = window(DayOfWeek::Friday, "08:15", "12:45");
    let parsed: WeeklyScheduleWindow =
        from_value(to_value(&original).unwrap()).unwrap();

    assert_eq!(parsed.day_of_week, original.day_of_week);
    assert_eq!(parsed.start_time, original.start_time);
    assert_eq!(parsed.end_time, original.end_time);
}

#[rstest]
#[case("09:00:00")]
#[case("0900")]
#[case("25:00")]
#[case("soon")]
fn malformed_wall_clock_times_are_rejected(#[case] raw: &str) {
    let payload = format!(
        r#"{{"day_of_week":"MONDAY","start_time":"{}","end_time":"18:00","is_available":true}}"#,
        raw
    );

    let result: Result<WeeklyScheduleWindow, _> = from_str(&payload);
    assert!(result.is_err(), "{:?} should not parse as HH:MM", raw);
}

#[test]
fn schedule_update_accepts_disjoint_windows() {
    let request = UpdateWeeklyScheduleRequest {
        windows: vec![
            window(DayOfWeek::Monday, "09:00", "12:00"),
            window(DayOfWeek::Monday, "14:00", "18:00"),
            window(DayOfWeek::Tuesday, "09:00", "12:00"),
        ],
    };

    assert!(request.validate().is_ok());
}

#[test]
fn schedule_update_rejects_inverted_window() {
    let request = UpdateWeeklyScheduleRequest {
        windows: vec![window(DayOfWeek::Monday, "18:00", "09:00")],
    };

    assert!(matches!(
        request.validate(),
        Err(BookingError::Validation(_))
    ));
}

#[test]
fn schedule_update_rejects_same_day_overlap() {
    let request = UpdateWeeklyScheduleRequest {
        windows: vec![
            window(DayOfWeek::Monday, "09:00", "13:00"),
            window(DayOfWeek::Monday, "12:00", "18:00"),
        ],
    };

    assert!(matches!(
        request.validate(),
        Err(BookingError::Validation(_))
    ));
}

#[test]
fn schedule_update_allows_same_times_on_different_days() {
    let request = UpdateWeeklyScheduleRequest {
        windows: vec![
            window(DayOfWeek::Monday, "09:00", "18:00"),
            window(DayOfWeek::Tuesday, "09:00", "18:00"),
        ],
    };

    assert!(request.validate().is_ok());
}

#[rstest]
#[case(AppointmentStatus::Scheduled, "SCHEDULED")]
#[case(AppointmentStatus::Confirmed, "CONFIRMED")]
#[case(AppointmentStatus::Completed, "COMPLETED")]
#[case(AppointmentStatus::Cancelled, "CANCELLED")]
#[case(AppointmentStatus::NoShow, "NO_SHOW")]
fn status_strings_round_trip(#[case] status: AppointmentStatus, #[case] encoded: &str) {
    assert_eq!(status.as_str(), encoded);
    assert_eq!(encoded.parse::<AppointmentStatus>().unwrap(), status);

    // The JSON encoding matches the database encoding
    assert_eq!(to_value(status).unwrap(), json!(encoded));
}

#[test]
fn unknown_status_string_is_a_validation_error() {
    let result = "RESCHEDULED".parse::<AppointmentStatus>();
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test]
fn only_scheduled_blocks_booking() {
    assert!(AppointmentStatus::Scheduled.blocks_booking());
    assert!(!AppointmentStatus::Confirmed.blocks_booking());
    assert!(!AppointmentStatus::Completed.blocks_booking());
    assert!(!AppointmentStatus::Cancelled.blocks_booking());
    assert!(!AppointmentStatus::NoShow.blocks_booking());
}
