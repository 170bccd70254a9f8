use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Day of the week, indexed 0-6 starting from Sunday.
///
/// The wire format uses the uppercase symbol names (`"SUNDAY"` ..
/// `"SATURDAY"`); the database stores the Sunday-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Sunday-based index, 0-6.
    pub fn index(self) -> i16 {
        match self {
            DayOfWeek::Sunday => 0,
            DayOfWeek::Monday => 1,
            DayOfWeek::Tuesday => 2,
            DayOfWeek::Wednesday => 3,
            DayOfWeek::Thursday => 4,
            DayOfWeek::Friday => 5,
            DayOfWeek::Saturday => 6,
        }
    }

    /// Inverse of [`DayOfWeek::index`]. `None` for out-of-range values.
    pub fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(DayOfWeek::Sunday),
            1 => Some(DayOfWeek::Monday),
            2 => Some(DayOfWeek::Tuesday),
            3 => Some(DayOfWeek::Wednesday),
            4 => Some(DayOfWeek::Thursday),
            5 => Some(DayOfWeek::Friday),
            6 => Some(DayOfWeek::Saturday),
            _ => None,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

/// Serde codec for wall-clock times as strict `"HH:MM"` strings.
///
/// Schedule windows travel over the wire in `"HH:MM"` form. Parsing is
/// strict: anything else (seconds, offsets, garbage) is rejected at the
/// boundary so downstream logic only ever sees valid [`NaiveTime`] values.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid wall-clock time {:?}, expected \"HH:MM\"",
                s
            ))
        })
    }
}

/// One open interval of a professional's recurring weekly calendar.
///
/// Multiple windows may exist per day; they are validated non-overlapping
/// with `start_time < end_time` when the schedule is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleWindow {
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_available: bool,
}

/// Replaces a professional's entire weekly schedule in one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWeeklyScheduleRequest {
    pub windows: Vec<WeeklyScheduleWindow>,
}

impl UpdateWeeklyScheduleRequest {
    /// Checks the invariants the availability engine assumes: every window
    /// has `start_time < end_time`, and windows on the same day do not
    /// overlap one another.
    pub fn validate(&self) -> BookingResult<()> {
        for window in &self.windows {
            if window.start_time >= window.end_time {
                return Err(BookingError::Validation(format!(
                    "Window on {:?} must start before it ends ({} >= {})",
                    window.day_of_week,
                    window.start_time.format("%H:%M"),
                    window.end_time.format("%H:%M"),
                )));
            }
        }

        for (i, a) in self.windows.iter().enumerate() {
            for b in self.windows.iter().skip(i + 1) {
                if a.day_of_week == b.day_of_week
                    && a.start_time < b.end_time
                    && a.end_time > b.start_time
                {
                    return Err(BookingError::Validation(format!(
                        "Overlapping windows on {:?}: {}-{} and {}-{}",
                        a.day_of_week,
                        a.start_time.format("%H:%M"),
                        a.end_time.format("%H:%M"),
                        b.start_time.format("%H:%M"),
                        b.end_time.format("%H:%M"),
                    )));
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleResponse {
    pub professional_id: Uuid,
    pub windows: Vec<WeeklyScheduleWindow>,
}
