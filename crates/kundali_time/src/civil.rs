//! Civil calendar date/time at a fixed UTC offset.

use serde::{Deserialize, Serialize};

use crate::julian::{calendar_to_jd, jd_to_calendar};

const MS_PER_DAY: i64 = 86_400_000;

/// Calendar date and wall-clock time, zone-less.
///
/// The UTC offset is supplied whenever the value is converted to or from a
/// Julian Date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Julian Date (UT) of this wall-clock time at `utc_offset_hours`.
    pub fn to_jd(&self, utc_offset_hours: f64) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        calendar_to_jd(self.year, self.month, day_frac) - utc_offset_hours / 24.0
    }

    /// Wall-clock time at `utc_offset_hours` for a Julian Date (UT).
    ///
    /// Rounded to the millisecond so that values like 14:29:59.99999 print
    /// as 14:30:00.
    pub fn from_jd(jd_ut: f64, utc_offset_hours: f64) -> Self {
        let jd_local = jd_ut + utc_offset_hours / 24.0;
        let total_ms = ((jd_local + 0.5) * MS_PER_DAY as f64).round() as i64;
        let day_number = total_ms.div_euclid(MS_PER_DAY);
        let ms_of_day = total_ms.rem_euclid(MS_PER_DAY);

        let (year, month, day) = jd_to_calendar(day_number as f64 - 0.5);
        let hour = (ms_of_day / 3_600_000) as u32;
        let minute = ((ms_of_day % 3_600_000) / 60_000) as u32;
        let second = (ms_of_day % 60_000) as f64 / 1000.0;
        Self {
            year,
            month,
            day: day.floor() as u32,
            hour,
            minute,
            second,
        }
    }
}

impl std::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}
