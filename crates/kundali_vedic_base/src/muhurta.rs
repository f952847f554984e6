//! Daily muhurta windows: Rahukalam, Gulikakalam, Yamagandam and Abhijit.
//!
//! The daytime arc from sunrise to sunset is cut into eight equal segments;
//! a per-weekday table picks the segment of each inauspicious window.
//! Abhijit is one muhurta (a fifteenth of the day) centred on solar noon.

use chrono::{Datelike, NaiveDate};
use kundali_core::Ephemeris;
use kundali_time::{GeoLocation, Instant};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VedicError;
use crate::riseset::{SolarDay, solar_day};

/// 1-based Rahukalam segment, Sunday first.
pub const RAHUKALAM_SEGMENT: [u8; 7] = [8, 2, 7, 5, 6, 4, 3];
/// 1-based Gulikakalam segment, Sunday first.
pub const GULIKAKALAM_SEGMENT: [u8; 7] = [7, 6, 5, 4, 3, 2, 1];
/// 1-based Yamagandam segment, Sunday first.
pub const YAMAGANDAM_SEGMENT: [u8; 7] = [5, 4, 3, 2, 1, 7, 6];

/// Abhijit muhurta is not observed on this weekday (Wednesday).
pub const ABHIJIT_EXCLUDED_WEEKDAY: u8 = 3;

const DAY_SEGMENTS: f64 = 8.0;
const MUHURTAS_PER_DAY: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowKind {
    Rahukalam,
    Gulikakalam,
    Yamagandam,
    AbhijitMuhurta,
}

impl WindowKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rahukalam => "Rahukalam",
            Self::Gulikakalam => "Gulikakalam",
            Self::Yamagandam => "Yamagandam",
            Self::AbhijitMuhurta => "Abhijit Muhurta",
        }
    }

    pub const fn is_auspicious(self) -> bool {
        matches!(self, Self::AbhijitMuhurta)
    }
}

/// A named half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub kind: WindowKind,
    pub start: Instant,
    pub end: Instant,
}

impl TimeWindow {
    pub fn contains(&self, instant: Instant) -> bool {
        instant >= self.start && instant < self.end
    }

    pub fn duration_days(&self) -> f64 {
        self.end.days_since(self.start)
    }
}

/// All windows of one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuhurtaWindows {
    /// 0 = Sunday.
    pub weekday: u8,
    pub sunrise: Instant,
    pub sunset: Instant,
    pub solar_noon: Instant,
    pub rahukalam: TimeWindow,
    pub gulikakalam: TimeWindow,
    pub yamagandam: TimeWindow,
    /// `None` on Wednesday.
    pub abhijit: Option<TimeWindow>,
}

impl MuhurtaWindows {
    pub fn windows(&self) -> Vec<TimeWindow> {
        let mut out = vec![self.rahukalam, self.gulikakalam, self.yamagandam];
        out.extend(self.abhijit);
        out.sort_by(|a, b| a.start.jd_ut().total_cmp(&b.start.jd_ut()));
        out
    }
}

fn segment(kind: WindowKind, sunrise: Instant, eighth: f64, one_based: u8) -> TimeWindow {
    let start = sunrise.add_days(f64::from(one_based - 1) * eighth);
    TimeWindow {
        kind,
        start,
        end: start.add_days(eighth),
    }
}

/// Windows for a day given its sunrise, sunset and weekday (0 = Sunday).
pub fn muhurta_windows(
    sunrise: Instant,
    sunset: Instant,
    weekday: u8,
) -> Result<MuhurtaWindows, VedicError> {
    if weekday > 6 {
        return Err(VedicError::InvalidInput("weekday must be 0 (Sunday) to 6"));
    }
    let day_length = sunset.days_since(sunrise);
    if !(day_length > 0.0 && day_length < 1.0) {
        return Err(VedicError::InvalidInput("sunset must follow sunrise within a day"));
    }
    let eighth = day_length / DAY_SEGMENTS;
    let w = weekday as usize;
    let solar_noon = sunrise.add_days(day_length / 2.0);

    let abhijit = (weekday != ABHIJIT_EXCLUDED_WEEKDAY).then(|| {
        let half = day_length / MUHURTAS_PER_DAY / 2.0;
        TimeWindow {
            kind: WindowKind::AbhijitMuhurta,
            start: solar_noon.add_days(-half),
            end: solar_noon.add_days(half),
        }
    });

    Ok(MuhurtaWindows {
        weekday,
        sunrise,
        sunset,
        solar_noon,
        rahukalam: segment(WindowKind::Rahukalam, sunrise, eighth, RAHUKALAM_SEGMENT[w]),
        gulikakalam: segment(WindowKind::Gulikakalam, sunrise, eighth, GULIKAKALAM_SEGMENT[w]),
        yamagandam: segment(WindowKind::Yamagandam, sunrise, eighth, YAMAGANDAM_SEGMENT[w]),
        abhijit,
    })
}

/// Windows for a local civil date, with sunrise and sunset from the
/// ephemeris Sun.
pub fn muhurta_for_date(
    ephemeris: &dyn Ephemeris,
    location: &GeoLocation,
    year: i32,
    month: u32,
    day: u32,
) -> Result<MuhurtaWindows, VedicError> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(VedicError::InvalidInput("no such calendar date"))?;
    let SolarDay { sunrise, sunset } = solar_day(ephemeris, location, year, month, day)?;
    let weekday = civil_weekday(date);
    let windows = muhurta_windows(sunrise, sunset, weekday)?;
    debug!(
        year,
        month,
        day,
        weekday,
        sunrise = sunrise.jd_ut(),
        sunset = sunset.jd_ut(),
        "muhurta windows computed"
    );
    Ok(windows)
}

/// Weekday of a civil date, 0 = Sunday.
fn civil_weekday(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUNRISE: Instant = Instant::from_jd_ut(2_460_000.0);

    fn day(weekday: u8) -> MuhurtaWindows {
        // 12-hour day: each segment is 1.5 h.
        muhurta_windows(SUNRISE, SUNRISE.add_days(0.5), weekday).unwrap()
    }

    #[test]
    fn sunday_rahukalam_is_last_segment() {
        let w = day(0);
        assert!((w.rahukalam.start.days_since(SUNRISE) - 7.0 * 0.5 / 8.0).abs() < 1e-12);
        assert!((w.rahukalam.end.jd_ut() - w.sunset.jd_ut()).abs() < 1e-12);
    }

    #[test]
    fn saturday_gulika_is_first_segment() {
        let w = day(6);
        assert_eq!(w.gulikakalam.start, SUNRISE);
        assert!((w.gulikakalam.duration_days() - 0.5 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn abhijit_centred_and_absent_on_wednesday() {
        let w = day(1);
        let a = w.abhijit.unwrap();
        assert!((a.duration_days() - 0.5 / 15.0).abs() < 1e-12);
        let mid = a.start.add_days(a.duration_days() / 2.0);
        assert!((mid.jd_ut() - w.solar_noon.jd_ut()).abs() < 1e-9);
        assert!(day(3).abhijit.is_none());
        assert_eq!(day(3).windows().len(), 3);
    }

    #[test]
    fn segment_tables_cover_each_weekday_once() {
        for table in [RAHUKALAM_SEGMENT, GULIKAKALAM_SEGMENT, YAMAGANDAM_SEGMENT] {
            let mut seen = [false; 8];
            for s in table {
                assert!((1..=8).contains(&s));
                assert!(!seen[s as usize - 1]);
                seen[s as usize - 1] = true;
            }
        }
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(muhurta_windows(SUNRISE, SUNRISE.add_days(0.5), 7).is_err());
        assert!(muhurta_windows(SUNRISE, SUNRISE, 1).is_err());
    }

    #[test]
    fn weekday_of_civil_date() {
        // 1990-06-15 was a Friday.
        let date = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        assert_eq!(civil_weekday(date), 5);
    }

    #[test]
    fn impossible_dates_are_rejected_not_rolled_over() {
        use kundali_core::AnalyticEphemeris;

        let eph = AnalyticEphemeris::default();
        let delhi = GeoLocation::new(28.61, 77.21, 5.5);
        for (y, m, d) in [(2023, 2, 30), (2023, 2, 29), (2023, 4, 31), (2023, 13, 1), (2023, 0, 5)] {
            let err = muhurta_for_date(&eph, &delhi, y, m, d).unwrap_err();
            assert!(matches!(err, VedicError::InvalidInput(_)), "{y}-{m}-{d}: {err}");
        }
        assert!(muhurta_for_date(&eph, &delhi, 2024, 2, 29).is_ok());
    }
}
