//! Birth-moment resolution: user-entered date and time strings plus a
//! location become a single UT [`Instant`].

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::civil::CivilDateTime;
use crate::error::TimeError;
use crate::location::GeoLocation;
use crate::Instant;

/// Formats tried, in order, for a time string.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p", "%I:%M%p"];

/// Local noon, used when no birth time is known.
pub const DEFAULT_LOCAL_SECONDS: u32 = 12 * 3600;

/// Whether the birth time was supplied or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimePrecision {
    Exact,
    Approximate,
}

/// Resolver policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Local time-of-day (seconds after midnight) used when the time is absent.
    pub default_local_seconds: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_local_seconds: DEFAULT_LOCAL_SECONDS,
        }
    }
}

impl ResolverConfig {
    /// Build a policy whose default time is given as a time string.
    pub fn with_default_time(time: &str) -> Result<Self, TimeError> {
        let t = parse_time(time)?;
        Ok(Self {
            default_local_seconds: t.num_seconds_from_midnight(),
        })
    }
}

/// A resolved birth moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthMoment {
    pub instant: Instant,
    pub location: GeoLocation,
    pub local: CivilDateTime,
    pub precision: TimePrecision,
}

impl BirthMoment {
    pub fn is_time_approximate(&self) -> bool {
        self.precision == TimePrecision::Approximate
    }
}

/// Parse a calendar date.
///
/// Accepts `DD/MM/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY` and `YYYY-MM-DD`.
/// A month outside 1–12 or a day that does not exist in its month (leap
/// years included) is an error, never clamped.
pub fn parse_date(input: &str) -> Result<NaiveDate, TimeError> {
    let s = input.trim();
    let sep = ['/', '-', '.']
        .into_iter()
        .find(|c| s.contains(*c))
        .ok_or_else(|| TimeError::date(input, "expected DD/MM/YYYY or YYYY-MM-DD"))?;

    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return Err(TimeError::date(input, "expected three numeric fields"));
    }

    let (y, m, d) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else if parts[2].len() == 4 {
        (parts[2], parts[1], parts[0])
    } else {
        return Err(TimeError::date(input, "year must have four digits"));
    };
    if m.len() > 2 || d.len() > 2 {
        return Err(TimeError::date(input, "day and month take at most two digits"));
    }

    let year: i32 = y.parse().map_err(|_| TimeError::date(input, "bad year"))?;
    let month: u32 = m.parse().map_err(|_| TimeError::date(input, "bad month"))?;
    let day: u32 = d.parse().map_err(|_| TimeError::date(input, "bad day"))?;

    if !(1..=12).contains(&month) {
        return Err(TimeError::date(input, format!("month {month} is out of range")));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        TimeError::date(input, format!("day {day} does not exist in {year:04}-{month:02}"))
    })
}

/// Parse a wall-clock time: `HH:MM`, `HH:MM:SS`, or 12-hour `h:MM AM`.
pub fn parse_time(input: &str) -> Result<NaiveTime, TimeError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(TimeError::time(input, "empty time"));
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TimeError::time(input, "expected HH:MM, HH:MM:SS or h:MM AM/PM"))
}

/// Resolve date, optional time and location into a UT instant.
///
/// Without a time the policy's default local time is used and the result
/// is flagged [`TimePrecision::Approximate`].
pub fn resolve_birth_moment(
    date: &str,
    time: Option<&str>,
    location: &GeoLocation,
    config: &ResolverConfig,
) -> Result<BirthMoment, TimeError> {
    location.validate()?;
    let d = parse_date(date)?;

    let (seconds_of_day, precision) = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => (parse_time(t)?.num_seconds_from_midnight(), TimePrecision::Exact),
        None => {
            warn!(date, "birth time missing, using default local time");
            (config.default_local_seconds, TimePrecision::Approximate)
        }
    };

    let local = CivilDateTime::new(
        d.year(),
        d.month(),
        d.day(),
        seconds_of_day / 3600,
        (seconds_of_day % 3600) / 60,
        (seconds_of_day % 60) as f64,
    );
    let instant = Instant::from_jd_ut(local.to_jd(location.utc_offset_hours));

    Ok(BirthMoment {
        instant,
        location: *location,
        local,
        precision,
    })
}
