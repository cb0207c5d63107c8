//! The saju pipeline: birth input → KST wall clock → four pillars.
//!
//! All pillar derivation happens on Korea Standard Time. The input is
//! interpreted in its source timezone, projected onto the KST wall clock,
//! and from there the flow is linear: late-midnight adjustment, lunar
//! pillar resolution, hour pillar, element summary.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::Date;
use crate::error::SajuError;
use crate::korean;
use crate::pillars::{Element, Pillar};

/// Timezone assumed when the caller does not name one.
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Per-pillar element summary, read off each pillar's stem.
#[derive(Debug, Copy, Clone, Serialize)]
pub struct OhengSummary {
    pub year: Element,
    pub month: Element,
    pub day: Element,
    pub hour: Element,
}

/// The four pillars plus the metadata of how they were obtained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SajuResult {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    pub oheng: OhengSummary,
    /// The normalized birth instant, `"%Y-%m-%d %H:%M:%S KST"`.
    pub kst_birth: String,
    /// Solar date the calendar lookup used (differs from the KST date in
    /// the late-midnight window).
    pub solar_date_used: String,
    /// Hour fed to the hour pillar, after the late-midnight adjustment.
    pub hour_used_for_siju: u32,
}

/// Computes the four pillars for a birth date/time.
///
/// `date` is `YYYY-MM-DD`, `time` is `HH:MM[:SS]` (hour clamped into
/// 0..=23), `timezone` an IANA name the input is interpreted in.
///
/// # Example
///
/// ```
/// use manseryeok::saju::calculate;
///
/// let result = calculate("2024-03-15", "14:30", "Asia/Seoul").unwrap();
/// assert_eq!("갑진", result.year.hangul());
/// assert_eq!("기미", result.hour.hangul());
/// assert_eq!(14, result.hour_used_for_siju);
/// ```
pub fn calculate(date: &str, time: &str, timezone: &str) -> Result<SajuResult, SajuError> {
    let tz = Tz::from_str(timezone).map_err(|_| SajuError::UnknownTimezone {
        name: timezone.to_owned(),
    })?;

    let kst = kst_wall_clock(date, time, tz)?;
    let d = kst.date();
    let kst_date = Date::from_gregorian(d.year(), d.month() as i32, d.day() as i32).ok_or_else(
        || SajuError::MalformedInput {
            input: format!("{date} {time}"),
        },
    )?;

    // 만자시(晚子時): 00:00–00:59 KST belongs to the previous day's day
    // pillar, with the hour forced into the 자시 window.
    let (solar_date, hour_for_siju) = if kst.hour() == 0 {
        (kst_date.pred(), 0)
    } else {
        (kst_date, kst.hour())
    };

    let lunar = korean::pillars_for(solar_date)?;
    let hour_pillar = Pillar::hour_of(lunar.day_pillar.stem, hour_for_siju);

    Ok(SajuResult {
        oheng: OhengSummary {
            year: lunar.year_pillar.stem.element(),
            month: lunar.month_pillar.stem.element(),
            day: lunar.day_pillar.stem.element(),
            hour: hour_pillar.stem.element(),
        },
        year: lunar.year_pillar,
        month: lunar.month_pillar,
        day: lunar.day_pillar,
        hour: hour_pillar,
        kst_birth: kst.format("%Y-%m-%d %H:%M:%S KST").to_string(),
        solar_date_used: solar_date.iso_gregorian(),
        hour_used_for_siju: hour_for_siju,
    })
}

/// Interprets `date`/`time` in `tz` and returns the KST wall clock.
///
/// Ambiguous local times (DST fold) resolve to the earlier instant;
/// nonexistent ones (a DST gap, or a whole day skipped by a date-line
/// shift such as Samoa's 2011-12-30) are probed forward to the first
/// local time past the gap.
fn kst_wall_clock(date: &str, time: &str, tz: Tz) -> Result<NaiveDateTime, SajuError> {
    let naive = parse_naive(date, time)?;
    let aware = match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt,
        chrono::LocalResult::Ambiguous(early, _) => early,
        // a skipped calendar day is the widest gap the tz database holds,
        // so 49 half-hour steps always reach the far side
        chrono::LocalResult::None => (1..=49)
            .find_map(|i| {
                tz.from_local_datetime(&(naive + Duration::minutes(30 * i)))
                    .earliest()
            })
            .ok_or_else(|| SajuError::MalformedInput {
                input: format!("{date} {time}"),
            })?,
    };
    Ok(aware.with_timezone(&chrono_tz::Asia::Seoul).naive_local())
}

fn parse_naive(date: &str, time: &str) -> Result<NaiveDateTime, SajuError> {
    let malformed = || SajuError::MalformedInput {
        input: format!("{date} {time}"),
    };

    let mut parts = date.trim().split('-');
    let (y, m, d) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d), None) => (
            y.parse::<i32>().map_err(|_| malformed())?,
            m.parse::<u32>().map_err(|_| malformed())?,
            d.parse::<u32>().map_err(|_| malformed())?,
        ),
        _ => return Err(malformed()),
    };

    let mut parts = time.trim().split(':');
    let hour = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(malformed)?
        .parse::<i64>()
        .map_err(|_| malformed())?
        .clamp(0, 23) as u32;
    let minute = match parts.next() {
        Some(s) => s.parse::<u32>().map_err(|_| malformed())?,
        None => 0,
    };
    let second = match parts.next() {
        Some(s) => s.parse::<u32>().map_err(|_| malformed())?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(malformed());
    }

    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(malformed)
}
