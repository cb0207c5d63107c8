//! Korean lunisolar calendar (음력)
//!
//! Note: 용어가 많은 모듈이라 문서는 한국어를 섞어 쓴다.
//!
//! 달의 구조는 [`ephemeris`]가 계산한 삭·절기 시각으로 세운다. 날짜 판정은
//! 전부 KST(UTC+9) 자정 기준이며, 그래서 중국력과 드물게 다른 해(예: 2017년
//! 윤5월)도 한국 천문력과 같게 나온다.

use crate::date::Date;
use crate::error::SajuError;
use crate::pillars::{Branch, Pillar, Stem};
use crate::time_scales::{Tt, Ut};

pub mod ephemeris;
pub mod fmt;

/// KST is UTC+9; calendar days cut at KST midnight.
pub const KST_OFFSET_MINUTES: i32 = 540;

/// Earliest solar date the resolver accepts (lunar 1000-01-01).
pub const SOLAR_MIN: (i32, i32, i32) = (1000, 2, 13);
/// Latest solar date the resolver accepts.
pub const SOLAR_MAX: (i32, i32, i32) = (2050, 12, 31);

/// 「歲」: 동지에서 다음 동지까지의 기간, 동지가 든 달(11월)부터 다음
/// 동지 전달(10월 또는 윤10월)까지의 달들로 구성된다.
///
/// 주의: 세(歲)와 연(年)은 다르다. 연은 정월 초하루에 시작하지만 역 계산은
/// 두 동지 사이의 세를 단위로 하며, 날짜가 속한 연은 달 이름에서 구한다.
///
/// # 용례
///
/// ```
/// use manseryeok::Date;
/// use manseryeok::korean::{Annus, Month};
///
/// let date = Date::from_gregorian(2024, 3, 15).unwrap();
/// let annus = Annus::from_date(date).unwrap();
///
/// assert_eq!(Ok((2024, Month::Common(2), 6)), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// 서수: 이 세의 대부분이 속한 서기 연도
    pub annus: i32,
    /// 달 머리 목록. 다음 세의 첫 달도 포함해 마지막 날을 표시한다.
    pub months: Vec<NewMoon>,
}

/// 달 머리 정보
#[derive(Debug, Copy, Clone)]
pub struct NewMoon {
    /// 달 이름
    pub month: Month,
    /// 초하루 날짜
    pub date: Date,
}

/// 달 이름. `Common`은 평달, `Leap`은 윤달.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// 평·윤 무관한 달 번호.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 윤달이면 `true`.
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 한글 이름, 예: `"2월"`, `"윤5월"`.
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

impl Annus {
    /// 서기 `annus`년에 대응하는 세를 계산한다.
    ///
    /// 지원 범위 밖이면 `None`.
    ///
    /// 동지가 든 달이 11월이고, 두 동지 사이에 열세 달이 들면 중기(中氣)가
    /// 없는 첫 달이 윤달이 된다. 달의 소속 판정은 KST 역일로 한다. 초하루와
    /// 동지가 같은 날이면 동지는 새 달에 속한다 (2014-12-22처럼 같은 날에
    /// 겹치는 해에 윤9월이 생기는 근거).
    pub fn new(annus: i32) -> Option<Self> {
        use Month::*;

        let tables = ephemeris::Tables::compute(annus)?;
        let new_moon_dates: Vec<_> = tables.new_moons.iter().map(|&t| date_kst(t)).collect();
        let term_dates: Vec<_> = tables.solar_term.iter().map(|&t| date_kst(t)).collect();
        let ws = term_dates[0];
        let ws_next = term_dates[24];
        let m11_idx = new_moon_dates.partition_point(|date| date <= &ws) - 1;
        let m11n_idx = new_moon_dates.partition_point(|date| date <= &ws_next) - 1;
        let mut needs_leap = match m11n_idx - m11_idx {
            12 => false,
            13 => true,
            n => panic!("{} months between winter solstices", n),
        };

        let mut months = Vec::with_capacity(m11n_idx - m11_idx + 1);
        let mut month = 10;
        let mut term = 0;
        for i in m11_idx..=m11n_idx {
            if needs_leap && new_moon_dates[i + 1] <= term_dates[term] {
                months.push(NewMoon {
                    month: Leap(month),
                    date: new_moon_dates[i],
                });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Common(month),
                date: new_moon_dates[i],
            });
            term += 2;
        }
        assert!(!needs_leap);

        Some(Annus { annus, months })
    }

    /// 날짜가 속한 세를 구한다.
    ///
    /// 지원 범위 밖이면 `None`.
    pub fn from_date(date: Date) -> Option<Self> {
        let mut y = date.gregorian().0;
        loop {
            let annus = Self::new(y)?;

            let start = annus.months[0].date;
            let end = annus.months.last().unwrap().date;

            if (start..end).contains(&date) {
                return Some(annus);
            }

            y += if date < start { -1 } else { 1 };
        }
    }

    /// 날짜의 음력 연·월·일을 `(연, 월, 일)`로 돌려준다.
    ///
    /// 날짜가 이 세에 없으면 앞인지 뒤인지를 `Err`로 알린다.
    pub fn ymd_for(&self, date: Date) -> Result<(i32, Month, u32), OtherAnnus> {
        let begin = self.months[0].date;
        let end = self.months.last().unwrap().date;

        if date < begin {
            return Err(OtherAnnus::Before);
        } else if date >= end {
            return Err(OtherAnnus::After);
        }

        let m = self
            .months
            .iter()
            .take_while(|m| m.date <= date)
            .last()
            .unwrap();
        let d = date.jdn() - m.date.jdn() + 1;
        let y = if m.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok((y, m.month, d))
    }
}

/// 주어진 날짜가 이 세에 없음을 나타내며, 앞인지 뒤인지 알린다.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// 曆表 시각(TT)을 KST 역일로 바꾼다.
pub fn date_kst(tt: Tt) -> Date {
    Ut::convert(tt).date_in_timezone(KST_OFFSET_MINUTES)
}

/// 음력 연도의 육십갑자 인덱스 (`0..=59`, 0은 갑자).
///
/// # 용례
///
/// ```
/// use manseryeok::korean::sexagenary_for_year;
///
/// assert_eq!(40, sexagenary_for_year(2024)); // 갑진년
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year - 4).rem_euclid(60) as u32
}

/// Structured result of resolving a solar date against the lunar calendar:
/// the lunar date and the year/month/day pillars.
#[derive(Debug, Clone)]
pub struct LunarPillars {
    pub lunar_year: i32,
    pub month: Month,
    pub lunar_day: u32,
    pub year_pillar: Pillar,
    pub month_pillar: Pillar,
    pub day_pillar: Pillar,
}

/// Resolves a solar date into lunar year/month/day pillars.
///
/// The year pillar follows the lunar year (it changes at 설날, lunar 1/1);
/// the month pillar follows the lunar month, a leap month keeping its common
/// month's pillar; the day pillar is the continuous sexagenary day cycle.
///
/// Fails with [`SajuError::UnsupportedDate`] outside 1000-02-13..=2050-12-31.
///
/// # Example
///
/// ```
/// use manseryeok::Date;
/// use manseryeok::korean::pillars_for;
///
/// let lp = pillars_for(Date::from_gregorian(2024, 3, 15).unwrap()).unwrap();
/// assert_eq!("갑진", lp.year_pillar.hangul());
/// assert_eq!("정묘", lp.month_pillar.hangul());
/// assert_eq!("무인", lp.day_pillar.hangul());
/// ```
pub fn pillars_for(date: Date) -> Result<LunarPillars, SajuError> {
    let min = Date::from_gregorian(SOLAR_MIN.0, SOLAR_MIN.1, SOLAR_MIN.2).unwrap();
    let max = Date::from_gregorian(SOLAR_MAX.0, SOLAR_MAX.1, SOLAR_MAX.2).unwrap();
    if date < min || date > max {
        return Err(SajuError::UnsupportedDate {
            date: date.iso_gregorian(),
        });
    }

    let annus = Annus::from_date(date).ok_or_else(|| SajuError::UnsupportedDate {
        date: date.iso_gregorian(),
    })?;
    let (lunar_year, month, lunar_day) = annus
        .ymd_for(date)
        .expect("from_date returned a sui containing the date");

    let year_idx = sexagenary_for_year(lunar_year);
    let year_pillar = Pillar::from_sexagenary(year_idx);

    let m = month.num();
    let month_pillar = Pillar::new(
        Stem::new((year_pillar.stem.index() % 5) * 2 + m + 1),
        Branch::new(m + 1),
    );

    let day_pillar = Pillar::from_sexagenary(date.sexagenary_index());

    Ok(LunarPillars {
        lunar_year,
        month,
        lunar_day,
        year_pillar,
        month_pillar,
        day_pillar,
    })
}
