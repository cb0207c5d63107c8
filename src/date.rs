//! Calendar-independant date.

use std::ops::{Add, Sub};

/// A calendar-independant date, backed by a Julian day number.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use manseryeok::Date;
    ///
    /// let date = Date::from_gregorian(2024, 3, 15).unwrap();
    /// assert_eq!(2460385, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let (y, m, d) = (year, month, day);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = i32::try_from(self.jdn).expect("jdn >= 2**31 not supported");
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year, month, day)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use manseryeok::Date;
    ///
    /// let date = Date::from_gregorian(2024, 3, 15).unwrap();
    /// assert_eq!("2024-03-15", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the sexagenary index of the day, `0..=59` with 0 for 갑자.
    ///
    /// The sexagenary day cycle is continuous across calendar reforms, so
    /// this is pure modular arithmetic on the JDN.
    ///
    /// # Example
    ///
    /// ```
    /// use manseryeok::Date;
    ///
    /// let date = Date::from_gregorian(2024, 1, 1).unwrap();
    /// assert_eq!(0, date.sexagenary_index()); // 갑자일
    /// ```
    pub fn sexagenary_index(&self) -> u32 {
        (self.jdn + 49) % 60
    }

    /// Returns the previous calendar day.
    ///
    /// Used by the late-midnight (만자시) rule, where 00:00–00:59 KST keeps
    /// the previous day's day pillar.
    pub fn pred(&self) -> Self {
        Self::from_jdn(self.jdn - 1)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2000, 1, 1).unwrap();
        assert_eq!(2451545, date.jdn());
    }

    #[test]
    fn to_gregorian() {
        for jdn in [2086346, 2440588, 2451545, 2460385, 2470172] {
            let date = Date::from_jdn(jdn);
            let (y, m, d) = date.gregorian();
            assert_eq!(Some(date), Date::from_gregorian(y, m, d));
        }
        assert_eq!((2024, 3, 15), Date::from_jdn(2460385).gregorian());
    }

    #[test]
    fn sexagenary_day_cycle() {
        // 2000-01-07 and 2024-01-01 are both 갑자 days
        for (y, m, d, std) in [
            (2000, 1, 7, 0),
            (2024, 1, 1, 0),
            (2000, 1, 1, 54),  // 무오
            (1970, 1, 1, 17),  // 신사
            (2021, 9, 8, 55),  // 기미
            (2024, 3, 15, 14), // 무인
        ] {
            let date = Date::from_gregorian(y, m, d).unwrap();
            assert_eq!(std, date.sexagenary_index(), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn pred_and_ops() {
        let date = Date::from_gregorian(2024, 3, 15).unwrap();
        assert_eq!((2024, 3, 14), date.pred().gregorian());
        assert_eq!(1, date - date.pred());
        assert_eq!(date, date.pred() + 1);
        // month boundary
        let first = Date::from_gregorian(2024, 3, 1).unwrap();
        assert_eq!((2024, 2, 29), first.pred().gregorian());
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2024-03-15",
            Date::from_gregorian(2024, 3, 15).unwrap().iso_gregorian()
        );
        assert_eq!(
            "1000-02-13",
            Date::from_gregorian(1000, 2, 13).unwrap().iso_gregorian()
        );
    }
}
