//! Deals with different time scales, specifically, conversion from TT into
//! UT for dating astronomical events.
//!
//! Ephemeris computations yield instants in terrestrial time; calendar dates
//! are determined by the civil day, so each instant must be shifted by ΔT
//! (TT − UT) before a timezone is applied. Over the range this crate
//! supports (years 1000 through 2050) ΔT is taken from the piecewise
//! polynomial expressions of Espenak & Meeus.

use crate::date::Date;

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// TDB differs from TT by no more than milliseconds over the supported
/// range; ephemeris instants computed in TDB are treated as TT here.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time),
/// represented in Julian date (JD).
///
/// The sub-minute distinction between UTC and UT1 does not matter for
/// day-granularity calendar work, so no leap-second handling is attempted.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts a TT instant into UT by subtracting ΔT.
    ///
    /// # Example
    ///
    /// ```
    /// use manseryeok::time_scales::{Tt, Ut};
    ///
    /// let ut = Ut::convert(Tt(2451545.0)); // 2000-01-01 12:00 TT
    /// assert!((ut.0 - (2451545.0 - 63.86 / 86400.0)).abs() < 1e-9);
    /// ```
    pub fn convert(tt: Tt) -> Self {
        let (year, _, _) = Date::from_jdn(tt.0.round() as u32).gregorian();
        Ut(tt.0 - delta_t(year) / 86400.0)
    }

    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Korea Standard Time (UTC+9), `tz_offset_minutes` should be +540.
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }
}

/// ΔT = TT − UT in seconds for the given calendar year.
///
/// Piecewise polynomials from Espenak & Meeus ("Five Millennium Canon of
/// Solar Eclipses"); each branch is valid on the year range it covers.
pub fn delta_t(year: i32) -> f64 {
    let y = year as f64;
    if year < 500 {
        let u = y / 100.0;
        poly(
            u,
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
        )
    } else if year < 1600 {
        let u = (y - 1000.0) / 100.0;
        poly(
            u,
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
        )
    } else if year < 1700 {
        let t = y - 1600.0;
        poly(t, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if year < 1800 {
        let t = y - 1700.0;
        poly(
            t,
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
        )
    } else if year < 1860 {
        let t = y - 1800.0;
        poly(
            t,
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
        )
    } else if year < 1900 {
        let t = y - 1860.0;
        poly(
            t,
            &[
                7.62,
                0.5737,
                -0.251754,
                0.01680668,
                -0.0004473624,
                1.0 / 233_174.0,
            ],
        )
    } else if year < 1920 {
        let t = y - 1900.0;
        poly(t, &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197])
    } else if year < 1941 {
        let t = y - 1920.0;
        poly(t, &[21.20, 0.84493, -0.076100, 0.0020936])
    } else if year < 1961 {
        let t = y - 1950.0;
        poly(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if year < 1986 {
        let t = y - 1975.0;
        poly(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if year < 2005 {
        let t = y - 2000.0;
        poly(
            t,
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
        )
    } else if year < 2050 {
        let t = y - 2000.0;
        poly(t, &[62.92, 0.32217, 0.005589])
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    }
}

fn poly(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_t_spot_values() {
        assert!((delta_t(2000) - 63.86).abs() < 0.01);
        assert!((delta_t(2024) - 73.87).abs() < 0.1);
        assert!((delta_t(1000) - 1574.2).abs() < 0.1);
        // continuity at a couple of segment boundaries
        assert!((delta_t(1899) - delta_t(1900)).abs() < 5.0);
        assert!((delta_t(2004) - delta_t(2005)).abs() < 5.0);
    }

    #[test]
    fn tt_to_ut() {
        let ut = Ut::convert(Tt(2451545.0));
        assert!(ut.0 < 2451545.0);
        assert!((2451545.0 - ut.0) * 86400.0 < 70.0);
    }

    #[test]
    fn date_in_timezone() {
        // 1999-12-21 15:00 UT is already 1999-12-22 in KST (UTC+9)
        let ut = Ut(2451534.125);
        assert_eq!((1999, 12, 21), ut.date_in_timezone(0).gregorian());
        assert_eq!((1999, 12, 22), ut.date_in_timezone(540).gregorian());
    }
}
