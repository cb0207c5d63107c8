//! Computed new-moon and solar-term ephemeris.
//!
//! 曆表는 미리 만든 데이터 파일 대신 표준 천문 급수로 계산한다: 삭(new moon)
//! 시각은 Meeus의 절단 급수(행성 섭동항 포함), 태양 시황경은 저정밀 태양
//! 이론으로 구하고 절기 시각은 황경에 대한 뉴턴 반복으로 푼다. 모든 시각은
//! TT 기준이며, 역일 판정은 [`crate::time_scales`]를 거친다.
//!
//! 정밀도는 분 단위로, 삭이나 절기가 KST 자정 수 분 이내에 드는 극히
//! 드문 경우를 제외하면 역일이 정확하다.

use crate::time_scales::Tt;

/// Mean length of the synodic month in days.
const SYNODIC_MONTH: f64 = 29.530588861;
/// Epoch of lunation number 0 (the first new moon of 2000), TT.
const LUNATION_EPOCH: f64 = 2451550.09766;
/// Mean motion of the Sun in longitude, degrees per day.
const SUN_MEAN_MOTION: f64 = 0.985647;

/// One sui's worth of ephemeris: the 25 solar terms from one December
/// solstice through the next, and the new moons bracketing them.
#[derive(Debug, Clone)]
pub struct Tables {
    /// 序號: the civil year containing most of the sui.
    pub annus: i32,
    /// Solar-term instants; index `i` is apparent longitude `270° + 15i`,
    /// so index 0 is the opening December solstice and index 24 the
    /// closing one. Even indices are the major terms (중기).
    pub solar_term: [Tt; 25],
    /// New-moon instants, from at least one lunation before the opening
    /// solstice to past the closing one.
    pub new_moons: Vec<Tt>,
}

impl Tables {
    /// Computes the tables for the sui labelled `annus`.
    ///
    /// Returns `None` outside the years backing the supported solar-date
    /// range (the sui of 2050-12-31 reaches into 2051).
    pub fn compute(annus: i32) -> Option<Self> {
        if !(999..=2051).contains(&annus) {
            return None;
        }
        let ws = december_solstice(annus - 1);
        let ws_next = december_solstice(annus);

        let mut solar_term = [Tt(0.0); 25];
        for (i, term) in solar_term.iter_mut().enumerate() {
            let target = (270 + 15 * i as u32) % 360;
            // terms are a little over 15 days apart on average
            *term = solar_term_near(target as f64, Tt(ws.0 + i as f64 * 15.218));
        }

        let mut new_moons = Vec::with_capacity(16);
        let mut k = ((ws.0 - LUNATION_EPOCH) / SYNODIC_MONTH).round() as i64 - 2;
        loop {
            let t = new_moon(k);
            new_moons.push(t);
            if t.0 > ws_next.0 + 40.0 {
                break;
            }
            k += 1;
        }

        Some(Self {
            annus,
            solar_term,
            new_moons,
        })
    }
}

/// Apparent geocentric solar longitude in degrees, `0..360`.
///
/// Low-accuracy solar theory (mean elements, equation of centre, nutation
/// and aberration as constants); good to about 0.01°.
pub fn sun_longitude(tt: Tt) -> f64 {
    let t = (tt.0 - 2451545.0) / 36525.0;
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    let omega = (125.04 - 1934.136 * t).to_radians();
    let lambda = l0 + c - 0.00569 - 0.00478 * omega.sin();
    lambda.rem_euclid(360.0)
}

/// The instant near `guess` at which the apparent solar longitude reaches
/// `target` degrees, by Newton iteration with the Sun's mean motion.
pub fn solar_term_near(target: f64, guess: Tt) -> Tt {
    let mut jd = guess.0;
    for _ in 0..25 {
        let diff = (target - sun_longitude(Tt(jd)) + 180.0).rem_euclid(360.0) - 180.0;
        if diff.abs() < 1e-9 {
            break;
        }
        jd += diff / SUN_MEAN_MOTION;
    }
    Tt(jd)
}

/// The December solstice (apparent longitude 270°) of the given year.
pub fn december_solstice(year: i32) -> Tt {
    let guess = crate::Date::from_gregorian(year, 12, 21)
        .map(|d| d.jdn() as f64 + 0.5)
        .unwrap_or_default();
    solar_term_near(270.0, Tt(guess))
}

/// Periodic corrections to the mean new moon, by argument multipliers
/// `(E power, M, M', F)` and coefficient.
const NEW_MOON_TERMS: [(u8, i8, i8, i8, f64); 24] = [
    (0, 0, 1, 0, -0.40720),
    (1, 1, 0, 0, 0.17241),
    (0, 0, 2, 0, 0.01608),
    (0, 0, 0, 2, 0.01039),
    (1, -1, 1, 0, 0.00739),
    (1, 1, 1, 0, -0.00514),
    (2, 2, 0, 0, 0.00208),
    (0, 0, 1, -2, -0.00111),
    (0, 0, 1, 2, -0.00057),
    (1, 1, 2, 0, 0.00056),
    (0, 0, 3, 0, -0.00042),
    (1, 1, 0, 2, 0.00042),
    (1, 1, 0, -2, 0.00038),
    (1, -1, 2, 0, -0.00024),
    (0, 2, 1, 0, -0.00007),
    (0, 0, 2, -2, 0.00004),
    (0, 3, 0, 0, 0.00004),
    (0, 1, 1, -2, 0.00003),
    (0, 0, 2, 2, 0.00003),
    (0, 1, 1, 2, -0.00003),
    (0, -1, 1, 2, 0.00003),
    (0, -1, 1, -2, -0.00002),
    (0, 1, 3, 0, -0.00002),
    (0, 0, 4, 0, 0.00002),
];

/// Planetary argument coefficients `(A0, A1, coefficient)`; the first row
/// also carries a small T² term.
const PLANETARY_TERMS: [(f64, f64, f64); 14] = [
    (299.77, 0.107408, 0.000325),
    (251.88, 0.016321, 0.000165),
    (251.83, 26.651886, 0.000164),
    (349.42, 36.412478, 0.000126),
    (84.66, 18.206239, 0.000110),
    (141.74, 53.303771, 0.000062),
    (207.14, 2.453732, 0.000060),
    (154.84, 7.306860, 0.000056),
    (34.52, 27.261239, 0.000047),
    (207.19, 0.121824, 0.000042),
    (291.34, 1.844379, 0.000040),
    (161.72, 24.198154, 0.000037),
    (239.56, 25.513099, 0.000035),
    (331.55, 3.592518, 0.000023),
];

/// TT instant of new moon number `k` (Meeus lunation number; `k = 0` is the
/// first new moon of 2000).
pub fn new_moon(k: i64) -> Tt {
    let kf = k as f64;
    let t = kf / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = LUNATION_EPOCH + SYNODIC_MONTH * kf + 0.00015437 * t2 - 0.000000150 * t3
        + 0.00000000073 * t4;

    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let m = (2.5534 + 29.10535670 * kf - 0.0000014 * t2 - 0.00000011 * t3).to_radians();
    let mp = (201.5643 + 385.81693528 * kf + 0.0107582 * t2 + 0.00001238 * t3
        - 0.000000058 * t4)
        .to_radians();
    let f = (160.7108 + 390.67050284 * kf - 0.0016118 * t2 - 0.00000227 * t3
        + 0.000000011 * t4)
        .to_radians();
    let omega = (124.7746 - 1.56375588 * kf + 0.0020672 * t2 + 0.00000215 * t3).to_radians();

    let mut corr = -0.00017 * omega.sin();
    for &(e_pow, cm, cmp, cf, coeff) in &NEW_MOON_TERMS {
        let arg = cm as f64 * m + cmp as f64 * mp + cf as f64 * f;
        let e_factor = match e_pow {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        corr += coeff * e_factor * arg.sin();
    }

    let mut planetary = 0.0;
    for (i, &(a0, a1, coeff)) in PLANETARY_TERMS.iter().enumerate() {
        let mut a = a0 + a1 * kf;
        if i == 0 {
            a -= 0.009173 * t2;
        }
        planetary += coeff * a.to_radians().sin();
    }

    Tt(mean + corr + planetary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solstice_1999() {
        // 1999 December solstice: 1999-12-22 07:44 UT (+ ΔT ≈ 64 s)
        let ws = december_solstice(1999);
        assert!((ws.0 - 2451534.823).abs() < 0.01, "{}", ws.0);
    }

    #[test]
    fn new_moon_of_feb_2024() {
        // 2024-02-09 22:59 UT, the new moon opening 갑진년
        let t = new_moon(298);
        assert!((t.0 - 2460350.458).abs() < 0.01, "{}", t.0);
    }

    #[test]
    fn lunation_numbering_near_epoch() {
        // k = 0 is the 2000-01-06 new moon
        let t = new_moon(0);
        assert!((t.0 - LUNATION_EPOCH).abs() < 0.7);
    }

    #[test]
    fn sun_longitude_at_equinox() {
        // 2024-03-20 03:06 UT vernal equinox: longitude crosses 0
        let lon = sun_longitude(Tt(2460389.63));
        assert!(!(1.0..359.0).contains(&lon), "{lon}");
    }

    #[test]
    fn terms_cover_the_sui() {
        let tables = Tables::compute(2024).unwrap();
        assert_eq!(25, tables.solar_term.len());
        // strictly increasing, roughly 15 days apart
        for w in tables.solar_term.windows(2) {
            let gap = w[1].0 - w[0].0;
            assert!((13.0..18.0).contains(&gap), "{gap}");
        }
        // new moons bracket both solstices
        assert!(tables.new_moons.first().unwrap().0 < tables.solar_term[0].0);
        assert!(tables.new_moons.last().unwrap().0 > tables.solar_term[24].0);
        for w in tables.new_moons.windows(2) {
            let gap = w[1].0 - w[0].0;
            assert!((29.0..30.0).contains(&gap), "{gap}");
        }
    }

    #[test]
    fn out_of_range() {
        assert!(Tables::compute(998).is_none());
        assert!(Tables::compute(2052).is_none());
        assert!(Tables::compute(999).is_some());
        assert!(Tables::compute(2051).is_some());
    }
}
