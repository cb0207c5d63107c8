//! Stems, branches, elements, and pillar arithmetic.
//!
//! A pillar (주) is a pair of one heavenly stem (천간, cycle of 10) and one
//! earthly branch (지지, cycle of 12). Constructors reduce indices modulo
//! the alphabet size, so a `Stem` or `Branch` is never out of range.

use serde::Serialize;

/// Heavenly stem (천간), one of a fixed cycle of 10.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stem(u8);

/// Earthly branch (지지), one of a fixed cycle of 12.
///
/// Each branch also names a two-hour window of the day; see
/// [`Branch::for_hour`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Branch(u8);

/// One of the five classical elements (오행).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

const STEM_HANGUL: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];
const BRANCH_HANGUL: [&str; 12] = [
    "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
];

use Element::*;
const STEM_ELEMENT: [Element; 10] =
    [Wood, Wood, Fire, Fire, Earth, Earth, Metal, Metal, Water, Water];
const BRANCH_ELEMENT: [Element; 12] = [
    Water, Earth, Wood, Wood, Earth, Fire, Fire, Earth, Metal, Metal, Earth, Water,
];

impl Stem {
    /// Stem at `index`, reduced modulo 10. Index 0 is 갑.
    pub fn new(index: u32) -> Self {
        Self((index % 10) as u8)
    }
    pub fn index(&self) -> u32 {
        self.0 as u32
    }
    /// Hangul name of the stem.
    pub fn hangul(&self) -> &'static str {
        STEM_HANGUL[self.0 as usize]
    }
    /// The element associated with the stem.
    pub fn element(&self) -> Element {
        STEM_ELEMENT[self.0 as usize]
    }
    /// Looks a stem up by its hangul name.
    pub fn from_hangul(s: &str) -> Option<Self> {
        STEM_HANGUL.iter().position(|&h| h == s).map(|i| Self(i as u8))
    }
    /// Looks a stem up by its hangul character.
    pub fn from_hangul_char(c: char) -> Option<Self> {
        STEM_HANGUL
            .iter()
            .position(|h| h.chars().next() == Some(c))
            .map(|i| Self(i as u8))
    }
}

impl Branch {
    /// Branch at `index`, reduced modulo 12. Index 0 is 자.
    pub fn new(index: u32) -> Self {
        Self((index % 12) as u8)
    }
    pub fn index(&self) -> u32 {
        self.0 as u32
    }
    /// Hangul name of the branch.
    pub fn hangul(&self) -> &'static str {
        BRANCH_HANGUL[self.0 as usize]
    }
    /// The element associated with the branch.
    pub fn element(&self) -> Element {
        BRANCH_ELEMENT[self.0 as usize]
    }
    /// Looks a branch up by its hangul name.
    pub fn from_hangul(s: &str) -> Option<Self> {
        BRANCH_HANGUL
            .iter()
            .position(|&h| h == s)
            .map(|i| Self(i as u8))
    }
    /// Looks a branch up by its hangul character.
    pub fn from_hangul_char(c: char) -> Option<Self> {
        BRANCH_HANGUL
            .iter()
            .position(|h| h.chars().next() == Some(c))
            .map(|i| Self(i as u8))
    }

    /// The branch of the two-hour window containing `hour` (0–23).
    ///
    /// The 자시 window spans 23:00–00:59, so hours 0 and 23 both map to
    /// branch 0; the remaining windows follow in two-hour steps
    /// (01:00–02:59 is 축시, and so on).
    ///
    /// # Example
    ///
    /// ```
    /// use manseryeok::pillars::Branch;
    ///
    /// assert_eq!(0, Branch::for_hour(0).index());
    /// assert_eq!(0, Branch::for_hour(23).index());
    /// assert_eq!(7, Branch::for_hour(14).index()); // 미시
    /// ```
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0 | 23 => Self(0),
            h => Self::new((h + 1) / 2),
        }
    }
}

impl Element {
    /// Hangul name of the element.
    pub fn hangul(&self) -> &'static str {
        match self {
            Wood => "목",
            Fire => "화",
            Earth => "토",
            Metal => "금",
            Water => "수",
        }
    }
}

/// A stem-branch pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Pillar at a sexagenary index (`0..=59`, 0 for 갑자).
    pub fn from_sexagenary(index: u32) -> Self {
        Self {
            stem: Stem::new(index),
            branch: Branch::new(index),
        }
    }

    /// Derives the hour pillar from the day stem and the hour of day.
    ///
    /// The stem opening the 자시 window is fixed by the day stem's group
    /// (stems five apart share a group): `(day_stem % 5) * 2`. Subsequent
    /// windows continue the stem cycle from there.
    ///
    /// # Example
    ///
    /// ```
    /// use manseryeok::pillars::{Pillar, Stem};
    ///
    /// // 무 day, 14:30 → 기미시
    /// let hour = Pillar::hour_of(Stem::new(4), 14);
    /// assert_eq!("기미", hour.hangul());
    /// ```
    pub fn hour_of(day_stem: Stem, hour: u32) -> Self {
        let branch = Branch::for_hour(hour);
        let zi_stem = (day_stem.index() % 5) * 2;
        Self {
            stem: Stem::new(zi_stem + branch.index()),
            branch,
        }
    }

    /// Hangul name of the pair, e.g. `"갑자"`.
    pub fn hangul(&self) -> String {
        format!("{}{}", self.stem.hangul(), self.branch.hangul())
    }
}

impl Serialize for Element {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hangul())
    }
}

impl Serialize for Pillar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut st = serializer.serialize_struct("Pillar", 2)?;
        st.serialize_field("gan", self.stem.hangul())?;
        st.serialize_field("ji", self.branch.hangul())?;
        st.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_reduced() {
        assert_eq!(2, Stem::new(12).index());
        assert_eq!(3, Branch::new(15).index());
        let p = Pillar::from_sexagenary(59);
        assert_eq!(("계", "해"), (p.stem.hangul(), p.branch.hangul()));
    }

    #[test]
    fn hour_windows_total() {
        // every hour maps to exactly one branch; 0 and 23 share 자시
        let stds = [
            0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 0,
        ];
        for (hour, &std) in stds.iter().enumerate() {
            assert_eq!(std, Branch::for_hour(hour as u32).index(), "hour {hour}");
        }
    }

    #[test]
    fn zi_hour_stem_by_day_group() {
        // 갑/기 days open with 갑자시, 을/경 with 병자시, ...
        for (day, zi) in [(0, 0), (5, 0), (1, 2), (6, 2), (2, 4), (3, 6), (9, 8)] {
            let p = Pillar::hour_of(Stem::new(day), 0);
            assert_eq!(zi, p.stem.index(), "day stem {day}");
            assert_eq!(0, p.branch.index());
        }
    }

    #[test]
    fn hour_pillar_examples() {
        // 갑자일 00:30 → 갑자시
        assert_eq!("갑자", Pillar::hour_of(Stem::new(0), 0).hangul());
        // 무 day, 23:45 → 임자시 (hour 23 is still the 자시 window)
        assert_eq!("임자", Pillar::hour_of(Stem::new(4), 23).hangul());
        // 정 day, noon → 병오시
        assert_eq!("병오", Pillar::hour_of(Stem::new(3), 12).hangul());
    }

    #[test]
    fn elements() {
        assert_eq!(Element::Wood, Stem::new(0).element());
        assert_eq!(Element::Water, Stem::new(9).element());
        assert_eq!(Element::Water, Branch::new(0).element());
        assert_eq!(Element::Earth, Branch::new(10).element());
        assert_eq!("목", Element::Wood.hangul());
    }

    #[test]
    fn hangul_round_trip() {
        for i in 0..10 {
            let s = Stem::new(i);
            assert_eq!(Some(s), Stem::from_hangul(s.hangul()));
        }
        for i in 0..12 {
            let b = Branch::new(i);
            assert_eq!(Some(b), Branch::from_hangul(b.hangul()));
        }
        assert_eq!(None, Stem::from_hangul("자"));
    }

    #[test]
    fn pillar_json_shape() {
        let p = Pillar::from_sexagenary(0);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(r#"{"gan":"갑","ji":"자"}"#, json);
    }
}
