//! 간지 문자열 관련 기능
//!
//! 만세력 풍 문자열("갑진년 정묘월 무인일", 윤달이면 " (윤월)" 꼬리표)을
//! 만들고, 반대로 그런 문자열에서 주(柱)를 다시 읽어 낸다. 구조화된
//! [`LunarPillars`]가 기본 경로이고, 텍스트 파서는 외부 만세력 출력을
//! 받아들일 때 쓴다.

use crate::error::SajuError;
use crate::korean::{LunarPillars, Month};
use crate::pillars::{Branch, Pillar, Stem};

/// 달 이름, 예: `"2월"`, `"윤5월"`.
pub fn month(m: Month) -> String {
    if m.is_leap() {
        format!("윤{}월", m.num())
    } else {
        format!("{}월", m.num())
    }
}

/// 연·월·일 간지를 만세력 풍 문자열로 만든다.
///
/// # 용례
///
/// ```
/// use manseryeok::Date;
/// use manseryeok::korean::{fmt, pillars_for};
///
/// let lp = pillars_for(Date::from_gregorian(2024, 3, 15).unwrap()).unwrap();
/// assert_eq!("갑진년 정묘월 무인일", fmt::gapja(&lp));
/// ```
pub fn gapja(lp: &LunarPillars) -> String {
    let mut s = format!(
        "{}년 {}월 {}일",
        lp.year_pillar.hangul(),
        lp.month_pillar.hangul(),
        lp.day_pillar.hangul()
    );
    if lp.month.is_leap() {
        s.push_str(" (윤월)");
    }
    s
}

/// 간지 문자열에서 연·월·일 주를 읽는다.
///
/// 공백으로 나눈 각 토큰에서 첫 글자가 천간, 둘째 글자가 지지면 주로
/// 삼는다. 단위 토큰(`년`/`월`/`일`)과 괄호로 시작하는 주석 토큰은
/// 건너뛴다. 유효한 주가 셋보다 적으면 파싱 오류.
///
/// # 용례
///
/// ```
/// use manseryeok::korean::fmt::parse_gapja;
///
/// let [y, m, d] = parse_gapja("갑진년 정묘월 무인일").unwrap();
/// assert_eq!("갑진", y.hangul());
/// assert_eq!("무인", d.hangul());
/// ```
pub fn parse_gapja(s: &str) -> Result<[Pillar; 3], SajuError> {
    let mut pairs = Vec::new();
    for token in s.split_whitespace() {
        if matches!(token, "년" | "월" | "일") || token.starts_with('(') {
            continue;
        }
        let mut chars = token.chars();
        let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
            continue;
        };
        if let (Some(stem), Some(branch)) = (
            Stem::from_hangul_char(first),
            Branch::from_hangul_char(second),
        ) {
            pairs.push(Pillar::new(stem, branch));
        }
    }
    if pairs.len() < 3 {
        return Err(SajuError::GapjaParse {
            text: s.to_owned(),
        });
    }
    Ok([pairs[0], pairs[1], pairs[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names() {
        assert_eq!("2월", month(Month::Common(2)));
        assert_eq!("11월", month(Month::Common(11)));
        assert_eq!("윤5월", month(Month::Leap(5)));
    }

    #[test]
    fn parse_plain() {
        let [y, m, d] = parse_gapja("기묘년 병자월 무오일").unwrap();
        assert_eq!("기묘", y.hangul());
        assert_eq!("병자", m.hangul());
        assert_eq!("무오", d.hangul());
    }

    #[test]
    fn parse_skips_units_and_annotations() {
        // 단위가 따로 떨어진 꼴
        assert!(parse_gapja("갑자 년 을축 월 병인 일").is_ok());
        // 한자 주석이 붙은 꼴
        let [y, _, d] = parse_gapja("갑자년(甲子年) 을축월(乙丑月) 병인일(丙寅日)").unwrap();
        assert_eq!("갑자", y.hangul());
        assert_eq!("병인", d.hangul());
        // 윤달 꼬리표
        let [_, m, _] = parse_gapja("정유년 병오월 무자일 (윤월)").unwrap();
        assert_eq!("병오", m.hangul());
    }

    #[test]
    fn parse_failures() {
        assert!(matches!(
            parse_gapja("갑자년 을축월"),
            Err(SajuError::GapjaParse { .. })
        ));
        assert!(matches!(
            parse_gapja("garbage text here"),
            Err(SajuError::GapjaParse { .. })
        ));
        assert!(parse_gapja("").is_err());
    }

    #[test]
    fn format_parse_round_trip() {
        use crate::Date;
        use crate::korean::pillars_for;

        let lp = pillars_for(Date::from_gregorian(2017, 6, 30).unwrap()).unwrap();
        let text = gapja(&lp);
        assert!(text.ends_with("(윤월)"), "{text}");
        let [y, m, d] = parse_gapja(&text).unwrap();
        assert_eq!(lp.year_pillar, y);
        assert_eq!(lp.month_pillar, m);
        assert_eq!(lp.day_pillar, d);
    }
}
