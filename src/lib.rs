//! Korean lunisolar calendar (만세력) and four-pillar (사주) computation.
//!
//! This crate converts a birth date and time, given in any IANA timezone,
//! into the four sexagenary pillars (year, month, day, hour) used in
//! Korean saju reading, together with the five-element (오행) reading of
//! each pillar. The lunisolar months backing the year and month pillars
//! are computed astronomically for Korea Standard Time; the supported
//! range is 1000-02-13 through 2050-12-31.
//!
//! # Examples
//!
//! The whole pipeline through [`saju::calculate`]:
//!
//! ```
//! use manseryeok::saju::calculate;
//!
//! let result = calculate("2024-03-15", "14:30", "Asia/Seoul").unwrap();
//!
//! assert_eq!("갑진", result.year.hangul());
//! assert_eq!("정묘", result.month.hangul());
//! assert_eq!("무인", result.day.hangul());
//! assert_eq!("기미", result.hour.hangul());
//! ```
//!
//! The Korean lunisolar calendar on its own:
//!
//! ```
//! use manseryeok::Date;
//! use manseryeok::korean::{Annus, Month::*};
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//! let annus = Annus::from_date(date).unwrap();
//!
//! assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
//! ```

pub mod date;
pub mod error;
pub mod korean;
pub mod pillars;
pub mod saju;
pub mod time_scales;

pub use date::Date;
pub use error::SajuError;
