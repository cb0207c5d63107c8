//! Error type for the saju pipeline.

use thiserror::Error;

/// Everything that can go wrong between raw input and a saju result.
///
/// All variants are deterministic for a given input; there is nothing to
/// retry. The CLI serialises these into an `{"error": ...}` payload.
#[derive(Debug, Error)]
pub enum SajuError {
    /// Date or time input that does not parse or names an impossible
    /// calendar date.
    #[error("invalid date/time: expected YYYY-MM-DD and HH:MM[:SS], got {input:?}")]
    MalformedInput { input: String },

    /// Solar date outside the supported lunar-calendar range.
    #[error("unsupported date: {date} (supported range 1000-02-13 to 2050-12-31)")]
    UnsupportedDate { date: String },

    /// A gapja string that does not contain three stem-branch pairs.
    #[error("could not parse gapja text: {text:?}")]
    GapjaParse { text: String },

    /// An unrecognised IANA timezone name.
    #[error("unknown timezone: {name:?} (expected an IANA name like Asia/Seoul)")]
    UnknownTimezone { name: String },
}
