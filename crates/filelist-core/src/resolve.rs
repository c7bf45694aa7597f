//! Turning raw option values into typed selectors.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::SelectorError;
use crate::options::{OptionName, RawSelectors};
use crate::selector::{NamePattern, SelectorSet, SizeBound, TimeBound, TimePrecision};

/// Compact date-time form, `YYYYMMDDTHHMMSS`.
pub const DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";
/// Length of a value in [`DATETIME_FORMAT`].
pub const DATETIME_LEN: usize = 15;
/// Compact date form, `YYYYMMDD`.
pub const DATE_FORMAT: &str = "%Y%m%d";

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Parse a `-before`/`-after` value.
///
/// A 15-character value must be a compact date-time; anything else must be
/// a compact date.
pub fn parse_timestamp(option: OptionName, value: &str) -> Result<TimeBound, SelectorError> {
    let invalid = |source| SelectorError::InvalidTimestamp {
        option,
        value: value.to_string(),
        source,
    };

    if value.chars().count() == DATETIME_LEN {
        let instant = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(invalid)?;
        Ok(TimeBound::new(instant, TimePrecision::DateTime))
    } else {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(invalid)?;
        Ok(TimeBound::new(
            date.and_time(NaiveTime::MIN),
            TimePrecision::Date,
        ))
    }
}

/// Parse a `-bigger`/`-smaller` value.
///
/// A trailing `k`, `m` or `g` (any case) scales by 1024, 1024² or 1024³.
/// Any other trailing character is left in the number, so `10t` or `10b`
/// fail to parse rather than being guessed at.
pub fn parse_size(option: OptionName, value: &str) -> Result<SizeBound, SelectorError> {
    let invalid = || SelectorError::InvalidSize {
        option,
        value: value.to_string(),
    };

    let last = value.chars().last().ok_or_else(invalid)?;
    let (number, multiplier) = match last.to_ascii_lowercase() {
        'k' => (&value[..value.len() - 1], KIB),
        'm' => (&value[..value.len() - 1], MIB),
        'g' => (&value[..value.len() - 1], GIB),
        _ => (value, 1.0),
    };

    let number: f64 = number.parse().map_err(|_| invalid())?;
    if number.is_nan() || number < 0.0 {
        return Err(invalid());
    }

    Ok(SizeBound::from_bytes(number * multiplier))
}

/// Compile a `-match` value.
pub fn compile_pattern(value: &str) -> Result<NamePattern, SelectorError> {
    NamePattern::new(value).map_err(|source| SelectorError::InvalidPattern {
        value: value.to_string(),
        source,
    })
}

impl RawSelectors {
    /// Resolve every present value. Any failure discards all of them.
    pub fn resolve(&self) -> Result<SelectorSet, SelectorError> {
        Ok(SelectorSet {
            before: self
                .before
                .as_deref()
                .map(|v| parse_timestamp(OptionName::Before, v))
                .transpose()?,
            after: self
                .after
                .as_deref()
                .map(|v| parse_timestamp(OptionName::After, v))
                .transpose()?,
            smaller: self
                .smaller
                .as_deref()
                .map(|v| parse_size(OptionName::Smaller, v))
                .transpose()?,
            bigger: self
                .bigger
                .as_deref()
                .map(|v| parse_size(OptionName::Bigger, v))
                .transpose()?,
            pattern: self.pattern.as_deref().map(compile_pattern).transpose()?,
        })
    }
}
