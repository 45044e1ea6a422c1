//! Value objects for the scheduling domain.
//!
//! `ActivityName`, `Duration` and `Float` validate on construction and are
//! immutable afterwards. Durations use exact decimals so repeated additions
//! never accumulate rounding error.

use rust_decimal::Decimal;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{CpmError, DurationFault, Result};

/// Unique identifier of an activity (trimmed, never empty).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActivityName(String);

impl ActivityName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CpmError::InvalidName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets name-keyed maps be queried with a plain `&str`.
impl Borrow<str> for ActivityName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ActivityName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ActivityName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromStr for ActivityName {
    type Err = CpmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ActivityName {
    type Error = CpmError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// A non-negative span of abstract time units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(Decimal);

impl Duration {
    pub const ZERO: Duration = Duration(Decimal::ZERO);

    /// Validate an exact decimal value.
    ///
    /// Decimals cannot hold NaN or infinity, so only the sign is checked here;
    /// the string and `f64` conversions reject those before reaching this point.
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(CpmError::invalid_duration(value, DurationFault::Negative));
        }
        // Normalise negative zero.
        let value = if value.is_zero() { value.abs() } else { value };
        Ok(Self(value))
    }

    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Duration) -> Result<Duration> {
        let sum = self.0.checked_add(other.0).ok_or_else(|| {
            CpmError::invalid_duration(format!("{} + {}", self.0, other.0), DurationFault::Overflow)
        })?;
        Duration::new(sum)
    }

    /// Subtract `other`, failing if the result would be negative.
    ///
    /// No clamping: a negative result means an upstream computation is wrong.
    pub fn checked_sub(self, other: Duration) -> Result<Duration> {
        let diff = self.0.checked_sub(other.0).ok_or_else(|| {
            CpmError::invalid_duration(format!("{} - {}", self.0, other.0), DurationFault::Overflow)
        })?;
        Duration::new(diff)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Duration {
    type Err = CpmError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let lowered = raw.trim_start_matches(['+', '-']).to_ascii_lowercase();
        match lowered.as_str() {
            "nan" | "snan" => return Err(CpmError::invalid_duration(raw, DurationFault::NaN)),
            "inf" | "infinity" => {
                return Err(CpmError::invalid_duration(raw, DurationFault::Infinite))
            }
            _ => {}
        }
        let parsed = if raw.contains(['e', 'E']) {
            Decimal::from_scientific(raw)
        } else {
            Decimal::from_str_exact(raw)
        };
        let value = parsed.map_err(|_| {
            // Well-formed but outside what a 96-bit decimal can hold exactly.
            let fault = if is_decimal_syntax(raw) {
                DurationFault::Overflow
            } else {
                DurationFault::NotANumber
            };
            CpmError::invalid_duration(raw, fault)
        })?;
        Duration::new(value)
    }
}

/// Plain (`12.5`) or scientific (`1.25e1`) decimal notation, ignoring range.
fn is_decimal_syntax(raw: &str) -> bool {
    fn unsigned(s: &str) -> &str {
        s.strip_prefix(['+', '-']).unwrap_or(s)
    }
    fn digits(s: &str) -> bool {
        s.bytes().all(|b| b.is_ascii_digit())
    }

    let (mantissa, exponent) = match raw.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (raw, None),
    };

    let mantissa = unsigned(mantissa);
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_ok =
        !(int_part.is_empty() && frac_part.is_empty()) && digits(int_part) && digits(frac_part);

    let exponent_ok = match exponent.map(unsigned) {
        Some(exponent) => !exponent.is_empty() && digits(exponent),
        None => true,
    };

    mantissa_ok && exponent_ok
}

impl TryFrom<f64> for Duration {
    type Error = CpmError;

    fn try_from(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(CpmError::invalid_duration(value, DurationFault::NaN));
        }
        if value.is_infinite() {
            return Err(CpmError::invalid_duration(value, DurationFault::Infinite));
        }
        if value < 0.0 {
            return Err(CpmError::invalid_duration(value, DurationFault::Negative));
        }
        let decimal = Decimal::try_from(value)
            .map_err(|_| CpmError::invalid_duration(value, DurationFault::Overflow))?;
        Duration::new(decimal)
    }
}

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Duration(Decimal::from(value))
    }
}

/// Slack available to an activity: how far its start can slip without
/// moving the project end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Float(Duration);

impl Float {
    pub const ZERO: Float = Float(Duration::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        Duration::new(value).map(Float)
    }

    #[inline]
    pub fn value(&self) -> Decimal {
        self.0.value()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

}

impl From<Duration> for Float {
    fn from(duration: Duration) -> Self {
        Float(duration)
    }
}

impl FromStr for Float {
    type Err = CpmError;

    fn from_str(s: &str) -> Result<Self> {
        Duration::from_str(s).map(Float)
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CpmErrorKind;

    fn d(s: &str) -> Duration {
        s.parse().unwrap()
    }

    #[test]
    fn test_activity_name_is_trimmed() {
        let name = ActivityName::new("  Build  ").unwrap();
        assert_eq!(name.as_str(), "Build");
        assert_eq!(name, ActivityName::new("Build").unwrap());
        assert_eq!(name, "Build");
    }

    #[test]
    fn test_empty_activity_name_rejected() {
        assert_eq!(ActivityName::new(""), Err(CpmError::InvalidName));
        assert_eq!(ActivityName::new(" \t\n"), Err(CpmError::InvalidName));
    }

    #[test]
    fn test_duration_accepts_zero_and_decimals() {
        assert!(d("0").is_zero());
        assert_eq!(d("2.5").value(), Decimal::new(25, 1));
        assert_eq!(d("5"), d("5.0"));
    }

    #[test]
    fn test_duration_rejects_negative_nan_infinite() {
        let negative = "-1".parse::<Duration>().unwrap_err();
        assert!(matches!(
            negative,
            CpmError::InvalidDuration {
                reason: DurationFault::Negative,
                ..
            }
        ));

        for raw in ["NaN", "-nan", "sNaN"] {
            let err = raw.parse::<Duration>().unwrap_err();
            assert!(matches!(
                err,
                CpmError::InvalidDuration {
                    reason: DurationFault::NaN,
                    ..
                }
            ));
        }
        for raw in ["inf", "-Infinity", "+inf"] {
            let err = raw.parse::<Duration>().unwrap_err();
            assert!(matches!(
                err,
                CpmError::InvalidDuration {
                    reason: DurationFault::Infinite,
                    ..
                }
            ));
        }

        assert_eq!(
            Duration::try_from(f64::NAN).unwrap_err().kind(),
            CpmErrorKind::InvalidDuration
        );
        assert_eq!(
            Duration::try_from(f64::NEG_INFINITY).unwrap_err().kind(),
            CpmErrorKind::InvalidDuration
        );
        assert!("abc".parse::<Duration>().is_err());
    }

    #[test]
    fn test_duration_accepts_scientific_notation() {
        assert_eq!(d("1e3"), d("1000"));
        assert_eq!(d("1E+2"), d("100"));
        assert_eq!(d("2.5e-1"), d("0.25"));

        let err = "-1e2".parse::<Duration>().unwrap_err();
        assert!(matches!(
            err,
            CpmError::InvalidDuration {
                reason: DurationFault::Negative,
                ..
            }
        ));
        for raw in ["1e", "e5", "1e2.5", "1.2.3"] {
            let err = raw.parse::<Duration>().unwrap_err();
            assert!(
                matches!(
                    err,
                    CpmError::InvalidDuration {
                        reason: DurationFault::NotANumber,
                        ..
                    }
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_out_of_range_duration_is_overflow() {
        for raw in [
            "100000000000000000000000000000",
            "0.00000000000000000000000000001",
            "1e40",
        ] {
            let err = raw.parse::<Duration>().unwrap_err();
            assert!(
                matches!(
                    err,
                    CpmError::InvalidDuration {
                        reason: DurationFault::Overflow,
                        ..
                    }
                ),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn test_duration_arithmetic_is_exact() {
        let mut total = Duration::ZERO;
        for _ in 0..10 {
            total = total.checked_add(d("0.1")).unwrap();
        }
        assert_eq!(total, d("1"));

        assert_eq!(d("5").checked_sub(d("3")).unwrap(), d("2"));
        assert!(d("2") < d("3"));
        assert!(d("3") >= d("3.0"));
    }

    #[test]
    fn test_subtraction_below_zero_fails() {
        let err = d("3").checked_sub(d("5")).unwrap_err();
        assert!(matches!(
            err,
            CpmError::InvalidDuration {
                reason: DurationFault::Negative,
                ..
            }
        ));
    }

    #[test]
    fn test_float_from_duration() {
        let float = Float::from(d("2"));
        assert_eq!(float.value(), Decimal::from(2));
        assert!(!float.is_zero());
        assert!(Float::ZERO < float);
        assert!(Float::new(Decimal::from(-1)).is_err());
    }
}
