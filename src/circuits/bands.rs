//! Four-band resistor color codes.
//!
//! A code carries two significant digits, a decade multiplier `10^0..=10^6`
//! and a fixed 5 % (gold) tolerance band. Encoding expects a value already
//! snapped to a standard series so that rounding to two digits stays within
//! one representable step.

use std::fmt;

use thiserror::Error;

use crate::constants::{DIGIT_COLOR_NAMES, MAX_BAND_EXPONENT, MULTIPLIER_COLOR_NAMES};
use crate::math::{pow10, Scalar};

/// Tolerance of every encoded part, in percent.
pub const TOLERANCE_PERCENT: Scalar = 5.0;
/// Color of the tolerance band.
pub const TOLERANCE_COLOR: &str = "Gold";

/// The value cannot be written as a 4-band code.
///
/// The value itself stays valid; only its banded form is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{value} ohms is outside the 4-band range (10 ohms to 99 Mohms)")]
pub struct UnsupportedRange {
    /// Value that was offered for encoding.
    pub value: Scalar,
    /// Multiplier exponent the value would need, if it has one.
    pub exponent: Option<i32>,
}

/// Raw band input that does not form a valid code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBand {
    /// A digit band outside 0..=9.
    #[error("band digit {0} is not in 0..=9")]
    Digit(u32),
    /// A multiplier band outside 0..=6.
    #[error("multiplier exponent {0} is not in 0..=6")]
    Exponent(u32),
    /// A color name with no digit or multiplier meaning.
    #[error("unknown band color {0:?}")]
    Color(String),
}

/// Two significant digits and a decade exponent.
///
/// Deserialization goes through [`BandCode::new`], so a decoded code always
/// names real colors.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBands"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BandCode {
    first: u8,
    second: u8,
    exponent: u8,
}

/// Unvalidated band values as they appear in serialized data.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBands {
    first: u32,
    second: u32,
    exponent: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBands> for BandCode {
    type Error = InvalidBand;

    fn try_from(raw: RawBands) -> Result<Self, Self::Error> {
        Self::new(raw.first, raw.second, raw.exponent)
    }
}

impl BandCode {
    /// Builds a code from raw bands, validating each.
    pub fn new(first: u32, second: u32, exponent: u32) -> Result<Self, InvalidBand> {
        let digit = |d: u32| {
            u8::try_from(d)
                .ok()
                .filter(|&d| d <= 9)
                .ok_or(InvalidBand::Digit(d))
        };
        let first = digit(first)?;
        let second = digit(second)?;
        let exponent = u8::try_from(exponent)
            .ok()
            .filter(|&e| i32::from(e) <= MAX_BAND_EXPONENT)
            .ok_or(InvalidBand::Exponent(exponent))?;
        Ok(Self {
            first,
            second,
            exponent,
        })
    }

    /// Builds a code from three color names (digit, digit, multiplier).
    pub fn from_colors(first: &str, second: &str, multiplier: &str) -> Result<Self, InvalidBand> {
        let lookup = |name: &str| {
            color_index(name)
                .map(u32::from)
                .ok_or_else(|| InvalidBand::Color(name.to_string()))
        };
        Self::new(lookup(first)?, lookup(second)?, lookup(multiplier)?)
    }

    /// Encodes `value` as the nearest two-digit code.
    ///
    /// The value is normalized into `[10, 100)`, rounded, and carried into the
    /// next decade when rounding reaches 100.
    pub fn encode(value: Scalar) -> Result<Self, UnsupportedRange> {
        if !(value.is_finite() && value > 0.0) {
            return Err(UnsupportedRange {
                value,
                exponent: None,
            });
        }

        let mut v = value;
        let mut exponent: i32 = 0;
        while v >= 100.0 {
            v /= 10.0;
            exponent += 1;
        }
        while v < 10.0 {
            v *= 10.0;
            exponent -= 1;
        }

        let mut digits = v.round() as u32;
        if digits >= 100 {
            digits /= 10;
            exponent += 1;
        }

        if !(0..=MAX_BAND_EXPONENT).contains(&exponent) {
            return Err(UnsupportedRange {
                value,
                exponent: Some(exponent),
            });
        }
        Ok(Self {
            first: (digits / 10) as u8,
            second: (digits % 10) as u8,
            exponent: exponent as u8,
        })
    }

    /// Exact resistance `(10*d1 + d2) * 10^exponent` in ohms.
    #[must_use]
    pub fn decode(&self) -> Scalar {
        Scalar::from(self.significand()) * pow10(i32::from(self.exponent))
    }

    /// First significant digit.
    #[must_use]
    pub const fn first(&self) -> u8 {
        self.first
    }

    /// Second significant digit.
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Decade exponent of the multiplier band.
    #[must_use]
    pub const fn exponent(&self) -> u8 {
        self.exponent
    }

    /// Two-digit significand `10*d1 + d2`.
    #[must_use]
    pub const fn significand(&self) -> u8 {
        self.first * 10 + self.second
    }

    /// Color names of all four bands, tolerance last.
    #[must_use]
    pub fn colors(&self) -> [&'static str; 4] {
        [
            DIGIT_COLOR_NAMES[usize::from(self.first)],
            DIGIT_COLOR_NAMES[usize::from(self.second)],
            MULTIPLIER_COLOR_NAMES[usize::from(self.exponent)],
            TOLERANCE_COLOR,
        ]
    }
}

impl fmt::Display for BandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.colors().join("-"))
    }
}

/// Color name of a digit band, `None` above 9.
#[must_use]
pub fn digit_color(digit: u8) -> Option<&'static str> {
    DIGIT_COLOR_NAMES.get(usize::from(digit)).copied()
}

/// Color name of a multiplier band, `None` above 6.
#[must_use]
pub fn multiplier_color(exponent: u8) -> Option<&'static str> {
    MULTIPLIER_COLOR_NAMES.get(usize::from(exponent)).copied()
}

/// Digit value of a color name, case-insensitive; `Gray` is accepted for grey.
#[must_use]
pub fn color_index(name: &str) -> Option<u8> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("gray") {
        return Some(8);
    }
    DIGIT_COLOR_NAMES
        .iter()
        .position(|c| c.eq_ignore_ascii_case(name))
        .map(|idx| idx as u8)
}
