//! Engineering notation: metric-prefix parsing and formatting.
//!
//! Values enter the crate as text such as `4.7k`, `10u` or `1M` and leave it
//! as `4.70k`. Everything between is plain SI base units.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::math::Scalar;

/// SI prefixes accepted on input, powers of 1000 from pico to giga.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricPrefix {
    /// 10⁻¹²
    Pico,
    /// 10⁻⁹
    Nano,
    /// 10⁻⁶
    Micro,
    /// 10⁻³
    Milli,
    /// 10⁰ (no suffix)
    Unit,
    /// 10³
    Kilo,
    /// 10⁶
    Mega,
    /// 10⁹
    Giga,
}

impl MetricPrefix {
    const ORDERED: [Self; 8] = [
        Self::Pico,
        Self::Nano,
        Self::Micro,
        Self::Milli,
        Self::Unit,
        Self::Kilo,
        Self::Mega,
        Self::Giga,
    ];

    /// Parses a single suffix character. Both `k` and `K` mean kilo.
    #[must_use]
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::Pico),
            'n' => Some(Self::Nano),
            'u' => Some(Self::Micro),
            'm' => Some(Self::Milli),
            'k' | 'K' => Some(Self::Kilo),
            'M' => Some(Self::Mega),
            'G' => Some(Self::Giga),
            _ => None,
        }
    }

    /// Suffix used when formatting; empty for [`MetricPrefix::Unit`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pico => "p",
            Self::Nano => "n",
            Self::Micro => "u",
            Self::Milli => "m",
            Self::Unit => "",
            Self::Kilo => "k",
            Self::Mega => "M",
            Self::Giga => "G",
        }
    }

    /// Multiplier applied to the numeric part.
    #[must_use]
    pub const fn multiplier(self) -> Scalar {
        match self {
            Self::Pico => 1.0e-12,
            Self::Nano => 1.0e-9,
            Self::Micro => 1.0e-6,
            Self::Milli => 1.0e-3,
            Self::Unit => 1.0,
            Self::Kilo => 1.0e3,
            Self::Mega => 1.0e6,
            Self::Giga => 1.0e9,
        }
    }
}

/// Errors raised while reading an engineering-notation value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    /// Nothing but whitespace was supplied.
    #[error("empty value")]
    Empty,
    /// The numeric part could not be read.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
    /// The character after the number is not a known prefix.
    #[error("unknown suffix {0:?}")]
    UnknownSuffix(char),
    /// Characters follow the prefix.
    #[error("trailing characters after suffix: {0:?}")]
    TrailingCharacters(String),
}

/// Parses `text` such as `"4.7k"`, `" 10 u"` or `"-2.5"` into base units.
///
/// Whitespace may surround the number and separate it from the suffix.
pub fn parse_engineering(text: &str) -> Result<Scalar, ParseValueError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseValueError::Empty);
    }

    let split = trimmed
        .char_indices()
        .find(|&(idx, c)| !is_number_char(c, idx, trimmed))
        .map_or(trimmed.len(), |(idx, _)| idx);
    let (number, rest) = trimmed.split_at(split);
    let value: Scalar = number
        .parse()
        .map_err(|_| ParseValueError::InvalidNumber(number.to_string()))?;

    let mut rest = rest.trim_start().chars();
    let Some(suffix) = rest.next() else {
        return Ok(value);
    };
    let prefix = MetricPrefix::from_suffix(suffix).ok_or(ParseValueError::UnknownSuffix(suffix))?;
    let trailing: String = rest.collect();
    if !trailing.is_empty() {
        return Err(ParseValueError::TrailingCharacters(trailing));
    }
    Ok(value * prefix.multiplier())
}

// Digits, sign, decimal point and an exponent marker followed by a digit or sign.
fn is_number_char(c: char, idx: usize, text: &str) -> bool {
    match c {
        '0'..='9' | '.' => true,
        '+' | '-' => idx == 0 || matches!(text[..idx].chars().last(), Some('e' | 'E')),
        'e' | 'E' => text[idx + 1..]
            .chars()
            .next()
            .is_some_and(|n| n.is_ascii_digit() || n == '+' || n == '-'),
        _ => false,
    }
}

/// A value that parses from engineering notation, for command-line arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngValue(pub Scalar);

impl FromStr for EngValue {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_engineering(s).map(Self)
    }
}

/// Formats `value` with two decimals and a metric prefix, e.g. `4.70k`.
///
/// The prefix range is pico to giga; values outside it keep the extreme
/// prefix. Negative values take the prefix of their magnitude. Zero formats
/// as `0`.
#[must_use]
pub fn format_engineering(value: Scalar) -> String {
    Engineering(value).to_string()
}

/// Display adapter for [`format_engineering`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engineering(pub Scalar);

impl fmt::Display for Engineering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            return f.write_str("0");
        }
        // Largest prefix not exceeding |value|, with slack for values such as
        // 1e-6 that sit a rounding error below their decade.
        let abs = self.0.abs();
        let prefix = MetricPrefix::ORDERED
            .iter()
            .rev()
            .copied()
            .find(|p| abs >= p.multiplier() * (1.0 - 1.0e-12))
            .unwrap_or(MetricPrefix::Pico);
        write!(f, "{:.2}{}", self.0 / prefix.multiplier(), prefix.symbol())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn parses_metric_suffixes() {
        assert_relative_eq!(parse_engineering("4.7k").unwrap(), 4700.0, max_relative = 1e-12);
        assert_relative_eq!(parse_engineering("4.7K").unwrap(), 4700.0, max_relative = 1e-12);
        assert_relative_eq!(parse_engineering("10u").unwrap(), 1.0e-5, max_relative = 1e-12);
        assert_relative_eq!(parse_engineering(" 220 ").unwrap(), 220.0);
        assert_relative_eq!(parse_engineering("1 M").unwrap(), 1.0e6);
        assert_relative_eq!(parse_engineering("3p").unwrap(), 3.0e-12, max_relative = 1e-12);
        assert_relative_eq!(parse_engineering("1e3").unwrap(), 1000.0);
        assert_relative_eq!(parse_engineering("-2.5m").unwrap(), -2.5e-3, max_relative = 1e-12);
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(parse_engineering("   "), Err(ParseValueError::Empty));
        assert_eq!(parse_engineering("x"), Err(ParseValueError::InvalidNumber(String::new())));
        assert_eq!(parse_engineering("10q"), Err(ParseValueError::UnknownSuffix('q')));
        assert_eq!(
            parse_engineering("10kx"),
            Err(ParseValueError::TrailingCharacters("x".into()))
        );
    }

    #[test]
    fn formats_with_prefixes() {
        assert_eq!(format_engineering(4700.0), "4.70k");
        assert_eq!(format_engineering(1.0e-6), "1.00u");
        assert_eq!(format_engineering(0.0), "0");
        assert_eq!(format_engineering(12.0), "12.00");
        assert_eq!(format_engineering(2.2e6), "2.20M");
        assert_eq!(format_engineering(5.0e12), "5000.00G");
    }
}
