//! Standard-value snapping against the E24 preferred-number series.

use crate::constants::E24_SERIES;
use crate::math::{decade, pow10, Scalar};

/// Relative tolerance used when testing series membership.
const MEMBERSHIP_TOLERANCE: Scalar = 1.0e-9;

/// One decade of a logarithmic preferred-number series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardSeries {
    mantissas: &'static [Scalar],
}

/// The E24 series (±5 %).
pub const E24: StandardSeries = StandardSeries {
    mantissas: &E24_SERIES,
};

impl StandardSeries {
    /// Mantissas of one decade in ascending order.
    #[must_use]
    pub const fn mantissas(&self) -> &'static [Scalar] {
        self.mantissas
    }

    /// Number of values per decade.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.mantissas.len()
    }

    /// True for a series without values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mantissas.is_empty()
    }

    /// Snaps `target` to the nearest `mantissa * 10^k`.
    ///
    /// Ties keep the first (smaller) mantissa. A mantissa closer to 10 than to
    /// the top of the series rolls over to 1.0 in the next decade. Non-positive
    /// or non-finite targets return 1.0.
    #[must_use]
    pub fn snap(&self, target: Scalar) -> Scalar {
        let Some((normalized, exponent)) = decade(target) else {
            return 1.0;
        };
        let mut magnitude = pow10(exponent);

        let mut closest = self.mantissas[0];
        let mut min_diff = Scalar::INFINITY;
        for (idx, &mantissa) in self.mantissas.iter().enumerate() {
            let diff = (normalized - mantissa).abs();
            if idx == self.mantissas.len() - 1 {
                let diff_next_decade = (normalized - 10.0).abs();
                if diff_next_decade < diff && diff_next_decade < min_diff {
                    closest = 1.0;
                    magnitude *= 10.0;
                    break;
                }
            }
            if diff < min_diff {
                min_diff = diff;
                closest = mantissa;
            }
        }
        closest * magnitude
    }

    /// Series values of the decade starting at `10^exponent`.
    pub fn decade_values(&self, exponent: i32) -> impl Iterator<Item = Scalar> + '_ {
        let scale = pow10(exponent);
        self.mantissas.iter().map(move |&m| m * scale)
    }

    /// True when `value` equals a series value within floating tolerance.
    #[must_use]
    pub fn contains(&self, value: Scalar) -> bool {
        decade(value).is_some_and(|(normalized, _)| {
            self.mantissas
                .iter()
                .chain(std::iter::once(&10.0))
                .any(|&m| (normalized - m).abs() <= MEMBERSHIP_TOLERANCE * m)
        })
    }
}

/// Snaps `target` to the nearest E24 value. See [`StandardSeries::snap`].
#[inline]
#[must_use]
pub fn snap_to_e24(target: Scalar) -> Scalar {
    E24.snap(target)
}
