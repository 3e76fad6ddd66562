//! Fixed tables and engine constants.
//!
//! ## Standard values
//!
//! The E24 series is the IEC 60063 preferred-number series for ±5 % parts:
//! 24 mantissas per decade, roughly logarithmically spaced (ratio ≈ 10^(1/24)).
//! The historical values deviate slightly from the exact geometric sequence
//! (e.g. 2.7, 3.0, 3.3, 3.6, 3.9, 4.3, 4.7, 8.2) and are reproduced verbatim.
//!
//! ## Transient engine
//!
//! Every simulation records [`SIMULATION_STEPS`] samples and advances each of
//! them with [`SUB_STEPS`] forward-Euler sub-steps.

use std::f64::consts::PI;

use crate::math::Scalar;

/// E24 mantissas for one decade, strictly increasing from 1.0.
pub const E24_SERIES: [Scalar; 24] = [
    1.0, 1.1, 1.2, 1.3, 1.5, 1.6, 1.8, 2.0, 2.2, 2.4, 2.7, 3.0, //
    3.3, 3.6, 3.9, 4.3, 4.7, 5.1, 5.6, 6.2, 6.8, 7.5, 8.2, 9.1,
];

/// Color names for band digits 0 through 9.
pub const DIGIT_COLOR_NAMES: [&str; 10] = [
    "Black", "Brown", "Red", "Orange", "Yellow", "Green", "Blue", "Violet", "Grey", "White",
];

/// Color names for multiplier exponents 0 (×1) through 6 (×1 M).
pub const MULTIPLIER_COLOR_NAMES: [&str; 7] =
    ["Black", "Brown", "Red", "Orange", "Yellow", "Green", "Blue"];

/// Highest decade exponent a 4-band code can carry.
pub const MAX_BAND_EXPONENT: i32 = 6;

/// Recorded samples per transient run.
pub const SIMULATION_STEPS: usize = 1000;

/// Forward-Euler sub-steps executed between two recorded samples.
pub const SUB_STEPS: usize = 10;

/// Series resistance assumed for the LC topology (Ω).
pub const LC_INTERNAL_RESISTANCE: Scalar = 0.1;

/// Capacitance substituted when a required capacitor is non-positive (F).
pub const FALLBACK_CAPACITANCE: Scalar = 1.0e-6;

/// Inductance substituted when a required inductor is non-positive (H).
pub const FALLBACK_INDUCTANCE: Scalar = 1.0e-3;

/// R1 decades scanned by the op-amp gain designer (1 kΩ, 10 kΩ, 100 kΩ).
pub const GAIN_DESIGN_DECADES: [Scalar; 3] = [1.0e3, 1.0e4, 1.0e5];

/// Relative error under which gain designs are listed as near misses (2 %).
pub const NEAR_MISS_THRESHOLD: Scalar = 0.02;

/// Maximum length of each text field in a calculation record.
pub const RECORD_FIELD_LEN: usize = 63;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}

/// Returns the period in seconds of an oscillation at angular frequency `omega`.
#[inline]
#[must_use]
pub fn period_from_angular(omega: Scalar) -> Scalar {
    2.0 * PI / omega
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn e24_is_strictly_increasing_from_one() {
        assert_relative_eq!(E24_SERIES[0], 1.0);
        assert!(E24_SERIES.windows(2).all(|w| w[0] < w[1]));
        assert!(E24_SERIES.iter().all(|&m| (1.0..10.0).contains(&m)));
    }

    #[test]
    fn period_inverts_angular_frequency() {
        let omega = angular_frequency(50.0);
        assert_relative_eq!(period_from_angular(omega), 0.02, max_relative = 1.0e-12);
    }
}
