//! Shared error types used across submodules.

use thiserror::Error;

use crate::circuits::bands::{InvalidBand, UnsupportedRange};
use crate::math::Scalar;
use crate::simulation::SimulationError;
use crate::units::ParseValueError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum WorkbenchError {
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Raised when an input fails validation before any computation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Raised when a value has no 4-band representation.
    #[error(transparent)]
    UnsupportedRange(#[from] UnsupportedRange),
    /// Raised when raw bands do not form a code.
    #[error(transparent)]
    InvalidBand(#[from] InvalidBand),
    /// Raised when engineering-notation text cannot be read.
    #[error(transparent)]
    Parse(#[from] ParseValueError),
    /// Raised when exporting records or traces fails.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input rejected before computation; no partial result exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A quantity that must be strictly positive is not.
    #[error("{quantity} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// Supplied value.
        value: Scalar,
    },
    /// A quantity that may be zero is negative.
    #[error("{quantity} must not be negative, got {value}")]
    Negative {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// Supplied value.
        value: Scalar,
    },
    /// A quantity used as a divisor is zero.
    #[error("{0} cannot be zero")]
    Zero(&'static str),
    /// NaN or infinity where a real number is required.
    #[error("{quantity} must be finite, got {value}")]
    NotFinite {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// Supplied value.
        value: Scalar,
    },
    /// LED supply does not exceed the forward voltage.
    #[error("supply voltage {supply} V must exceed LED forward voltage {forward} V")]
    SupplyBelowForward {
        /// Supply voltage.
        supply: Scalar,
        /// LED forward voltage.
        forward: Scalar,
    },
    /// Non-inverting amplifiers cannot attenuate.
    #[error("non-inverting gain must be >= 1, got {0}")]
    GainBelowUnity(Scalar),
    /// No resistor pair realizes the requested gain (e.g. unity non-inverting).
    #[error("no standard resistor pair realizes a gain of {0}")]
    NoCandidate(Scalar),
}

/// Returns `value` when it is finite.
pub fn require_finite(quantity: &'static str, value: Scalar) -> Result<Scalar, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { quantity, value })
    }
}

/// Returns `value` when it is finite and strictly positive.
pub fn require_positive(quantity: &'static str, value: Scalar) -> Result<Scalar, ValidationError> {
    if require_finite(quantity, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_reports_quantity() {
        assert_eq!(require_positive("resistance", 10.0), Ok(10.0));
        let err = require_positive("resistance", 0.0).unwrap_err();
        assert_eq!(err.to_string(), "resistance must be positive, got 0");
        assert!(matches!(
            require_positive("current", Scalar::NAN),
            Err(ValidationError::NotFinite { quantity: "current", .. })
        ));
    }

    #[test]
    fn validation_converts_into_top_level() {
        let err: WorkbenchError = ValidationError::Zero("current").into();
        assert_eq!(err.to_string(), "current cannot be zero");
    }
}
