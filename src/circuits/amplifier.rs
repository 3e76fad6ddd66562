//! Op-amp gain design from standard resistor pairs.
//!
//! R1 is drawn from E24 values in the 1 kΩ, 10 kΩ and 100 kΩ decades; for each
//! candidate the ideal R2 is computed, snapped to E24, and the resulting gain
//! compared against the target.

use crate::constants::GAIN_DESIGN_DECADES;
use crate::errors::{require_positive, ValidationError};
use crate::math::Scalar;

use super::series::{snap_to_e24, E24};

/// Feedback configuration of the amplifier.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplifierMode {
    /// `gain = 1 + R2/R1`.
    NonInverting,
    /// `gain = -R2/R1`; designs work on the magnitude.
    Inverting,
}

impl AmplifierMode {
    /// Gain magnitude realized by a resistor pair.
    #[must_use]
    pub fn gain(self, r1: Scalar, r2: Scalar) -> Scalar {
        match self {
            Self::NonInverting => 1.0 + r2 / r1,
            Self::Inverting => r2 / r1,
        }
    }

    /// R2 giving exactly `target` for a fixed `r1`.
    #[must_use]
    pub fn ideal_r2(self, r1: Scalar, target: Scalar) -> Scalar {
        match self {
            Self::NonInverting => r1 * (target - 1.0),
            Self::Inverting => r1 * target,
        }
    }

    /// Short label used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NonInverting => "Non-Inv",
            Self::Inverting => "Inv",
        }
    }
}

/// A candidate resistor pair and how close it lands to the target.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainDesign {
    /// Fixed input resistor (Ω).
    pub r1: Scalar,
    /// Unsnapped feedback resistor (Ω).
    pub ideal_r2: Scalar,
    /// Feedback resistor snapped to E24 (Ω).
    pub r2: Scalar,
    /// Gain magnitude realized by `r1` and `r2`.
    pub actual_gain: Scalar,
    /// Relative error `|actual - target| / target`.
    pub error: Scalar,
}

impl GainDesign {
    /// Relative error in percent.
    #[must_use]
    pub fn error_percent(&self) -> Scalar {
        self.error * 100.0
    }
}

/// Checks the target gain against the mode's preconditions.
fn validate_target(mode: AmplifierMode, target: Scalar) -> Result<Scalar, ValidationError> {
    let target = require_positive("target gain", target)?;
    if mode == AmplifierMode::NonInverting && target < 1.0 {
        return Err(ValidationError::GainBelowUnity(target));
    }
    Ok(target)
}

/// Evaluates every R1 candidate in search order, skipping non-positive ideal R2.
fn candidates(mode: AmplifierMode, target: Scalar) -> impl Iterator<Item = GainDesign> {
    GAIN_DESIGN_DECADES
        .into_iter()
        .flat_map(|scale| E24.mantissas().iter().map(move |&m| m * scale))
        .filter_map(move |r1| {
            let ideal_r2 = mode.ideal_r2(r1, target);
            if ideal_r2 <= 0.0 {
                return None;
            }
            let r2 = snap_to_e24(ideal_r2);
            let actual_gain = mode.gain(r1, r2);
            Some(GainDesign {
                r1,
                ideal_r2,
                r2,
                actual_gain,
                error: (actual_gain - target).abs() / target,
            })
        })
}

/// Returns the resistor pair with the smallest gain error.
///
/// The first candidate found wins ties, so smaller R1 decades are preferred.
pub fn design_gain(mode: AmplifierMode, target: Scalar) -> Result<GainDesign, ValidationError> {
    let target = validate_target(mode, target)?;
    let best = candidates(mode, target)
        .reduce(|best, next| if next.error < best.error { next } else { best })
        .ok_or(ValidationError::NoCandidate(target))?;
    tracing::debug!(
        mode = mode.label(),
        target,
        r1 = best.r1,
        r2 = best.r2,
        error = best.error,
        "gain design selected"
    );
    Ok(best)
}

/// All candidates with relative error below `threshold`, best first.
///
/// Equal errors keep search order.
pub fn near_misses(
    mode: AmplifierMode,
    target: Scalar,
    threshold: Scalar,
) -> Result<Vec<GainDesign>, ValidationError> {
    let target = validate_target(mode, target)?;
    let mut found: Vec<_> = candidates(mode, target)
        .filter(|d| d.error < threshold)
        .collect();
    found.sort_by(|a, b| a.error.total_cmp(&b.error));
    Ok(found)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::NEAR_MISS_THRESHOLD;
    use crate::math::logspace;

    #[test]
    fn gain_of_eleven_is_exact() {
        let design = design_gain(AmplifierMode::NonInverting, 11.0).unwrap();
        assert_relative_eq!(design.r1, 1000.0);
        assert_relative_eq!(design.r2, 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(design.actual_gain, 11.0, max_relative = 1e-12);
        assert!(design.error < 1e-12);
    }

    #[test]
    fn inverting_gain_uses_magnitude() {
        let design = design_gain(AmplifierMode::Inverting, 4.7).unwrap();
        assert_relative_eq!(design.r1, 1000.0);
        assert_relative_eq!(design.r2, 4700.0, max_relative = 1e-12);
    }

    #[test]
    fn non_inverting_rejects_attenuation() {
        assert_eq!(
            design_gain(AmplifierMode::NonInverting, 0.5),
            Err(ValidationError::GainBelowUnity(0.5))
        );
        assert!(matches!(
            design_gain(AmplifierMode::Inverting, -2.0),
            Err(ValidationError::NotPositive { .. })
        ));
    }

    #[test]
    fn unity_non_inverting_has_no_candidate() {
        assert_eq!(
            design_gain(AmplifierMode::NonInverting, 1.0),
            Err(ValidationError::NoCandidate(1.0))
        );
    }

    #[test]
    fn error_stays_within_e24_spacing() {
        for mode in [AmplifierMode::NonInverting, AmplifierMode::Inverting] {
            for target in logspace(1.01, 1000.0, 400) {
                let design = design_gain(mode, target).unwrap();
                assert!(
                    design.error <= 0.05,
                    "{mode:?} gain {target}: error {}",
                    design.error
                );
            }
        }
    }

    #[test]
    fn near_misses_are_sorted_and_bounded() {
        let list = near_misses(AmplifierMode::Inverting, 3.3, NEAR_MISS_THRESHOLD).unwrap();
        assert!(!list.is_empty());
        assert!(list.windows(2).all(|w| w[0].error <= w[1].error));
        assert!(list.iter().all(|d| d.error < NEAR_MISS_THRESHOLD));
        let best = design_gain(AmplifierMode::Inverting, 3.3).unwrap();
        assert_eq!(list[0], best);
    }
}
