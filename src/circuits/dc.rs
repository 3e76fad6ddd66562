//! Steady-state DC helpers: Ohm's law, dividers and LED series resistors.

use crate::errors::{require_finite, require_positive, ValidationError};
use crate::math::Scalar;

use super::component::Resistor;
use super::series::snap_to_e24;

/// One of the four Ohm's-law / power relations, with its known quantities.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OhmsLaw {
    /// `V = I R`.
    Voltage {
        /// Current in amperes.
        current: Scalar,
        /// Resistance in ohms.
        resistance: Scalar,
    },
    /// `I = V / R`.
    Current {
        /// Voltage in volts.
        voltage: Scalar,
        /// Resistance in ohms.
        resistance: Scalar,
    },
    /// `R = V / I`.
    Resistance {
        /// Voltage in volts.
        voltage: Scalar,
        /// Current in amperes.
        current: Scalar,
    },
    /// `P = V I`.
    Power {
        /// Voltage in volts.
        voltage: Scalar,
        /// Current in amperes.
        current: Scalar,
    },
}

impl OhmsLaw {
    /// Computes the unknown quantity.
    ///
    /// Divisors are checked before dividing: a zero current for `R = V/I` or a
    /// zero resistance for `I = V/R` is a validation failure.
    pub fn solve(&self) -> Result<Scalar, ValidationError> {
        match *self {
            Self::Voltage {
                current,
                resistance,
            } => Ok(require_finite("current", current)? * require_finite("resistance", resistance)?),
            Self::Current {
                voltage,
                resistance,
            } => {
                let voltage = require_finite("voltage", voltage)?;
                if require_finite("resistance", resistance)? == 0.0 {
                    return Err(ValidationError::Zero("resistance"));
                }
                Ok(voltage / resistance)
            }
            Self::Resistance { voltage, current } => {
                let voltage = require_finite("voltage", voltage)?;
                if require_finite("current", current)? == 0.0 {
                    return Err(ValidationError::Zero("current"));
                }
                Ok(voltage / current)
            }
            Self::Power { voltage, current } => {
                Ok(require_finite("voltage", voltage)? * require_finite("current", current)?)
            }
        }
    }

    /// Unit of the solved quantity.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Voltage { .. } => "V",
            Self::Current { .. } => "A",
            Self::Resistance { .. } => "Ohms",
            Self::Power { .. } => "W",
        }
    }

    /// Tool name used in calculation records.
    #[must_use]
    pub const fn tool_name(&self) -> &'static str {
        match self {
            Self::Voltage { .. } => "Ohm's Law (V)",
            Self::Current { .. } => "Ohm's Law (I)",
            Self::Resistance { .. } => "Ohm's Law (R)",
            Self::Power { .. } => "Power Calc (P)",
        }
    }
}

/// Unloaded divider output `Vin * R2 / (R1 + R2)`.
pub fn voltage_divider(vin: Scalar, r1: Scalar, r2: Scalar) -> Result<Scalar, ValidationError> {
    let vin = require_finite("input voltage", vin)?;
    let total = require_finite("R1", r1)? + require_finite("R2", r2)?;
    if total == 0.0 {
        return Err(ValidationError::Zero("R1 + R2"));
    }
    Ok(vin * r2 / total)
}

/// Series resistor selection for an LED.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedDesign {
    /// `(Vs - Vf) / I` before snapping (Ω).
    pub ideal_resistance: Scalar,
    /// Nearest E24 resistor (Ω).
    pub resistance: Scalar,
    /// Current with the E24 resistor fitted (A).
    pub current: Scalar,
    /// Power dissipated in the resistor (W).
    pub resistor_power: Scalar,
}

/// Picks the E24 resistor closest to the ideal LED series resistance.
pub fn design_led_resistor(
    supply: Scalar,
    forward: Scalar,
    target_current: Scalar,
) -> Result<LedDesign, ValidationError> {
    let supply = require_finite("supply voltage", supply)?;
    let forward = require_finite("forward voltage", forward)?;
    if forward >= supply {
        return Err(ValidationError::SupplyBelowForward { supply, forward });
    }
    let target_current = require_positive("target current", target_current)?;

    let headroom = supply - forward;
    let ideal_resistance = headroom / target_current;
    let resistor = Resistor::new(snap_to_e24(ideal_resistance));
    let current = resistor.current(headroom);
    Ok(LedDesign {
        ideal_resistance,
        resistance: resistor.resistance(),
        current,
        resistor_power: resistor.dissipation(current),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn ohms_law_relations() {
        let v = OhmsLaw::Voltage {
            current: 1e-3,
            resistance: 4700.0,
        };
        assert_relative_eq!(v.solve().unwrap(), 4.7, max_relative = 1e-12);
        let p = OhmsLaw::Power {
            voltage: 5.0,
            current: 0.2,
        };
        assert_relative_eq!(p.solve().unwrap(), 1.0, max_relative = 1e-12);
        assert_eq!(p.unit(), "W");
    }

    #[test]
    fn zero_current_is_rejected_before_division() {
        let r = OhmsLaw::Resistance {
            voltage: 10.0,
            current: 0.0,
        };
        assert_eq!(r.solve(), Err(ValidationError::Zero("current")));
        let i = OhmsLaw::Current {
            voltage: 10.0,
            resistance: 0.0,
        };
        assert_eq!(i.solve(), Err(ValidationError::Zero("resistance")));
    }

    #[test]
    fn divider_halves_with_equal_resistors() {
        assert_relative_eq!(voltage_divider(10.0, 4700.0, 4700.0).unwrap(), 5.0);
        assert_eq!(
            voltage_divider(10.0, 0.0, 0.0),
            Err(ValidationError::Zero("R1 + R2"))
        );
    }

    #[test]
    fn led_resistor_snaps_to_e24() {
        // (5 - 2) / 20 mA = 150 Ω, itself an E24 value.
        let design = design_led_resistor(5.0, 2.0, 0.02).unwrap();
        assert_relative_eq!(design.ideal_resistance, 150.0, max_relative = 1e-12);
        assert_relative_eq!(design.resistance, 150.0, max_relative = 1e-12);
        assert_relative_eq!(design.current, 0.02, max_relative = 1e-12);
        assert_relative_eq!(design.resistor_power, 0.06, max_relative = 1e-9);

        // (12 - 0.7) / 10 mA = 1130 Ω -> 1.1 kΩ.
        let design = design_led_resistor(12.0, 0.7, 0.01).unwrap();
        assert_relative_eq!(design.resistance, 1100.0, max_relative = 1e-12);
        assert!(design.current > 0.01);
    }

    #[test]
    fn led_validation() {
        assert_eq!(
            design_led_resistor(2.0, 2.0, 0.02),
            Err(ValidationError::SupplyBelowForward {
                supply: 2.0,
                forward: 2.0
            })
        );
        assert!(matches!(
            design_led_resistor(5.0, 2.0, 0.0),
            Err(ValidationError::NotPositive { .. })
        ));
    }
}
