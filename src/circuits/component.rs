use crate::math::Scalar;

use super::bands::{BandCode, UnsupportedRange};
use super::series::snap_to_e24;

/// Lumped resistor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    resistance: Scalar,
}

impl Resistor {
    /// Creates a resistor.
    #[must_use]
    pub const fn new(resistance_ohms: Scalar) -> Self {
        Self {
            resistance: resistance_ohms,
        }
    }

    /// Resistance in ohms.
    #[must_use]
    pub const fn resistance(&self) -> Scalar {
        self.resistance
    }

    /// The nearest E24 part.
    #[must_use]
    pub fn to_standard(&self) -> Self {
        Self::new(snap_to_e24(self.resistance))
    }

    /// 4-band code of the nearest E24 part.
    pub fn bands(&self) -> Result<BandCode, UnsupportedRange> {
        BandCode::encode(self.to_standard().resistance)
    }

    /// Current through the resistor for a voltage across it.
    #[must_use]
    pub fn current(&self, voltage: Scalar) -> Scalar {
        voltage / self.resistance
    }

    /// Power dissipated for a current through the resistor.
    #[must_use]
    pub fn dissipation(&self, current: Scalar) -> Scalar {
        current * current * self.resistance
    }
}

/// Lumped capacitor (ideal).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitor {
    capacitance: Scalar,
}

impl Capacitor {
    /// Creates a capacitor.
    #[must_use]
    pub const fn new(capacitance_f: Scalar) -> Self {
        Self {
            capacitance: capacitance_f,
        }
    }

    /// Capacitance in farads.
    #[must_use]
    pub const fn capacitance(&self) -> Scalar {
        self.capacitance
    }

    /// Stored energy `C v² / 2` at a terminal voltage.
    #[must_use]
    pub fn stored_energy(&self, voltage: Scalar) -> Scalar {
        0.5 * self.capacitance * voltage * voltage
    }
}

/// Lumped inductor (ideal).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inductor {
    inductance: Scalar,
}

impl Inductor {
    /// Creates an inductor.
    #[must_use]
    pub const fn new(inductance_h: Scalar) -> Self {
        Self {
            inductance: inductance_h,
        }
    }

    /// Inductance in henries.
    #[must_use]
    pub const fn inductance(&self) -> Scalar {
        self.inductance
    }

    /// Stored energy `L i² / 2` at a branch current.
    #[must_use]
    pub fn stored_energy(&self, current: Scalar) -> Scalar {
        0.5 * self.inductance * current * current
    }
}
