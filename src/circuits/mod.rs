//! Component-level calculations: standard values, color codes, DC helpers and
//! amplifier design.

/// Op-amp gain design from standard resistor pairs.
pub mod amplifier;
/// Four-band resistor color codes.
pub mod bands;
/// Lumped component definitions.
pub mod component;
/// Ohm's law, dividers and LED resistors.
pub mod dc;
/// E24 standard-value snapping.
pub mod series;

pub use amplifier::{design_gain, near_misses, AmplifierMode, GainDesign};
pub use bands::{BandCode, InvalidBand, UnsupportedRange};
pub use component::{Capacitor, Inductor, Resistor};
pub use dc::{design_led_resistor, voltage_divider, LedDesign, OhmsLaw};
pub use series::{snap_to_e24, StandardSeries, E24};
