//! Convenience re-exports for bench calculations.

pub use crate::circuits::{
    amplifier::{design_gain, near_misses, AmplifierMode, GainDesign},
    bands::{BandCode, InvalidBand, UnsupportedRange},
    component::{Capacitor, Inductor, Resistor},
    dc::{design_led_resistor, voltage_divider, LedDesign, OhmsLaw},
    series::{snap_to_e24, StandardSeries, E24},
};
pub use crate::constants::*;
pub use crate::errors::{ValidationError, WorkbenchError};
pub use crate::history::{BoundedText, CalcRecord, History, RecordSink};
pub use crate::io::{csv_path, write_history_csv, write_trace_csv};
pub use crate::math::{decade, linspace, logspace, Scalar, StateVector};
pub use crate::plot::StripChart;
pub use crate::session::{Session, Workbench};
pub use crate::simulation::{
    auto_duration, damping_analysis, simulate, Damping, DampingAnalysis, SimulationConfig,
    SimulationEngine, SimulationError, SimulationTrace, Topology, TraceSummary, TransientSimulator,
};
pub use crate::units::{format_engineering, parse_engineering, EngValue, Engineering};
