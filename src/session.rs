//! A working session: last-used values plus the record log.
//!
//! Every tool call takes the session explicitly, reads defaults from its
//! [`Workbench`], updates the values the tool produced, and appends one
//! [`CalcRecord`] describing the calculation.

use crate::circuits::amplifier::{design_gain, AmplifierMode, GainDesign};
use crate::circuits::bands::{BandCode, TOLERANCE_PERCENT};
use crate::circuits::dc::{design_led_resistor, voltage_divider, LedDesign, OhmsLaw};
use crate::circuits::series::snap_to_e24;
use crate::errors::{require_positive, WorkbenchError};
use crate::history::{CalcRecord, History, RecordSink};
use crate::math::Scalar;
use crate::simulation::{simulate, SimulationConfig, SimulationTrace, Topology, TraceSummary};
use crate::units::Engineering;

/// Last-used values offered as defaults to the next calculation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workbench {
    /// Supply / input voltage (V).
    pub voltage: Scalar,
    /// Resistor (Ω).
    pub resistor: Scalar,
    /// Capacitor (F).
    pub capacitor: Scalar,
    /// Current (A).
    pub current: Scalar,
    /// LED forward voltage (V).
    pub forward_voltage: Scalar,
    /// Inductor (H).
    pub inductor: Scalar,
}

impl Default for Workbench {
    fn default() -> Self {
        Self {
            voltage: 10.0,
            resistor: 4700.0,
            capacitor: 1.0e-6,
            current: 1.0e-3,
            forward_voltage: 0.7,
            inductor: 10.0e-3,
        }
    }
}

/// Result of the value-to-bands tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEncoding {
    /// Requested resistance (Ω).
    pub requested: Scalar,
    /// Nearest E24 resistance (Ω).
    pub standard: Scalar,
    /// Color code of the E24 value.
    pub code: BandCode,
}

/// Result of the transient tool.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientRun {
    /// Configuration actually simulated (snapped R, resolved window).
    pub config: SimulationConfig,
    /// Recorded samples.
    pub trace: SimulationTrace,
    /// Peaks and final energy.
    pub summary: TraceSummary,
}

/// Workbench defaults plus the calculation log.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Last-used values.
    pub workbench: Workbench,
    history: History,
}

impl Session {
    /// Starts a session from `workbench` with an empty log.
    #[must_use]
    pub fn new(workbench: Workbench) -> Self {
        Self {
            workbench,
            history: History::new(),
        }
    }

    /// The calculation log.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    fn log(&mut self, tool: &str, inputs: &str, result: &str) {
        self.history.append(CalcRecord::new(tool, inputs, result));
    }

    /// Snaps a resistor to E24 and makes it the workbench resistor.
    pub fn standard_resistor(&mut self, target: Option<Scalar>) -> Result<Scalar, WorkbenchError> {
        let target = require_positive("resistance", target.unwrap_or(self.workbench.resistor))?;
        let standard = snap_to_e24(target);
        self.workbench.resistor = standard;
        Ok(standard)
    }

    /// Decodes raw bands into a resistance.
    pub fn decode_bands(&mut self, code: BandCode) -> Scalar {
        let value = code.decode();
        self.workbench.resistor = value;
        self.log(
            "4-Band Decode",
            &format!(
                "Bands={code} (b1={}, b2={}, mult=10^{})",
                code.first(),
                code.second(),
                code.exponent()
            ),
            &format!("{}Ohms +/- {TOLERANCE_PERCENT}% [{code}]", Engineering(value)),
        );
        value
    }

    /// Snaps a resistance to E24 and encodes it as four bands.
    pub fn encode_bands(&mut self, target: Option<Scalar>) -> Result<BandEncoding, WorkbenchError> {
        let requested = require_positive("resistance", target.unwrap_or(self.workbench.resistor))?;
        let standard = snap_to_e24(requested);
        self.workbench.resistor = standard;
        let code = BandCode::encode(standard)?;
        self.log(
            "4-Band Encode",
            &format!(
                "Req={}Ohms,E24={}Ohms,Bands={code}",
                Engineering(requested),
                Engineering(standard)
            ),
            &format!("{}Ohms -> {code} ({TOLERANCE_PERCENT}%, Gold)", Engineering(standard)),
        );
        Ok(BandEncoding {
            requested,
            standard,
            code,
        })
    }

    /// Solves an Ohm's-law relation and stores the solved quantity.
    pub fn ohms_law(&mut self, law: OhmsLaw) -> Result<Scalar, WorkbenchError> {
        let value = law.solve()?;
        let inputs = match law {
            OhmsLaw::Voltage {
                current,
                resistance,
            } => {
                self.workbench.voltage = value;
                format!("I={current:.3e}A, R={resistance:.1e}R")
            }
            OhmsLaw::Current {
                voltage,
                resistance,
            } => {
                self.workbench.current = value;
                format!("V={voltage:.2}V, R={resistance:.1e}R")
            }
            OhmsLaw::Resistance { voltage, current } => {
                self.workbench.resistor = value;
                format!("V={voltage:.2}V, I={current:.3e}A")
            }
            OhmsLaw::Power { voltage, current } => format!("V={voltage:.2}V, I={current:.3e}A"),
        };
        self.log(
            law.tool_name(),
            &inputs,
            &format!("{} {}", Engineering(value), law.unit()),
        );
        Ok(value)
    }

    /// Unloaded divider output.
    pub fn divider(&mut self, vin: Scalar, r1: Scalar, r2: Scalar) -> Result<Scalar, WorkbenchError> {
        let vout = voltage_divider(vin, r1, r2)?;
        self.log(
            "Voltage Divider",
            &format!("Vin={vin:.2}V, R1={r1:.1e}R, R2={r2:.1e}R"),
            &format!("Vout={vout:.4} V"),
        );
        Ok(vout)
    }

    /// Runs a transient simulation; the window defaults to the automatic one.
    pub fn transient(&mut self, config: SimulationConfig) -> Result<TransientRun, WorkbenchError> {
        let trace = simulate(&config)?;
        let summary = trace.summary();
        let topology = config.topology;
        self.workbench.voltage = config.supply_voltage;

        let result = match topology {
            Topology::Rc => format!(
                "PkV:{:.1}V Ec:{:.2e}J",
                summary.peak_capacitor_voltage, summary.peak_capacitor_energy
            ),
            Topology::Rl => format!(
                "PkI:{:.2e}A El:{:.2e}J",
                summary.peak_current, summary.peak_inductor_energy
            ),
            Topology::Lc | Topology::SeriesRlc => format!(
                "Ec:{:.2e}J El:{:.2e}J",
                summary.peak_capacitor_energy, summary.peak_inductor_energy
            ),
        };
        self.log(
            "RLC Analyser",
            &format!("Type {topology}, Vs={:.1}V", config.supply_voltage),
            &result,
        );
        Ok(TransientRun {
            config: SimulationConfig {
                duration: Some(trace.duration),
                ..config
            },
            trace,
            summary,
        })
    }

    /// Chooses an E24 resistor for an LED; defaults come from the workbench.
    pub fn led(
        &mut self,
        supply: Option<Scalar>,
        forward: Option<Scalar>,
        current: Option<Scalar>,
    ) -> Result<LedDesign, WorkbenchError> {
        let supply = supply.unwrap_or(self.workbench.voltage);
        let forward = forward.unwrap_or(self.workbench.forward_voltage);
        let current = current.unwrap_or(self.workbench.current);
        let design = design_led_resistor(supply, forward, current)?;

        self.workbench.voltage = supply;
        self.workbench.forward_voltage = forward;
        self.workbench.resistor = design.resistance;
        self.workbench.current = design.current;
        self.log(
            "LED Resistor Calc",
            &format!("Vs={supply:.1}V,Vf={forward:.1}V->Rstd={:.2e}R", design.resistance),
            &format!(
                "R_std={}, I_act={}A",
                Engineering(design.resistance),
                Engineering(design.current)
            ),
        );
        Ok(design)
    }

    /// Designs an op-amp gain stage; R1 becomes the workbench resistor.
    pub fn gain(&mut self, mode: AmplifierMode, target: Scalar) -> Result<GainDesign, WorkbenchError> {
        let design = design_gain(mode, target)?;
        self.workbench.resistor = design.r1;
        self.log(
            "Op-Amp Designer",
            &format!("{}, Tgt G={target:.2}", mode.label()),
            &format!(
                "R1={}, R2={}, G={:.2}",
                Engineering(design.r1),
                Engineering(design.r2),
                design.actual_gain
            ),
        );
        Ok(design)
    }
}
