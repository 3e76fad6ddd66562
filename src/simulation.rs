//! Time-domain transient simulation of series RC, RL, LC and RLC circuits.
//!
//! Each circuit is driven by a constant step `Vs` applied at `t = 0+` with all
//! energy storage initially empty. The engine records [`SIMULATION_STEPS`]
//! samples; between two samples it runs [`SUB_STEPS`] forward-Euler sub-steps,
//! so the true integration step is `t_total / 10_000`. The method is first
//! order and meant for visualizing the transient shape, not for circuit-grade
//! accuracy.
//!
//! State equations (`v_C` capacitor voltage, `i` loop current):
//!
//! | topology | equations |
//! |----------|-----------|
//! | RC  | `i = (Vs - v_C)/R`, `v_C' = i/C` |
//! | RL  | `i' = (Vs - iR)/L` |
//! | LC  | `i' = (Vs - iR - v_C)/L`, `v_C' = i/C` with `R` = 0.1 Ω |
//! | RLC | as LC with the supplied `R` |
//!
//! For the coupled pair the current is updated first and the capacitor update
//! uses the new current, which keeps the lossless LC orbit bounded.

use std::fmt;

use crate::circuits::component::{Capacitor, Inductor};
use crate::constants::{
    period_from_angular, FALLBACK_CAPACITANCE, FALLBACK_INDUCTANCE, LC_INTERNAL_RESISTANCE,
    SIMULATION_STEPS, SUB_STEPS,
};
use crate::errors::{require_finite, require_positive, ValidationError};
use crate::math::{linspace, CScalar, Scalar, StateVector};

const V_C: usize = 0;
const I_L: usize = 1;

/// Supported series circuit topologies.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Resistor-capacitor.
    Rc,
    /// Resistor-inductor.
    Rl,
    /// Inductor-capacitor with a small internal resistance.
    Lc,
    /// Series resistor-inductor-capacitor.
    SeriesRlc,
}

impl Topology {
    /// True when the circuit contains a capacitor.
    #[must_use]
    pub const fn has_capacitor(self) -> bool {
        !matches!(self, Self::Rl)
    }

    /// True when the circuit contains an inductor.
    #[must_use]
    pub const fn has_inductor(self) -> bool {
        !matches!(self, Self::Rc)
    }

    /// Short name, e.g. `RLC`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rc => "RC",
            Self::Rl => "RL",
            Self::Lc => "LC",
            Self::SeriesRlc => "RLC",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Component values and window for one transient run.
///
/// Components irrelevant to the topology are ignored. The LC topology always
/// uses a 0.1 Ω internal resistance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Circuit structure.
    pub topology: Topology,
    /// Step input amplitude in volts.
    pub supply_voltage: Scalar,
    /// Series resistance in ohms.
    pub resistance: Option<Scalar>,
    /// Inductance in henries.
    pub inductance: Option<Scalar>,
    /// Capacitance in farads.
    pub capacitance: Option<Scalar>,
    /// Simulated time in seconds; `None` selects the window automatically.
    pub duration: Option<Scalar>,
}

impl SimulationConfig {
    /// Creates an RC configuration.
    #[must_use]
    pub const fn rc(supply_voltage: Scalar, resistance: Scalar, capacitance: Scalar) -> Self {
        Self {
            topology: Topology::Rc,
            supply_voltage,
            resistance: Some(resistance),
            inductance: None,
            capacitance: Some(capacitance),
            duration: None,
        }
    }

    /// Creates an RL configuration.
    #[must_use]
    pub const fn rl(supply_voltage: Scalar, resistance: Scalar, inductance: Scalar) -> Self {
        Self {
            topology: Topology::Rl,
            supply_voltage,
            resistance: Some(resistance),
            inductance: Some(inductance),
            capacitance: None,
            duration: None,
        }
    }

    /// Creates an LC configuration.
    #[must_use]
    pub const fn lc(supply_voltage: Scalar, inductance: Scalar, capacitance: Scalar) -> Self {
        Self {
            topology: Topology::Lc,
            supply_voltage,
            resistance: None,
            inductance: Some(inductance),
            capacitance: Some(capacitance),
            duration: None,
        }
    }

    /// Creates a series RLC configuration.
    #[must_use]
    pub const fn series_rlc(
        supply_voltage: Scalar,
        resistance: Scalar,
        inductance: Scalar,
        capacitance: Scalar,
    ) -> Self {
        Self {
            topology: Topology::SeriesRlc,
            supply_voltage,
            resistance: Some(resistance),
            inductance: Some(inductance),
            capacitance: Some(capacitance),
            duration: None,
        }
    }

    /// Overrides the automatic time window.
    #[must_use]
    pub fn with_duration(mut self, duration: Scalar) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Trait for simulation engines.
pub trait SimulationEngine {
    /// Executes the simulation using the provided configuration.
    fn run(&self, config: &SimulationConfig) -> Result<SimulationTrace, SimulationError>;
}

/// Errors that can occur while configuring or executing simulations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Raised when a component the topology needs was not supplied.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    /// Raised when a supplied value is rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Classification of a second-order response.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damping {
    /// `α < ω0`: decaying oscillation.
    Underdamped,
    /// `α = ω0`: fastest non-oscillating settle.
    Critical,
    /// `α > ω0`: slow monotonic settle.
    Overdamped,
}

/// Damping factor and natural frequency of a series RLC loop.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampingAnalysis {
    /// Damping factor `α = R / 2L` (1/s).
    pub alpha: Scalar,
    /// Undamped natural frequency `ω0 = 1 / √(LC)` (rad/s).
    pub omega0: Scalar,
}

impl DampingAnalysis {
    /// Computes `α` and `ω0` from component values.
    #[must_use]
    pub fn new(resistance: Scalar, inductance: Scalar, capacitance: Scalar) -> Self {
        Self {
            alpha: resistance / (2.0 * inductance),
            omega0: 1.0 / (inductance * capacitance).sqrt(),
        }
    }

    /// Response classification.
    #[must_use]
    pub fn damping(&self) -> Damping {
        if self.alpha < self.omega0 {
            Damping::Underdamped
        } else if self.alpha > self.omega0 {
            Damping::Overdamped
        } else {
            Damping::Critical
        }
    }

    /// Roots `s = -α ± √(α² - ω0²)` of the characteristic equation.
    #[must_use]
    pub fn characteristic_roots(&self) -> [CScalar; 2] {
        let disc = CScalar::new(self.alpha * self.alpha - self.omega0 * self.omega0, 0.0).sqrt();
        let base = CScalar::new(-self.alpha, 0.0);
        [base + disc, base - disc]
    }

    /// Ringing frequency `√(ω0² - α²)`; zero unless underdamped.
    #[must_use]
    pub fn damped_frequency(&self) -> Scalar {
        (self.omega0 * self.omega0 - self.alpha * self.alpha).max(0.0).sqrt()
    }

    /// Window showing the interesting part of the step response.
    ///
    /// Underdamped loops get ten natural periods, capped at the `5/α` decay
    /// envelope; otherwise `10/α`.
    #[must_use]
    pub fn settle_window(&self) -> Scalar {
        match self.damping() {
            Damping::Underdamped => (10.0 * period_from_angular(self.omega0)).min(5.0 / self.alpha),
            Damping::Critical | Damping::Overdamped => 10.0 / self.alpha,
        }
    }
}

/// Validated component values after defaults have been substituted.
#[derive(Debug, Clone, Copy)]
struct Circuit {
    topology: Topology,
    supply: Scalar,
    resistance: Scalar,
    capacitor: Capacitor,
    inductor: Inductor,
}

impl Circuit {
    fn resolve(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let topology = config.topology;
        let supply = require_finite("supply voltage", config.supply_voltage)?;

        let resistance = match topology {
            Topology::Lc => LC_INTERNAL_RESISTANCE,
            Topology::Rc | Topology::Rl => {
                let r = config
                    .resistance
                    .ok_or(SimulationError::MissingParameter("resistance"))?;
                // R = 0 would divide by zero in the state equations.
                require_positive("resistance", r)?
            }
            Topology::SeriesRlc => {
                let r = config
                    .resistance
                    .ok_or(SimulationError::MissingParameter("resistance"))?;
                if require_finite("resistance", r)? < 0.0 {
                    return Err(ValidationError::Negative {
                        quantity: "resistance",
                        value: r,
                    }
                    .into());
                }
                r
            }
        };

        let capacitance = if topology.has_capacitor() {
            let c = config
                .capacitance
                .ok_or(SimulationError::MissingParameter("capacitance"))?;
            reactive_or_default("capacitance", c, FALLBACK_CAPACITANCE)?
        } else {
            0.0
        };
        let inductance = if topology.has_inductor() {
            let l = config
                .inductance
                .ok_or(SimulationError::MissingParameter("inductance"))?;
            reactive_or_default("inductance", l, FALLBACK_INDUCTANCE)?
        } else {
            0.0
        };

        Ok(Self {
            topology,
            supply,
            resistance,
            capacitor: Capacitor::new(capacitance),
            inductor: Inductor::new(inductance),
        })
    }

    fn damping(&self) -> DampingAnalysis {
        DampingAnalysis::new(
            self.resistance,
            self.inductor.inductance(),
            self.capacitor.capacitance(),
        )
    }

    fn auto_duration(&self) -> Scalar {
        let c = self.capacitor.capacitance();
        let l = self.inductor.inductance();
        match self.topology {
            Topology::Rc => 5.0 * self.resistance * c,
            Topology::Rl => 5.0 * l / self.resistance,
            Topology::Lc => 3.0 * period_from_angular(self.damping().omega0),
            Topology::SeriesRlc => self.damping().settle_window(),
        }
    }

    fn advance(&self, state: &mut StateVector, h: Scalar) {
        let (vc, i) = (state[V_C], state[I_L]);
        let r = self.resistance;
        let c = self.capacitor.capacitance();
        let l = self.inductor.inductance();
        match self.topology {
            Topology::Rc => {
                let i = (self.supply - vc) / r;
                *state = StateVector::new(vc + i / c * h, i);
            }
            Topology::Rl => {
                state[I_L] = i + (self.supply - i * r) / l * h;
            }
            Topology::Lc | Topology::SeriesRlc => {
                let i = i + (self.supply - i * r - vc) / l * h;
                *state = StateVector::new(vc + i / c * h, i);
            }
        }
    }

    fn energies(&self, state: &StateVector) -> (Scalar, Scalar) {
        let ec = if self.topology.has_capacitor() {
            self.capacitor.stored_energy(state[V_C])
        } else {
            0.0
        };
        let el = if self.topology.has_inductor() {
            self.inductor.stored_energy(state[I_L])
        } else {
            0.0
        };
        (ec, el)
    }
}

/// Non-positive reactive parts are replaced so a trace can always be produced.
fn reactive_or_default(
    quantity: &'static str,
    value: Scalar,
    fallback: Scalar,
) -> Result<Scalar, ValidationError> {
    if require_finite(quantity, value)? > 0.0 {
        Ok(value)
    } else {
        tracing::warn!(quantity, value, fallback, "non-positive reactive component replaced");
        Ok(fallback)
    }
}

/// Automatic window for `config`, ignoring any duration override.
pub fn auto_duration(config: &SimulationConfig) -> Result<Scalar, SimulationError> {
    Ok(Circuit::resolve(config)?.auto_duration())
}

/// Damping analysis of the loop described by `config`.
///
/// Returns `None` for RC and RL, which are first order.
pub fn damping_analysis(config: &SimulationConfig) -> Result<Option<DampingAnalysis>, SimulationError> {
    let circuit = Circuit::resolve(config)?;
    Ok(match circuit.topology {
        Topology::Lc | Topology::SeriesRlc => Some(circuit.damping()),
        Topology::Rc | Topology::Rl => None,
    })
}

/// Per-step state and energy samples of one run.
///
/// Sample `i` is taken at `i * duration / len` before that step advances, so
/// sample 0 is always the empty initial state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationTrace {
    /// Topology that produced the trace.
    pub topology: Option<Topology>,
    /// Total simulated time in seconds.
    pub duration: Scalar,
    /// Capacitor voltage (V); zero for RL.
    pub capacitor_voltage: Vec<Scalar>,
    /// Inductor current (A); the loop current for RC.
    pub current: Vec<Scalar>,
    /// Capacitor energy (J); zero for RL.
    pub capacitor_energy: Vec<Scalar>,
    /// Inductor energy (J); zero for RC.
    pub inductor_energy: Vec<Scalar>,
}

impl SimulationTrace {
    fn with_capacity(topology: Topology, duration: Scalar, steps: usize) -> Self {
        Self {
            topology: Some(topology),
            duration,
            capacitor_voltage: Vec::with_capacity(steps),
            current: Vec::with_capacity(steps),
            capacitor_energy: Vec::with_capacity(steps),
            inductor_energy: Vec::with_capacity(steps),
        }
    }

    /// Total captured samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// True if no samples recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Spacing between recorded samples.
    #[must_use]
    pub fn time_step(&self) -> Scalar {
        if self.is_empty() {
            0.0
        } else {
            self.duration / self.len() as Scalar
        }
    }

    /// Simulated time of sample `index`.
    #[must_use]
    pub fn time_at(&self, index: usize) -> Scalar {
        index as Scalar * self.time_step()
    }

    /// Sample times, one per recorded step.
    #[must_use]
    pub fn times(&self) -> Vec<Scalar> {
        let n = self.len();
        linspace(0.0, self.time_at(n.saturating_sub(1)), n)
    }

    /// Total stored energy at each step.
    #[must_use]
    pub fn total_energy(&self) -> Vec<Scalar> {
        self.capacitor_energy
            .iter()
            .zip(&self.inductor_energy)
            .map(|(ec, el)| ec + el)
            .collect()
    }

    /// Peaks and final energy for reporting.
    #[must_use]
    pub fn summary(&self) -> TraceSummary {
        let peak_abs = |xs: &[Scalar]| xs.iter().fold(0.0, |acc: Scalar, x| acc.max(x.abs()));
        let peak = |xs: &[Scalar]| xs.iter().fold(0.0, |acc: Scalar, &x| acc.max(x));
        TraceSummary {
            peak_capacitor_voltage: peak_abs(&self.capacitor_voltage),
            peak_current: peak_abs(&self.current),
            peak_capacitor_energy: peak(&self.capacitor_energy),
            peak_inductor_energy: peak(&self.inductor_energy),
            final_total_energy: self.capacitor_energy.last().copied().unwrap_or(0.0)
                + self.inductor_energy.last().copied().unwrap_or(0.0),
        }
    }

    fn record(&mut self, state: &StateVector, (ec, el): (Scalar, Scalar)) {
        self.capacitor_voltage.push(state[V_C]);
        self.current.push(state[I_L]);
        self.capacitor_energy.push(ec);
        self.inductor_energy.push(el);
    }
}

/// Reporting values derived from a trace.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraceSummary {
    /// Largest |v_C| (V).
    pub peak_capacitor_voltage: Scalar,
    /// Largest |i| (A).
    pub peak_current: Scalar,
    /// Largest capacitor energy (J).
    pub peak_capacitor_energy: Scalar,
    /// Largest inductor energy (J).
    pub peak_inductor_energy: Scalar,
    /// Stored energy at the last sample (J).
    pub final_total_energy: Scalar,
}

/// Fixed-step sub-stepped forward-Euler engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientSimulator;

impl SimulationEngine for TransientSimulator {
    fn run(&self, config: &SimulationConfig) -> Result<SimulationTrace, SimulationError> {
        let circuit = Circuit::resolve(config)?;
        let duration = match config.duration {
            Some(t) => require_positive("duration", t)?,
            None => circuit.auto_duration(),
        };
        let _span = tracing::info_span!("transient", topology = circuit.topology.label(), duration)
            .entered();

        let h = duration / SIMULATION_STEPS as Scalar / SUB_STEPS as Scalar;
        let mut trace = SimulationTrace::with_capacity(circuit.topology, duration, SIMULATION_STEPS);
        let mut state = StateVector::zeros();
        for _ in 0..SIMULATION_STEPS {
            trace.record(&state, circuit.energies(&state));
            for _ in 0..SUB_STEPS {
                circuit.advance(&mut state, h);
            }
        }

        tracing::debug!(
            final_energy = trace.summary().final_total_energy,
            "transient run complete"
        );
        Ok(trace)
    }
}

/// Runs `config` on the [`TransientSimulator`].
pub fn simulate(config: &SimulationConfig) -> Result<SimulationTrace, SimulationError> {
    TransientSimulator.run(config)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn all_topologies() -> [SimulationConfig; 4] {
        [
            SimulationConfig::rc(5.0, 1000.0, 1e-6),
            SimulationConfig::rl(5.0, 100.0, 10e-3),
            SimulationConfig::lc(5.0, 10e-3, 1e-6),
            SimulationConfig::series_rlc(5.0, 47.0, 10e-3, 1e-6),
        ]
    }

    #[test]
    fn rc_charges_to_supply() {
        let trace = simulate(&SimulationConfig::rc(5.0, 1000.0, 1e-6)).unwrap();
        assert_eq!(trace.len(), SIMULATION_STEPS);
        assert_relative_eq!(trace.duration, 5.0e-3, max_relative = 1e-12);
        let last = *trace.capacitor_voltage.last().unwrap();
        assert!((last - 5.0).abs() / 5.0 < 0.01, "final v_C = {last}");
        assert!(trace.capacitor_voltage.windows(2).all(|w| w[1] >= w[0]));
        assert!(trace.inductor_energy.iter().all(|&e| e == 0.0));
    }

    #[test]
    fn first_sample_is_initial_condition() {
        for config in all_topologies() {
            let trace = simulate(&config).unwrap();
            assert_eq!(trace.capacitor_voltage[0], 0.0);
            assert_eq!(trace.current[0], 0.0);
            assert_eq!(trace.time_at(0), 0.0);
        }
    }

    #[test]
    fn energies_are_never_negative() {
        for config in all_topologies() {
            let trace = simulate(&config).unwrap();
            assert!(trace.capacitor_energy.iter().all(|&e| e >= 0.0));
            assert!(trace.inductor_energy.iter().all(|&e| e >= 0.0));
        }
    }

    #[test]
    fn rl_current_approaches_ohmic_limit() {
        let trace = simulate(&SimulationConfig::rl(5.0, 100.0, 10e-3)).unwrap();
        assert_relative_eq!(trace.duration, 5.0 * 10e-3 / 100.0, max_relative = 1e-12);
        let last = *trace.current.last().unwrap();
        assert!((last - 0.05).abs() / 0.05 < 0.01, "final i = {last}");
        assert!(trace.current.windows(2).all(|w| w[1] >= w[0]));
        assert!(trace.capacitor_voltage.iter().all(|&v| v == 0.0));
        assert!(trace.capacitor_energy.iter().all(|&e| e == 0.0));
    }

    #[test]
    fn lc_oscillates_around_supply() {
        let config = SimulationConfig::lc(5.0, 10e-3, 1e-6);
        let trace = simulate(&config).unwrap();
        let period = 2.0 * std::f64::consts::PI * (10e-3_f64 * 1e-6).sqrt();
        assert_relative_eq!(trace.duration, 3.0 * period, max_relative = 1e-12);
        let summary = trace.summary();
        // Lightly damped: the capacitor overshoots close to twice the step.
        assert!(summary.peak_capacitor_voltage > 9.0 && summary.peak_capacitor_voltage < 10.5);
        assert!(trace.current.iter().any(|&i| i < 0.0));
    }

    #[test]
    fn rlc_window_follows_damping() {
        // α = 2350 1/s, ω0 = 10 000 rad/s: underdamped, decay envelope wins.
        let under = SimulationConfig::series_rlc(5.0, 47.0, 10e-3, 1e-6);
        let a = damping_analysis(&under).unwrap().unwrap();
        assert_eq!(a.damping(), Damping::Underdamped);
        assert_relative_eq!(
            auto_duration(&under).unwrap(),
            (5.0 / 2350.0_f64).min(10.0 * 2.0 * std::f64::consts::PI / 10_000.0),
            max_relative = 1e-9
        );

        // α = 50 000 1/s > ω0: overdamped, 10/α.
        let over = SimulationConfig::series_rlc(5.0, 1000.0, 10e-3, 1e-6);
        assert_relative_eq!(auto_duration(&over).unwrap(), 10.0 / 50_000.0, max_relative = 1e-9);
        let trace = simulate(&over).unwrap();
        assert!(trace.capacitor_voltage.iter().all(|&v| v <= 5.0 + 1e-9));
    }

    #[test]
    fn characteristic_roots_match_classification() {
        let under = DampingAnalysis::new(47.0, 10e-3, 1e-6);
        let [s1, s2] = under.characteristic_roots();
        assert_relative_eq!(s1.re, -under.alpha, max_relative = 1e-12);
        assert_relative_eq!(s1.im, under.damped_frequency(), max_relative = 1e-9);
        assert_relative_eq!(s2.im, -s1.im);

        let over = DampingAnalysis::new(1000.0, 10e-3, 1e-6);
        let [s1, s2] = over.characteristic_roots();
        assert_relative_eq!(s1.im, 0.0);
        assert!(s1.re < 0.0 && s2.re < s1.re);
        assert_relative_eq!(over.damped_frequency(), 0.0);
    }

    #[test]
    fn degenerate_reactive_parts_use_defaults() {
        let trace = simulate(&SimulationConfig::rc(5.0, 1000.0, 0.0)).unwrap();
        assert_relative_eq!(trace.duration, 5.0 * 1000.0 * FALLBACK_CAPACITANCE, max_relative = 1e-12);

        let trace = simulate(&SimulationConfig::rl(5.0, 10.0, -1.0)).unwrap();
        assert_relative_eq!(trace.duration, 5.0 * FALLBACK_INDUCTANCE / 10.0, max_relative = 1e-12);
    }

    #[test]
    fn zero_resistance_is_rejected_for_first_order() {
        for config in [
            SimulationConfig::rc(5.0, 0.0, 1e-6),
            SimulationConfig::rl(5.0, 0.0, 1e-3),
        ] {
            assert!(matches!(
                simulate(&config),
                Err(SimulationError::Validation(ValidationError::NotPositive {
                    quantity: "resistance",
                    ..
                }))
            ));
        }
        assert!(simulate(&SimulationConfig::series_rlc(5.0, -1.0, 1e-3, 1e-6)).is_err());
    }

    #[test]
    fn lossless_rlc_is_allowed() {
        let trace = simulate(&SimulationConfig::series_rlc(5.0, 0.0, 10e-3, 1e-6)).unwrap();
        assert!(trace.duration.is_finite());
        assert!(trace.current.iter().all(|i| i.is_finite()));
    }

    #[test]
    fn duration_override_is_validated_and_used() {
        let config = SimulationConfig::rc(5.0, 1000.0, 1e-6).with_duration(1e-3);
        let trace = simulate(&config).unwrap();
        assert_relative_eq!(trace.duration, 1e-3);
        assert_relative_eq!(trace.time_at(500), 0.5e-3, max_relative = 1e-12);
        assert_relative_eq!(*trace.times().last().unwrap(), 0.999e-3, max_relative = 1e-9);

        let bad = SimulationConfig::rc(5.0, 1000.0, 1e-6).with_duration(0.0);
        assert!(simulate(&bad).is_err());
    }

    #[test]
    fn missing_component_is_reported() {
        let mut config = SimulationConfig::lc(5.0, 1e-3, 1e-6);
        config.capacitance = None;
        assert_eq!(
            simulate(&config),
            Err(SimulationError::MissingParameter("capacitance"))
        );
    }

    #[test]
    fn summary_reports_final_energy() {
        let trace = simulate(&SimulationConfig::rc(5.0, 1000.0, 1e-6)).unwrap();
        let summary = trace.summary();
        let last = trace.len() - 1;
        assert_relative_eq!(
            summary.final_total_energy,
            trace.capacitor_energy[last] + trace.inductor_energy[last]
        );
        assert!(summary.peak_capacitor_energy <= 0.5 * 1e-6 * 25.0);
        assert_relative_eq!(summary.peak_current, 5.0 / 1000.0, max_relative = 1e-2);
    }

    #[test]
    fn total_energy_sums_both_stores() {
        let trace = simulate(&SimulationConfig::series_rlc(10.0, 47.0, 10e-3, 1e-6)).unwrap();
        let total = trace.total_energy();
        assert_eq!(total.len(), trace.len());
        assert_eq!(total[0], 0.0);
        assert_relative_eq!(total[total.len() - 1], trace.summary().final_total_energy);
        for (idx, &e) in total.iter().enumerate() {
            assert_relative_eq!(e, trace.capacitor_energy[idx] + trace.inductor_energy[idx]);
        }
    }
}
