use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::{Parser, Subcommand, ValueEnum};
use ee_workbench::circuits::amplifier::{near_misses, AmplifierMode};
use ee_workbench::circuits::bands::{color_index, BandCode, InvalidBand};
use ee_workbench::circuits::dc::OhmsLaw;
use ee_workbench::circuits::series::snap_to_e24;
use ee_workbench::constants::NEAR_MISS_THRESHOLD;
use ee_workbench::errors::WorkbenchError;
use ee_workbench::io::{csv_path, write_history_csv, write_trace_csv};
use ee_workbench::plot::StripChart;
use ee_workbench::session::{Session, TransientRun};
use ee_workbench::simulation::{damping_analysis, SimulationConfig, Topology};
use ee_workbench::units::{EngValue, Engineering};

/// Electronics bench calculator
#[derive(Parser)]
#[command(name = "ee-workbench", version)]
struct Cli {
    /// Save the calculation log as CSV (`.csv` is appended when missing)
    #[arg(long, global = true)]
    history: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Nearest E24 value
    Snap {
        /// Target value, e.g. 4.8k
        value: EngValue,
    },
    /// Resistance -> nearest E24 -> 4-band colors
    Encode {
        /// Target resistance [default: workbench resistor]
        value: Option<EngValue>,
    },
    /// 4-band colors -> resistance (digits or color names)
    Decode {
        /// First digit band
        first: String,
        /// Second digit band
        second: String,
        /// Multiplier band (0-6)
        multiplier: String,
    },
    /// Ohm's law and power
    Ohm {
        #[command(subcommand)]
        relation: OhmCommand,
    },
    /// Unloaded voltage divider
    Divider {
        /// Input voltage [default: workbench voltage]
        #[arg(long)]
        vin: Option<EngValue>,
        /// Top resistor, snapped to E24
        #[arg(long)]
        r1: Option<EngValue>,
        /// Bottom resistor, snapped to E24
        #[arg(long)]
        r2: Option<EngValue>,
    },
    /// RC/RL/LC/RLC step response
    Transient {
        /// Circuit topology
        topology: TopologyArg,
        /// Step input voltage
        #[arg(long)]
        vs: Option<EngValue>,
        /// Series resistor, snapped to E24 (ignored for LC)
        #[arg(short = 'r', long)]
        resistance: Option<EngValue>,
        /// Inductance
        #[arg(short = 'l', long)]
        inductance: Option<EngValue>,
        /// Capacitance
        #[arg(short = 'c', long)]
        capacitance: Option<EngValue>,
        /// Simulated time [default: automatic window]
        #[arg(short = 't', long)]
        time: Option<EngValue>,
        /// Print strip charts of the waveforms
        #[arg(long)]
        plot: bool,
        /// Write every sample to a CSV file
        #[arg(long)]
        trace_csv: Option<String>,
    },
    /// LED series resistor (nearest E24)
    Led {
        /// Supply voltage
        #[arg(long)]
        vs: Option<EngValue>,
        /// LED forward voltage
        #[arg(long)]
        vf: Option<EngValue>,
        /// Target LED current
        #[arg(long)]
        current: Option<EngValue>,
    },
    /// Op-amp gain designer (E24 resistor pairs)
    Gain {
        /// Amplifier configuration
        mode: ModeArg,
        /// Target gain magnitude
        target: EngValue,
        /// Also list every pair within 2 % of the target
        #[arg(long)]
        near_misses: bool,
    },
}

#[derive(Subcommand)]
enum OhmCommand {
    /// V = I R
    Voltage {
        #[arg(short = 'i', long)]
        current: Option<EngValue>,
        #[arg(short = 'r', long)]
        resistance: Option<EngValue>,
    },
    /// I = V / R
    Current {
        #[arg(short = 'v', long)]
        voltage: Option<EngValue>,
        #[arg(short = 'r', long)]
        resistance: Option<EngValue>,
    },
    /// R = V / I
    Resistance {
        #[arg(short = 'v', long)]
        voltage: Option<EngValue>,
        #[arg(short = 'i', long)]
        current: Option<EngValue>,
    },
    /// P = V I
    Power {
        #[arg(short = 'v', long)]
        voltage: Option<EngValue>,
        #[arg(short = 'i', long)]
        current: Option<EngValue>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TopologyArg {
    Rc,
    Rl,
    Lc,
    Rlc,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Rc => Self::Rc,
            TopologyArg::Rl => Self::Rl,
            TopologyArg::Lc => Self::Lc,
            TopologyArg::Rlc => Self::SeriesRlc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    NonInverting,
    Inverting,
}

impl From<ModeArg> for AmplifierMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::NonInverting => Self::NonInverting,
            ModeArg::Inverting => Self::Inverting,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::default();
    let mut stdout = io::stdout().lock();

    if let Err(e) = run(cli.command, &mut session, &mut stdout) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Some(name) = cli.history {
        let path = csv_path(&name);
        let result = File::create(&path).and_then(|f| {
            let mut w = BufWriter::new(f);
            write_history_csv(&mut w, session.history().records())?;
            w.flush()
        });
        if let Err(e) = result {
            eprintln!("Error writing {}: {e}", path.display());
            std::process::exit(1);
        }
        println!("Saved to '{}'.", path.display());
    }
}

fn value(arg: Option<EngValue>) -> Option<f64> {
    arg.map(|v| v.0)
}

/// A band given as a number or a color name; range checks happen in `BandCode::new`.
fn band(text: &str) -> Result<u32, InvalidBand> {
    text.trim()
        .parse::<u32>()
        .ok()
        .or_else(|| color_index(text).map(u32::from))
        .ok_or_else(|| InvalidBand::Color(text.to_string()))
}

fn run(command: Command, session: &mut Session, out: &mut impl Write) -> Result<(), WorkbenchError> {
    match command {
        Command::Snap { value } => {
            let standard = snap_to_e24(value.0);
            writeln!(out, "Nearest Standard E24 Value: {}Ohms", Engineering(standard))?;
        }
        Command::Encode { value: target } => {
            let enc = session.encode_bands(value(target))?;
            let code = enc.code;
            writeln!(out, "Nearest E24 Standard Value: {}Ohms", Engineering(enc.standard))?;
            writeln!(out, "4-Band Code (5% tolerance / Gold):")?;
            let [c1, c2, c3, c4] = code.colors();
            writeln!(out, "  Band 1 (1st digit):  {} ({c1})", code.first())?;
            writeln!(out, "  Band 2 (2nd digit):  {} ({c2})", code.second())?;
            writeln!(out, "  Band 3 (Multiplier): x10^{} ({c3})", code.exponent())?;
            writeln!(out, "  Band 4 (Tolerance):  5% ({c4})")?;
        }
        Command::Decode {
            first,
            second,
            multiplier,
        } => {
            let code = BandCode::new(band(&first)?, band(&second)?, band(&multiplier)?)?;
            let r = session.decode_bands(code);
            writeln!(out, "Resistance = {r:.2} Ohms (+/- 5%) [{code}]")?;
        }
        Command::Ohm { relation } => {
            let wb = session.workbench;
            let law = match relation {
                OhmCommand::Voltage {
                    current,
                    resistance,
                } => OhmsLaw::Voltage {
                    current: value(current).unwrap_or(wb.current),
                    resistance: session.standard_resistor(value(resistance))?,
                },
                OhmCommand::Current {
                    voltage,
                    resistance,
                } => OhmsLaw::Current {
                    voltage: value(voltage).unwrap_or(wb.voltage),
                    resistance: session.standard_resistor(value(resistance))?,
                },
                OhmCommand::Resistance { voltage, current } => OhmsLaw::Resistance {
                    voltage: value(voltage).unwrap_or(wb.voltage),
                    current: value(current).unwrap_or(wb.current),
                },
                OhmCommand::Power { voltage, current } => OhmsLaw::Power {
                    voltage: value(voltage).unwrap_or(wb.voltage),
                    current: value(current).unwrap_or(wb.current),
                },
            };
            let result = session.ohms_law(law)?;
            writeln!(out, "Result: {} {}", Engineering(result), law.unit())?;
        }
        Command::Divider { vin, r1, r2 } => {
            let vin = value(vin).unwrap_or(session.workbench.voltage);
            let r1 = session.standard_resistor(value(r1))?;
            let r2 = session.standard_resistor(value(r2))?;
            let vout = session.divider(vin, r1, r2)?;
            writeln!(
                out,
                "R1 = {}Ohms, R2 = {}Ohms -> Vout = {vout:.4} V",
                Engineering(r1),
                Engineering(r2)
            )?;
        }
        Command::Transient {
            topology,
            vs,
            resistance,
            inductance,
            capacitance,
            time,
            plot,
            trace_csv,
        } => {
            let topology = Topology::from(topology);
            let wb = session.workbench;
            let vs = value(vs).unwrap_or(wb.voltage);
            let l = value(inductance).unwrap_or(wb.inductor);
            let c = value(capacitance).unwrap_or(wb.capacitor);
            let mut config = match topology {
                Topology::Rc => SimulationConfig::rc(vs, session.standard_resistor(value(resistance))?, c),
                Topology::Rl => SimulationConfig::rl(vs, session.standard_resistor(value(resistance))?, l),
                Topology::Lc => {
                    writeln!(out, "[Info] LC: Using 0.1 Ohm internal resistance.")?;
                    SimulationConfig::lc(vs, l, c)
                }
                Topology::SeriesRlc => {
                    SimulationConfig::series_rlc(vs, session.standard_resistor(value(resistance))?, l, c)
                }
            };
            if let Some(time) = value(time) {
                config = config.with_duration(time);
            }
            session.workbench.inductor = l;
            session.workbench.capacitor = c;

            if let Some(analysis) = damping_analysis(&config)? {
                writeln!(
                    out,
                    "alpha = {:.4e} 1/s, omega0 = {:.4e} rad/s ({:?})",
                    analysis.alpha,
                    analysis.omega0,
                    analysis.damping()
                )?;
            }
            let run = session.transient(config)?;
            report_transient(out, &run, plot)?;
            if let Some(name) = trace_csv {
                let path = csv_path(&name);
                let mut w = BufWriter::new(File::create(&path)?);
                write_trace_csv(&mut w, &run.trace)?;
                w.flush()?;
                writeln!(out, "Trace saved to '{}'.", path.display())?;
            }
        }
        Command::Led { vs, vf, current } => {
            let design = session.led(value(vs), value(vf), value(current))?;
            writeln!(out, "Theoretical Ideal Resistor: {}Ohms", Engineering(design.ideal_resistance))?;
            writeln!(out, "Nearest Standard E24 Value: {}Ohms  <-- Recommended", Engineering(design.resistance))?;
            writeln!(out, "Actual Current with E24 R : {}A", Engineering(design.current))?;
            writeln!(out, "Resistor Dissipation      : {}W", Engineering(design.resistor_power))?;
        }
        Command::Gain {
            mode,
            target,
            near_misses: list,
        } => {
            let mode = AmplifierMode::from(mode);
            if list {
                writeln!(out, "| {:<9} | {:<10} | {:<10} | {:<8} |", "Fix R1", "Calc R2", "Std R2", "Error %")?;
                for d in near_misses(mode, target.0, NEAR_MISS_THRESHOLD)? {
                    writeln!(
                        out,
                        "| {:<9} | {:<10.2} | {:<10} | {:>7.2}% |",
                        Engineering(d.r1).to_string(),
                        d.ideal_r2,
                        Engineering(d.r2).to_string(),
                        d.error_percent()
                    )?;
                }
            }
            let design = session.gain(mode, target.0)?;
            writeln!(out, "Best Recommendation:")?;
            writeln!(out, "    R1 = {}Ohms", Engineering(design.r1))?;
            writeln!(out, "    R2 = {}Ohms", Engineering(design.r2))?;
            writeln!(
                out,
                "    Actual Gain = {:.4} (Error: {:.3}%)",
                design.actual_gain,
                design.error_percent()
            )?;
        }
    }
    Ok(())
}

fn report_transient(out: &mut impl Write, run: &TransientRun, plot: bool) -> io::Result<()> {
    let trace = &run.trace;
    let topology = run.config.topology;
    writeln!(
        out,
        "Simulated {} steps over {}s",
        trace.len(),
        Engineering(trace.duration)
    )?;
    if plot {
        let chart = StripChart::default();
        chart.render(&mut *out, &trace.current, trace.duration, "Loop Current I(t)", "A")?;
        if topology.has_capacitor() {
            chart.render(&mut *out, &trace.capacitor_voltage, trace.duration, "Capacitor Voltage Vc(t)", "V")?;
            chart.render(&mut *out, &trace.capacitor_energy, trace.duration, "Stored Energy: Capacitor", "J")?;
        }
        if topology.has_inductor() {
            chart.render(&mut *out, &trace.inductor_energy, trace.duration, "Stored Energy: Inductor", "J")?;
        }
    }
    let s = &run.summary;
    writeln!(out, "Peak |Vc| = {:.4} V, Peak |I| = {:.4e} A", s.peak_capacitor_voltage, s.peak_current)?;
    writeln!(
        out,
        "Peak Ec = {:.4e} J, Peak El = {:.4e} J",
        s.peak_capacitor_energy, s.peak_inductor_energy
    )?;
    writeln!(out, "Final Total Energy: {:.4e} J", s.final_total_energy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_accepts_digits_and_colors() {
        assert_eq!(band("4"), Ok(4));
        assert_eq!(band(" violet "), Ok(7));
        assert_eq!(band("Pink"), Err(InvalidBand::Color("Pink".into())));
    }

    #[test]
    fn oversized_numeric_band_is_a_range_error() {
        let first = band("300").unwrap();
        assert_eq!(BandCode::new(first, 0, 0), Err(InvalidBand::Digit(300)));
        let exponent = band("1000").unwrap();
        assert_eq!(BandCode::new(1, 0, exponent), Err(InvalidBand::Exponent(1000)));
    }
}
