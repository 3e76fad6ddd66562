//! Plain CSV export of calculation records and transient traces.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::history::CalcRecord;
use crate::simulation::SimulationTrace;

/// Appends `.csv` to `name` unless it already ends with it.
#[must_use]
pub fn csv_path(name: &str) -> PathBuf {
    if name.ends_with(".csv") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.csv"))
    }
}

/// Quotes a field containing separators, quotes or line breaks.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Writes records as `Tool Name,Inputs,Results` rows.
pub fn write_history_csv<W: Write>(mut w: W, records: &[CalcRecord]) -> io::Result<()> {
    writeln!(w, "Tool Name,Inputs,Results")?;
    for record in records {
        writeln!(
            w,
            "{},{},{}",
            escape(&record.tool),
            escape(&record.inputs),
            escape(&record.result)
        )?;
    }
    Ok(())
}

/// Writes every sample of a trace with its time stamp.
pub fn write_trace_csv<W: Write>(mut w: W, trace: &SimulationTrace) -> io::Result<()> {
    writeln!(w, "time,capacitor_voltage,current,capacitor_energy,inductor_energy")?;
    for (idx, time) in trace.times().iter().enumerate() {
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            time,
            trace.capacitor_voltage[idx],
            trace.current[idx],
            trace.capacitor_energy[idx],
            trace.inductor_energy[idx]
        )?;
    }
    Ok(())
}
