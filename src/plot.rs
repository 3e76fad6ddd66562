//! Vertical strip-chart rendering of waveforms as text.
//!
//! Each row shows the sample time, a bar whose `O` marks the value between the
//! trace minimum and maximum, and the exact value:
//!
//! ```text
//!    0.00 ms | O                                        |   0.0000 V
//!    0.20 ms | ------O                                  |   0.9063 V
//! ```

use std::io::{self, Write};

use crate::math::Scalar;

/// Layout of a strip chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripChart {
    /// Displayed rows; the trace is downsampled to fit.
    pub rows: usize,
    /// Characters in the bar area.
    pub width: usize,
}

impl Default for StripChart {
    fn default() -> Self {
        Self { rows: 25, width: 40 }
    }
}

impl StripChart {
    /// Bar column of `value` for a trace spanning `min..min + range`.
    #[must_use]
    pub fn position(&self, value: Scalar, min: Scalar, range: Scalar) -> usize {
        let pos = ((value - min) / range * self.width as Scalar) as isize;
        pos.clamp(0, self.width.saturating_sub(1) as isize) as usize
    }

    /// Renders `data`, sampled uniformly over `duration` seconds.
    pub fn render<W: Write>(
        &self,
        mut w: W,
        data: &[Scalar],
        duration: Scalar,
        title: &str,
        unit: &str,
    ) -> io::Result<()> {
        let Some(&first) = data.first() else {
            return writeln!(w, "\n=== {title} === (no samples)");
        };
        let (min, max) = data
            .iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        let mut range = max - min;
        if range.abs() < 1e-9 {
            range = 1.0;
        }
        let stride = (data.len() / self.rows.max(1)).max(1);
        let rule = format!("-----------|-{}-|-----------------", "-".repeat(self.width));

        writeln!(w, "\n=== {title} ===")?;
        writeln!(
            w,
            " {:<9} | {:<width$} | {:<15}",
            "Time",
            "Waveform (Min->Max)",
            "Exact Value",
            width = self.width
        )?;
        writeln!(w, "{rule}")?;
        for (idx, &value) in data.iter().enumerate().step_by(stride) {
            let t = idx as Scalar / data.len() as Scalar * duration;
            let pos = self.position(value, min, range);
            let bar: String = (0..self.width)
                .map(|k| match k.cmp(&pos) {
                    std::cmp::Ordering::Less => '-',
                    std::cmp::Ordering::Equal => 'O',
                    std::cmp::Ordering::Greater => ' ',
                })
                .collect();
            write!(w, " {:6.2} ms | {bar}", t * 1000.0)?;
            if value.abs() < 1e-3 && value != 0.0 {
                writeln!(w, " | {value:.3e} {unit}")?;
            } else {
                writeln!(w, " | {value:8.4} {unit}")?;
            }
        }
        writeln!(w, "{rule}")?;
        writeln!(w, " Range: [{min:.4e}] to [{max:.4e}] {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;

    #[test]
    fn position_is_clamped_to_bar() {
        let chart = StripChart::default();
        assert_eq!(chart.position(0.0, 0.0, 1.0), 0);
        assert_eq!(chart.position(0.5, 0.0, 1.0), 20);
        assert_eq!(chart.position(1.0, 0.0, 1.0), 39);
        assert_eq!(chart.position(-3.0, 0.0, 1.0), 0);
    }

    #[test]
    fn renders_downsampled_rows() {
        let data = linspace(0.0, 5.0, 1000);
        let mut out = Vec::new();
        StripChart::default()
            .render(&mut out, &data, 5e-3, "Capacitor Voltage Vc(t)", "V")
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<_> = text.lines().filter(|l| l.contains(" ms | ")).collect();
        assert_eq!(rows.len(), 25);
        assert!(rows[0].starts_with("   0.00 ms | O"));
        assert!(text.contains("=== Capacitor Voltage Vc(t) ==="));
        assert!(text.trim_end().ends_with("V"));
    }

    #[test]
    fn flat_trace_does_not_divide_by_zero() {
        let data = vec![0.0; 100];
        let mut out = Vec::new();
        StripChart::default().render(&mut out, &data, 1.0, "Flat", "J").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().any(|l| l.contains("| O")));
    }
}
