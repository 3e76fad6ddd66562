use ee_workbench::circuits::component::{Capacitor, Inductor};
use ee_workbench::circuits::series::snap_to_e24;
use ee_workbench::constants::angular_frequency;
use ee_workbench::math::logspace;
use ee_workbench::simulation::{damping_analysis, simulate, SimulationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Series RLC step response across the damping regimes.
    let inductor = Inductor::new(10e-3); // 10 mH
    let capacitor = Capacitor::new(1e-6); // 1 µF
    let l = inductor.inductance();
    let c = capacitor.capacitance();

    let f0 = 1.0 / (2.0 * std::f64::consts::PI * (l * c).sqrt());
    println!("f0 = {f0:.1} Hz, omega0 = {:.1} rad/s", angular_frequency(f0));

    // Critical damping sits at R = 2 sqrt(L/C) = 200 Ω; sweep a decade either side.
    println!("R(ohm), damping, window(s), peak_vc(V), final_energy(J)");
    for target in logspace(20.0, 2000.0, 7) {
        let r = snap_to_e24(target);
        let config = SimulationConfig::series_rlc(10.0, r, l, c);
        let analysis = damping_analysis(&config)?.ok_or("series RLC always has a damping analysis")?;
        let trace = simulate(&config)?;
        let summary = trace.summary();
        println!(
            "{r:>7.1}, {:?}, {:.3e}, {:.4}, {:.4e}",
            analysis.damping(),
            trace.duration,
            summary.peak_capacitor_voltage,
            summary.final_total_energy,
        );
    }
    Ok(())
}
