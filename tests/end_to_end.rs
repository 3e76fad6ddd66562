use approx::assert_relative_eq;
use ee_workbench::prelude::*;

#[test]
fn bench_session_round_trip() {
    let mut session = Session::default();

    let enc = session.encode_bands(Some(4835.0)).unwrap();
    assert_relative_eq!(enc.standard, 4700.0, max_relative = 1e-12);
    assert_eq!(
        (enc.code.first(), enc.code.second(), enc.code.exponent()),
        (4, 7, 2)
    );
    assert_relative_eq!(session.decode_bands(enc.code), 4700.0, max_relative = 1e-12);

    let design = session.gain(AmplifierMode::NonInverting, 11.0).unwrap();
    assert_relative_eq!(design.r1, 1000.0, max_relative = 1e-12);
    assert_relative_eq!(design.r2, 10_000.0, max_relative = 1e-12);
    assert!(design.error < 1e-9);

    let mut csv = Vec::new();
    write_history_csv(&mut csv, session.history().records()).unwrap();
    let text = String::from_utf8(csv).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Tool Name,Inputs,Results");
    assert!(lines[1].starts_with("4-Band Encode,"));
    assert!(lines[3].starts_with("Op-Amp Designer,"));
}

#[test]
fn rc_charges_to_supply_with_non_negative_energy() {
    let trace = simulate(&SimulationConfig::rc(5.0, 1000.0, 1e-6)).unwrap();
    assert_eq!(trace.len(), SIMULATION_STEPS);
    assert_relative_eq!(trace.duration, 5e-3, max_relative = 1e-12);

    let last = trace.capacitor_voltage[trace.len() - 1];
    assert!(last > 4.9 && last < 5.0);
    assert!(trace.capacitor_energy.iter().all(|&e| e >= 0.0));
    assert!(trace.inductor_energy.iter().all(|&e| e == 0.0));
}

#[test]
fn damping_regimes_follow_resistance() {
    let l = 10e-3;
    let c = 1e-6;
    let regime = |r: f64| {
        damping_analysis(&SimulationConfig::series_rlc(10.0, r, l, c))
            .unwrap()
            .map(|a| a.damping())
    };
    assert_eq!(regime(20.0), Some(Damping::Underdamped));
    assert_eq!(regime(2000.0), Some(Damping::Overdamped));
    assert_eq!(damping_analysis(&SimulationConfig::rc(1.0, 1.0, 1.0)).unwrap(), None);
}

#[test]
fn engineering_values_feed_the_snapper() {
    let r: EngValue = "4.8k".parse().unwrap();
    let standard = snap_to_e24(r.0);
    assert_relative_eq!(standard, 4700.0, max_relative = 1e-12);
    assert_eq!(Engineering(standard).to_string(), "4.70k");
}
