//! Step-response behavior of both Euler schemes on a single thermal mass.
//!
//! The fixture is a capacitive node (C = 1000 J/K) fed through a boundary
//! branch (G = 10 W/K) carrying a temperature source. The reduced model is
//! scalar with As = -G/C = -0.01 s⁻¹, so the spectral step bound is 200 s
//! and the time constant is 100 s.

use nalgebra::DVector;
use tn_core::units::{jpk, wpk};
use tn_model::{reduce, Spectrum, SourceLayout, ThermalDae};
use tn_network::{Network, NetworkBuilder};
use tn_sim::{run_scenarios, run_sim, InitialState, Scheme, SimOptions};

fn single_mass_network() -> Network {
    let mut builder = NetworkBuilder::new();
    let mass = builder.add_capacitive_node("mass", jpk(1000.0));
    builder.add_boundary_branch("supply", mass, wpk(10.0));
    builder.build().unwrap()
}

fn single_mass_model() -> (ThermalDae, tn_model::StateSpace) {
    let net = single_mass_network();
    let dae = ThermalDae::assemble(&net).unwrap();
    let layout = SourceLayout::builder(&net)
        .temperature_source(net.branches()[0].id)
        .output(net.nodes()[0].id)
        .build()
        .unwrap();
    let ss = reduce(&dae, &layout).unwrap();
    (dae, ss)
}

fn step_input(value: f64, len: usize) -> Vec<DVector<f64>> {
    vec![DVector::from_element(1, value); len]
}

#[test]
fn spectral_bound_matches_hand_calculation() {
    let (_, ss) = single_mass_model();
    let spectrum = Spectrum::of(&ss);
    assert!(spectrum.is_dissipative());
    assert!((spectrum.max_explicit_step().unwrap() - 200.0).abs() < 1e-9);
    assert!((spectrum.time_constants()[0] - 100.0).abs() < 1e-9);
}

#[test]
fn explicit_converges_below_the_bound() {
    let (_, ss) = single_mass_model();
    let opts = SimOptions {
        scheme: Scheme::Explicit,
        dt: 1.0,
        duration: 1000.0,
        initial_state: InitialState::Zero,
    };
    let rec = run_sim(&ss, &step_input(10.0, 1000), &opts).unwrap();
    // 10 time constants: the response has settled to the source value.
    let y_final = rec.final_output().unwrap()[0];
    assert!((y_final - 10.0).abs() < 0.01, "final output {y_final}");
    // Monotonic rise, never overshooting the source temperature.
    for w in rec.outputs.windows(2) {
        assert!(w[1][0] >= w[0][0] - 1e-12);
        assert!(w[1][0] <= 10.0 + 1e-9);
    }
}

#[test]
fn explicit_diverges_above_the_bound() {
    let (_, ss) = single_mass_model();
    // dt = 250 s exceeds the 200 s bound: |1 + dt*As| = 1.5 > 1.
    let opts = SimOptions {
        scheme: Scheme::Explicit,
        dt: 250.0,
        duration: 25_000.0,
        initial_state: InitialState::Zero,
    };
    let rec = run_sim(&ss, &step_input(10.0, 100), &opts).unwrap();
    let mid = rec.outputs[50][0];
    let last = rec.final_output().unwrap()[0];
    assert!(mid.abs() > 100.0, "expected growth by step 50, got {mid}");
    assert!(last.abs() > mid.abs());
}

#[test]
fn implicit_stays_bounded_at_huge_steps() {
    let (_, ss) = single_mass_model();
    // 500x the explicit bound; backward Euler still settles to the source.
    let opts = SimOptions {
        scheme: Scheme::Implicit,
        dt: 1.0e5,
        duration: 1.0e6,
        initial_state: InitialState::Zero,
    };
    let rec = run_sim(&ss, &step_input(10.0, 10), &opts).unwrap();
    for y in &rec.outputs {
        assert!(y[0].abs() <= 10.0 + 1e-9);
    }
    assert!((rec.final_output().unwrap()[0] - 10.0).abs() < 1e-6);
}

#[test]
fn schemes_agree_at_small_steps() {
    let (_, ss) = single_mass_model();
    let inputs = step_input(10.0, 2000);
    let base = SimOptions {
        scheme: Scheme::Explicit,
        dt: 0.5,
        duration: 1000.0,
        initial_state: InitialState::Zero,
    };
    let explicit = run_sim(&ss, &inputs, &base).unwrap();
    let implicit = run_sim(
        &ss,
        &inputs,
        &SimOptions {
            scheme: Scheme::Implicit,
            ..base
        },
    )
    .unwrap();
    // First-order schemes bracket the exact exponential; at dt << tau they
    // agree to O(dt/tau).
    for (e, i) in explicit.outputs.iter().zip(&implicit.outputs) {
        assert!((e[0] - i[0]).abs() < 0.05);
    }
}

#[test]
fn steady_state_seed_holds_flat_line() {
    let (_, ss) = single_mass_model();
    let opts = SimOptions {
        scheme: Scheme::Explicit,
        dt: 10.0,
        duration: 500.0,
        initial_state: InitialState::SteadyState,
    };
    let rec = run_sim(&ss, &step_input(25.0, 50), &opts).unwrap();
    for y in &rec.outputs {
        assert!((y[0] - 25.0).abs() < 1e-9);
    }
}

#[test]
fn parallel_scenarios_match_serial_runs() {
    let (_, ss) = single_mass_model();
    let opts = SimOptions {
        scheme: Scheme::Explicit,
        dt: 10.0,
        duration: 2000.0,
        initial_state: InitialState::Zero,
    };
    let scenarios = vec![step_input(10.0, 200), step_input(-5.0, 200)];
    let parallel = run_scenarios(&ss, &scenarios, &opts).unwrap();
    for (inputs, rec) in scenarios.iter().zip(&parallel) {
        let serial = run_sim(&ss, inputs, &opts).unwrap();
        assert_eq!(serial.len(), rec.len());
        for k in 0..serial.len() {
            assert_eq!(serial.outputs[k][0], rec.outputs[k][0]);
        }
    }
}
