use gravity_sim::{Entity, Real, Simulation, SimulationConfig};

/// Reference configuration with a short run.
fn reference(total_steps: usize, parallel: bool) -> Simulation {
    let config = SimulationConfig {
        total_steps,
        parallel,
        ..SimulationConfig::default()
    };
    Simulation::with_config(config).unwrap()
}

fn run_to_string(sim: &mut Simulation) -> String {
    let mut out = Vec::new();
    sim.run(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn assert_close(actual: &Real, expected: &str, tolerance: &str) {
    let expected = Real::parse(expected).unwrap();
    let diff = (actual - &expected).abs();
    assert!(diff < Real::parse(tolerance).unwrap(), "expected {expected}, got {actual}");
}

// ==================================================================================
// Single step of the reference configuration
// ==================================================================================

#[test]
fn first_step_matches_analytic_solution() {
    let mut sim = reference(1, false);
    sim.step().unwrap();

    let first = &sim.entities[0];
    assert_close(&first.x, "-0.99999999999999594355483964370458068100034924589488", "1e-45");
    assert_close(&first.y, "1.1939350801781477096594998253770525582561055294044e-15", "1e-60");
    assert_close(&first.v_x, "4.0564451603562954193189996507541051165122110588088e-13", "1e-58");
    assert_close(&first.v_y, "1.1939350801781477096594998253770525582561055294044e-13", "1e-58");

    let second = &sim.entities[1];
    assert_close(&second.x, "0.999999999999998331425", "1e-45");
    assert_close(&second.y, "1.334860e-14", "1e-60");

    let third = &sim.entities[2];
    assert_close(&third.x, "0.99999999999999880606491982185229034050017462294744", "1e-45");
    assert_close(&third.y, "0.99999999999999272873245991092614517025008731147372", "1e-45");
}

#[test]
fn first_step_report_line() {
    let mut sim = reference(1, false);
    sim.step().unwrap();
    assert_eq!(
        sim.report(),
        "p-1,1.19394e-15, v4.2285e-13∠16.4008  p1,1.33486e-14, v1.34525e-12∠97.125  p1,1, v7.36864e-13∠-99.3247"
    );
}

// ==================================================================================
// Conservation
// ==================================================================================

#[test]
fn momentum_stays_zero() {
    let tolerance = Real::parse("1e-45").unwrap();
    let mut sim = reference(200, false);
    for _ in 0..200 {
        sim.step().unwrap();
        let (p_x, p_y) = sim.total_momentum();
        assert!(p_x.abs() < tolerance, "p_x = {p_x}");
        assert!(p_y.abs() < tolerance, "p_y = {p_y}");
    }
}

#[test]
fn momentum_is_conserved_when_nonzero() {
    let mut drifting = Entity::new(Real::from(3), Real::from(-2), Real::from(1)).unwrap();
    drifting.v_x = Real::from(1);
    let still = Entity::new(Real::from(5), Real::from(4), Real::from(-1)).unwrap();
    let config = SimulationConfig {
        gravitational_constant: Real::one(),
        total_steps: 50,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::with_entities(vec![drifting, still], config).unwrap();

    for _ in 0..50 {
        sim.step().unwrap();
    }
    let (p_x, p_y) = sim.total_momentum();
    assert_close(&p_x, "3", "1e-45");
    assert_close(&p_y, "0", "1e-45");
}

// ==================================================================================
// Determinism
// ==================================================================================

#[test]
fn runs_are_reproducible() {
    let first = run_to_string(&mut reference(150, false));
    let second = run_to_string(&mut reference(150, false));
    assert_eq!(first, second);
}

#[test]
fn parallel_forces_match_sequential() {
    let mut sequential = reference(40, false);
    let mut parallel = reference(40, true);
    for _ in 0..40 {
        sequential.step().unwrap();
        parallel.step().unwrap();
    }
    assert_eq!(sequential.entities, parallel.entities);
}

// ==================================================================================
// Reports
// ==================================================================================

#[test]
fn report_cadence() {
    let mut sim = reference(300, false);
    let text = run_to_string(&mut sim);
    // initial, steps 0, 3, ..., 297, final
    assert_eq!(text.lines().count(), 102);
    assert_eq!(text.lines().count(), sim.config.schedule().line_count());
    assert!(text.lines().all(|line| line.matches("  ").count() == 2));
}

#[test]
fn last_two_reports_coincide_when_the_final_step_is_scheduled() {
    let mut sim = reference(201, false);
    let text = run_to_string(&mut sim);
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2 + 101);
    assert_eq!(lines[lines.len() - 1], lines[lines.len() - 2]);
}
