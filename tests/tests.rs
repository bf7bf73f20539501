use gravwell::configuration::config::{ConfigError, ScenarioConfig};
use gravwell::simulation::forces::{tangential_kick, CentralForce, InverseSquareGravity};
use gravwell::simulation::params::Parameters;
use gravwell::simulation::session::{PlanarSession, Session};
use gravwell::simulation::states::NVec2;
use gravwell::simulation::trail::Trail;
use gravwell::simulation::world::{PhysicsWorld, PlanarWorld};

/// Default physics parameters for tests, matching the stock scenario
pub fn test_parameters() -> Parameters {
    Parameters {
        g: 1.0,
        eps2: 0.0,
        scale: 30.0,
        removal_radius: 2.167,
        trail_capacity: 2000,
        attractor_mass: 1.0,
        attractor_position: NVec2::zeros(),
        attractor_radius: 50.0,
        dt: 1.0 / 60.0,
        velocity_iterations: 6,
        position_iterations: 2,
        spawn_radius: 15.0,
        spawn_density: 0.5,
        spawn_force: 5.0,
    }
}

/// Parameters with a removal radius that maps to exact screen coordinates
/// (2.0 physics units = 60 screen units at scale 30)
pub fn round_threshold_parameters() -> Parameters {
    let mut p = test_parameters();
    p.removal_radius = 2.0;
    p
}

/// Build a session over a fresh world
pub fn test_session(parameters: Parameters) -> PlanarSession {
    Session::new(PlanarWorld::new(), parameters)
}

/// Press and release in one motion, so the next press spawns again
fn click(session: &mut PlanarSession, x: f64, y: f64) -> gravwell::BodyHandle {
    let handle = session
        .handle_press(NVec2::new(x, y))
        .expect("latch should be disarmed");
    session.handle_release();
    handle
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_points_toward_attractor() {
    let law = InverseSquareGravity {
        g: 1.0,
        attractor_mass: 1.0,
        eps2: 0.0,
    };

    let offset = NVec2::new(2.0, 1.0); // body relative to the attractor
    let f = law.force(offset, 1.0);

    assert!(f.dot(&offset) < 0.0, "Force is not attractive: {:?}", f);
}

#[test]
fn gravity_inverse_square_law() {
    let law = InverseSquareGravity {
        g: 1.0,
        attractor_mass: 1.0,
        eps2: 0.0,
    };

    let near = law.force(NVec2::new(1.0, 0.0), 1.0).norm();
    let far = law.force(NVec2::new(2.0, 0.0), 1.0).norm();

    let ratio = near / far;
    assert!((ratio - 4.0).abs() < 1e-9, "Expected ~4x, got {}", ratio);
}

#[test]
fn gravity_magnitude_matches_formula() {
    let law = InverseSquareGravity {
        g: 1.0,
        attractor_mass: 1.0,
        eps2: 0.0,
    };

    // G * m * M / d^2 = 1 * 2 * 1 / 4
    let f = law.force(NVec2::new(2.0, 0.0), 2.0);
    assert!((f.x + 0.5).abs() < 1e-12, "Wrong magnitude: {:?}", f);
    assert!(f.y.abs() < 1e-12);
}

#[test]
fn gravity_zero_offset_yields_zero_force() {
    let law = InverseSquareGravity {
        g: 1.0,
        attractor_mass: 1.0,
        eps2: 0.0,
    };

    let f = law.force(NVec2::zeros(), 1.0);
    assert_eq!(f, NVec2::zeros());
}

#[test]
fn gravity_softening_prevents_blowup() {
    let law = InverseSquareGravity {
        g: 1.0,
        attractor_mass: 1.0,
        eps2: 0.1,
    };

    let f = law.force(NVec2::new(1e-9, 0.0), 1.0);
    assert!(f.norm() < 1e9, "Softening failed; force too large");
}

#[test]
fn kick_is_perpendicular_with_requested_magnitude() {
    let toward = NVec2::new(3.0, -4.0);
    let kick = tangential_kick(toward, 5.0);

    assert!(kick.dot(&toward).abs() < 1e-12, "Kick not tangential");
    assert!((kick.norm() - 5.0).abs() < 1e-12);
}

#[test]
fn kick_from_zero_direction_is_zero() {
    assert_eq!(tangential_kick(NVec2::zeros(), 5.0), NVec2::zeros());
}

// ==================================================================================
// Physics world tests
// ==================================================================================

#[test]
fn dynamic_mass_is_density_times_area() {
    let mut world = PlanarWorld::new();
    let handle = world.create_dynamic_body(NVec2::zeros(), 0.5, 0.5);

    // 0.5 * pi * 0.5^2
    let expected = std::f64::consts::PI / 8.0;
    let mass = world.mass(handle).unwrap();
    assert!((mass - expected).abs() < 1e-12, "mass = {}", mass);
}

#[test]
fn applied_force_moves_body_on_next_step() {
    let mut world = PlanarWorld::new();
    let handle = world.create_dynamic_body(NVec2::zeros(), 0.5, 0.5);
    let mass = world.mass(handle).unwrap();

    world.apply_force(handle, NVec2::new(1.0, 0.0));
    world.step(1.0, 6, 2);

    // Semi-implicit Euler: v = F dt / m, x = v dt
    let pos = world.position(handle).unwrap();
    assert!((pos.x - 1.0 / mass).abs() < 1e-12, "pos = {:?}", pos);
    assert!(pos.y.abs() < 1e-12);

    // Force was consumed; a further step drifts at constant velocity
    world.step(1.0, 6, 2);
    let pos2 = world.position(handle).unwrap();
    assert!((pos2.x - 2.0 / mass).abs() < 1e-12, "pos2 = {:?}", pos2);
}

#[test]
fn static_body_never_moves_and_reports_zero_mass() {
    let mut world = PlanarWorld::new();
    let star = world.create_static_body(NVec2::new(1.0, 2.0), 1.0);

    world.apply_force(star, NVec2::new(100.0, 100.0));
    world.step(1.0, 6, 2);

    assert_eq!(world.position(star).unwrap(), NVec2::new(1.0, 2.0));
    assert_eq!(world.mass(star).unwrap(), 0.0);
}

#[test]
fn destroyed_handle_goes_stale_even_after_slot_reuse() {
    let mut world = PlanarWorld::new();
    let first = world.create_dynamic_body(NVec2::zeros(), 0.5, 0.5);

    world.destroy_body(first);
    assert_eq!(world.position(first), None);
    assert_eq!(world.body_count(), 0);

    // The slot is reused, the old handle must not resolve to the new body
    let second = world.create_dynamic_body(NVec2::new(9.0, 9.0), 0.5, 0.5);
    assert_eq!(world.position(first), None);
    assert!(world.position(second).is_some());
    assert_eq!(world.body_count(), 1);

    // Destroying a stale handle is a no-op
    world.destroy_body(first);
    assert_eq!(world.body_count(), 1);
}

// ==================================================================================
// Session tests: spawning and the latch
// ==================================================================================

#[test]
fn spawn_keeps_collections_aligned() {
    let mut session = test_session(test_parameters());
    assert_eq!(session.satellite_count(), 0);
    assert_eq!(session.world.body_count(), 1); // the attractor

    click(&mut session, 100.0, 0.0);
    click(&mut session, 0.0, 200.0);
    click(&mut session, -150.0, 80.0);

    assert_eq!(session.satellite_count(), 3);
    assert_eq!(session.world.body_count(), 4);
}

#[test]
fn held_button_spawns_exactly_one_body() {
    let mut session = test_session(test_parameters());

    assert!(session.handle_press(NVec2::new(100.0, 0.0)).is_some());
    // Still held on following frames
    assert!(session.handle_press(NVec2::new(120.0, 0.0)).is_none());
    assert!(session.handle_press(NVec2::new(140.0, 0.0)).is_none());
    assert_eq!(session.satellite_count(), 1);

    session.handle_release();
    assert!(session.handle_press(NVec2::new(160.0, 0.0)).is_some());
    assert_eq!(session.satellite_count(), 2);
}

#[test]
fn spawn_at_attractor_position_is_harmless() {
    let mut session = test_session(test_parameters());
    let handle = click(&mut session, 0.0, 0.0);

    assert_eq!(session.distance_to_attractor(handle), Some(0.0));

    // Zero-length direction: no kick, no force, removed by the first sweep
    session.tick();
    assert_eq!(session.satellite_count(), 0);
    assert_eq!(session.world.body_count(), 1);
}

// ==================================================================================
// Session tests: removal sweep
// ==================================================================================

#[test]
fn body_inside_threshold_is_removed_on_first_sweep() {
    let mut session = test_session(round_threshold_parameters());

    // 45 screen units = 1.5 physics units, strictly inside 2.0
    let handle = click(&mut session, 45.0, 0.0);
    assert_eq!(session.distance_to_attractor(handle), Some(1.5));

    session.tick();
    assert_eq!(session.satellite_count(), 0);
    assert_eq!(session.world.body_count(), 1);
    assert_eq!(session.world.position(handle), None);
}

#[test]
fn body_outside_threshold_stays() {
    let mut session = test_session(round_threshold_parameters());

    let handle = click(&mut session, 90.0, 0.0); // 3.0 physics units
    session.tick();

    assert_eq!(session.satellite_count(), 1);
    assert!(session.world.position(handle).is_some());
}

#[test]
fn body_at_exact_threshold_survives_one_sweep_then_falls_in() {
    let mut session = test_session(round_threshold_parameters());

    // 60 screen units = exactly 2.0 physics units; the check is strict
    let handle = click(&mut session, 60.0, 0.0);

    session.tick();
    assert_eq!(
        session.satellite_count(),
        1,
        "strictly-less check must not remove a body at the exact threshold"
    );

    // Gravity pulls it inside; the following sweeps collect it
    let mut removed_at = None;
    for tick in 2..=600 {
        session.tick();
        if session.satellite_count() == 0 {
            removed_at = Some(tick);
            break;
        }
    }
    let removed_at = removed_at.expect("body never fell into the attractor");
    assert!(removed_at >= 2);
    assert_eq!(session.world.position(handle), None);
    assert_eq!(session.world.body_count(), 1);
}

#[test]
fn mixed_sweep_keeps_the_survivor() {
    let mut session = test_session(round_threshold_parameters());

    let doomed = click(&mut session, 30.0, 0.0); // 1.0 physics unit
    let survivor = click(&mut session, 150.0, 0.0); // 5.0 physics units

    session.tick();

    assert_eq!(session.satellite_count(), 1);
    assert_eq!(session.satellites[0].handle, survivor);
    assert_eq!(session.world.position(doomed), None);
    assert_eq!(session.world.body_count(), 2);
}

// ==================================================================================
// Session tests: orbit scenario
// ==================================================================================

#[test]
fn spawned_body_curves_instead_of_flying_straight() {
    let mut session = test_session(test_parameters());

    // 100 screen units out, well clear of the removal radius
    let handle = click(&mut session, 100.0, 0.0);

    let start = session.distance_to_attractor(handle).unwrap();
    assert!(start > session.parameters.removal_radius);

    let mut distances = Vec::new();
    for _ in 0..120 {
        session.tick();
        let d = session
            .distance_to_attractor(handle)
            .expect("body should survive the first 120 ticks");
        assert!(d > session.parameters.removal_radius);
        distances.push(d);
    }

    // The pull bends the path inward: not monotonically nondecreasing
    assert!(
        distances.windows(2).any(|w| w[1] < w[0]),
        "distance never decreased"
    );
    assert!(*distances.last().unwrap() < start);

    // The kick is tangential, so the body leaves the spawn axis
    let pos = session.body_screen_position(handle).unwrap();
    assert!(pos.y.abs() > 0.0, "no tangential deflection: {:?}", pos);
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_is_a_fifo_window() {
    let mut trail = Trail::new(5);
    assert!(trail.is_empty());

    for i in 0..7 {
        trail.push(NVec2::new(i as f64, 0.0));
        assert!(trail.len() <= 5);
    }

    assert_eq!(trail.len(), 5);
    assert_eq!(trail.oldest(), Some(NVec2::new(2.0, 0.0)));
    assert_eq!(trail.newest(), Some(NVec2::new(6.0, 0.0)));

    let xs: Vec<f64> = trail.points().map(|p| p.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn session_trails_grow_one_point_per_tick_up_to_capacity() {
    let mut parameters = test_parameters();
    parameters.trail_capacity = 3;
    let mut session = test_session(parameters);

    // Far out so it survives every tick of the test
    click(&mut session, 300.0, 0.0);

    for expected in [1, 2, 3, 3, 3, 3] {
        session.tick();
        assert_eq!(session.satellites[0].trail.len(), expected);
    }
}

#[test]
fn trail_records_screen_space_positions() {
    let mut session = test_session(test_parameters());
    let handle = click(&mut session, 300.0, 0.0);

    session.tick();

    // First point is the spawn position, recorded before the first step
    let first = session.satellites[0].trail.oldest().unwrap();
    assert!((first - NVec2::new(300.0, 0.0)).norm() < 1e-9);

    session.tick();
    let newest = session.satellites[0].trail.newest().unwrap();
    let screen = session.body_screen_position(handle).unwrap();
    // Newest trail point lags the post-step position by one step
    assert!((newest - screen).norm() > 0.0);
}

// ==================================================================================
// Configuration tests
// ==================================================================================

fn sample_yaml() -> String {
    r#"
window:
  width: 1000.0
  height: 800.0
  title: "gravwell"

step:
  dt: 0.0166667
  velocity_iterations: 6
  position_iterations: 2

parameters:
  G: 1.0
  eps2: 0.0
  scale: 30.0
  removal_radius: 2.167
  trail_capacity: 2000
  attractor_mass: 1.0

attractor:
  position: [0.0, 0.0]
  radius: 50.0

spawn:
  radius: 15.0
  density: 0.5
  force: 5.0
"#
    .to_string()
}

#[test]
fn scenario_yaml_round_trips_into_a_session() {
    let cfg: ScenarioConfig = serde_yaml::from_str(&sample_yaml()).unwrap();
    cfg.validate().unwrap();

    let session = Session::build(cfg);
    assert_eq!(session.parameters.scale, 30.0);
    assert_eq!(session.parameters.removal_radius, 2.167);
    assert_eq!(session.parameters.trail_capacity, 2000);
    assert_eq!(session.parameters.velocity_iterations, 6);
    assert_eq!(session.parameters.position_iterations, 2);
    assert_eq!(session.satellite_count(), 0);
    assert_eq!(session.world.body_count(), 1);
}

#[test]
fn validation_rejects_degenerate_values() {
    let base = sample_yaml();

    let zero_scale = base.replace("scale: 30.0", "scale: 0.0");
    let cfg: ScenarioConfig = serde_yaml::from_str(&zero_scale).unwrap();
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonPositiveScale(_))
    ));

    let zero_capacity = base.replace("trail_capacity: 2000", "trail_capacity: 0");
    let cfg: ScenarioConfig = serde_yaml::from_str(&zero_capacity).unwrap();
    assert!(matches!(cfg.validate(), Err(ConfigError::ZeroTrailCapacity)));

    let bad_position = base.replace("position: [0.0, 0.0]", "position: [0.0, 0.0, 0.0]");
    let cfg: ScenarioConfig = serde_yaml::from_str(&bad_position).unwrap();
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::BadAttractorPosition(3))
    ));

    let negative_dt = base.replace("dt: 0.0166667", "dt: -1.0");
    let cfg: ScenarioConfig = serde_yaml::from_str(&negative_dt).unwrap();
    assert!(matches!(cfg.validate(), Err(ConfigError::NonPositiveStep(_))));
}

#[test]
fn softening_defaults_to_zero_when_omitted() {
    let without_eps2 = sample_yaml().replace("  eps2: 0.0\n", "");
    let cfg: ScenarioConfig = serde_yaml::from_str(&without_eps2).unwrap();
    assert_eq!(cfg.parameters.eps2, 0.0);
}
