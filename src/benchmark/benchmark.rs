use std::time::Instant;

use crate::simulation::params::Parameters;
use crate::simulation::session::{PlanarSession, Session};
use crate::simulation::states::NVec2;
use crate::simulation::world::PlanarWorld;

/// Parameters for benchmark sessions. Huge removal-free arena so body
/// counts stay constant while timing.
fn bench_parameters() -> Parameters {
    Parameters {
        g: 1.0,
        eps2: 1e-4,
        scale: 30.0,
        removal_radius: 0.0, // nothing ever falls in
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

/// Build a session with `n` satellites on deterministic trig positions,
/// no rand needed.
fn make_session(n: usize) -> PlanarSession {
    let mut session = Session::new(PlanarWorld::new(), bench_parameters());
    for i in 0..n {
        let i_f = i as f64;
        let radius = 150.0 + (i_f * 0.13).cos() * 100.0;
        let angle = i_f * 0.37;
        session.handle_press(NVec2::new(angle.cos() * radius, angle.sin() * radius));
        session.handle_release();
    }
    session
}

/// Time a single tick (force pass + sweep + step) for growing body counts.
pub fn bench_tick() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let steps = 10;

    for n in ns {
        let mut session = make_session(n);

        // Warm up
        session.tick();

        let t0 = Instant::now();
        for _ in 0..steps {
            session.tick();
        }
        let per_tick = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, tick = {per_tick:8.6} s");
    }
}

/// Tick timing over a smooth size range
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick_curve() {
    println!("N,tick_ms");

    for n in (200..=6400).step_by(200) {
        // Small n: average over a few ticks to smooth noise
        let steps = if n <= 800 { 20 } else { 5 };

        let mut session = make_session(n);
        session.tick();

        let t0 = Instant::now();
        for _ in 0..steps {
            session.tick();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
