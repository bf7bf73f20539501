//! The live gravity-well session
//!
//! `Session` owns the physics world, the attractor handle, the satellite
//! list, the active force set, and the spawn latch. It is the single
//! mutable state of the program: the viewer feeds it input events and
//! advances it once per fixed step
//!
//! Tick order is fixed: force pass (with trail append) -> removal sweep ->
//! world step. Spawns happen in the input phase before any of these. A
//! body at exactly the removal threshold survives the sweep (the check is
//! strictly less-than) and is collected on a later tick once gravity has
//! pulled it inside

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::forces::{tangential_kick, ForceSet, InverseSquareGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Satellite, SpawnLatch};
use crate::simulation::trail::Trail;
use crate::simulation::world::{BodyHandle, PhysicsWorld, PlanarWorld};

/// The session as run by the viewer.
pub type PlanarSession = Session<PlanarWorld>;

#[derive(Resource)]
pub struct Session<W>
where
    W: PhysicsWorld + Send + Sync + 'static,
{
    pub world: W,
    pub attractor: BodyHandle,
    pub satellites: Vec<Satellite>,
    pub forces: ForceSet,
    pub parameters: Parameters,
    pub latch: SpawnLatch,
}

impl Session<PlanarWorld> {
    /// Build a runtime session from a loaded scenario configuration.
    pub fn build(cfg: ScenarioConfig) -> Self {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            g: p_cfg.g,
            eps2: p_cfg.eps2,
            scale: p_cfg.scale,
            removal_radius: p_cfg.removal_radius,
            trail_capacity: p_cfg.trail_capacity,
            attractor_mass: p_cfg.attractor_mass,
            attractor_position: NVec2::new(cfg.attractor.position[0], cfg.attractor.position[1]),
            attractor_radius: cfg.attractor.radius,
            dt: cfg.step.dt,
            velocity_iterations: cfg.step.velocity_iterations,
            position_iterations: cfg.step.position_iterations,
            spawn_radius: cfg.spawn.radius,
            spawn_density: cfg.spawn.density,
            spawn_force: cfg.spawn.force,
        };
        Self::new(PlanarWorld::new(), parameters)
    }
}

impl<W> Session<W>
where
    W: PhysicsWorld + Send + Sync + 'static,
{
    /// Create a session over `world`: one static attractor, no satellites,
    /// inverse-square gravity registered, latch disarmed.
    pub fn new(mut world: W, parameters: Parameters) -> Self {
        let attractor = world.create_static_body(
            parameters.to_physics(parameters.attractor_position),
            parameters.attractor_radius / parameters.scale,
        );

        let forces = ForceSet::new().with(InverseSquareGravity {
            g: parameters.g,
            attractor_mass: parameters.attractor_mass,
            eps2: parameters.eps2,
        });

        Self {
            world,
            attractor,
            satellites: Vec::new(),
            forces,
            parameters,
            latch: SpawnLatch::default(),
        }
    }

    /// Left button is down at `cursor` (screen units). Spawns exactly one
    /// body per discrete press: the first call arms the latch, repeats
    /// while held are ignored until [`handle_release`](Self::handle_release).
    pub fn handle_press(&mut self, cursor: NVec2) -> Option<BodyHandle> {
        if self.latch == SpawnLatch::Armed {
            return None;
        }
        self.latch = SpawnLatch::Armed;
        Some(self.spawn_at(cursor))
    }

    /// Left button released: re-arm spawning.
    pub fn handle_release(&mut self) {
        self.latch = SpawnLatch::Disarmed;
    }

    /// Create a dynamic body at `cursor` and push it sideways so it orbits
    /// instead of falling straight in.
    fn spawn_at(&mut self, cursor: NVec2) -> BodyHandle {
        let position = self.parameters.to_physics(cursor);
        let handle = self.world.create_dynamic_body(
            position,
            self.parameters.spawn_radius / self.parameters.scale,
            self.parameters.spawn_density,
        );

        let kick = tangential_kick(
            self.attractor_position() - position,
            self.parameters.spawn_force,
        );
        self.world.apply_force(handle, kick);

        self.satellites.push(Satellite {
            handle,
            trail: Trail::new(self.parameters.trail_capacity),
        });
        handle
    }

    /// Advance the session by one fixed step.
    pub fn tick(&mut self) {
        let star = self.attractor_position();
        let Self {
            world,
            satellites,
            forces,
            parameters,
            ..
        } = self;

        // Force pass. The trail point is recorded in the same pass so it
        // reflects the position the force was computed from.
        for sat in satellites.iter_mut() {
            let Some(position) = world.position(sat.handle) else {
                continue;
            };
            let Some(mass) = world.mass(sat.handle) else {
                continue;
            };
            world.apply_force(sat.handle, forces.total(position - star, mass));
            sat.trail.push(parameters.to_screen(position));
        }

        // Removal sweep, two-phase: collect doomed handles, then drop them
        // from the world and the satellite list in one pass each.
        let doomed: Vec<BodyHandle> = satellites
            .iter()
            .filter(|sat| match world.position(sat.handle) {
                Some(position) => (position - star).norm() < parameters.removal_radius,
                None => true,
            })
            .map(|sat| sat.handle)
            .collect();
        if !doomed.is_empty() {
            for handle in &doomed {
                world.destroy_body(*handle);
            }
            satellites.retain(|sat| !doomed.contains(&sat.handle));
        }

        world.step(
            parameters.dt,
            parameters.velocity_iterations,
            parameters.position_iterations,
        );
    }

    pub fn satellite_count(&self) -> usize {
        self.satellites.len()
    }

    /// Attractor position in physics units. The attractor is created once
    /// and never destroyed, so the query cannot actually miss.
    pub fn attractor_position(&self) -> NVec2 {
        self.world.position(self.attractor).unwrap_or_default()
    }

    pub fn attractor_screen_position(&self) -> NVec2 {
        self.parameters.to_screen(self.attractor_position())
    }

    pub fn body_screen_position(&self, handle: BodyHandle) -> Option<NVec2> {
        self.world
            .position(handle)
            .map(|p| self.parameters.to_screen(p))
    }

    /// Distance from a body to the attractor in physics units.
    pub fn distance_to_attractor(&self, handle: BodyHandle) -> Option<f64> {
        self.world
            .position(handle)
            .map(|p| (p - self.attractor_position()).norm())
    }
}
