//! Core state types for the gravity-well session.
//!
//! Defines the rigid-body record stored by the physics world, the
//! `Satellite` composite pairing a body handle with its trail, and the
//! spawn latch that debounces a held mouse button to one spawn.

use nalgebra::Vector2;

use crate::simulation::trail::Trail;
use crate::simulation::world::BodyHandle;

pub type NVec2 = Vector2<f64>;

/// Whether a body is pinned in place or integrated each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// One rigid body as stored by the physics world
/// All lengths are in physics units
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub kind: BodyKind,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass, 0 for static bodies
    pub radius: f64, // radius
    pub force: NVec2, // accumulated force, consumed by the next step
}

/// A user-spawned body together with its render trail
/// One record per live body; the visual circle is derived from the engine
/// position every frame and never stored
#[derive(Debug, Clone)]
pub struct Satellite {
    pub handle: BodyHandle,
    pub trail: Trail,
}

/// Debounces the left mouse button: a press spawns one body and arms the
/// latch, release disarms it. Initial state is `Disarmed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnLatch {
    #[default]
    Disarmed,
    Armed,
}
