//! Rigid-body storage and stepping behind the `PhysicsWorld` capability
//!
//! `PhysicsWorld` is the engine-facing interface of the session: body
//! creation/destruction, per-step force accumulation, and fixed-step
//! integration. `PlanarWorld` is the default backend, a generational
//! arena of bodies advanced with semi-implicit Euler

use crate::simulation::states::{BodyKind, NVec2, RigidBody};

/// Opaque reference to a body inside a [`PhysicsWorld`]
/// The generation invalidates handles to destroyed bodies even after the
/// slot is reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: usize,
    generation: u32,
}

/// The 2D rigid-body engine the session drives
///
/// Forces accumulate between steps and are consumed by [`step`], the way
/// force application to a body's center works in conventional rigid-body
/// engines. Queries on a destroyed (or stale) handle return `None`
///
/// [`step`]: PhysicsWorld::step
pub trait PhysicsWorld {
    /// Create a body that never moves. Static bodies report mass 0.
    fn create_static_body(&mut self, position: NVec2, radius: f64) -> BodyHandle;

    /// Create an integrated body whose mass is density x circle area.
    fn create_dynamic_body(&mut self, position: NVec2, radius: f64, density: f64) -> BodyHandle;

    /// Remove a body. Destroying a stale handle is a no-op.
    fn destroy_body(&mut self, handle: BodyHandle);

    /// Accumulate a force on a body's center for the upcoming step.
    fn apply_force(&mut self, handle: BodyHandle, force: NVec2);

    /// Advance every dynamic body by `dt` seconds and clear accumulated
    /// forces. The iteration counts are constraint-solver passes; with no
    /// joints or contacts they do not alter trajectories.
    fn step(&mut self, dt: f64, velocity_iterations: usize, position_iterations: usize);

    fn position(&self, handle: BodyHandle) -> Option<NVec2>;

    fn mass(&self, handle: BodyHandle) -> Option<f64>;

    /// Number of live bodies, static ones included.
    fn body_count(&self) -> usize;
}

struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Default [`PhysicsWorld`] backend.
pub struct PlanarWorld {
    slots: Vec<Slot>,
    free: Vec<usize>, // indices of vacated slots, reused before growing
}

impl PlanarWorld {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    fn insert(&mut self, body: RigidBody) -> BodyHandle {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.body = Some(body);
                BodyHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    body: Some(body),
                });
                BodyHandle {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }
}

impl Default for PlanarWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for PlanarWorld {
    fn create_static_body(&mut self, position: NVec2, radius: f64) -> BodyHandle {
        self.insert(RigidBody {
            kind: BodyKind::Static,
            x: position,
            v: NVec2::zeros(),
            m: 0.0,
            radius,
            force: NVec2::zeros(),
        })
    }

    fn create_dynamic_body(&mut self, position: NVec2, radius: f64, density: f64) -> BodyHandle {
        let m = density * std::f64::consts::PI * radius * radius;
        self.insert(RigidBody {
            kind: BodyKind::Dynamic,
            x: position,
            v: NVec2::zeros(),
            m,
            radius,
            force: NVec2::zeros(),
        })
    }

    fn destroy_body(&mut self, handle: BodyHandle) {
        let Some(slot) = self.slots.get_mut(handle.index) else {
            return;
        };
        if slot.generation != handle.generation || slot.body.is_none() {
            return;
        }
        slot.body = None;
        slot.generation += 1; // outstanding handles to this slot go stale
        self.free.push(handle.index);
    }

    fn apply_force(&mut self, handle: BodyHandle, force: NVec2) {
        if let Some(body) = self.get_mut(handle) {
            body.force += force;
        }
    }

    fn step(&mut self, dt: f64, _velocity_iterations: usize, _position_iterations: usize) {
        // Semi-implicit Euler: kick the velocity, then drift the position.
        for slot in &mut self.slots {
            let Some(body) = slot.body.as_mut() else {
                continue;
            };
            if body.kind == BodyKind::Dynamic && body.m > 0.0 {
                body.v += body.force * (dt / body.m);
                body.x += body.v * dt;
            }
            body.force = NVec2::zeros();
        }
    }

    fn position(&self, handle: BodyHandle) -> Option<NVec2> {
        self.get(handle).map(|b| b.x)
    }

    fn mass(&self, handle: BodyHandle) -> Option<f64> {
        self.get(handle).map(|b| b.m)
    }

    fn body_count(&self) -> usize {
        self.slots.iter().filter(|s| s.body.is_some()).count()
    }
}
