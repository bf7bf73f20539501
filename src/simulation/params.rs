//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and softening (`g`, `eps2`),
//! - the screen/physics scale factor,
//! - removal threshold and trail capacity,
//! - step size and solver iteration counts,
//! - attractor placement and spawn constants

use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub eps2: f64, // softening
    pub scale: f64, // screen units per physics unit
    pub removal_radius: f64, // bodies strictly inside are destroyed, physics units
    pub trail_capacity: usize, // trail point cap
    pub attractor_mass: f64, // nominal mass used by the force law
    pub attractor_position: NVec2, // screen units
    pub attractor_radius: f64, // screen units
    pub dt: f64, // step size, seconds
    pub velocity_iterations: usize, // solver iterations per step
    pub position_iterations: usize,
    pub spawn_radius: f64, // new body radius, screen units
    pub spawn_density: f64, // new body density
    pub spawn_force: f64, // tangential kick magnitude
}

impl Parameters {
    /// Screen space -> physics space.
    pub fn to_physics(&self, screen: NVec2) -> NVec2 {
        screen / self.scale
    }

    /// Physics space -> screen space.
    pub fn to_screen(&self, physics: NVec2) -> NVec2 {
        physics * self.scale
    }
}
