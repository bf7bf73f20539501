//! Force contributors for the gravity well
//!
//! Defines the central-force trait the session evaluates each tick for
//! every live body, plus the tangential kick applied once at spawn

use crate::simulation::states::NVec2;

/// Collection of central-force terms (gravity, drag, etc.)
/// Each term implements [`CentralForce`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn CentralForce + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: CentralForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Total force on a body of mass `body_mass` displaced by `offset`
    /// from the attractor (physics units)
    pub fn total(&self, offset: NVec2, body_mass: f64) -> NVec2 {
        let mut sum = NVec2::zeros();
        for term in &self.terms {
            sum += term.force(offset, body_mass);
        }
        sum
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for forces exerted by the attractor on one body
/// `offset` is the vector from the attractor to the body
pub trait CentralForce {
    fn force(&self, offset: NVec2, body_mass: f64) -> NVec2;
}

/// Inverse-square attraction toward the attractor
///
/// Magnitude is `g * body_mass * attractor_mass / (|offset|^2 + eps2)`,
/// directed from the body toward the attractor. `attractor_mass` is the
/// nominal constant from the parameters, never the engine-computed mass
/// (static bodies report zero). With `eps2 = 0` this is the exact
/// inverse-square law; a positive value smooths close passes
pub struct InverseSquareGravity {
    pub g: f64, // gravitational constant
    pub attractor_mass: f64,
    pub eps2: f64, // softening
}

impl CentralForce for InverseSquareGravity {
    fn force(&self, offset: NVec2, body_mass: f64) -> NVec2 {
        let r2 = offset.norm_squared();
        let d2 = r2 + self.eps2;
        if r2 <= 0.0 || d2 <= 0.0 {
            // Zero-length direction: no meaningful pull, skip normalization
            return NVec2::zeros();
        }
        let magnitude = self.g * body_mass * self.attractor_mass / d2;
        (-offset / r2.sqrt()) * magnitude
    }
}

/// One-shot sideways push seeding an orbital rather than radial velocity
///
/// `toward` is the vector from the new body to the attractor. It is
/// normalized (a zero-length vector yields a zero kick), rotated 90
/// degrees, and scaled by `magnitude`
pub fn tangential_kick(toward: NVec2, magnitude: f64) -> NVec2 {
    let length = toward.norm();
    if length <= 0.0 {
        return NVec2::zeros();
    }
    let unit = toward / length;
    NVec2::new(-unit.y, unit.x) * magnitude
}
