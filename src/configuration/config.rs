//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! gravity-well scenario. A scenario consists of:
//!
//! - [`WindowConfig`]     – window size and title
//! - [`StepConfig`]       – step size and solver iteration counts
//! - [`ParametersConfig`] – physical constants and collection limits
//! - [`AttractorConfig`]  – placement of the central body
//! - [`SpawnConfig`]      – properties of mouse-spawned bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! window:
//!   width: 1000.0
//!   height: 800.0
//!   title: "gravwell"
//!
//! step:
//!   dt: 0.0166667            # seconds per physics step
//!   velocity_iterations: 6
//!   position_iterations: 2
//!
//! parameters:
//!   G: 1.0                   # gravitational constant
//!   eps2: 0.0                # softening epsilon^2
//!   scale: 30.0              # screen units per physics unit
//!   removal_radius: 2.167    # physics units
//!   trail_capacity: 2000
//!   attractor_mass: 1.0
//!
//! attractor:
//!   position: [0.0, 0.0]     # screen units, window center
//!   radius: 50.0             # screen units
//!
//! spawn:
//!   radius: 15.0             # screen units
//!   density: 0.5
//!   force: 5.0               # tangential kick magnitude
//! ```
//!
//! The session maps this configuration into its runtime parameter struct;
//! [`ScenarioConfig::validate`] rejects degenerate values before that.

use serde::Deserialize;
use thiserror::Error;

/// Window size and title for the viewer
#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

/// Fixed-step settings for the physics world
#[derive(Deserialize, Debug, Clone)]
pub struct StepConfig {
    pub dt: f64, // seconds per step
    pub velocity_iterations: usize, // solver iterations, kept for engine fidelity
    pub position_iterations: usize,
}

/// Physical constants and collection limits
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    #[serde(default)]
    pub eps2: f64, // softening, 0 for the exact inverse-square law
    pub scale: f64, // screen units per physics unit
    pub removal_radius: f64, // physics units
    pub trail_capacity: usize,
    pub attractor_mass: f64, // nominal mass used by the force law
}

/// Placement of the central attractor, screen units
#[derive(Deserialize, Debug, Clone)]
pub struct AttractorConfig {
    pub position: Vec<f64>, // [x, y]
    pub radius: f64,
}

/// Properties of mouse-spawned bodies
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub radius: f64, // screen units
    pub density: f64, // mass = density x circle area, physics units
    pub force: f64, // tangential kick magnitude
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub window: WindowConfig,
    pub step: StepConfig,
    pub parameters: ParametersConfig,
    pub attractor: AttractorConfig,
    pub spawn: SpawnConfig,
}

/// Rejected scenario values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scale must be positive, got {0}")]
    NonPositiveScale(f64),
    #[error("step dt must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("spawn density must be positive, got {0}")]
    NonPositiveDensity(f64),
    #[error("{name} radius must be positive, got {value}")]
    NonPositiveRadius { name: &'static str, value: f64 },
    #[error("trail capacity must be at least 1")]
    ZeroTrailCapacity,
    #[error("removal radius must be non-negative, got {0}")]
    NegativeRemovalRadius(f64),
    #[error("softening eps2 must be non-negative, got {0}")]
    NegativeSoftening(f64),
    #[error("attractor position needs exactly 2 components, got {0}")]
    BadAttractorPosition(usize),
}

impl ScenarioConfig {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parameters.scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale(self.parameters.scale));
        }
        if self.step.dt <= 0.0 {
            return Err(ConfigError::NonPositiveStep(self.step.dt));
        }
        if self.spawn.density <= 0.0 {
            return Err(ConfigError::NonPositiveDensity(self.spawn.density));
        }
        if self.attractor.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                name: "attractor",
                value: self.attractor.radius,
            });
        }
        if self.spawn.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                name: "spawn",
                value: self.spawn.radius,
            });
        }
        if self.parameters.trail_capacity == 0 {
            return Err(ConfigError::ZeroTrailCapacity);
        }
        if self.parameters.removal_radius < 0.0 {
            return Err(ConfigError::NegativeRemovalRadius(
                self.parameters.removal_radius,
            ));
        }
        if self.parameters.eps2 < 0.0 {
            return Err(ConfigError::NegativeSoftening(self.parameters.eps2));
        }
        if self.attractor.position.len() != 2 {
            return Err(ConfigError::BadAttractorPosition(
                self.attractor.position.len(),
            ));
        }
        Ok(())
    }
}
