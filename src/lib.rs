pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{BodyKind, NVec2, RigidBody, Satellite, SpawnLatch};
pub use simulation::params::Parameters;
pub use simulation::world::{BodyHandle, PhysicsWorld, PlanarWorld};
pub use simulation::forces::{tangential_kick, CentralForce, ForceSet, InverseSquareGravity};
pub use simulation::trail::Trail;
pub use simulation::session::{PlanarSession, Session};

pub use configuration::config::{
    AttractorConfig, ConfigError, ParametersConfig, ScenarioConfig, SpawnConfig, StepConfig,
    WindowConfig,
};

pub use visualization::renderer::{render_frame, GizmoRenderer, Renderer};
pub use visualization::viewer::run;

pub use benchmark::benchmark::{bench_tick, bench_tick_curve};
