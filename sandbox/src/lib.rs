pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod physics_world;
pub mod query;
pub mod rng;
pub mod roles;
pub mod session;
pub mod spawner;
pub mod stepper;
pub mod terrain;
pub mod viewport;

pub use config::{SandboxConfig, SpawnConfig};
pub use constants::{
    BALLS_MAX, GRAVITY_Y_MPS2, INITIAL_VIEWPORT_SCALE, SECONDS_PER_TICK, TAP_HALF_EXTENT_M,
    WORLD_WIDTH_M,
};
pub use controller::{InteractionController, pinch_transform};
pub use error::ConfigError;
pub use physics_world::{ColliderOutline, OutlineShape, PhysicsWorld, QueryCallback};
pub use query::WorldQuery;
pub use roles::{BodyRole, BodyRoles};
pub use session::{GestureState, PinchAnchor, SimulationSession};
pub use spawner::{BallSpawner, BallSpec};
pub use stepper::SimulationStepper;
pub use viewport::{DEFAULT_SCREEN_SIZE_PX, Viewport};

pub use rapier2d;
