/// Width of the simulated world in meters.
///
/// The world height follows the screen aspect ratio, see [`crate::Viewport::world_size`].
pub const WORLD_WIDTH_M: f32 = 100.0;

/// Viewport scale applied when a session starts.
pub const INITIAL_VIEWPORT_SCALE: f32 = 1.5;

/// Gravity along Y in meters per second squared (negative is down).
pub const GRAVITY_Y_MPS2: f32 = -9.8;

/// Simulated seconds advanced by one call to [`crate::SimulationStepper::step`].
///
/// Decoupled from the host frame time.
pub const SECONDS_PER_TICK: f32 = 1.0 / 60.0;

/// Velocity solver iterations per step.
pub const VELOCITY_ITERATIONS: usize = 8;

/// Position (stabilization) iterations per step.
pub const POSITION_ITERATIONS: usize = 1;

/// Maximum number of balls spawned over a session. Never replenished.
pub const BALLS_MAX: u32 = 1000;

/// Ball radius range in meters.
pub const BALL_RADIUS_MIN_M: f32 = 0.1;
pub const BALL_RADIUS_MAX_M: f32 = 0.9;

/// Fraction of the world width, centered on x = 0, in which balls may spawn.
pub const SPAWN_WIDTH_FRACTION: f32 = 0.9;

/// Default seed for the spawn generator.
pub const DEFAULT_SPAWN_SEED: u64 = 0x7E44_A1B5_0C0F_FEE5;

/// Half-extent of the square picked around a tap (meters).
pub const TAP_HALF_EXTENT_M: f32 = 0.5;

/// Floor applied to pinch point distances (screen pixels).
///
/// Keeps the scale ratio finite when both fingers sit on the same pixel.
pub const MIN_PINCH_DISTANCE_PX: f32 = 1.0;

/// Thickness of the floor and walls (meters).
pub const TERRAIN_THICKNESS_M: f32 = 0.1;

/// Surface material shared by terrain and balls.
pub const MATERIAL_DENSITY: f32 = 1.0;
pub const MATERIAL_FRICTION: f32 = 1.0;
pub const MATERIAL_RESTITUTION: f32 = 0.1;
