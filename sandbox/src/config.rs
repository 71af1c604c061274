/*!
Session configuration.

All tunables of a sandbox session live here. Defaults mirror `constants`, so a
host that does not care can use `SandboxConfig::default()`.

Notes
- Distances are in meters, time in seconds, gesture distances in screen pixels.
- Values are validated once, when the controller is built. Nothing re-reads
  the config afterwards.
*/

use crate::{
    constants::{
        BALL_RADIUS_MAX_M, BALL_RADIUS_MIN_M, BALLS_MAX, DEFAULT_SPAWN_SEED, GRAVITY_Y_MPS2,
        INITIAL_VIEWPORT_SCALE, MIN_PINCH_DISTANCE_PX, POSITION_ITERATIONS, SECONDS_PER_TICK,
        SPAWN_WIDTH_FRACTION, TAP_HALF_EXTENT_M, VELOCITY_ITERATIONS, WORLD_WIDTH_M,
    },
    error::ConfigError,
};

/// Parameters of the bounded ball population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnConfig {
    /// Total number of balls the session may ever create.
    pub max_bodies: u32,
    /// Smallest ball radius (meters).
    pub radius_min: f32,
    /// Largest ball radius (meters).
    pub radius_max: f32,
    /// Centered fraction of the world width used for spawn positions.
    pub width_fraction: f32,
    /// Seed of the spawn position/radius generator.
    pub seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_bodies: BALLS_MAX,
            radius_min: BALL_RADIUS_MIN_M,
            radius_max: BALL_RADIUS_MAX_M,
            width_fraction: SPAWN_WIDTH_FRACTION,
            seed: DEFAULT_SPAWN_SEED,
        }
    }
}

/// Everything needed to start a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SandboxConfig {
    /// World width in meters.
    pub world_width: f32,
    /// Viewport scale at session start.
    pub initial_scale: f32,
    /// Gravity along Y (m/s^2).
    pub gravity_y: f32,
    /// Fixed simulation step (seconds).
    pub timestep: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    /// Half-extent of the tap pick box (meters).
    pub tap_half_extent: f32,
    /// Floor for pinch point distances (pixels).
    pub min_pinch_distance: f32,
    pub spawn: SpawnConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH_M,
            initial_scale: INITIAL_VIEWPORT_SCALE,
            gravity_y: GRAVITY_Y_MPS2,
            timestep: SECONDS_PER_TICK,
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,
            tap_half_extent: TAP_HALF_EXTENT_M,
            min_pinch_distance: MIN_PINCH_DISTANCE_PX,
            spawn: SpawnConfig::default(),
        }
    }
}

impl SandboxConfig {
    /// Same as the default config with a different spawn seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut config = Self::default();
        config.spawn.seed = seed;
        config
    }

    /// Check every field, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.world_width) {
            return Err(ConfigError::WorldWidth(self.world_width));
        }
        if !is_positive(self.initial_scale) {
            return Err(ConfigError::ViewportScale(self.initial_scale));
        }
        if !is_positive(self.timestep) {
            return Err(ConfigError::Timestep(self.timestep));
        }
        if self.velocity_iterations == 0 {
            return Err(ConfigError::Iterations { which: "velocity" });
        }
        if self.position_iterations == 0 {
            return Err(ConfigError::Iterations { which: "position" });
        }
        if !is_positive(self.tap_half_extent) {
            return Err(ConfigError::TapHalfExtent(self.tap_half_extent));
        }
        if !is_positive(self.min_pinch_distance) {
            return Err(ConfigError::PinchDistance(self.min_pinch_distance));
        }

        let spawn = &self.spawn;
        if !is_positive(spawn.radius_min)
            || !spawn.radius_max.is_finite()
            || spawn.radius_max < spawn.radius_min
        {
            return Err(ConfigError::RadiusRange {
                min: spawn.radius_min,
                max: spawn.radius_max,
            });
        }
        if !(spawn.width_fraction > 0.0 && spawn.width_fraction <= 1.0) {
            return Err(ConfigError::SpawnFraction(spawn.width_fraction));
        }

        Ok(())
    }
}

#[inline]
fn is_positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
