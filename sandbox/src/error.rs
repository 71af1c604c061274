use thiserror::Error;

/// Reasons a [`crate::SandboxConfig`] is rejected.
///
/// Everything past construction is total, so this is the only error type the crate exposes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world width must be positive and finite, got {0}")]
    WorldWidth(f32),

    #[error("viewport scale must be positive and finite, got {0}")]
    ViewportScale(f32),

    #[error("timestep must be positive and finite, got {0}")]
    Timestep(f32),

    #[error("{which} iteration count must be at least 1")]
    Iterations { which: &'static str },

    #[error("ball radius range [{min}, {max}] is empty or not positive")]
    RadiusRange { min: f32, max: f32 },

    #[error("spawn width fraction must be in (0, 1], got {0}")]
    SpawnFraction(f32),

    #[error("tap half-extent must be positive and finite, got {0}")]
    TapHalfExtent(f32),

    #[error("minimum pinch distance must be positive and finite, got {0}")]
    PinchDistance(f32),
}
