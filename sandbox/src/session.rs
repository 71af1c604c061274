use nalgebra::Point2;

use crate::{config::SpawnConfig, spawner::BallSpawner};

/// Viewport state and finger positions captured when a pinch starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchAnchor {
    /// Viewport center at pinch-begin (meters).
    pub center: Point2<f32>,
    /// Viewport scale at pinch-begin.
    pub scale: f32,
    /// Screen positions of both fingers at pinch-begin (pixels).
    pub p0: Point2<f32>,
    pub p1: Point2<f32>,
}

/// Idle -> PinchActive -> Idle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    PinchActive(PinchAnchor),
}

impl GestureState {
    pub fn is_pinching(&self) -> bool {
        matches!(self, GestureState::PinchActive(_))
    }
}

/// Mutable state that lives as long as the scene: the spawn budget and the gesture anchor.
///
/// Created once at session start. Nothing resets it.
#[derive(Clone, Debug)]
pub struct SimulationSession {
    pub spawner: BallSpawner,
    pub gesture: GestureState,
}

impl SimulationSession {
    pub fn new(spawn: SpawnConfig) -> Self {
        Self {
            spawner: BallSpawner::new(spawn),
            gesture: GestureState::Idle,
        }
    }
}
