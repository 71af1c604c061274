use nalgebra::{Point2, Vector2};
use rapier2d::prelude::*;

use crate::{
    config::SpawnConfig,
    constants::{MATERIAL_DENSITY, MATERIAL_FRICTION, MATERIAL_RESTITUTION},
    rng::SimpleRng,
};

/// Description of a ball to be created by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallSpec {
    /// World-space spawn position (meters).
    pub position: Point2<f32>,
    /// Radius (meters).
    pub radius: f32,
}

impl BallSpec {
    /// Dynamic body and ball collider for this spec.
    pub fn build(&self) -> (RigidBody, Collider) {
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(self.position.x, self.position.y))
            .build();
        let collider = ColliderBuilder::ball(self.radius)
            .density(MATERIAL_DENSITY)
            .friction(MATERIAL_FRICTION)
            .restitution(MATERIAL_RESTITUTION)
            .build();
        (body, collider)
    }
}

/// Hands out at most `max_bodies` ball specs over its lifetime, one per call.
///
/// The countdown only goes down. Once it hits zero every later call returns `None`.
#[derive(Clone, Debug)]
pub struct BallSpawner {
    config: SpawnConfig,
    remaining: u32,
    rng: SimpleRng,
}

impl BallSpawner {
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            remaining: config.max_bodies,
            rng: SimpleRng::from_seed(config.seed),
            config,
        }
    }

    /// Balls still allowed this session.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Next ball for a world of `world_size` meters, or `None` once the budget is spent.
    ///
    /// - x is uniform in the central `width_fraction` of the world width,
    /// - y is uniform in `[h/10, h/2]`,
    /// - radius is uniform in `[radius_min, radius_max]`.
    pub fn try_spawn(&mut self, world_size: Vector2<f32>) -> Option<BallSpec> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let half_span = world_size.x * self.config.width_fraction * 0.5;
        let x = self.rng.gen_range_f32(-half_span, half_span);
        let y = self.rng.gen_range_f32(world_size.y / 10.0, world_size.y / 2.0);
        let radius = self
            .rng
            .gen_range_f32(self.config.radius_min, self.config.radius_max);

        if self.remaining == 0 {
            log::info!(
                "Spawn budget of {} balls exhausted",
                self.config.max_bodies
            );
        }
        log::trace!("Spawning ball r={radius:.2} at ({x:.2}, {y:.2})");

        Some(BallSpec {
            position: Point2::new(x, y),
            radius,
        })
    }
}
