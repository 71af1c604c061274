//! Rapier-backed physics world owned by a sandbox session.
//!
//! This module is the only place that touches Rapier's sets and pipelines directly.
//! Everything above it talks in terms of body handles, collider handles and world-space
//! points.
//!
//! Notes
//! - New colliders enter the broad phase as soon as they are inserted, so a body is
//!   queryable before it has ever been stepped.
//! - Removed colliders leave the broad phase only at the next [`PhysicsWorld::step`]. Their
//!   slot may be reused before that, so [`PhysicsWorld::query_aabb`] re-checks every hit
//!   against the collider's current AABB.
//! - Handles stay valid until the body is removed. Never keep them across a removal.

use nalgebra::{Point2, Vector2};
use rapier2d::parry::bounding_volume::{Aabb, BoundingVolume};
use rapier2d::prelude::*;

/// Receives broad-phase hits from [`PhysicsWorld::query_aabb`].
pub trait QueryCallback {
    /// Called once per overlapping collider, in engine order.
    ///
    /// Return `false` to stop the enumeration early.
    fn report_collider(&mut self, handle: ColliderHandle, collider: &Collider) -> bool;
}

/// Outline of a collider in world space, for debug drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineShape {
    Circle {
        center: Point2<f32>,
        radius: f32,
    },
    Box {
        center: Point2<f32>,
        half_extents: Vector2<f32>,
        /// Rotation in radians, counter-clockwise.
        angle: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderOutline {
    pub body: Option<RigidBodyHandle>,
    pub shape: OutlineShape,
}

/// All Rapier state needed to integrate, mutate and query a 2D world.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Only read for broad-phase margins when inserting outside of a step.
    insert_params: IntegrationParameters,
}

impl PhysicsWorld {
    /// Empty world with gravity `(0, gravity_y)`.
    pub fn new(gravity_y: f32) -> Self {
        Self {
            gravity: Vector::new(0.0, gravity_y),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            insert_params: IntegrationParameters::default(),
        }
    }

    /// Insert a body together with its colliders and return the body handle.
    pub fn insert_body(
        &mut self,
        body: RigidBody,
        colliders: impl IntoIterator<Item = Collider>,
    ) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        for collider in colliders {
            let collider = self
                .colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
            if let Some(inserted) = self.colliders.get(collider) {
                let aabb = inserted.compute_broad_phase_aabb(&self.insert_params, &self.bodies);
                self.broad_phase
                    .set_aabb(&self.insert_params, collider, aabb);
            }
        }
        handle
    }

    /// Remove a body and every collider attached to it.
    ///
    /// Returns `false` if the handle was already stale.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// World-space position of a body's origin.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Point2<f32>> {
        self.bodies.get(handle).map(|rb| {
            let t = rb.translation();
            Point2::new(t.x, t.y)
        })
    }

    /// Advance the simulation by one step of `params.dt`.
    pub fn step(&mut self, params: &IntegrationParameters) {
        self.pipeline.step(
            &self.gravity,
            params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Report every collider whose current AABB overlaps `[mins, maxs]`.
    ///
    /// No exact shape test is done. Enumeration stops as soon as the callback returns
    /// `false`.
    pub fn query_aabb(
        &self,
        mins: Point2<f32>,
        maxs: Point2<f32>,
        callback: &mut impl QueryCallback,
    ) {
        let aabb = Aabb::new(Point::new(mins.x, mins.y), Point::new(maxs.x, maxs.y));
        let query = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            QueryFilter::default(),
        );

        for (handle, collider) in query.intersect_aabb_conservative(aabb) {
            // Leaves of removed colliders linger until the next step, possibly under a
            // reused slot.
            if !collider.compute_aabb().intersects(&aabb) {
                continue;
            }
            if !callback.report_collider(handle, collider) {
                break;
            }
        }
    }

    /// World-space outlines of all ball and box colliders.
    ///
    /// Other shapes are skipped; the sandbox only creates these two.
    pub fn outlines(&self) -> impl Iterator<Item = ColliderOutline> + '_ {
        self.colliders.iter().filter_map(|(_, collider)| {
            let pose = collider.position();
            let center = Point2::new(pose.translation.vector.x, pose.translation.vector.y);
            let shape = collider.shape();

            let outline = if let Some(ball) = shape.as_ball() {
                OutlineShape::Circle {
                    center,
                    radius: ball.radius,
                }
            } else if let Some(cuboid) = shape.as_cuboid() {
                OutlineShape::Box {
                    center,
                    half_extents: Vector2::new(cuboid.half_extents.x, cuboid.half_extents.y),
                    angle: pose.rotation.angle(),
                }
            } else {
                return None;
            };

            Some(ColliderOutline {
                body: collider.parent(),
                shape: outline,
            })
        })
    }
}
