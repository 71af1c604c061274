/*!
Aggregation of broad-phase query results.

A broad-phase AABB query reports colliders, and one body may own several of them, so
the same body can show up many times in a single query. [`WorldQuery`] folds that
stream into:
- the raw collider list, one entry per report (duplicates kept),
- the list of distinct bodies, in first-seen order.

It also answers "which of these bodies is closest to a point". The aggregator never
mutates the world; it only records handles and reads positions.
*/

use std::collections::HashSet;

use nalgebra::Point2;
use rapier2d::prelude::{Collider, ColliderHandle, RigidBodyHandle};

use crate::physics_world::{PhysicsWorld, QueryCallback};

/// Per-query result container. Build a fresh one (or [`WorldQuery::reset`]) for every query.
#[derive(Debug, Default, Clone)]
pub struct WorldQuery {
    bodies: Vec<RigidBodyHandle>,
    colliders: Vec<ColliderHandle>,
    seen: HashSet<RigidBodyHandle>,
}

impl WorldQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.colliders.clear();
        self.seen.clear();
    }

    /// Record one collider hit owned by `body`.
    ///
    /// Colliders without a parent body are recorded in [`WorldQuery::colliders`] only.
    /// Always returns `true` so the engine keeps enumerating.
    pub fn record(&mut self, collider: ColliderHandle, body: Option<RigidBodyHandle>) -> bool {
        self.colliders.push(collider);

        if let Some(body) = body {
            if self.seen.insert(body) {
                self.bodies.push(body);
            }
        }

        true
    }

    /// Distinct bodies hit, in first-seen order.
    pub fn bodies(&self) -> &[RigidBodyHandle] {
        &self.bodies
    }

    /// Every collider reported since the last reset, duplicates included.
    pub fn colliders(&self) -> &[ColliderHandle] {
        &self.colliders
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Body whose origin is closest to `point`.
    ///
    /// - No bodies: `None`.
    /// - One body: that body, however far away it is.
    /// - Otherwise a linear scan on squared distance; ties keep the earliest body.
    ///
    /// Bodies that no longer exist in `world` are skipped by the scan.
    pub fn find_body_nearest(
        &self,
        world: &PhysicsWorld,
        point: Point2<f32>,
    ) -> Option<RigidBodyHandle> {
        match self.bodies.as_slice() {
            [] => None,
            [only] => Some(*only),
            bodies => {
                let mut best: Option<(RigidBodyHandle, f32)> = None;
                for &body in bodies {
                    let Some(pos) = world.body_position(body) else {
                        continue;
                    };
                    let dist_sq = (pos - point).norm_squared();
                    if best.is_none_or(|(_, best_sq)| dist_sq < best_sq) {
                        best = Some((body, dist_sq));
                    }
                }
                best.map(|(body, _)| body)
            }
        }
    }
}

impl QueryCallback for WorldQuery {
    fn report_collider(&mut self, handle: ColliderHandle, collider: &Collider) -> bool {
        self.record(handle, collider.parent())
    }
}
