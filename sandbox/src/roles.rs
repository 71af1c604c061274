use std::collections::HashMap;

use rapier2d::prelude::RigidBodyHandle;

/// What a body is for, as far as user interaction goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyRole {
    /// Permanent level geometry. Never removed by a tap.
    Terrain,
    /// A ball created by the spawner. Removable by a tap.
    SpawnedEntity,
}

impl BodyRole {
    pub fn is_destructible(self) -> bool {
        matches!(self, BodyRole::SpawnedEntity)
    }
}

/// Role of every body the session created, keyed by body handle.
///
/// Kept next to the world rather than in Rapier's `user_data`, so the meaning of a body
/// never depends on an engine field that something else might reuse.
#[derive(Debug, Default, Clone)]
pub struct BodyRoles {
    roles: HashMap<RigidBodyHandle, BodyRole>,
}

impl BodyRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: RigidBodyHandle, role: BodyRole) {
        self.roles.insert(body, role);
    }

    pub fn remove(&mut self, body: RigidBodyHandle) -> Option<BodyRole> {
        self.roles.remove(&body)
    }

    pub fn get(&self, body: RigidBodyHandle) -> Option<BodyRole> {
        self.roles.get(&body).copied()
    }

    /// True only for bodies recorded as [`BodyRole::SpawnedEntity`].
    pub fn is_destructible(&self, body: RigidBodyHandle) -> bool {
        self.get(body).is_some_and(BodyRole::is_destructible)
    }

    /// Number of bodies currently recorded with `role`.
    pub fn count(&self, role: BodyRole) -> usize {
        self.roles.values().filter(|r| **r == role).count()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
