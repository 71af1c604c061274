use nalgebra::Vector2;
use rapier2d::prelude::*;

use crate::constants::{
    MATERIAL_DENSITY, MATERIAL_FRICTION, MATERIAL_RESTITUTION, TERRAIN_THICKNESS_M,
};

/// Fixed "open box" holding the balls: a floor plus a short wall at each side.
///
/// The body origin sits `wall_height` below y = 0, with `wall_height = world_height / 8`.
/// In body space the floor top is at y = 0 and the walls rise to `wall_height`.
pub fn terrain_body(world_size: Vector2<f32>) -> (RigidBody, Vec<Collider>) {
    let half_width = world_size.x * 0.5;
    let wall_height = wall_height(world_size);
    let half_thickness = TERRAIN_THICKNESS_M * 0.5;

    let body = RigidBodyBuilder::fixed()
        .translation(Vector::new(0.0, -wall_height))
        .build();

    // (center, half extents) in body space.
    let boxes = [
        // Floor: [-w/2, w/2] x [-t, 0]
        ((0.0, -half_thickness), (half_width, half_thickness)),
        // Left wall: [-w/2 - t, -w/2] x [0, wall_height]
        (
            (-half_width - half_thickness, wall_height * 0.5),
            (half_thickness, wall_height * 0.5),
        ),
        // Right wall: [w/2, w/2 + t] x [0, wall_height]
        (
            (half_width + half_thickness, wall_height * 0.5),
            (half_thickness, wall_height * 0.5),
        ),
    ];

    let colliders = boxes
        .into_iter()
        .map(|((cx, cy), (hx, hy))| {
            ColliderBuilder::cuboid(hx, hy)
                .translation(Vector::new(cx, cy))
                .density(MATERIAL_DENSITY)
                .friction(MATERIAL_FRICTION)
                .restitution(MATERIAL_RESTITUTION)
                .build()
        })
        .collect();

    (body, colliders)
}

#[inline]
pub fn wall_height(world_size: Vector2<f32>) -> f32 {
    world_size.y / 8.0
}
