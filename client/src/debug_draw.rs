use bevy::prelude::*;
use nalgebra::Point2;
use sandbox::{BodyRole, OutlineShape};

use crate::world::{Sandbox, SandboxSystems, screen_to_camera};

const TERRAIN_COLOR: Color = Color::srgb(0.45, 0.8, 0.45);
const BALL_COLOR: Color = Color::srgb(0.95, 0.7, 0.3);
const UNTAGGED_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, draw_outlines.after(SandboxSystems::Tick));
}

/// Outline every collider through the sandbox viewport.
fn draw_outlines(mut gizmos: Gizmos, sandbox: Option<Res<Sandbox>>) {
    let Some(sandbox) = sandbox else {
        return;
    };
    let viewport = sandbox.viewport();
    let screen_size = viewport.screen_size();
    let ppm = viewport.pixels_per_meter();
    let to_camera = |world: Point2<f32>| screen_to_camera(screen_size, viewport.world_to_screen(world));

    for outline in sandbox.world().outlines() {
        let color = match outline.body.and_then(|body| sandbox.roles().get(body)) {
            Some(BodyRole::Terrain) => TERRAIN_COLOR,
            Some(BodyRole::SpawnedEntity) => BALL_COLOR,
            None => UNTAGGED_COLOR,
        };

        match outline.shape {
            OutlineShape::Circle { center, radius } => {
                gizmos.circle_2d(
                    Isometry2d::from_translation(to_camera(center)),
                    radius * ppm,
                    color,
                );
            }
            OutlineShape::Box {
                center,
                half_extents,
                angle,
            } => {
                gizmos.rect_2d(
                    Isometry2d::new(to_camera(center), Rot2::radians(angle)),
                    Vec2::new(half_extents.x, half_extents.y) * 2.0 * ppm,
                    color,
                );
            }
        }
    }
}
