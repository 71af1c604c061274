use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
}

// Default 2D projection: one unit per logical pixel, origin at the window center.
// The sandbox viewport does all zooming and panning, so this camera never moves.
fn add_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}
