//! The sandbox session as a Bevy resource.
//!
//! `Sandbox` wraps the controller. Input systems run first, then one logical tick per frame.

use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};
use nalgebra::{Point2, Vector2};
use sandbox::{InteractionController, SandboxConfig};

#[derive(Resource, Deref, DerefMut)]
pub struct Sandbox(InteractionController);

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxSystems {
    /// Taps and gestures, applied before the tick.
    Input,
    Tick,
}

pub(super) fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (SandboxSystems::Input, SandboxSystems::Tick)
            .chain()
            .run_if(resource_exists::<Sandbox>),
    );

    app.add_systems(Startup, start_session);
    app.add_systems(
        Update,
        (sync_screen_size, tick).chain().in_set(SandboxSystems::Tick),
    );
}

fn start_session(
    mut commands: Commands,
    window: Single<&Window, With<PrimaryWindow>>,
    mut exit: MessageWriter<AppExit>,
) {
    let screen = Vector2::new(window.width(), window.height());
    match InteractionController::new(SandboxConfig::default(), screen) {
        Ok(controller) => commands.insert_resource(Sandbox(controller)),
        Err(err) => {
            error!("Could not start sandbox session: {err}");
            exit.write(AppExit::error());
        }
    }
}

fn sync_screen_size(mut sandbox: ResMut<Sandbox>, mut resized: MessageReader<WindowResized>) {
    for message in resized.read() {
        sandbox
            .viewport_mut()
            .set_screen_size(Vector2::new(message.width, message.height));
    }
}

fn tick(mut sandbox: ResMut<Sandbox>) {
    sandbox.update();
}

/// Window position (logical pixels, top-left origin, Y down) to sandbox screen space
/// (bottom-left origin, Y up).
pub fn window_to_screen(window: &Window, position: Vec2) -> Point2<f32> {
    Point2::new(position.x, window.height() - position.y)
}

/// Sandbox screen space to the 2D camera's pixel space (origin at the window center).
pub fn screen_to_camera(screen_size: Vector2<f32>, screen: Point2<f32>) -> Vec2 {
    Vec2::new(screen.x - screen_size.x * 0.5, screen.y - screen_size.y * 0.5)
}
