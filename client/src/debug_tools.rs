//! Debug/performance tooling for native dev builds.
//!
//! Perf overlay plus a small text readout of the sandbox session.

use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::world::{Sandbox, SandboxSystems};

#[derive(Component)]
struct SessionReadout;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, (spawn_perf_ui, spawn_session_readout));
    app.add_systems(
        Update,
        update_session_readout
            .after(SandboxSystems::Tick)
            .run_if(resource_exists::<Sandbox>),
    );
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn spawn_session_readout(mut commands: Commands) {
    commands.spawn((
        Name::new("Session readout"),
        SessionReadout,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(8.0),
            bottom: Val::Px(8.0),
            ..default()
        },
    ));
}

fn update_session_readout(
    sandbox: Res<Sandbox>,
    mut readout: Single<&mut Text, With<SessionReadout>>,
) {
    let viewport = sandbox.viewport();
    readout.0 = format!(
        "balls {} | spawns left {} | scale {:.2} | center ({:.1}, {:.1}) | {}",
        sandbox.live_spawned_count(),
        sandbox.spawns_remaining(),
        viewport.scale(),
        viewport.center().x,
        viewport.center().y,
        if sandbox.gesture().is_pinching() {
            "pinching"
        } else {
            "idle"
        },
    );
}
