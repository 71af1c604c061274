use bevy::{input::touch::Touch, prelude::*, window::PrimaryWindow};
use leafwing_input_manager::prelude::*;
use nalgebra::Point2;

use crate::world::{Sandbox, SandboxSystems, window_to_screen};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    LeftClick,
}

/// A lone touch that wanders further than this (logical pixels) is a drag, not a tap.
const TAP_SLOP_PX: f32 = 12.0;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::LeftClick, MouseButton::Left);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());

    app.add_systems(
        Update,
        (click_to_tap, touch_gestures).in_set(SandboxSystems::Input),
    );
}

fn click_to_tap(
    actions: Res<ActionState<InputAction>>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut sandbox: ResMut<Sandbox>,
) {
    if !actions.just_pressed(&InputAction::LeftClick) {
        return;
    }
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    sandbox.on_tap(window_to_screen(&window, cursor));
}

/// Touch bookkeeping across frames.
struct TouchTracker {
    /// Finger ids driving the current pinch.
    pinch: Option<[u64; 2]>,
    /// Last known positions of the pinch fingers, reported on pinch end.
    last: [Point2<f32>; 2],
    /// Set once a pinch starts; no tap fires until every finger is lifted.
    pinched: bool,
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self {
            pinch: None,
            last: [Point2::origin(); 2],
            pinched: false,
        }
    }
}

/// Two fingers down: pinch-begin, then pinch-continue each frame, pinch-end when either
/// lifts. A single finger lifted near where it landed is a tap.
fn touch_gestures(
    touches: Res<Touches>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut sandbox: ResMut<Sandbox>,
    mut tracker: Local<TouchTracker>,
) {
    let to_screen = |touch: &Touch| window_to_screen(&window, touch.position());

    if let Some([a, b]) = tracker.pinch {
        match (touches.get_pressed(a), touches.get_pressed(b)) {
            (Some(first), Some(second)) => {
                let points = [to_screen(first), to_screen(second)];
                sandbox.on_pinch_continue(points[0], points[1]);
                tracker.last = points;
            }
            _ => {
                let [p0, p1] = tracker.last;
                sandbox.on_pinch_end(p0, p1);
                tracker.pinch = None;
            }
        }
    } else {
        let mut pressed = touches.iter();
        if let (Some(first), Some(second)) = (pressed.next(), pressed.next()) {
            let points = [to_screen(first), to_screen(second)];
            sandbox.on_pinch_begin(points[0], points[1]);
            tracker.pinch = Some([first.id(), second.id()]);
            tracker.last = points;
            tracker.pinched = true;
        }
    }

    if !tracker.pinched {
        for touch in touches.iter_just_released() {
            if touch.distance().length() <= TAP_SLOP_PX {
                sandbox.on_tap(to_screen(touch));
            }
        }
    }

    if tracker.pinch.is_none() && touches.iter().next().is_none() {
        tracker.pinched = false;
    }
}
