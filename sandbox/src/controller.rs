/*!
Per-tick orchestration and user-driven mutation of the sandbox.

`InteractionController` owns the physics world and everything that mutates it:
- `update`: step the world, then maybe spawn one ball (in that order, so a ball is never
  integrated in the tick that created it),
- `on_tap`: remove every spawned ball whose collider overlaps a small box around the tap,
- `on_pinch_*`: zoom and pan the viewport from a two-finger gesture.

Everything runs on one thread, one call at a time. Query results are consumed inside the
call that produced them, so no body handle outlives a removal.
*/

use nalgebra::{Point2, Vector2, distance};
use rapier2d::prelude::RigidBodyHandle;

use crate::{
    config::SandboxConfig,
    error::ConfigError,
    physics_world::PhysicsWorld,
    query::WorldQuery,
    roles::{BodyRole, BodyRoles},
    session::{GestureState, PinchAnchor, SimulationSession},
    spawner::BallSpec,
    stepper::SimulationStepper,
    terrain::terrain_body,
    viewport::Viewport,
};

pub struct InteractionController {
    world: PhysicsWorld,
    stepper: SimulationStepper,
    viewport: Viewport,
    roles: BodyRoles,
    session: SimulationSession,
    terrain: RigidBodyHandle,
    tap_half_extent: f32,
    min_pinch_distance: f32,
}

impl InteractionController {
    /// Start a session: validate `config`, build the world and its terrain.
    ///
    /// `screen_size` (pixels) fixes the initial world height through the aspect ratio.
    pub fn new(config: SandboxConfig, screen_size: Vector2<f32>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut viewport = Viewport::new(config.world_width, screen_size);
        viewport.set_scale(config.initial_scale);

        let mut world = PhysicsWorld::new(config.gravity_y);
        let mut roles = BodyRoles::new();

        let (body, colliders) = terrain_body(viewport.world_size());
        let terrain = world.insert_body(body, colliders);
        roles.insert(terrain, BodyRole::Terrain);

        let world_size = viewport.world_size();
        log::info!(
            "Sandbox session started: world {:.1}x{:.1} m, up to {} balls",
            world_size.x,
            world_size.y,
            config.spawn.max_bodies
        );

        Ok(Self {
            world,
            stepper: SimulationStepper::new(
                config.timestep,
                config.velocity_iterations,
                config.position_iterations,
            ),
            viewport,
            roles,
            session: SimulationSession::new(config.spawn),
            terrain,
            tap_half_extent: config.tap_half_extent,
            min_pinch_distance: config.min_pinch_distance,
        })
    }

    /// One logical tick: step, then spawn.
    ///
    /// Returns the ball spawned this tick, if any.
    pub fn update(&mut self) -> Option<RigidBodyHandle> {
        self.stepper.step(&mut self.world);

        let spec = self
            .session
            .spawner
            .try_spawn(self.viewport.world_size())?;
        Some(self.spawn_ball(spec))
    }

    /// Insert a ball and mark it destructible.
    pub fn spawn_ball(&mut self, spec: BallSpec) -> RigidBodyHandle {
        let (body, collider) = spec.build();
        let handle = self.world.insert_body(body, [collider]);
        self.roles.insert(handle, BodyRole::SpawnedEntity);
        handle
    }

    /// Remove every spawned ball overlapping the tap box. Terrain is never removed.
    ///
    /// `screen` is in viewport screen space. Returns the number of bodies removed.
    pub fn on_tap(&mut self, screen: Point2<f32>) -> usize {
        let center = self.viewport.screen_to_world(screen);
        let half = Vector2::new(self.tap_half_extent, self.tap_half_extent);

        let mut query = WorldQuery::new();
        self.world
            .query_aabb(center - half, center + half, &mut query);

        let mut removed = 0;
        for &body in query.bodies() {
            if !self.roles.is_destructible(body) {
                continue;
            }
            if self.world.remove_body(body) {
                self.roles.remove(body);
                removed += 1;
            }
        }

        log::debug!(
            "Tap at ({:.2}, {:.2}): {} hit(s), {} bodies, {} removed",
            center.x,
            center.y,
            query.colliders().len(),
            query.bodies().len(),
            removed
        );
        removed
    }

    /// Capture the viewport and both finger positions, then apply the (identity) pinch.
    pub fn on_pinch_begin(&mut self, p0: Point2<f32>, p1: Point2<f32>) {
        let anchor = PinchAnchor {
            center: self.viewport.center(),
            scale: self.viewport.scale(),
            p0,
            p1,
        };
        self.session.gesture = GestureState::PinchActive(anchor);
        log::debug!(
            "Pinch begin: center ({:.2}, {:.2}), scale {:.3}",
            anchor.center.x,
            anchor.center.y,
            anchor.scale
        );

        self.pinch_viewport(&anchor, p0, p1);
    }

    /// Recompute the viewport from the anchor and the current finger positions.
    ///
    /// Ignored unless a pinch is active.
    pub fn on_pinch_continue(&mut self, p0: Point2<f32>, p1: Point2<f32>) {
        let GestureState::PinchActive(anchor) = self.session.gesture else {
            return;
        };
        self.pinch_viewport(&anchor, p0, p1);
    }

    pub fn on_pinch_end(&mut self, _p0: Point2<f32>, _p1: Point2<f32>) {
        if self.session.gesture.is_pinching() {
            log::debug!(
                "Pinch end: center ({:.2}, {:.2}), scale {:.3}",
                self.viewport.center().x,
                self.viewport.center().y,
                self.viewport.scale()
            );
        }
        self.session.gesture = GestureState::Idle;
    }

    fn pinch_viewport(&mut self, anchor: &PinchAnchor, p0: Point2<f32>, p1: Point2<f32>) {
        let (center, scale) =
            pinch_transform(&self.viewport, anchor, p0, p1, self.min_pinch_distance);
        self.viewport.set_center(center);
        self.viewport.set_scale(scale);
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// For the host to report screen size changes.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn roles(&self) -> &BodyRoles {
        &self.roles
    }

    pub fn terrain(&self) -> RigidBodyHandle {
        self.terrain
    }

    pub fn gesture(&self) -> GestureState {
        self.session.gesture
    }

    pub fn spawns_remaining(&self) -> u32 {
        self.session.spawner.remaining()
    }

    /// Spawned balls still in the world.
    pub fn live_spawned_count(&self) -> usize {
        self.roles.count(BodyRole::SpawnedEntity)
    }

    pub fn stepper(&self) -> &SimulationStepper {
        &self.stepper
    }
}

/// New viewport `(center, scale)` for a pinch that started at `anchor`.
///
/// - Both finger distances are floored to `min_distance` pixels.
/// - scale = anchor.scale * dist_now / dist_anchor.
/// - center = anchor.center + (world(mid_anchor) - world(mid_now)), both midpoints converted
///   with the viewport as it is now.
pub fn pinch_transform(
    viewport: &Viewport,
    anchor: &PinchAnchor,
    p0: Point2<f32>,
    p1: Point2<f32>,
    min_distance: f32,
) -> (Point2<f32>, f32) {
    let dist_org = distance(&anchor.p0, &anchor.p1).max(min_distance);
    let dist_new = distance(&p0, &p1).max(min_distance);
    let scale = anchor.scale * (dist_new / dist_org);

    let mid_org = nalgebra::center(&anchor.p0, &anchor.p1);
    let mid_new = nalgebra::center(&p0, &p1);
    let world_org = viewport.screen_to_world(mid_org);
    let world_new = viewport.screen_to_world(mid_new);

    (anchor.center + (world_org - world_new), scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnConfig;

    const SCREEN: [f32; 2] = [1000.0, 500.0];

    fn screen() -> Vector2<f32> {
        Vector2::from(SCREEN)
    }

    fn weightless(max_bodies: u32) -> SandboxConfig {
        SandboxConfig {
            gravity_y: 0.0,
            spawn: SpawnConfig {
                max_bodies,
                ..SpawnConfig::default()
            },
            ..SandboxConfig::default()
        }
    }

    fn ball(x: f32, y: f32, radius: f32) -> BallSpec {
        BallSpec {
            position: Point2::new(x, y),
            radius,
        }
    }

    /// World point at the top surface of the floor.
    fn floor_top(ctl: &InteractionController) -> Point2<f32> {
        ctl.world().body_position(ctl.terrain()).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = SandboxConfig::default();
        config.tap_half_extent = 0.0;
        assert!(matches!(
            InteractionController::new(config, screen()),
            Err(ConfigError::TapHalfExtent(_))
        ));
    }

    #[test]
    fn session_starts_with_terrain_only() {
        let ctl = InteractionController::new(SandboxConfig::default(), screen()).unwrap();

        assert_eq!(ctl.world().body_count(), 1);
        assert_eq!(ctl.roles().get(ctl.terrain()), Some(BodyRole::Terrain));
        assert_eq!(ctl.live_spawned_count(), 0);
        assert_eq!(ctl.spawns_remaining(), 1000);
        assert!((ctl.viewport().scale() - 1.5).abs() < 1.0e-6);

        // 100 m wide at 2:1 -> 50 m tall -> walls 6.25 m.
        let origin = floor_top(&ctl);
        assert!((origin.y + 6.25).abs() < 1.0e-4);
    }

    #[test]
    fn update_steps_before_spawning() {
        let config = SandboxConfig::default();
        let mut ctl = InteractionController::new(config, screen()).unwrap();

        let mut reference = crate::spawner::BallSpawner::new(config.spawn);
        let expected = reference.try_spawn(ctl.viewport().world_size()).unwrap();

        let first = ctl.update().expect("first tick spawns");
        assert_eq!(ctl.stepper().steps(), 1);
        // Spawned after the step: not yet moved by gravity.
        assert_eq!(ctl.world().body_position(first), Some(expected.position));

        ctl.update();
        let after = ctl.world().body_position(first).unwrap();
        assert!(after.y < expected.position.y);
    }

    #[test]
    fn population_grows_then_plateaus_at_the_cap() {
        let mut ctl = InteractionController::new(weightless(5), screen()).unwrap();

        let spawned: Vec<_> = (0..12).filter_map(|_| ctl.update()).collect();

        assert_eq!(spawned.len(), 5);
        assert_eq!(ctl.live_spawned_count(), 5);
        assert_eq!(ctl.spawns_remaining(), 0);
        assert_eq!(ctl.world().body_count(), 6);
        assert_eq!(ctl.stepper().steps(), 12);
    }

    #[test]
    fn tap_removes_spawned_ball_but_keeps_terrain() {
        let mut ctl = InteractionController::new(weightless(0), screen()).unwrap();
        let top = floor_top(&ctl);
        let target = ctl.spawn_ball(ball(top.x, top.y + 0.25, 0.2));

        let tap = ctl.viewport().world_to_screen(top);
        assert_eq!(ctl.on_tap(tap), 1);

        assert!(!ctl.world().contains(target));
        assert!(ctl.world().contains(ctl.terrain()));
        assert_eq!(ctl.roles().get(target), None);
        assert_eq!(ctl.live_spawned_count(), 0);
    }

    #[test]
    fn tap_only_removes_balls_inside_the_box() {
        let mut ctl = InteractionController::new(weightless(0), screen()).unwrap();
        let a = ctl.spawn_ball(ball(10.0, 10.0, 0.2));
        let b = ctl.spawn_ball(ball(10.45, 10.0, 0.2));
        let outside = ctl.spawn_ball(ball(14.0, 10.0, 0.2));

        let tap = ctl.viewport().world_to_screen(Point2::new(10.1, 10.0));
        assert_eq!(ctl.on_tap(tap), 2);

        assert!(!ctl.world().contains(a));
        assert!(!ctl.world().contains(b));
        assert!(ctl.world().contains(outside));
        assert_eq!(ctl.live_spawned_count(), 1);
    }

    #[test]
    fn tap_on_empty_space_removes_nothing() {
        let mut ctl = InteractionController::new(weightless(0), screen()).unwrap();
        ctl.spawn_ball(ball(-20.0, 15.0, 0.3));

        let tap = ctl.viewport().world_to_screen(Point2::new(20.0, 15.0));
        assert_eq!(ctl.on_tap(tap), 0);
        assert_eq!(ctl.world().body_count(), 2);
    }

    #[test]
    fn repeated_tap_in_the_same_tick_is_harmless() {
        let mut ctl = InteractionController::new(weightless(0), screen()).unwrap();
        ctl.spawn_ball(ball(0.0, 12.0, 0.3));

        let tap = ctl.viewport().world_to_screen(Point2::new(0.0, 12.0));
        assert_eq!(ctl.on_tap(tap), 1);
        assert_eq!(ctl.on_tap(tap), 0);
        assert_eq!(ctl.world().body_count(), 1);
    }

    #[test]
    fn ball_spawned_at_end_of_tick_is_tappable_right_away() {
        let mut ctl = InteractionController::new(weightless(1), screen()).unwrap();
        let spawned = ctl.update().expect("first tick spawns");
        let position = ctl.world().body_position(spawned).unwrap();

        let tap = ctl.viewport().world_to_screen(position);
        assert_eq!(ctl.on_tap(tap), 1);
        assert!(!ctl.world().contains(spawned));
    }

    #[test]
    fn tap_at_a_cleared_spot_spares_a_ball_reusing_the_slot() {
        let mut ctl = InteractionController::new(weightless(0), screen()).unwrap();
        let first = ctl.spawn_ball(ball(0.0, 10.0, 0.5));
        ctl.update();

        let old_spot = ctl.viewport().world_to_screen(Point2::new(0.0, 10.0));
        assert_eq!(ctl.on_tap(old_spot), 1);
        assert!(!ctl.world().contains(first));

        // Same tick, no step in between: the new ball takes the freed slot.
        let far = ctl.spawn_ball(ball(30.0, 10.0, 0.5));
        assert_eq!(ctl.on_tap(old_spot), 0);
        assert!(ctl.world().contains(far));
        assert_eq!(ctl.live_spawned_count(), 1);

        let new_spot = ctl.viewport().world_to_screen(Point2::new(30.0, 10.0));
        assert_eq!(ctl.on_tap(new_spot), 1);
        assert!(!ctl.world().contains(far));
    }

    #[test]
    fn pinch_doubling_finger_distance_doubles_scale() {
        let viewport = Viewport::new(100.0, screen());
        let anchor = PinchAnchor {
            center: Point2::origin(),
            scale: 1.0,
            p0: Point2::new(0.0, 0.0),
            p1: Point2::new(2.0, 0.0),
        };

        let (_, scale) = pinch_transform(
            &viewport,
            &anchor,
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            1.0,
        );
        assert!((scale - 2.0).abs() < 1.0e-6);
    }

    #[test]
    fn pinch_distances_are_floored() {
        let viewport = Viewport::new(100.0, screen());
        let anchor = PinchAnchor {
            center: Point2::origin(),
            scale: 1.0,
            p0: Point2::new(5.0, 5.0),
            p1: Point2::new(5.0, 5.0),
        };

        let (_, scale) = pinch_transform(
            &viewport,
            &anchor,
            Point2::new(5.0, 5.0),
            Point2::new(8.0, 5.0),
            1.0,
        );
        assert!((scale - 3.0).abs() < 1.0e-6);
        assert!(scale.is_finite());
    }

    #[test]
    fn pinch_begin_keeps_viewport_unchanged() {
        let mut ctl = InteractionController::new(SandboxConfig::default(), screen()).unwrap();
        let before = *ctl.viewport();

        ctl.on_pinch_begin(Point2::new(100.0, 100.0), Point2::new(300.0, 220.0));

        assert!(ctl.gesture().is_pinching());
        assert!((ctl.viewport().scale() - before.scale()).abs() < 1.0e-6);
        assert!((ctl.viewport().center() - before.center()).norm() < 1.0e-5);
    }

    #[test]
    fn pinch_continue_zooms_from_the_anchor() {
        let mut ctl = InteractionController::new(SandboxConfig::default(), screen()).unwrap();
        ctl.on_pinch_begin(Point2::new(400.0, 250.0), Point2::new(600.0, 250.0));

        ctl.on_pinch_continue(Point2::new(300.0, 250.0), Point2::new(700.0, 250.0));
        assert!((ctl.viewport().scale() - 3.0).abs() < 1.0e-5);

        // Relative to the anchor, not to the previous continue.
        ctl.on_pinch_continue(Point2::new(400.0, 250.0), Point2::new(600.0, 250.0));
        assert!((ctl.viewport().scale() - 1.5).abs() < 1.0e-5);
    }

    #[test]
    fn two_finger_drag_pans_the_center() {
        let mut ctl = InteractionController::new(SandboxConfig::default(), screen()).unwrap();
        let ppm = ctl.viewport().pixels_per_meter();

        ctl.on_pinch_begin(Point2::new(400.0, 200.0), Point2::new(600.0, 200.0));
        ctl.on_pinch_continue(Point2::new(430.0, 200.0), Point2::new(630.0, 200.0));

        // Fingers moved +30 px: the world follows them, so the center moves the other way.
        let center = ctl.viewport().center();
        assert!((center.x + 30.0 / ppm).abs() < 1.0e-4);
        assert!(center.y.abs() < 1.0e-4);
        assert!((ctl.viewport().scale() - 1.5).abs() < 1.0e-6);
    }

    #[test]
    fn pinch_events_outside_a_pinch_are_ignored() {
        let mut ctl = InteractionController::new(SandboxConfig::default(), screen()).unwrap();
        let before = *ctl.viewport();

        ctl.on_pinch_continue(Point2::new(0.0, 0.0), Point2::new(900.0, 0.0));
        assert_eq!(*ctl.viewport(), before);

        ctl.on_pinch_begin(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0));
        ctl.on_pinch_end(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0));
        assert_eq!(ctl.gesture(), GestureState::Idle);

        let after_end = *ctl.viewport();
        ctl.on_pinch_continue(Point2::new(0.0, 0.0), Point2::new(400.0, 0.0));
        assert_eq!(*ctl.viewport(), after_end);
    }

    #[test]
    fn new_pinch_overwrites_the_anchor() {
        let mut ctl = InteractionController::new(SandboxConfig::default(), screen()).unwrap();

        ctl.on_pinch_begin(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0));
        ctl.on_pinch_continue(Point2::new(0.0, 0.0), Point2::new(200.0, 0.0));
        ctl.on_pinch_end(Point2::new(0.0, 0.0), Point2::new(200.0, 0.0));
        assert!((ctl.viewport().scale() - 3.0).abs() < 1.0e-5);

        ctl.on_pinch_begin(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0));
        match ctl.gesture() {
            GestureState::PinchActive(anchor) => assert!((anchor.scale - 3.0).abs() < 1.0e-5),
            GestureState::Idle => panic!("pinch should be active"),
        }
        ctl.on_pinch_continue(Point2::new(0.0, 0.0), Point2::new(50.0, 0.0));
        assert!((ctl.viewport().scale() - 1.5).abs() < 1.0e-5);
    }
}
