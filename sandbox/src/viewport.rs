//! Mapping between screen pixels and world meters.
//!
//! Screen space has its origin at the bottom-left corner, Y up, in pixels.
//! World space is centered on `center`, Y up, in meters.
//!
//! The world width is fixed; the world height follows the screen aspect ratio. At scale
//! 1.0 the full world width spans the screen width; larger scales zoom in.

use nalgebra::{Point2, Vector2};

/// Fallback screen size used until the host reports a real one.
pub const DEFAULT_SCREEN_SIZE_PX: [f32; 2] = [1280.0, 720.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    world_width: f32,
    screen_size: Vector2<f32>,
    center: Point2<f32>,
    scale: f32,
}

impl Viewport {
    pub fn new(world_width: f32, screen_size: Vector2<f32>) -> Self {
        let mut viewport = Self {
            world_width,
            screen_size: Vector2::from(DEFAULT_SCREEN_SIZE_PX),
            center: Point2::origin(),
            scale: 1.0,
        };
        viewport.set_screen_size(screen_size);
        viewport
    }

    /// World extent in meters: `(width, width * screen_h / screen_w)`.
    pub fn world_size(&self) -> Vector2<f32> {
        let aspect = self.screen_size.y / self.screen_size.x;
        Vector2::new(self.world_width, self.world_width * aspect)
    }

    pub fn screen_size(&self) -> Vector2<f32> {
        self.screen_size
    }

    pub fn center(&self) -> Point2<f32> {
        self.center
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Screen pixels per world meter at the current scale.
    pub fn pixels_per_meter(&self) -> f32 {
        self.screen_size.x / self.world_width * self.scale
    }

    pub fn set_center(&mut self, center: Point2<f32>) {
        if center.x.is_finite() && center.y.is_finite() {
            self.center = center;
        }
    }

    /// Non-positive or non-finite scales are ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    /// Ignored unless both sides are positive.
    pub fn set_screen_size(&mut self, size: Vector2<f32>) {
        if size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0 {
            self.screen_size = size;
        }
    }

    pub fn screen_to_world(&self, screen: Point2<f32>) -> Point2<f32> {
        let from_middle = screen - Point2::from(self.screen_size * 0.5);
        self.center + from_middle / self.pixels_per_meter()
    }

    pub fn world_to_screen(&self, world: Point2<f32>) -> Point2<f32> {
        let from_center = (world - self.center) * self.pixels_per_meter();
        Point2::from(self.screen_size * 0.5) + from_center
    }
}
