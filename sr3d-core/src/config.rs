/// Render settings shared by the core pipeline and front ends
use crate::camera::{DEFAULT_FOCAL_DISTANCE, DEFAULT_MOVE_SPEED, DEFAULT_ROTATE_SPEED};
use crate::error::{Error, Result};
use crate::projection::ProjectionMode;
use crate::raster::Viewport;
use crate::scene::DrawMode;
use crate::surface::Color;
use crate::vector::Real;

pub const DEFAULT_CANVAS_SIZE: u32 = 700;
/// Distance in front of the camera at which loaded shapes are placed
pub const DEFAULT_OBJECT_DEPTH: Real = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub viewport: Viewport,
    pub projection: ProjectionMode,
    pub focal_distance: Real,
    pub move_speed: Real,
    /// Degrees per frame
    pub rotate_speed: Real,
    pub draw_mode: DrawMode,
    pub wireframe_color: Color,
    pub outline_color: Color,
    /// Colour of pixels nothing was drawn on
    pub background_color: Color,
    pub object_depth: Real,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "viewport size must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.focal_distance > 0.0 && self.focal_distance.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "focal distance must be positive, got {}",
                self.focal_distance
            )));
        }
        for (name, value) in [
            ("move speed", self.move_speed),
            ("rotate speed", self.rotate_speed),
            ("object depth", self.object_depth),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{} must be finite, got {}", name, value)));
            }
        }
        Ok(())
    }

    /// Resize the canvas; the viewport height follows its aspect ratio
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        if width > 0 {
            self.viewport.height = height as Real / width as Real * self.viewport.width;
        }
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            viewport: Viewport::default(),
            projection: ProjectionMode::PerspectiveDivide,
            focal_distance: DEFAULT_FOCAL_DISTANCE,
            move_speed: DEFAULT_MOVE_SPEED,
            rotate_speed: DEFAULT_ROTATE_SPEED,
            draw_mode: DrawMode::Wireframe,
            wireframe_color: Color::WHITE,
            outline_color: Color::BLACK,
            background_color: Color::BLACK,
            object_depth: DEFAULT_OBJECT_DEPTH,
        }
    }
}
