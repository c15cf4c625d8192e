/// Per-frame geometry pipeline: model-view transform, projection, rasterization
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::projection::Projector;
use crate::raster::Rasterizer;
use crate::scene::{DrawMode, Scene};
use crate::surface::{Color, Surface};
use crate::transform;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces_drawn: usize,
    pub faces_skipped: usize,
}

pub struct Renderer {
    projector: Projector,
    rasterizer: Rasterizer,
    draw_mode: DrawMode,
    wireframe_color: Color,
    outline_color: Color,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            projector: Projector::new(config.projection, config.focal_distance),
            rasterizer: Rasterizer::new(config.viewport, config.canvas_width, config.canvas_height)?,
            draw_mode: config.draw_mode,
            wireframe_color: config.wireframe_color,
            outline_color: config.outline_color,
        })
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
    }

    pub fn toggle_draw_mode(&mut self) {
        self.draw_mode = self.draw_mode.toggle();
        log::debug!("Draw mode: {:?}", self.draw_mode);
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Centre the canvas on a surface of the given size
    pub fn fit_surface(&mut self, width: u32, height: u32) {
        self.rasterizer.center_on(width, height);
    }

    /// Draw every face of every object, in submission order
    pub fn render<S: Surface + ?Sized>(
        &self,
        scene: &Scene,
        camera: &Camera,
        surface: &mut S,
    ) -> Result<RenderStats> {
        let view = camera.view_matrix();
        let mut stats = RenderStats::default();

        for object in scene.objects() {
            let shape = scene.shape(object.shape)?;
            let model_view = transform::model_view(&view, &object.transform.model_matrix());
            if model_view.is_nan() {
                log::trace!("Skipping '{}': degenerate transform", shape.name());
                stats.faces_skipped += shape.faces().len();
                continue;
            }

            for (i, face) in shape.faces().iter().enumerate() {
                let points = shape
                    .face_vertices(i)?
                    .map(|v| self.projector.project(&(model_view * v.homogeneous())));

                if !points.iter().all(|p| self.rasterizer.in_guard_band(p)) {
                    stats.faces_skipped += 1;
                    continue;
                }

                match self.draw_mode {
                    DrawMode::Wireframe => {
                        surface.set_draw_color(self.wireframe_color);
                        self.rasterizer.draw_wireframe_triangle(surface, &points);
                    }
                    DrawMode::Solid => {
                        surface.set_draw_color(face.color);
                        self.rasterizer.draw_filled_triangle(surface, &points);
                        surface.set_draw_color(self.outline_color);
                        self.rasterizer.draw_wireframe_triangle(surface, &points);
                    }
                }
                stats.faces_drawn += 1;
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Face, Shape, Vertex};
    use crate::surface::FrameBuffer;
    use crate::transform::Transform;
    use crate::vector::{Real, Vec3};

    fn config() -> RenderConfig {
        RenderConfig::default().with_canvas(100, 100)
    }

    fn triangle_scene() -> Scene {
        let mut scene = Scene::new();
        let tri = scene.add_shape(Shape::new(
            "tri",
            vec![
                Vertex::new(-1.0, -1.0, 0.0),
                Vertex::new(1.0, -1.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0),
            ],
            vec![Face::new(0, 1, 2, Color::GREEN)],
        ));
        scene.place(tri, Transform::at(Vec3::xyz(0.0, 0.0, 4.0))).unwrap();
        scene
    }

    #[test]
    fn test_wireframe_uses_wireframe_color() {
        let renderer = Renderer::new(&config()).unwrap();
        let mut fb = FrameBuffer::new(100, 100);
        let stats = renderer
            .render(&triangle_scene(), &Camera::new(), &mut fb)
            .unwrap();
        assert_eq!(stats, RenderStats { faces_drawn: 1, faces_skipped: 0 });

        // (0, 1, 4) projects to (0, 0.25) -> canvas (0, 12.5) -> screen (50, 38)
        assert_eq!(fb.pixel(50, 38), Some(Color::WHITE));
        // interior stays empty
        assert_eq!(fb.pixel(50, 50), None);
    }

    #[test]
    fn test_solid_fills_with_face_color_and_outline() {
        let mut renderer = Renderer::new(&config()).unwrap();
        renderer.toggle_draw_mode();
        assert_eq!(renderer.draw_mode(), DrawMode::Solid);

        let mut fb = FrameBuffer::new(100, 100);
        renderer.render(&triangle_scene(), &Camera::new(), &mut fb).unwrap();
        assert_eq!(fb.pixel(50, 50), Some(Color::GREEN));
        assert_eq!(fb.pixel(50, 38), Some(Color::BLACK));
    }

    #[test]
    fn test_camera_motion_shifts_image() {
        let renderer = Renderer::new(&config()).unwrap();
        let scene = triangle_scene();

        let mut still = FrameBuffer::new(100, 100);
        renderer.render(&scene, &Camera::new(), &mut still).unwrap();

        let mut camera = Camera::with_speeds(1.0, 1.0);
        camera.move_forward(crate::camera::Axis::X);
        camera.update();
        let mut moved = FrameBuffer::new(100, 100);
        renderer.render(&scene, &camera, &mut moved).unwrap();

        // camera moved right, so the apex moves left on screen
        assert_eq!(still.pixel(50, 38), Some(Color::WHITE));
        assert_eq!(moved.pixel(50, 38), None);
        assert_eq!(moved.pixel(38, 38), Some(Color::WHITE));
    }

    #[test]
    fn test_degenerate_geometry_is_skipped() {
        let mut scene = triangle_scene();
        let tri = scene.objects()[0].shape;
        // almost on the camera plane: projections land far outside the guard band
        scene.place(tri, Transform::at(Vec3::xyz(0.0, 0.0, 0.001))).unwrap();
        let mut singular = Transform::at(Vec3::xyz(0.0, 0.0, 4.0));
        singular.scale = Vec3::xyz(Real::NAN, 1.0, 1.0);
        scene.place(tri, singular).unwrap();

        let renderer = Renderer::new(&config()).unwrap();
        let mut fb = FrameBuffer::new(100, 100);
        let stats = renderer.render(&scene, &Camera::new(), &mut fb).unwrap();
        assert_eq!(stats, RenderStats { faces_drawn: 1, faces_skipped: 2 });
    }

    #[test]
    fn test_bad_face_index_is_fatal() {
        let mut scene = Scene::new();
        let broken = scene.add_shape(Shape::new(
            "broken",
            vec![Vertex::new(0.0, 0.0, 1.0)],
            vec![Face::new(0, 0, 3, Color::RED)],
        ));
        scene.place(broken, Transform::identity()).unwrap();

        let renderer = Renderer::new(&config()).unwrap();
        let mut fb = FrameBuffer::new(100, 100);
        assert!(matches!(
            renderer.render(&scene, &Camera::new(), &mut fb),
            Err(crate::error::Error::InvalidFaceIndex { index: 3, .. })
        ));
    }
}
