/// Camera pose and per-frame motion integration
use crate::matrix::Mat44;
use crate::projection::Frustum;
use crate::raster::Viewport;
use crate::transform;
use crate::vector::{Real, Vec3, Vec4};

pub const DEFAULT_MOVE_SPEED: Real = 0.1;
/// Degrees per frame
pub const DEFAULT_ROTATE_SPEED: Real = 1.0;
pub const DEFAULT_FOCAL_DISTANCE: Real = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

/// Forward doubles as clockwise for rotations, backward as anticlockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> Real {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Pose (position, orientation) plus the velocities applied by `update`
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec4,
    /// Euler angles in degrees
    orientation: Vec3,
    translation_velocity: Vec3,
    rotation_velocity: Vec3,
    move_speed: Real,
    rotate_speed: Real,
    focal_distance: Real,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_speeds(DEFAULT_MOVE_SPEED, DEFAULT_ROTATE_SPEED)
    }

    pub fn with_speeds(move_speed: Real, rotate_speed: Real) -> Self {
        Self {
            position: Vec4::xyzw(0.0, 0.0, 0.0, 1.0),
            orientation: Vec3::zeros(),
            translation_velocity: Vec3::zeros(),
            rotation_velocity: Vec3::zeros(),
            move_speed,
            rotate_speed,
            focal_distance: DEFAULT_FOCAL_DISTANCE,
        }
    }

    pub fn with_focal_distance(mut self, distance: Real) -> Self {
        self.focal_distance = distance;
        self
    }

    pub fn position(&self) -> Vec4 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.extend(1.0);
    }

    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
    }

    pub fn translation_velocity(&self) -> Vec3 {
        self.translation_velocity
    }

    pub fn rotation_velocity(&self) -> Vec3 {
        self.rotation_velocity
    }

    pub fn move_speed(&self) -> Real {
        self.move_speed
    }

    pub fn rotate_speed(&self) -> Real {
        self.rotate_speed
    }

    pub fn focal_distance(&self) -> Real {
        self.focal_distance
    }

    pub fn start_move(&mut self, axis: Axis, direction: Direction) {
        self.translation_velocity[axis.index()] = direction.sign() * self.move_speed;
    }

    pub fn stop_move(&mut self, axis: Axis) {
        self.translation_velocity[axis.index()] = 0.0;
    }

    pub fn start_rotate(&mut self, axis: Axis, direction: Direction) {
        self.rotation_velocity[axis.index()] = direction.sign() * self.rotate_speed;
    }

    pub fn stop_rotate(&mut self, axis: Axis) {
        self.rotation_velocity[axis.index()] = 0.0;
    }

    pub fn move_forward(&mut self, axis: Axis) {
        self.start_move(axis, Direction::Forward);
    }

    pub fn move_backward(&mut self, axis: Axis) {
        self.start_move(axis, Direction::Backward);
    }

    pub fn rotate_cw(&mut self, axis: Axis) {
        self.start_rotate(axis, Direction::Forward);
    }

    pub fn rotate_acw(&mut self, axis: Axis) {
        self.start_rotate(axis, Direction::Backward);
    }

    /// Zero every velocity
    pub fn halt(&mut self) {
        self.translation_velocity = Vec3::zeros();
        self.rotation_velocity = Vec3::zeros();
    }

    pub fn is_moving(&self) -> bool {
        self.translation_velocity != Vec3::zeros() || self.rotation_velocity != Vec3::zeros()
    }

    /// Advance one frame: every axis integrates its velocity, idle axes included
    pub fn update(&mut self) {
        for axis in Axis::ALL {
            let i = axis.index();
            let step = axis.unit() * self.translation_velocity[i];
            self.position += step.extend(0.0);
            self.orientation += axis.unit() * self.rotation_velocity[i];
        }
    }

    pub fn view_matrix(&self) -> Mat44 {
        transform::view_matrix(&self.position.xyz(), &self.orientation)
    }

    pub fn frustum(&self, near: Real, far: Real, viewport: &Viewport) -> Frustum {
        Frustum::new(near, far, self.focal_distance, viewport.width, viewport.height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new();
        assert_eq!(camera.position(), Vec4::xyzw(0.0, 0.0, 0.0, 1.0));
        assert_eq!(camera.orientation(), Vec3::zeros());
        assert!(!camera.is_moving());
        assert!(camera.view_matrix().nearly_equal(&Mat44::identity()));
    }

    #[test]
    fn test_move_then_stop() {
        let s = 0.25;
        let mut camera = Camera::with_speeds(s, 1.0);
        camera.move_forward(Axis::X);
        camera.update();
        assert_eq!(camera.position(), Vec4::xyzw(s, 0.0, 0.0, 1.0));

        camera.stop_move(Axis::X);
        camera.update();
        assert_eq!(camera.position(), Vec4::xyzw(s, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_backward_is_negative_velocity() {
        let mut camera = Camera::new();
        camera.move_backward(Axis::Z);
        assert_eq!(camera.translation_velocity(), Vec3::xyz(0.0, 0.0, -DEFAULT_MOVE_SPEED));
        camera.update();
        camera.update();
        assert!(camera
            .position()
            .nearly_equal(&Vec4::xyzw(0.0, 0.0, -2.0 * DEFAULT_MOVE_SPEED, 1.0)));
    }

    #[test]
    fn test_axes_are_independent() {
        let mut camera = Camera::with_speeds(1.0, 10.0);
        camera.move_forward(Axis::X);
        camera.move_backward(Axis::Y);
        camera.rotate_cw(Axis::Z);
        camera.rotate_acw(Axis::X);
        camera.update();
        assert_eq!(camera.position(), Vec4::xyzw(1.0, -1.0, 0.0, 1.0));
        assert_eq!(camera.orientation(), Vec3::xyz(-10.0, 0.0, 10.0));

        camera.stop_move(Axis::X);
        camera.stop_rotate(Axis::Z);
        camera.update();
        assert_eq!(camera.position(), Vec4::xyzw(1.0, -2.0, 0.0, 1.0));
        assert_eq!(camera.orientation(), Vec3::xyz(-20.0, 0.0, 10.0));
    }

    #[test]
    fn test_stop_on_idle_axis_is_noop() {
        let mut camera = Camera::new();
        camera.stop_move(Axis::Y);
        camera.stop_rotate(Axis::Y);
        assert_eq!(camera.translation_velocity(), Vec3::zeros());
        assert_eq!(camera.rotation_velocity(), Vec3::zeros());
        camera.update();
        assert_eq!(camera, Camera::new());
    }

    #[test]
    fn test_view_matrix_follows_pose() {
        let mut camera = Camera::new();
        camera.set_position(Vec3::xyz(0.0, 0.0, -5.0));
        let p = camera.view_matrix() * Vec4::xyzw(0.0, 0.0, 0.0, 1.0);
        assert!(p.nearly_equal(&Vec4::xyzw(0.0, 0.0, 5.0, 1.0)));
    }

    #[test]
    fn test_frustum_uses_focal_distance() {
        let camera = Camera::new().with_focal_distance(2.0);
        let frustum = camera.frustum(0.1, 50.0, &Viewport::new(2.0, 2.0));
        // half-width 1 at distance 2: x = z / 2 is the right edge
        assert!(frustum.contains(&Vec4::xyzw(1.9, 0.0, 4.0, 1.0)));
        assert!(!frustum.contains(&Vec4::xyzw(2.1, 0.0, 4.0, 1.0)));
    }
}
