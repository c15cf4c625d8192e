/// Perspective projection from camera space onto the viewport plane
use crate::vector::{Real, Vec2, Vec4};

/// How a camera-space homogeneous point is collapsed onto the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    /// Divide by w, then project x and y by z
    PerspectiveDivide,
    /// Scale x and y by `distance / z`, assuming w is already 1
    PlaneDistance,
}

/// Projects camera-space vertices to 2D viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub mode: ProjectionMode,
    /// Distance from the camera to the projection plane
    pub distance: Real,
}

impl Projector {
    pub fn new(mode: ProjectionMode, distance: Real) -> Self {
        Self { mode, distance }
    }

    pub fn project(&self, v: &Vec4) -> Vec2 {
        match self.mode {
            ProjectionMode::PerspectiveDivide => perspective_divide(v),
            ProjectionMode::PlaneDistance => project_onto_plane(v, self.distance),
        }
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(ProjectionMode::PerspectiveDivide, 1.0)
    }
}

/// Full perspective divide of a homogeneous point. A point with z = 0 maps to the origin.
pub fn perspective_divide(v: &Vec4) -> Vec2 {
    let p = v.xyz() / v[3];
    if p[2] == 0.0 {
        return Vec2::zeros();
    }
    Vec2::xy(p[0] / p[2], p[1] / p[2])
}

/// `(d * x / z, d * y / z)`, with z = 0 mapping to the origin
pub fn project_onto_plane(v: &Vec4, distance: Real) -> Vec2 {
    let z = v[2];
    if z == 0.0 {
        return Vec2::zeros();
    }
    Vec2::xy(distance * v[0] / z, distance * v[1] / z)
}

/// Six bounding planes of the view volume as `(a, b, c, d)` with
/// `a*x + b*y + c*z + d >= 0` on the inside.
///
/// Kept as scene data; the pipeline does not clip against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub near: Vec4,
    pub far: Vec4,
    pub left: Vec4,
    pub right: Vec4,
    pub top: Vec4,
    pub bottom: Vec4,
}

impl Frustum {
    /// Frustum of a camera looking down +z with a viewport of the given size
    /// placed `distance` in front of it.
    pub fn new(
        near: Real,
        far: Real,
        distance: Real,
        viewport_width: Real,
        viewport_height: Real,
    ) -> Self {
        let half_w = viewport_width / 2.0;
        let half_h = viewport_height / 2.0;
        Self {
            near: Vec4::xyzw(0.0, 0.0, 1.0, -near),
            far: Vec4::xyzw(0.0, 0.0, -1.0, far),
            left: Vec4::xyzw(distance, 0.0, half_w, 0.0),
            right: Vec4::xyzw(-distance, 0.0, half_w, 0.0),
            top: Vec4::xyzw(0.0, -distance, half_h, 0.0),
            bottom: Vec4::xyzw(0.0, distance, half_h, 0.0),
        }
    }

    pub fn planes(&self) -> [Vec4; 6] {
        [
            self.near,
            self.far,
            self.left,
            self.right,
            self.top,
            self.bottom,
        ]
    }

    /// Whether a camera-space point (w = 1) lies inside every plane
    pub fn contains(&self, point: &Vec4) -> bool {
        self.planes().iter().all(|plane| plane.dot(point) >= 0.0)
    }
}
