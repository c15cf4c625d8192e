/// 3D transformation matrices and object placement
use crate::matrix::Mat44;
use crate::vector::{Real, Vec3};

/// Create a translation matrix
pub fn translation_matrix(offset: &Vec3) -> Mat44 {
    Mat44::new([
        [1.0, 0.0, 0.0, offset[0]],
        [0.0, 1.0, 0.0, offset[1]],
        [0.0, 0.0, 1.0, offset[2]],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Create a per-axis scale matrix
pub fn scale_matrix(factors: &Vec3) -> Mat44 {
    Mat44::new([
        [factors[0], 0.0, 0.0, 0.0],
        [0.0, factors[1], 0.0, 0.0],
        [0.0, 0.0, factors[2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_x(degrees: Real) -> Mat44 {
    let (s, c) = degrees.to_radians().sin_cos();
    Mat44::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_y(degrees: Real) -> Mat44 {
    let (s, c) = degrees.to_radians().sin_cos();
    Mat44::new([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_z(degrees: Real) -> Mat44 {
    let (s, c) = degrees.to_radians().sin_cos();
    Mat44::new([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation from Euler angles in degrees.
///
/// Closed form of `rotation_z(γ) * rotation_y(β) * rotation_x(α)`: X is applied
/// first, then Y, then Z, all about the fixed axes.
pub fn rotation_matrix(angles: &Vec3) -> Mat44 {
    let (sa, ca) = angles[0].to_radians().sin_cos();
    let (sb, cb) = angles[1].to_radians().sin_cos();
    let (sg, cg) = angles[2].to_radians().sin_cos();
    Mat44::new([
        [cb * cg, sa * sb * cg - ca * sg, ca * sb * cg + sa * sg, 0.0],
        [cb * sg, sa * sb * sg + ca * cg, ca * sb * sg - sa * cg, 0.0],
        [-sb, sa * cb, ca * cb, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// World-to-camera matrix: `Translation(-position) * Rotation(orientation)^T`.
///
/// The transpose stands in for the inverse since the rotation block is orthonormal.
pub fn view_matrix(position: &Vec3, orientation: &Vec3) -> Mat44 {
    translation_matrix(&-*position) * rotation_matrix(orientation).transpose()
}

/// Combined per-vertex transform; the model matrix is applied first.
pub fn model_view(view: &Mat44, model: &Mat44) -> Mat44 {
    *view * *model
}

/// Placement of a shape in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros(), Vec3::filled(1.0))
    }

    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Model matrix `T * R * S`
    pub fn model_matrix(&self) -> Mat44 {
        translation_matrix(&self.translation)
            * rotation_matrix(&self.rotation)
            * scale_matrix(&self.scale)
    }

    pub fn scale_up(&mut self) {
        self.scale += Vec3::filled(1.0);
    }

    /// Shrinks every axis by one; a factor may reach zero or flip sign.
    pub fn scale_down(&mut self) {
        self.scale += Vec3::filled(-1.0);
    }

    pub fn scale_by(&mut self, factor: Real) {
        self.scale = self.scale * factor;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec4;

    #[test]
    fn test_identity_rotation() {
        let matrix = rotation_matrix(&Vec3::zeros());
        assert!(matrix.nearly_equal(&Mat44::identity()));
    }

    #[test]
    fn test_closed_form_matches_elementary_product() {
        let angles = [
            Vec3::xyz(30.0, 0.0, 0.0),
            Vec3::xyz(0.0, 45.0, 0.0),
            Vec3::xyz(10.0, -20.0, 75.0),
            Vec3::xyz(190.0, 33.3, -400.0),
        ];
        for a in angles {
            let product = rotation_z(a[2]) * rotation_y(a[1]) * rotation_x(a[0]);
            assert!(rotation_matrix(&a).nearly_equal(&product), "{}", a);
        }
    }

    #[test]
    fn test_rotation_matches_nalgebra_euler() {
        let a = Vec3::xyz(12.0, -48.0, 101.0);
        let reference = nalgebra::Rotation3::from_euler_angles(
            a[0].to_radians(),
            a[1].to_radians(),
            a[2].to_radians(),
        )
        .to_homogeneous();
        assert!(rotation_matrix(&a).nearly_equal(&Mat44::from(reference)));
    }

    #[test]
    fn test_rotation_transpose_is_inverse() {
        let r = rotation_matrix(&Vec3::xyz(15.0, 60.0, -35.0));
        assert!((r.transpose() * r).nearly_equal(&Mat44::identity()));
        assert!(r.inverse().nearly_equal(&r.transpose()));
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let p = rotation_matrix(&Vec3::xyz(0.0, 0.0, 90.0)) * Vec4::xyzw(1.0, 0.0, 0.0, 1.0);
        assert!(p.nearly_equal(&Vec4::xyzw(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_model_matrix_scales_then_rotates_then_translates() {
        let t = Transform::new(
            Vec3::xyz(10.0, 0.0, 0.0),
            Vec3::xyz(0.0, 0.0, 90.0),
            Vec3::xyz(2.0, 1.0, 1.0),
        );
        let p = t.model_matrix() * Vec4::xyzw(1.0, 0.0, 0.0, 1.0);
        // scale: (2,0,0) -> rotate: (0,2,0) -> translate: (10,2,0)
        assert!(p.nearly_equal(&Vec4::xyzw(10.0, 2.0, 0.0, 1.0)));
    }

    #[test]
    fn test_view_matrix_moves_world_against_camera() {
        let view = view_matrix(&Vec3::xyz(1.0, 2.0, 3.0), &Vec3::zeros());
        let p = view * Vec4::xyzw(1.0, 2.0, 8.0, 1.0);
        assert!(p.nearly_equal(&Vec4::xyzw(0.0, 0.0, 5.0, 1.0)));
    }

    #[test]
    fn test_view_then_model_order_matters() {
        let view = view_matrix(&Vec3::xyz(0.0, 0.0, -5.0), &Vec3::xyz(0.0, 30.0, 0.0));
        let model = Transform::new(
            Vec3::xyz(3.0, 0.0, 0.0),
            Vec3::xyz(0.0, 0.0, 45.0),
            Vec3::filled(2.0),
        )
        .model_matrix();
        let v = Vec4::xyzw(1.0, 1.0, 1.0, 1.0);
        let expected = view * (model * v);
        assert!((model_view(&view, &model) * v).nearly_equal(&expected));
        assert!(!((model * view) * v).nearly_equal(&expected));
    }

    #[test]
    fn test_scale_adjust() {
        let mut t = Transform::identity();
        t.scale_up();
        assert_eq!(t.scale, Vec3::filled(2.0));
        t.scale_down();
        t.scale_down();
        assert_eq!(t.scale, Vec3::zeros());
        t.scale_up();
        t.scale_by(0.5);
        assert_eq!(t.scale, Vec3::filled(0.5));
    }
}
