//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the Euler-angle TRS composition used by
//! both the desk object list and the scene graph.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Position, Euler rotation (degrees) and scale
///
/// Composes as `T * Rx * Ry * Rz * S`: scale first, then Z, Y and X
/// rotations, then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerTransform {
    /// Translation
    pub position: Vec3,

    /// Rotation around X, Y and Z in degrees
    pub rotation_degrees: Vec3,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for EulerTransform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation_degrees: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl EulerTransform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from all three components
    pub fn new(position: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation_degrees,
            scale,
        }
    }

    /// Create a transform with only a translation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Compose into a matrix (`T * Rx * Ry * Rz * S`)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Mat4::rotation_x(utils::deg_to_rad(self.rotation_degrees.x))
            * Mat4::rotation_y(utils::deg_to_rad(self.rotation_degrees.y))
            * Mat4::rotation_z(utils::deg_to_rad(self.rotation_degrees.z))
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Point3, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Where a matrix sends the local origin
    pub fn transform_origin(matrix: &Mat4) -> Vec3 {
        matrix.transform_point(&Point3::origin()).coords
    }

    /// True when every component is a finite number
    pub fn is_finite(v: &Vec3) -> bool {
        v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
    }
}

/// Extension trait for Mat4 with axis rotation constructors
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis (radians)
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis (radians)
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_transform_is_identity_matrix() {
        assert_relative_eq!(EulerTransform::identity().to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_translation_moves_origin() {
        let t = EulerTransform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(utils::transform_origin(&t.to_matrix()), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let t = EulerTransform::new(Vec3::new(10.0, 0.0, 0.0), Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        let p = t.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(12.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_z_rotation_is_counter_clockwise_in_degrees() {
        let t = EulerTransform::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 90.0), Vec3::new(1.0, 1.0, 1.0));
        let p = t.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z_applied_right_to_left() {
        // Rz applies first: +X -> +Y, then Ry leaves +Y alone, then Rx(90) sends +Y -> +Z
        let t = EulerTransform::new(Vec3::zeros(), Vec3::new(90.0, 90.0, 90.0), Vec3::new(1.0, 1.0, 1.0));
        let p = t.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_deg_rad_round_trip() {
        assert_relative_eq!(utils::rad_to_deg(utils::deg_to_rad(30.0)), 30.0, epsilon = EPSILON);
    }
}
