use crate::{
    linalg::{self, IDENTITY33},
    point::Point3,
};

/// A rigid transformation, `v' = R * v + t`.
///
/// The rotation is stored row-major and is expected to be orthonormal with
/// determinant +1.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigidTransform {
    /// Rotation matrix from the source to the destination frame.
    pub rotation: [[f64; 3]; 3],
    /// Translation from the source to the destination frame.
    pub translation: Point3,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Create a new transform from a rotation and a translation.
    pub fn new(rotation: [[f64; 3]; 3], translation: Point3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(IDENTITY33, Point3::ZERO)
    }

    /// A pure translation.
    pub fn from_translation(translation: Point3) -> Self {
        Self::new(IDENTITY33, translation)
    }

    /// Apply the transform to a single point.
    #[inline]
    pub fn apply(&self, p: &Point3) -> Point3 {
        linalg::mat33_mul_point(&self.rotation, p) + self.translation
    }

    /// Apply the transform to every point, returning new points.
    pub fn apply_to_slice(&self, points: &[Point3]) -> Vec<Point3> {
        let mut dst = vec![Point3::ZERO; points.len()];
        linalg::transform_points(points, &self.rotation, &self.translation, &mut dst);
        dst
    }

    /// Apply the transform to every point in place.
    pub fn apply_in_place(&self, points: &mut [Point3]) {
        linalg::transform_points_inplace(points, &self.rotation, &self.translation);
    }

    /// Compose two transforms: the result applies `self` first, then `next`.
    ///
    /// R = R_next * R_self, t = R_next * t_self + t_next
    pub fn then(&self, next: &RigidTransform) -> RigidTransform {
        RigidTransform {
            rotation: linalg::matmul33(&next.rotation, &self.rotation),
            translation: next.apply(&self.translation),
        }
    }

    /// The inverse transform, `R' = R^T`, `t' = -R^T * t`.
    pub fn inverse(&self) -> RigidTransform {
        let rotation = linalg::transpose33(&self.rotation);
        let translation = -linalg::mat33_mul_point(&rotation, &self.translation);
        RigidTransform {
            rotation,
            translation,
        }
    }

    /// Check whether this is the identity within `epsilon`.
    pub fn is_identity(&self, epsilon: f64) -> bool {
        let rot_ok = self
            .rotation
            .iter()
            .flatten()
            .zip(IDENTITY33.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon);
        rot_ok && self.translation.length() <= epsilon
    }
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation, normalized internally.
/// * `angle` - The angle of rotation in radians.
///
/// # Returns
///
/// The rotation matrix, or `None` for a zero axis.
///
/// Example:
///
/// ```
/// use meshmorph_3d::{transforms::axis_angle_to_rotation_matrix, Point3};
///
/// let axis = Point3::new(1.0, 0.0, 0.0);
/// let rotation = axis_angle_to_rotation_matrix(&axis, std::f64::consts::PI / 2.0);
/// assert!(rotation.is_some());
/// ```
pub fn axis_angle_to_rotation_matrix(axis: &Point3, angle: f64) -> Option<[[f64; 3]; 3]> {
    let Point3 { x, y, z } = axis.normalize()?;

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;

    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;

    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;

    let m12 = tmp5 - tmp6;
    let m21 = tmp5 + tmp6;

    Some([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_angle_to_rotation_matrix() {
        let rotation = axis_angle_to_rotation_matrix(
            &Point3::new(1.0, 0.0, 0.0),
            std::f64::consts::PI / 2.0,
        );
        assert!(rotation.is_some());
        let expected = [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];
        if let Some(rotation) = rotation {
            for i in 0..3 {
                for j in 0..3 {
                    assert_relative_eq!(rotation[i][j], expected[i][j], epsilon = 1e-12);
                }
            }
            assert_relative_eq!(linalg::det_mat33(&rotation), 1.0, epsilon = 1e-12);
        }
        assert!(axis_angle_to_rotation_matrix(&Point3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_rigid_transform_compose_inverse() {
        let rotation = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let a = RigidTransform::new(rotation, Point3::new(1.0, 2.0, 3.0));
        let b = RigidTransform::from_translation(Point3::new(-1.0, 0.0, 0.5));
        let p = Point3::new(0.5, -0.25, 2.0);

        assert_eq!(a.then(&b).apply(&p), b.apply(&a.apply(&p)));
        assert!(a.then(&a.inverse()).is_identity(1e-12));
        assert_eq!(a.inverse().apply(&a.apply(&p)), p);
    }

    #[test]
    fn test_rigid_transform_apply_in_place() {
        let t = RigidTransform::from_translation(Point3::new(1.0, 1.0, 1.0));
        let mut points = vec![Point3::ZERO, Point3::new(1.0, 2.0, 3.0)];
        let copied = t.apply_to_slice(&points);
        t.apply_in_place(&mut points);
        assert_eq!(points, copied);
        assert_eq!(points[1], Point3::new(2.0, 3.0, 4.0));
        assert!(RigidTransform::default().is_identity(0.0));
    }
}
