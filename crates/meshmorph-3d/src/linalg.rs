use crate::point::Point3;

/// The 3x3 identity matrix in row-major layout.
pub const IDENTITY33: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Multiply two 3x3 row-major matrices, `m = a * b`.
pub fn matmul33(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut m = [[0.0; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    m
}

/// Multiply a 3x3 row-major matrix by a point, `m * p`.
#[inline]
pub fn mat33_mul_point(m: &[[f64; 3]; 3], p: &Point3) -> Point3 {
    Point3::new(
        m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z,
        m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z,
        m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z,
    )
}

/// Transpose a 3x3 matrix.
pub fn transpose33(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Determinant of a 3x3 matrix.
pub fn det_mat33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Transform a set of points using a rotation and translation.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `dst_r_src` - A rotation matrix.
/// * `dst_t_src` - A translation vector.
/// * `dst_points` - A pre-allocated slice to store the transformed points.
///
/// PRECONDITION: dst_points is a pre-allocated slice of the same size as source.
///
/// Example:
///
/// ```
/// use meshmorph_3d::{linalg::{transform_points, IDENTITY33}, Point3};
///
/// let src_points = vec![Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 4.0, 5.0)];
/// let translation = Point3::new(1.0, 0.0, 0.0);
/// let mut dst_points = vec![Point3::ZERO; src_points.len()];
/// transform_points(&src_points, &IDENTITY33, &translation, &mut dst_points);
/// assert_eq!(dst_points[0], Point3::new(3.0, 2.0, 2.0));
/// ```
pub fn transform_points(
    src_points: &[Point3],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &Point3,
    dst_points: &mut [Point3],
) {
    assert_eq!(src_points.len(), dst_points.len());

    for (point_dst, point_src) in dst_points.iter_mut().zip(src_points.iter()) {
        *point_dst = mat33_mul_point(dst_r_src, point_src) + *dst_t_src;
    }
}

/// Transform a set of points in place using a rotation and translation.
pub fn transform_points_inplace(
    points: &mut [Point3],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &Point3,
) {
    for p in points.iter_mut() {
        *p = mat33_mul_point(dst_r_src, p) + *dst_t_src;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_points_identity() {
        let src_points = vec![Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 4.0, 5.0)];
        let mut dst_points = vec![Point3::ZERO; src_points.len()];
        transform_points(&src_points, &IDENTITY33, &Point3::ZERO, &mut dst_points);

        assert_eq!(dst_points, src_points);
    }

    #[test]
    fn test_transform_points_roundtrip() {
        let src_points = vec![Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 4.0, 5.0)];
        let rotation = [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];
        let translation = Point3::new(1.0, 2.0, 3.0);

        let mut dst_points = vec![Point3::ZERO; src_points.len()];
        transform_points(&src_points, &rotation, &translation, &mut dst_points);

        // R' = R^T, t' = -R^T * t
        let rotation_inv = transpose33(&rotation);
        let translation_inv = -mat33_mul_point(&rotation_inv, &translation);

        transform_points_inplace(&mut dst_points, &rotation_inv, &translation_inv);

        assert_eq!(dst_points, src_points);
    }

    #[test]
    fn test_matmul33_det() {
        let a = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]];
        assert_relative_eq!(det_mat33(&a), -3.0, epsilon = 1e-12);
        assert_eq!(matmul33(&a, &IDENTITY33), a);
        assert_eq!(matmul33(&IDENTITY33, &a), a);

        let rot = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert_eq!(matmul33(&rot, &transpose33(&rot)), IDENTITY33);
        assert_relative_eq!(det_mat33(&rot), 1.0);
    }
}
