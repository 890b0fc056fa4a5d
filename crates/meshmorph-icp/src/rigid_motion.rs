use meshmorph_3d::{
    centroid,
    linalg::{det_mat33, IDENTITY33},
    Correspondence, Error3d, Point3, RigidTransform,
};

use crate::IcpError;

/// How the rotation part of a rigid motion is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationEstimation {
    /// Least-squares rotation from the SVD of the cross-covariance (Kabsch).
    #[default]
    Kabsch,
    /// Identity rotation; only the centroid offset is estimated.
    TranslationOnly,
}

/// Estimate the rigid motion aligning matched source points onto target points.
///
/// Pairs are `(source[i], target[j])` for every genuinely matched entry of the
/// correspondence; fallback entries are ignored. A matched index outside the
/// target fails with [`Error3d::IndexOutOfBounds`].
///
/// # Arguments
///
/// * `source` - Source points.
/// * `target` - Target points.
/// * `correspondence` - One entry per source point.
/// * `mode` - Rotation estimation mode.
///
/// # Returns
///
/// The transform taking source points onto their matched targets.
pub fn estimate_rigid_motion(
    source: &[Point3],
    target: &[Point3],
    correspondence: &Correspondence,
    mode: RotationEstimation,
) -> Result<RigidTransform, IcpError> {
    if source.is_empty() {
        return Err(IcpError::EmptyInput("source"));
    }
    if target.is_empty() {
        return Err(IcpError::EmptyInput("target"));
    }
    if correspondence.len() != source.len() {
        return Err(IcpError::CorrespondenceMismatch {
            expected: source.len(),
            actual: correspondence.len(),
        });
    }

    if let Some(index) = correspondence
        .matches()
        .iter()
        .filter_map(|m| m.matched())
        .find(|&j| j >= target.len())
    {
        return Err(Error3d::IndexOutOfBounds {
            index,
            len: target.len(),
        }
        .into());
    }

    let (points_in_src, points_in_dst): (Vec<_>, Vec<_>) =
        correspondence.pairs(source, target).unzip();

    fit_transformation(&points_in_src, &points_in_dst, mode)
}

/// Compute the rigid transformation between two paired point sets.
///
/// With [`RotationEstimation::Kabsch`] this is the SVD-based least-squares
/// solution:
///
/// 1. Compute the centroids of both point sets
/// 2. Compute the cross-covariance H = Σ[(p_src - p_src_mean) * (p_dst - p_dst_mean)^T]
/// 3. Compute the SVD of H = U * S * V^T
/// 4. Calculate the rotation R = V * U^T, negating the last column of V if det(R) < 0
/// 5. Calculate the translation t = p_dst_mean - R * p_src_mean
///
/// For more details, see: Arun, K., Huang, T. S., and Blostein, S. D.
/// "Least-squares fitting of two 3-D point sets." IEEE PAMI, 1987.
///
/// # Arguments
///
/// * `points_in_src` - Source points.
/// * `points_in_dst` - Destination points, paired by index with the source.
/// * `mode` - Rotation estimation mode.
pub fn fit_transformation(
    points_in_src: &[Point3],
    points_in_dst: &[Point3],
    mode: RotationEstimation,
) -> Result<RigidTransform, IcpError> {
    if points_in_src.len() != points_in_dst.len() {
        return Err(IcpError::CorrespondenceMismatch {
            expected: points_in_src.len(),
            actual: points_in_dst.len(),
        });
    }
    if points_in_src.is_empty() {
        return Err(IcpError::NoCorrespondences);
    }

    // identity transformation is a special case
    if points_in_src == points_in_dst {
        return Ok(RigidTransform::identity());
    }

    let src_centroid = centroid(points_in_src)?;
    let dst_centroid = centroid(points_in_dst)?;

    let rotation = match mode {
        RotationEstimation::TranslationOnly => IDENTITY33,
        RotationEstimation::Kabsch => {
            kabsch_rotation(points_in_src, points_in_dst, &src_centroid, &dst_centroid)
        }
    };

    let rotated_centroid = RigidTransform::new(rotation, Point3::ZERO).apply(&src_centroid);

    Ok(RigidTransform::new(rotation, dst_centroid - rotated_centroid))
}

fn kabsch_rotation(
    points_in_src: &[Point3],
    points_in_dst: &[Point3],
    src_centroid: &Point3,
    dst_centroid: &Point3,
) -> [[f64; 3]; 3] {
    // cross-covariance matrix H = Σ[(src - src_mean) * (dst - dst_mean)^T]
    let mut h = [[0.0; 3]; 3];
    for (p_in_src, p_in_dst) in points_in_src.iter().zip(points_in_dst.iter()) {
        let src_centered = (*p_in_src - *src_centroid).to_array();
        let dst_centered = (*p_in_dst - *dst_centroid).to_array();
        for (row, &s) in h.iter_mut().zip(src_centered.iter()) {
            for (val, &d) in row.iter_mut().zip(dst_centered.iter()) {
                *val += s * d;
            }
        }
    }

    let h_mat = faer::Mat::<f64>::from_fn(3, 3, |i, j| h[i][j]);
    let svd = h_mat.svd();
    let (u, v) = (svd.u(), svd.v());

    // R = V * diag(1, 1, d) * U^T
    let compose = |last: f64| {
        let mut r = [[0.0; 3]; 3];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, val) in row.iter_mut().enumerate() {
                *val = v.read(i, 0) * u.read(j, 0)
                    + v.read(i, 1) * u.read(j, 1)
                    + last * v.read(i, 2) * u.read(j, 2);
            }
        }
        r
    };

    let r = compose(1.0);
    if det_mat33(&r) < 0.0 {
        log::trace!("kabsch: reflection detected, flipping the last singular vector");
        return compose(-1.0);
    }
    r
}
