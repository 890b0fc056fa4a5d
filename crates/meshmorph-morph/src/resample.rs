use meshmorph_3d::{Point3, PointSet};

use crate::MorphError;

/// Indices selected by [`uniform_sample`] for a sequence of length `len`.
///
/// `step = len / n` (floored) and the indices are `0, step, .., (n - 1) * step`.
/// Trailing points past the last stride are left out.
pub fn uniform_sample_indices(len: usize, n: usize) -> Result<Vec<usize>, MorphError> {
    if len == 0 {
        return Err(MorphError::EmptyInput("resample input"));
    }
    if n == 0 || n > len {
        return Err(MorphError::InvalidSampleCount { n, len });
    }
    let step = len / n;
    Ok((0..n).map(|i| i * step).collect())
}

/// Uniformly decimate a point set down to `n` points.
///
/// Deterministic strided selection, see [`uniform_sample_indices`].
///
/// Example:
///
/// ```
/// use meshmorph_3d::Point3;
/// use meshmorph_morph::uniform_sample;
///
/// let points = (0..10).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect::<Vec<_>>();
/// let sampled = uniform_sample(&points, 3).unwrap();
/// assert_eq!(sampled.len(), 3);
/// assert_eq!(sampled[2], Point3::new(6.0, 0.0, 0.0));
/// ```
pub fn uniform_sample(points: &[Point3], n: usize) -> Result<PointSet, MorphError> {
    let indices = uniform_sample_indices(points.len(), n)?;
    Ok(indices.into_iter().map(|i| points[i]).collect())
}
