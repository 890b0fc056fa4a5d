//! Single-pass interpolation formulas over vertex positions.
//!
//! Unlike the morph engine these functions never search or match: point sets
//! are combined index by index and must already have equal sizes.

use meshmorph_3d::{Error3d, Point3, PointSet};

use crate::MorphError;

/// Number of keyframes needed by [`interpolate_keyframes`].
pub const MIN_KEYFRAMES: usize = 4;

/// Denominator below which a triangle is treated as degenerate.
const BARYCENTRIC_EPSILON: f64 = 1e-6;

/// Linear interpolation between two positions.
#[inline]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a.lerp(*b, t)
}

/// Linear interpolation between two point sets of the same size.
pub fn lerp_sets(a: &[Point3], b: &[Point3], t: f64) -> Result<PointSet, MorphError> {
    check_same_len(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(p, q)| p.lerp(*q, t)).collect())
}

/// Cubic Bézier curve through control points `p0..p3` at `t`.
pub fn cubic_bezier(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Point3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    *p0 * mt3 + *p1 * (3.0 * mt2 * t) + *p2 * (3.0 * mt * t2) + *p3 * t3
}

/// Uniform Catmull-Rom segment between `p1` (at `t = 0`) and `p2` (at `t = 1`).
pub fn catmull_rom(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Point3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = *p1 * 2.0;
    let b = (*p2 - *p0) * t;
    let c = (*p0 * 2.0 - *p1 * 5.0 + *p2 * 4.0 - *p3) * t2;
    let d = (*p1 * 3.0 - *p0 - *p2 * 3.0 + *p3) * t3;

    (a + b + c + d) * 0.5
}

/// Catmull-Rom interpolation between keyframe `current` and `current + 1`.
///
/// The outer control frames are `current - 1` (clamped to 0) and
/// `current + 2` (clamped to `current + 1` at the end of the sequence).
///
/// # Arguments
///
/// * `keyframes` - At least [`MIN_KEYFRAMES`] frames with equal vertex counts.
/// * `current` - The segment start; `current + 1` must be a valid keyframe.
/// * `t` - Position within the segment.
pub fn interpolate_keyframes(
    keyframes: &[PointSet],
    current: usize,
    t: f64,
) -> Result<PointSet, MorphError> {
    if keyframes.len() < MIN_KEYFRAMES {
        return Err(MorphError::NotEnoughKeyframes {
            required: MIN_KEYFRAMES,
            provided: keyframes.len(),
        });
    }
    if current >= keyframes.len() - 1 {
        return Err(Error3d::IndexOutOfBounds {
            index: current.saturating_add(1),
            len: keyframes.len(),
        }
        .into());
    }

    let vertex_count = keyframes[0].len();
    for frame in keyframes.iter() {
        check_same_len(vertex_count, frame.len())?;
    }

    let prev = current.saturating_sub(1);
    let next = if current + 2 < keyframes.len() {
        current + 2
    } else {
        current + 1
    };

    let (k0, k1, k2, k3) = (
        &keyframes[prev],
        &keyframes[current],
        &keyframes[current + 1],
        &keyframes[next],
    );

    Ok((0..vertex_count)
        .map(|v| catmull_rom(&k0[v], &k1[v], &k2[v], &k3[v], t))
        .collect())
}

/// Weighted sum of blend shapes, `sum_m weights[m] * meshes[m][v]`.
///
/// All meshes must have the same vertex count and there must be one weight
/// per mesh.
pub fn blend_shapes(meshes: &[PointSet], weights: &[f64]) -> Result<PointSet, MorphError> {
    let Some(first) = meshes.first() else {
        return Err(MorphError::EmptyInput("blend shapes"));
    };
    check_same_len(meshes.len(), weights.len())?;

    let vertex_count = first.len();
    let mut result = vec![Point3::ZERO; vertex_count];
    for (mesh, &weight) in meshes.iter().zip(weights.iter()) {
        check_same_len(vertex_count, mesh.len())?;
        for (acc, p) in result.iter_mut().zip(mesh.iter()) {
            *acc += *p * weight;
        }
    }

    Ok(PointSet::new(result))
}

/// Interpolate within triangle `(p1, p2, p3)` at the projection of `point`.
///
/// `point` is projected onto the triangle plane and its barycentric weights
/// are used to blend the vertices. A degenerate triangle returns `p1`.
pub fn barycentric_interpolate(p1: &Point3, p2: &Point3, p3: &Point3, point: &Point3) -> Point3 {
    let v0 = *p2 - *p1;
    let v1 = *p3 - *p1;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < BARYCENTRIC_EPSILON {
        return *p1;
    }

    let Some(normal) = v0.cross(v1).normalize() else {
        return *p1;
    };
    let projected = *point - normal * (*point - *p1).dot(normal);
    let v2 = projected - *p1;

    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    *p1 * u + *p2 * v + *p3 * w
}

fn check_same_len(expected: usize, actual: usize) -> Result<(), MorphError> {
    if expected != actual {
        return Err(MorphError::SizeMismatch { expected, actual });
    }
    Ok(())
}
