use meshmorph_3d::Point3;

use crate::MorphError;

/// Parameters of [`laplacian_smooth`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Number of relaxation passes.
    pub iterations: usize,
    /// Fraction of the way each vertex moves towards its neighbor average.
    pub weight: f64,
    /// Optional per-vertex mask; pinned vertices never move.
    pub pinned: Option<Vec<bool>>,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            iterations: 1,
            weight: 1.0,
            pinned: None,
        }
    }
}

impl SmoothingParams {
    /// Sets the number of passes.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the relaxation weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the pinned vertex mask.
    #[must_use]
    pub fn with_pinned(mut self, pinned: Vec<bool>) -> Self {
        self.pinned = Some(pinned);
        self
    }
}

/// Laplacian smoothing of vertex positions over an adjacency list.
///
/// Every pass computes all new positions from the previous pass,
/// `p' = p + weight * (mean(neighbors) - p)`, then writes them back. Vertices
/// without neighbors and pinned vertices keep their position.
///
/// # Arguments
///
/// * `vertices` - Positions, updated in place.
/// * `adjacency` - Neighbor indices of every vertex.
/// * `params` - Smoothing parameters.
pub fn laplacian_smooth(
    vertices: &mut [Point3],
    adjacency: &[Vec<usize>],
    params: &SmoothingParams,
) -> Result<(), MorphError> {
    let len = vertices.len();
    if adjacency.len() != len {
        return Err(MorphError::SizeMismatch {
            expected: len,
            actual: adjacency.len(),
        });
    }
    if let Some(pinned) = &params.pinned {
        if pinned.len() != len {
            return Err(MorphError::SizeMismatch {
                expected: len,
                actual: pinned.len(),
            });
        }
    }
    for (vertex, neighbors) in adjacency.iter().enumerate() {
        if let Some(&neighbor) = neighbors.iter().find(|&&n| n >= len) {
            return Err(MorphError::AdjacencyOutOfBounds {
                vertex,
                neighbor,
                len,
            });
        }
    }

    let is_pinned = |i: usize| params.pinned.as_ref().is_some_and(|p| p[i]);

    let mut smoothed = vertices.to_vec();
    for _ in 0..params.iterations {
        for (i, neighbors) in adjacency.iter().enumerate() {
            if neighbors.is_empty() || is_pinned(i) {
                smoothed[i] = vertices[i];
                continue;
            }
            let sum = neighbors
                .iter()
                .fold(Point3::ZERO, |acc, &n| acc + vertices[n]);
            let average = sum / neighbors.len() as f64;
            smoothed[i] = vertices[i] + (average - vertices[i]) * params.weight;
        }
        vertices.copy_from_slice(&smoothed);
    }

    log::trace!(
        "laplacian smoothing: {} vertices, {} passes",
        len,
        params.iterations
    );

    Ok(())
}
