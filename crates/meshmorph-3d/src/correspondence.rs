//! Point-to-point correspondence between a source and a target point set.
//!
//! Every source point is assigned one target index under a [`MatchPolicy`].
//! The unique policies are greedy: sources are processed in index order and a
//! chosen target is removed from consideration for the sources that follow.
//! The result depends on the source order and is not a globally optimal
//! assignment.
//!
//! When a unique policy runs out of targets (more sources than targets) the
//! remaining sources receive [`Match::Fallback`] pointing at index 0, so the
//! degraded entries stay distinguishable from real matches.

use crate::{pointset::centroid, Error3d, Point3};

/// Default floor added to the extremeness score in the biased policies.
///
/// It bounds the cost divisor away from zero for target points sitting on the
/// target centroid. Smaller values bias harder towards extremities.
pub const DEFAULT_EXTREMENESS_FLOOR: f64 = 0.1;

/// Strategy used to pick a target point for every source point.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Closest target by squared euclidean distance. Targets may be shared.
    #[default]
    Nearest,
    /// Closest target not already taken by a lower source index.
    NearestUnique,
    /// Closest target under a cost discounted for targets far from the target centroid.
    ExtremenessBiased {
        /// Added to the normalized extremeness before dividing the squared distance.
        floor: f64,
    },
    /// Extremeness-biased cost with greedy uniqueness.
    ExtremenessBiasedUnique {
        /// Added to the normalized extremeness before dividing the squared distance.
        floor: f64,
    },
}

impl MatchPolicy {
    /// Extremeness-biased policy with [`DEFAULT_EXTREMENESS_FLOOR`].
    pub fn extremeness_biased() -> Self {
        Self::ExtremenessBiased {
            floor: DEFAULT_EXTREMENESS_FLOOR,
        }
    }

    /// Unique extremeness-biased policy with [`DEFAULT_EXTREMENESS_FLOOR`].
    pub fn extremeness_biased_unique() -> Self {
        Self::ExtremenessBiasedUnique {
            floor: DEFAULT_EXTREMENESS_FLOOR,
        }
    }

    /// Whether a target can be chosen by at most one source.
    pub fn is_unique(&self) -> bool {
        matches!(
            self,
            Self::NearestUnique | Self::ExtremenessBiasedUnique { .. }
        )
    }
}

/// The target chosen for one source point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Match {
    /// A target selected by the policy.
    Matched(usize),
    /// No target was available; the index is a placeholder (always 0).
    Fallback(usize),
}

impl Match {
    /// The target index, whether matched or fallen back.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Matched(j) | Self::Fallback(j) => j,
        }
    }

    /// The target index only if it was genuinely matched.
    #[inline]
    pub fn matched(self) -> Option<usize> {
        match self {
            Self::Matched(j) => Some(j),
            Self::Fallback(_) => None,
        }
    }

    /// Whether this entry is the exhaustion fallback.
    #[inline]
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Mapping from every source index to a target index.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Correspondence {
    matches: Vec<Match>,
}

impl Correspondence {
    /// Create a correspondence from explicit matches.
    pub fn from_matches(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    /// Create a correspondence where every index is a genuine match.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            matches: indices.into_iter().map(Match::Matched).collect(),
        }
    }

    /// Number of source points covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the correspondence covers no source point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The per-source matches.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Flattened target indices; fallbacks read as their placeholder index.
    pub fn indices(&self) -> Vec<usize> {
        self.matches.iter().map(|m| m.index()).collect()
    }

    /// Number of fallback entries.
    pub fn fallback_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_fallback()).count()
    }

    /// Whether every source was genuinely matched.
    pub fn is_complete(&self) -> bool {
        self.fallback_count() == 0
    }

    /// Flattened indices, or [`Error3d::TargetsExhausted`] at the first fallback.
    pub fn require_complete(&self) -> Result<Vec<usize>, Error3d> {
        self.matches
            .iter()
            .enumerate()
            .map(|(i, m)| {
                m.matched()
                    .ok_or(Error3d::TargetsExhausted { source_index: i })
            })
            .collect()
    }

    /// Whether no two genuine matches share a target.
    pub fn is_injective(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.matches.len());
        self.matches
            .iter()
            .filter_map(|m| m.matched())
            .all(|j| seen.insert(j))
    }

    /// Matched `(source, target)` point pairs, skipping fallbacks.
    pub fn pairs<'a>(
        &'a self,
        source: &'a [Point3],
        target: &'a [Point3],
    ) -> impl Iterator<Item = (Point3, Point3)> + 'a {
        self.matches
            .iter()
            .zip(source.iter())
            .filter_map(|(m, s)| m.matched().and_then(|j| target.get(j)).map(|t| (*s, *t)))
    }
}

/// Compute the correspondence of `source` against `target`.
///
/// # Arguments
///
/// * `source` - The points to be matched, processed in index order.
/// * `target` - The candidate points.
/// * `policy` - The matching policy.
///
/// # Returns
///
/// One [`Match`] per source point. Fails with [`Error3d::EmptyInput`] if
/// either set is empty.
///
/// Example:
///
/// ```
/// use meshmorph_3d::{correspond, MatchPolicy, Point3};
///
/// let source = [Point3::new(0.0, 0.0, 0.0)];
/// let target = [Point3::new(1.0, 0.0, 0.0), Point3::new(5.0, 5.0, 5.0)];
/// let corr = correspond(&source, &target, MatchPolicy::Nearest).unwrap();
/// assert_eq!(corr.indices(), vec![0]);
/// ```
pub fn correspond(
    source: &[Point3],
    target: &[Point3],
    policy: MatchPolicy,
) -> Result<Correspondence, Error3d> {
    if source.is_empty() {
        return Err(Error3d::EmptyInput { what: "source" });
    }
    if target.is_empty() {
        return Err(Error3d::EmptyInput { what: "target" });
    }

    log::trace!(
        "correspond: {} sources, {} targets, policy {:?}",
        source.len(),
        target.len(),
        policy
    );

    let matches = match policy {
        MatchPolicy::Nearest => scan_each(source, target.len(), |s, j| {
            s.distance_squared(target[j])
        }),
        MatchPolicy::NearestUnique => {
            greedy_unique(source, target.len(), |s, j| s.distance_squared(target[j]))
        }
        MatchPolicy::ExtremenessBiased { floor } => {
            let divisors = extremeness_divisors(target, floor)?;
            scan_each(source, target.len(), |s, j| {
                s.distance_squared(target[j]) / divisors[j]
            })
        }
        MatchPolicy::ExtremenessBiasedUnique { floor } => {
            let divisors = extremeness_divisors(target, floor)?;
            greedy_unique(source, target.len(), |s, j| {
                s.distance_squared(target[j]) / divisors[j]
            })
        }
    };

    let correspondence = Correspondence { matches };
    let fallbacks = correspondence.fallback_count();
    if fallbacks > 0 {
        log::warn!(
            "{} of {} source points fell back to target 0 ({} targets available)",
            fallbacks,
            source.len(),
            target.len()
        );
    }

    Ok(correspondence)
}

/// Per-target divisor `floor + extremeness`.
///
/// Extremeness is the distance to the target centroid normalized by the
/// largest such distance. If every target sits on the centroid the
/// normalization falls back to 1 and all divisors equal `floor`.
fn extremeness_divisors(target: &[Point3], floor: f64) -> Result<Vec<f64>, Error3d> {
    if !(floor.is_finite() && floor > 0.0) {
        return Err(Error3d::InvalidExtremenessFloor(floor));
    }

    let center = centroid(target)?;
    let scores = target.iter().map(|p| p.distance(center)).collect::<Vec<_>>();
    let max_score = scores.iter().copied().fold(0.0, f64::max);
    let norm = if max_score > 0.0 { max_score } else { 1.0 };

    Ok(scores.iter().map(|s| floor + s / norm).collect())
}

/// Lowest-cost candidate; the first one wins ties. NaN costs are never selected.
fn best_candidate(
    candidates: impl Iterator<Item = usize>,
    cost: impl Fn(usize) -> f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for j in candidates {
        let c = cost(j);
        let better = match best {
            None => !c.is_nan(),
            Some((_, best_cost)) => c < best_cost,
        };
        if better {
            best = Some((j, c));
        }
    }
    best.map(|(j, _)| j)
}

fn to_match(best: Option<usize>) -> Match {
    best.map_or(Match::Fallback(0), Match::Matched)
}

#[cfg(not(feature = "parallel"))]
fn scan_each<F>(source: &[Point3], num_targets: usize, cost: F) -> Vec<Match>
where
    F: Fn(&Point3, usize) -> f64,
{
    source
        .iter()
        .map(|s| to_match(best_candidate(0..num_targets, |j| cost(s, j))))
        .collect()
}

#[cfg(feature = "parallel")]
fn scan_each<F>(source: &[Point3], num_targets: usize, cost: F) -> Vec<Match>
where
    F: Fn(&Point3, usize) -> f64 + Sync,
{
    use rayon::prelude::*;

    source
        .par_iter()
        .map(|s| to_match(best_candidate(0..num_targets, |j| cost(s, j))))
        .collect()
}

fn greedy_unique<F>(source: &[Point3], num_targets: usize, cost: F) -> Vec<Match>
where
    F: Fn(&Point3, usize) -> f64,
{
    let mut used = vec![false; num_targets];
    source
        .iter()
        .map(|s| {
            let best = best_candidate((0..num_targets).filter(|&j| !used[j]), |j| cost(s, j));
            if let Some(j) = best {
                used[j] = true;
            }
            to_match(best)
        })
        .collect()
}
