use meshmorph_3d::{correspond, Correspondence, MatchPolicy, Point3, PointSet};

use crate::{uniform_sample, MorphError};

/// A morph between two point sets, resampled and matched once.
///
/// Building the plan resamples both inputs to `min(|start|, |end|)` points and
/// computes the correspondence of the resampled start against the resampled
/// end. [`MorphPlan::blend`] then evaluates any number of frames.
#[derive(Debug, Clone)]
pub struct MorphPlan {
    start: PointSet,
    end: PointSet,
    correspondence: Correspondence,
}

impl MorphPlan {
    /// Resample both inputs and match them under `policy`.
    pub fn new(start: &[Point3], end: &[Point3], policy: MatchPolicy) -> Result<Self, MorphError> {
        if start.is_empty() {
            return Err(MorphError::EmptyInput("morph start"));
        }
        if end.is_empty() {
            return Err(MorphError::EmptyInput("morph end"));
        }

        let sample_count = start.len().min(end.len());
        let start = uniform_sample(start, sample_count)?;
        let end = uniform_sample(end, sample_count)?;

        let correspondence = correspond(start.points(), end.points(), policy)?;

        log::debug!(
            "morph plan: {} samples, policy {:?}, {} fallbacks",
            sample_count,
            policy,
            correspondence.fallback_count()
        );

        Ok(Self {
            start,
            end,
            correspondence,
        })
    }

    /// Number of points in every frame.
    pub fn len(&self) -> usize {
        self.start.len()
    }

    /// Whether the frames are empty; never true for a constructed plan.
    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    /// The resampled start points.
    pub fn start(&self) -> &PointSet {
        &self.start
    }

    /// The resampled end points.
    pub fn end(&self) -> &PointSet {
        &self.end
    }

    /// The correspondence of the resampled start against the resampled end.
    pub fn correspondence(&self) -> &Correspondence {
        &self.correspondence
    }

    /// Evaluate the morph at `t`.
    ///
    /// `out[i] = start[i] * (1 - t) + end[corr[i]] * t`. `t` is not clamped,
    /// values outside `[0, 1]` extrapolate.
    pub fn blend(&self, t: f64) -> PointSet {
        self.start
            .iter()
            .zip(self.correspondence.matches())
            .map(|(s, m)| s.lerp(self.end[m.index()], t))
            .collect()
    }
}

/// Morph `start` into `end` at blend parameter `t` with nearest-point matching.
///
/// # Arguments
///
/// * `start` - The start point set.
/// * `end` - The end point set.
/// * `t` - Blend parameter, `0` gives the resampled start and `1` the matched end.
///
/// # Returns
///
/// Exactly `min(|start|, |end|)` blended points.
///
/// Example:
///
/// ```
/// use meshmorph_3d::Point3;
/// use meshmorph_morph::morph;
///
/// let start = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)];
/// let end = [Point3::new(10.0, 10.0, 10.0), Point3::new(20.0, 20.0, 20.0)];
/// let frame = morph(&start, &end, 0.5).unwrap();
/// assert_eq!(frame[0], Point3::new(5.0, 5.0, 5.0));
/// ```
pub fn morph(start: &[Point3], end: &[Point3], t: f64) -> Result<PointSet, MorphError> {
    morph_with_policy(start, end, t, MatchPolicy::Nearest)
}

/// Same as [`morph`] with a chosen matching policy.
pub fn morph_with_policy(
    start: &[Point3],
    end: &[Point3],
    t: f64,
    policy: MatchPolicy,
) -> Result<PointSet, MorphError> {
    Ok(MorphPlan::new(start, end, policy)?.blend(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_random_points(num_points: usize) -> Vec<Point3> {
        (0..num_points)
            .map(|_| {
                Point3::new(
                    rand::random::<f64>(),
                    rand::random::<f64>(),
                    rand::random::<f64>(),
                )
            })
            .collect()
    }

    #[test]
    fn test_morph_scenario() -> Result<(), MorphError> {
        let start = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(4.0, 4.0, 4.0),
        ];
        let end = [Point3::new(10.0, 10.0, 10.0), Point3::new(20.0, 20.0, 20.0)];

        let plan = MorphPlan::new(&start, &end, MatchPolicy::Nearest)?;
        assert_eq!(plan.correspondence().indices(), vec![0, 0]);

        let frame = morph(&start, &end, 0.5)?;
        assert_eq!(
            frame.points(),
            &[Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0)]
        );
        Ok(())
    }

    #[test]
    fn test_morph_endpoints() -> Result<(), MorphError> {
        let start = create_random_points(23);
        let end = create_random_points(15);
        let n = 15;

        let sampled_start = uniform_sample(&start, n)?;
        let sampled_end = uniform_sample(&end, n)?;

        let at_zero = morph(&start, &end, 0.0)?;
        assert_eq!(at_zero, sampled_start);

        let plan = MorphPlan::new(&start, &end, MatchPolicy::Nearest)?;
        let at_one = morph(&start, &end, 1.0)?;
        for (i, p) in at_one.iter().enumerate() {
            let j = plan.correspondence().indices()[i];
            assert_eq!(*p, sampled_end[j]);
        }
        Ok(())
    }

    #[test]
    fn test_morph_length_is_min() -> Result<(), MorphError> {
        let a = create_random_points(7);
        let b = create_random_points(12);
        assert_eq!(morph(&a, &b, 0.3)?.len(), 7);
        assert_eq!(morph(&b, &a, 0.3)?.len(), 7);
        Ok(())
    }

    #[test]
    fn test_morph_extrapolates() -> Result<(), MorphError> {
        let start = [Point3::ZERO];
        let end = [Point3::new(1.0, 2.0, 3.0)];
        let frame = morph(&start, &end, 2.0)?;
        assert_eq!(frame[0], Point3::new(2.0, 4.0, 6.0));
        Ok(())
    }

    #[test]
    fn test_morph_unique_policy() -> Result<(), MorphError> {
        let start = create_random_points(10);
        let end = create_random_points(10);
        let plan = MorphPlan::new(&start, &end, MatchPolicy::NearestUnique)?;
        assert!(plan.correspondence().is_injective());
        assert!(plan.correspondence().is_complete());

        let frame = morph_with_policy(&start, &end, 1.0, MatchPolicy::NearestUnique)?;
        let mut sorted = frame
            .iter()
            .map(|p| p.to_array())
            .collect::<Vec<_>>();
        let mut expected = end.iter().map(|p| p.to_array()).collect::<Vec<_>>();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        assert_eq!(sorted, expected);
        Ok(())
    }

    #[test]
    fn test_morph_empty() {
        let points = [Point3::ZERO];
        assert_eq!(
            morph(&[], &points, 0.5),
            Err(MorphError::EmptyInput("morph start"))
        );
        assert_eq!(
            morph(&points, &[], 0.5),
            Err(MorphError::EmptyInput("morph end"))
        );
    }
}
