use meshmorph_3d::{correspond, Correspondence, MatchPolicy, Point3, PointSet, RigidTransform};

use crate::{estimate_rigid_motion, IcpError, RotationEstimation};

/// Default number of ICP rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Parameters of the ICP loop.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IcpConfig {
    /// Number of rounds to run.
    pub max_iterations: usize,
    /// How each round estimates its rotation.
    pub rotation: RotationEstimation,
    /// Matching policy used every round.
    pub policy: MatchPolicy,
    /// Stop early once the RMSE changes by less than this between two rounds.
    /// `None` always runs the full budget.
    pub tolerance: Option<f64>,
}

impl Default for IcpConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            rotation: RotationEstimation::Kabsch,
            policy: MatchPolicy::Nearest,
            tolerance: None,
        }
    }
}

impl IcpConfig {
    /// Sets the number of rounds.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the rotation estimation mode.
    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationEstimation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the matching policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables early termination on RMSE stagnation.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}

/// Why the ICP loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IcpStop {
    /// All `max_iterations` rounds were run.
    BudgetExhausted,
    /// The RMSE change dropped below the configured tolerance.
    ToleranceReached,
}

/// Result of the ICP algorithm.
///
/// The transformation is from the original source to the target frame.
#[derive(Debug, Clone)]
pub struct IcpResult {
    /// Accumulated transform over all rounds.
    pub transform: RigidTransform,
    /// The transform estimated in each round, in order.
    pub steps: Vec<RigidTransform>,
    /// The number of rounds performed.
    pub num_iterations: usize,
    /// RMSE between the moved source and its matched targets after the last round.
    pub rmse: f64,
    /// Why the loop stopped.
    pub stop: IcpStop,
}

/// Iterative Closest Point, mutating the source in place.
///
/// Each round matches the current source against the fixed target, estimates
/// the rigid motion of the matched pairs and applies it to every source point.
/// The target is never modified.
///
/// # Arguments
///
/// * `source` - Working buffer, moved towards the target every round.
/// * `target` - Target points.
/// * `config` - Loop parameters.
///
/// # Returns
///
/// The accumulated transform and per-round diagnostics. Fails with
/// [`IcpError::EmptyInput`] before iterating if either set is empty.
pub fn icp_in_place(
    source: &mut PointSet,
    target: &[Point3],
    config: &IcpConfig,
) -> Result<IcpResult, IcpError> {
    if source.is_empty() {
        return Err(IcpError::EmptyInput("source"));
    }
    if target.is_empty() {
        return Err(IcpError::EmptyInput("target"));
    }

    let mut result = IcpResult {
        transform: RigidTransform::identity(),
        steps: Vec::with_capacity(config.max_iterations),
        num_iterations: 0,
        rmse: f64::INFINITY,
        stop: IcpStop::BudgetExhausted,
    };

    // main icp loop
    for i in 0..config.max_iterations {
        log::debug!("Iteration: {}", i);
        let now = std::time::Instant::now();

        let correspondence = correspond(source.points(), target, config.policy)?;

        let step =
            estimate_rigid_motion(source.points(), target, &correspondence, config.rotation)?;
        step.apply_in_place(source.points_mut());

        result.transform = result.transform.then(&step);
        result.steps.push(step);
        result.num_iterations += 1;

        let rmse = matched_rmse(source.points(), target, &correspondence);
        log::debug!("rmse: {}", rmse);

        let previous_rmse = result.rmse;
        result.rmse = rmse;

        if let Some(tolerance) = config.tolerance {
            if (previous_rmse - rmse).abs() < tolerance {
                log::debug!("ICP converged in {} iterations with error {}", i + 1, rmse);
                result.stop = IcpStop::ToleranceReached;
                break;
            }
        }

        log::debug!("elapsed: {:?}", now.elapsed());
    }

    Ok(result)
}

/// Iterative Closest Point on a copy of the source.
///
/// Same as [`icp_in_place`] but leaves `source` untouched and returns the
/// aligned copy alongside the result.
pub fn icp(
    source: &[Point3],
    target: &[Point3],
    config: &IcpConfig,
) -> Result<(PointSet, IcpResult), IcpError> {
    let mut working = PointSet::new(source.to_vec());
    let result = icp_in_place(&mut working, target, config)?;
    Ok((working, result))
}

fn matched_rmse(source: &[Point3], target: &[Point3], correspondence: &Correspondence) -> f64 {
    let (sum, count) = correspondence
        .pairs(source, target)
        .fold((0.0, 0usize), |(sum, count), (s, t)| {
            (sum + s.distance_squared(t), count + 1)
        });
    if count == 0 {
        return f64::INFINITY;
    }
    (sum / count as f64).sqrt()
}
