use approx::assert_relative_eq;
use meshmorph::{
    icp::{icp, IcpConfig, IcpError, RotationEstimation},
    k3d::{
        correspond, transforms::axis_angle_to_rotation_matrix, MatchPolicy, Point3,
        RigidTransform,
    },
    morph::{morph, uniform_sample, MorphError, MorphPlan},
};

fn create_grid(size: usize, spacing: f64) -> Vec<Point3> {
    let mut points = Vec::with_capacity(size * size * size);
    for x in 0..size {
        for y in 0..size {
            for z in 0..size {
                points.push(Point3::new(
                    x as f64 * spacing,
                    y as f64 * spacing,
                    z as f64 * spacing,
                ));
            }
        }
    }
    points
}

#[test]
fn align_then_morph() -> Result<(), Box<dyn std::error::Error>> {
    let target = create_grid(4, 1.0);
    let rotation = axis_angle_to_rotation_matrix(&Point3::new(0.0, 0.0, 1.0), 0.04)
        .ok_or("zero axis")?;
    let motion = RigidTransform::new(rotation, Point3::new(-0.1, 0.05, 0.1));
    let source = motion.inverse().apply_to_slice(&target);

    let config: IcpConfig = serde_json::from_str(r#"{"max_iterations": 5}"#)?;
    let (aligned, result) = icp(&source, &target, &config)?;
    assert_eq!(result.num_iterations, 5);
    assert!(result.rmse < 1e-6);

    // once aligned, a nearest-point morph pairs every point with itself
    let plan = MorphPlan::new(&aligned, &target, MatchPolicy::Nearest)?;
    assert_eq!(
        plan.correspondence().indices(),
        (0..target.len()).collect::<Vec<_>>()
    );

    let halfway = morph(&aligned, &target, 0.5)?;
    for (p, q) in halfway.iter().zip(target.iter()) {
        assert_relative_eq!(p.distance(*q), 0.0, epsilon = 1e-6);
    }
    Ok(())
}

#[test]
fn translation_only_matches_reference_behaviour() -> Result<(), IcpError> {
    let target = create_grid(3, 2.0);
    let source = target
        .iter()
        .map(|p| *p + Point3::new(0.3, 0.0, -0.2))
        .collect::<Vec<_>>();

    let config = IcpConfig::default().with_rotation(RotationEstimation::TranslationOnly);
    let (aligned, result) = icp(&source, &target, &config)?;

    assert_eq!(result.num_iterations, 10);
    assert_relative_eq!(result.transform.translation.x, -0.3, epsilon = 1e-12);
    assert_relative_eq!(result.transform.translation.z, 0.2, epsilon = 1e-12);
    for (p, q) in aligned.iter().zip(target.iter()) {
        assert_relative_eq!(p.distance(*q), 0.0, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn morph_with_unequal_sizes() -> Result<(), MorphError> {
    let start = create_grid(3, 1.0);
    let end = create_grid(2, 5.0);

    let frame = morph(&start, &end, 0.0)?;
    assert_eq!(frame.len(), end.len());
    assert_eq!(frame, uniform_sample(&start, end.len())?);

    let corr = correspond(
        uniform_sample(&start, end.len())?.points(),
        &end,
        MatchPolicy::Nearest,
    )?;
    let frame = morph(&start, &end, 1.0)?;
    for (p, j) in frame.iter().zip(corr.indices()) {
        assert_eq!(*p, end[j]);
    }
    Ok(())
}

#[test]
fn errors_surface_through_the_stack() {
    let points = create_grid(2, 1.0);
    assert!(matches!(
        icp(&[], &points, &IcpConfig::default()),
        Err(IcpError::EmptyInput("source"))
    ));
    assert!(matches!(
        morph(&points, &points, 0.5).map(|p| p.len()),
        Ok(8)
    ));
    assert!(matches!(
        MorphPlan::new(&points, &points, MatchPolicy::ExtremenessBiased { floor: -1.0 }),
        Err(MorphError::Geometry(_))
    ));
}
