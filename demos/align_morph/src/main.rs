use argh::FromArgs;
use std::path::PathBuf;

use meshmorph::icp::{self as micp, IcpConfig, RotationEstimation};
use meshmorph::k3d::{
    transforms::axis_angle_to_rotation_matrix, MatchPolicy, Point3, RigidTransform,
};
use meshmorph::morph::MorphPlan;

#[derive(FromArgs)]
/// Align a randomly moved point cloud back onto itself, then morph between the two
struct Args {
    /// number of points in the synthetic cloud
    #[argh(option, short = 'n', default = "500")]
    num_points: usize,

    /// rotation angle in radians applied to the source
    #[argh(option, default = "0.1")]
    angle: f64,

    /// number of ICP rounds
    #[argh(option, default = "10")]
    iterations: usize,

    /// estimate translation only (identity rotation)
    #[argh(switch)]
    translation_only: bool,

    /// matching policy for the morph: nearest, nearest-unique, biased, biased-unique
    #[argh(option, default = "MatchPolicy::Nearest", from_str_fn(parse_policy))]
    policy: MatchPolicy,

    /// number of morph frames to print
    #[argh(option, default = "5")]
    frames: usize,

    /// optional json file with the ICP configuration, overrides the flags above
    #[argh(option)]
    config: Option<PathBuf>,
}

fn parse_policy(value: &str) -> Result<MatchPolicy, String> {
    match value {
        "nearest" => Ok(MatchPolicy::Nearest),
        "nearest-unique" => Ok(MatchPolicy::NearestUnique),
        "biased" => Ok(MatchPolicy::extremeness_biased()),
        "biased-unique" => Ok(MatchPolicy::extremeness_biased_unique()),
        _ => Err(format!("unknown policy: {value}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let target = (0..args.num_points)
        .map(|_| {
            Point3::new(
                rand::random::<f64>(),
                rand::random::<f64>(),
                rand::random::<f64>(),
            )
        })
        .collect::<Vec<_>>();
    println!("Target cloud: #{} points", target.len());

    let rotation = axis_angle_to_rotation_matrix(&Point3::new(0.2, 0.3, 1.0), args.angle)
        .ok_or("cannot build the rotation")?;
    let motion = RigidTransform::new(rotation, Point3::new(0.05, -0.02, 0.03));
    let source = motion.inverse().apply_to_slice(&target);

    let config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => IcpConfig::default()
            .with_max_iterations(args.iterations)
            .with_rotation(if args.translation_only {
                RotationEstimation::TranslationOnly
            } else {
                RotationEstimation::Kabsch
            }),
    };
    log::info!("ICP config: {:?}", config);

    let (aligned, result) = micp::icp(&source, &target, &config)?;
    println!(
        "ICP: {} iterations, rmse {:.6}, stop {:?}",
        result.num_iterations, result.rmse, result.stop
    );
    println!("Estimated transform: {:?}", result.transform);
    println!("Applied transform:   {:?}", motion);
    if let Some((lo, hi)) = aligned.bounds() {
        println!("Aligned bounds: {lo} .. {hi}");
    }

    let plan = MorphPlan::new(&source, aligned.points(), args.policy)?;
    println!(
        "Morph: {} points, {} fallbacks",
        plan.len(),
        plan.correspondence().fallback_count()
    );

    let steps = args.frames.max(2) - 1;
    for k in 0..=steps {
        let t = k as f64 / steps as f64;
        let frame = plan.blend(t);
        let centroid = frame.centroid()?;
        println!("t = {t:.2}: centroid {centroid}");
    }

    Ok(())
}
