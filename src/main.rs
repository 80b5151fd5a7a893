use std::path::PathBuf;

use clap::Parser;

use frustum_probe::math::vec3::Vec3;
use frustum_probe::render::{render_scene, Canvas};
use frustum_probe::{FrustumProbe, ProjectionParams};

/// Classify a view-space point against a perspective frustum.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 60.0)]
    fov_deg: f32,
    /// Viewport width, used for the aspect ratio.
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    /// Viewport height, used for the aspect ratio.
    #[arg(long, default_value_t = 720.0)]
    height: f32,
    /// Near plane distance.
    #[arg(long, default_value_t = 10.0)]
    near: f32,
    /// Far plane distance.
    #[arg(long, default_value_t = 50.0)]
    far: f32,

    /// Query point x (view space).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f32,
    /// Query point y (view space).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f32,
    /// Query point z (view space; the camera looks down -z).
    #[arg(long, default_value_t = -20.0, allow_negative_numbers = true)]
    z: f32,

    /// Write both diagnostic panels to this PNG file.
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,
    /// Open an interactive window (needs the `viewer` feature).
    #[arg(long)]
    interactive: bool,
    /// Width in pixels of the snapshot or window.
    #[arg(long, default_value_t = 1280, value_parser = canvas_side())]
    canvas_width: u32,
    /// Height in pixels of the snapshot or window.
    #[arg(long, default_value_t = 640, value_parser = canvas_side())]
    canvas_height: u32,
}

/// Largest accepted canvas side, in pixels.
const MAX_CANVAS_SIDE: i64 = 16384;

fn canvas_side() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=MAX_CANVAS_SIDE)
}

impl Args {
    fn projection_params(&self) -> ProjectionParams {
        ProjectionParams::from_degrees(self.fov_deg, self.width, self.height, self.near, self.far)
    }

    fn point(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[cfg(feature = "viewer")]
fn run_interactive(probe: &FrustumProbe, args: &Args) -> Result<(), String> {
    frustum_probe::viewer::run(probe, args.point(), args.canvas_width, args.canvas_height)
}

#[cfg(not(feature = "viewer"))]
fn run_interactive(_probe: &FrustumProbe, _args: &Args) -> Result<(), String> {
    Err("built without the `viewer` feature; rebuild with `--features viewer`".to_string())
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let probe = FrustumProbe::new(args.projection_params()).map_err(|e| e.to_string())?;

    if let Some(path) = &args.snapshot {
        let mut canvas = Canvas::new(args.canvas_width.max(2), args.canvas_height.max(1));
        render_scene(&mut canvas, &probe, args.point());
        canvas.save(path).map_err(|e| e.to_string())?;
    }

    if args.interactive {
        return run_interactive(&probe, &args);
    }

    let report = probe.probe(args.point());
    println!("{report}");
    match report.ndc {
        Some(ndc) => println!("NDC: ({:.3}, {:.3}, {:.3})", ndc.x, ndc.y, ndc.z),
        None => println!("NDC: undefined (point on or behind the camera plane)"),
    }
    println!("Visible: {}", if report.is_visible() { "yes" } else { "no" });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_reference_camera() {
        let args = Args::try_parse_from(["frustum-probe"]).unwrap();
        assert_eq!(args.projection_params(), ProjectionParams::default());
        assert_eq!(args.point(), Vec3::new(0.0, 0.0, -20.0));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let too_wide = ["frustum-probe", "--canvas-width", "100000"];
        assert!(Args::try_parse_from(too_wide).is_err());
        let empty = ["frustum-probe", "--canvas-height", "0"];
        assert!(Args::try_parse_from(empty).is_err());

        let largest = ["frustum-probe", "--canvas-width", "16384", "--canvas-height", "16384"];
        let args = Args::try_parse_from(largest).unwrap();
        assert_eq!((args.canvas_width, args.canvas_height), (16384, 16384));
    }
}
