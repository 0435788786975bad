use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use starlight_geo::{ArcParams, GeoPoint, build_arc_with, project};
use starlight_post::ShaderKind;
use starlight_render::{DebugTextRenderer, Renderer};
use starlight_scene::{OrbitCamera, Scene, SceneConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "starlight-cli", about = "CLI tool for starlight globe scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Project a latitude/longitude (degrees) onto a sphere
    Project {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Sphere radius
        #[arg(short, long, default_value = "1.3")]
        radius: f64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Build an arc between two "lat,lng" points (degrees)
    Arc {
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        from: (f64, f64),
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        to: (f64, f64),
        /// Base sphere radius
        #[arg(short, long, default_value = "1.3")]
        radius: f64,
        /// Extra height at the arc midpoint
        #[arg(short, long, default_value = "0.4")]
        bulge: f64,
        /// Interpolation steps (the arc has segments + 1 points)
        #[arg(short, long, default_value = "100")]
        segments: u32,
        /// Print every point as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a scene, advance it, and print a debug frame
    Scene {
        /// YAML scene config; built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Frames to advance before printing
        #[arg(short, long, default_value = "0")]
        frames: u64,
        /// Print the effective config as YAML and exit
        #[arg(long)]
        dump_config: bool,
    },
    /// Print WGSL source for a custom post pass
    Shader {
        #[arg(value_enum)]
        kind: ShaderArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShaderArg {
    Distortion,
    Gamma,
}

impl From<ShaderArg> for ShaderKind {
    fn from(arg: ShaderArg) -> Self {
        match arg {
            ShaderArg::Distortion => ShaderKind::Distortion,
            ShaderArg::Gamma => ShaderKind::Gamma,
        }
    }
}

fn parse_lat_lng(s: &str) -> Result<(f64, f64), String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lng\", got {s:?}"))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    Ok((lat, lng))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("starlight-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("geo: {}", starlight_geo::crate_info());
            println!("post: {}", starlight_post::crate_info());
            println!("scene: {}", starlight_scene::crate_info());
            println!("render: {}", starlight_render::crate_info());
        }
        Commands::Project {
            lat,
            lng,
            radius,
            json,
        } => {
            let p = project(GeoPoint::from_degrees(lat, lng), radius)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&p)?);
            } else {
                println!("({:.6}, {:.6}, {:.6}) |p|={:.6}", p.x, p.y, p.z, p.magnitude());
            }
        }
        Commands::Arc {
            from,
            to,
            radius,
            bulge,
            segments,
            json,
        } => {
            let a = project(GeoPoint::from_degrees(from.0, from.1), radius)?;
            let b = project(GeoPoint::from_degrees(to.0, to.1), radius)?;
            let params = ArcParams {
                base_radius: radius,
                bulge,
                segments,
            };
            let arc = build_arc_with(a, b, params)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&arc)?);
            } else {
                let (s, e) = (arc.start(), arc.end());
                println!("Arc: {} points", arc.len());
                println!("  start=({:.6}, {:.6}, {:.6})", s.x, s.y, s.z);
                println!("  end=({:.6}, {:.6}, {:.6})", e.x, e.y, e.z);
                println!(
                    "  max |p|={:.6} peak={:.6}",
                    arc.max_magnitude(),
                    arc.peak_height()
                );
            }
        }
        Commands::Scene {
            config,
            frames,
            dump_config,
        } => {
            let config = match config {
                Some(path) => SceneConfig::load(&path)
                    .with_context(|| format!("loading scene config {}", path.display()))?,
                None => SceneConfig::default(),
            };
            if dump_config {
                print!("{}", config.to_yaml_string()?);
                return Ok(());
            }

            let mut scene = Scene::build(&config)?;
            let mut camera = OrbitCamera::from_config(&config.camera);
            for _ in 0..frames {
                scene.step();
                camera.update();
            }
            tracing::debug!(frames, "scene advanced");

            print!("{}", DebugTextRenderer::new().render(&scene, &camera));
        }
        Commands::Shader { kind } => {
            print!("{}", ShaderKind::from(kind).source());
        }
    }

    Ok(())
}
