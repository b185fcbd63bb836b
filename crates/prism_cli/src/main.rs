use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use prism_renderer::{render_with_progress, RenderConfig, RenderProgress, SceneDescription};

const OUTPUT_EXTENSION: &str = ".bmp";

/// Render a sphere scene to a bitmap.
#[derive(Debug, Parser)]
#[command(name = "prism", version, about, long_about = None)]
struct Args {
    /// Output file name; ".bmp" is appended when missing
    output: String,
    /// JSON scene description (renders the built-in showcase when omitted)
    #[arg(short, long)]
    scene: Option<PathBuf>,
    #[arg(long, default_value_t = 640)]
    width: u32,
    #[arg(long, default_value_t = 360)]
    height: u32,
    /// Camera rays averaged per pixel
    #[arg(short = 'n', long, default_value_t = 32)]
    samples: u32,
    /// Maximum number of scattering events per camera ray
    #[arg(long, default_value_t = 10)]
    max_depth: u32,
    /// Edge length of the square tiles rendered in parallel
    #[arg(long, default_value_t = 32)]
    bucket_size: u32,
    /// Fixed seed for a reproducible image
    #[arg(long)]
    seed: Option<u64>,
    /// Apply gamma 2 before writing 8-bit values
    #[arg(long)]
    gamma_correction: bool,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            bucket_size: self.bucket_size,
            seed: self.seed,
        }
    }
}

fn ensure_bmp_extension(name: &str) -> String {
    if name.ends_with(OUTPUT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{OUTPUT_EXTENSION}")
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = args.render_config();
    config.validate()?;

    let description = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, rendering the showcase");
            SceneDescription::showcase()
        }
    };
    let scene = description.build_scene().context("Invalid scene")?;
    let camera = description
        .build_camera(args.width, args.height)
        .context("Invalid camera")?;

    let last_percent = AtomicU32::new(0);
    let report = |progress: RenderProgress| {
        let percent = progress.percent();
        if last_percent.fetch_max(percent, Ordering::Relaxed) < percent {
            log::info!("{percent}%");
        }
    };
    let image = render_with_progress(&camera, &scene, &config, &report);

    let output = ensure_bmp_extension(&args.output);
    image
        .save(&output, args.gamma_correction)
        .with_context(|| format!("Failed to write {output}"))?;

    Ok(())
}
