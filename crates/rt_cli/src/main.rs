use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rt_renderer::{RenderConfig, Renderer, DEFAULT_BUCKET_SIZE, DEFAULT_MAX_DEPTH};
use rt_scene::{load_scene, SceneDescription, ScenePreset, DEFAULT_SCENE_SEED};

/// Render a sphere scene with a CPU path tracer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 200)]
    height: u32,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 100)]
    samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Sampler seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Built-in scene (diffuse, materials, random)
    #[arg(short, long, default_value_t = ScenePreset::Materials)]
    preset: ScenePreset,

    /// JSON scene file; overrides --preset
    #[arg(long, value_name = "FILE.json")]
    scene: Option<PathBuf>,

    /// Bucket edge length for parallel rendering
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,

    /// Worker threads; all cores when omitted
    #[arg(long)]
    threads: Option<usize>,

    /// Render on a single thread, pixel by pixel
    #[arg(long)]
    sequential: bool,

    /// Output image; format follows the extension
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
}

impl Args {
    fn config(&self) -> RenderConfig {
        let config = RenderConfig::new(self.width, self.height, self.samples)
            .with_max_depth(self.max_depth);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn scene(&self) -> Result<SceneDescription> {
        match &self.scene {
            Some(path) => load_scene(path)
                .with_context(|| format!("Failed to load scene {}", path.display())),
            None => Ok(self
                .preset
                .build(self.seed.unwrap_or(DEFAULT_SCENE_SEED))),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let desc = args.scene()?;
    match &args.scene {
        Some(path) => log::info!("Scene: {} ({} objects)", path.display(), desc.objects.len()),
        None => log::info!("Scene: preset '{}' ({} objects)", args.preset, desc.objects.len()),
    }

    let mut renderer = Renderer::from_description(args.config(), &desc)
        .context("Failed to set up renderer")?;
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, seed {}",
        renderer.width(),
        renderer.height(),
        renderer.config().samples_per_pixel,
        renderer.config().max_depth,
        renderer.seed()
    );

    let start = Instant::now();
    let image = if args.sequential {
        renderer.render()?
    } else {
        renderer.render_parallel(args.bucket_size)?
    };
    log::info!("Rendered in {:.2?}", start.elapsed());

    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
