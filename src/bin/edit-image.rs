use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use image_chain::{PixelBuffer, RunConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "edit-image", version, about = "Apply a configured chain of image operations")]
struct Cli {
    /// Run configuration JSON (input, output, display, operations).
    #[arg(long)]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Worker threads for convolution (defaults to one per core).
    #[arg(long)]
    threads: Option<usize>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_image(path: &Path) -> anyhow::Result<PixelBuffer> {
    let rgb = image::open(path)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    let buffer = PixelBuffer::new(height as usize, width as usize, 3, rgb.into_raw())?;
    Ok(buffer)
}

fn save_image(buffer: PixelBuffer, path: &Path) -> anyhow::Result<()> {
    let (height, width, channels) = buffer.dim();
    let (width, height) = (u32::try_from(width)?, u32::try_from(height)?);
    let samples = buffer.into_samples();

    let result = match channels {
        1 => image::GrayImage::from_raw(width, height, samples)
            .context("grayscale buffer size mismatch")?
            .save(path),
        3 => image::RgbImage::from_raw(width, height, samples)
            .context("rgb buffer size mismatch")?
            .save(path),
        n => anyhow::bail!("cannot save image with {n} channels"),
    };
    result.with_context(|| format!("write image '{}'", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configure thread pool")?;
    }

    let config = RunConfig::from_path(&cli.config)
        .with_context(|| format!("load config '{}'", cli.config.display()))?;
    let pipeline = config.pipeline().context("build pipeline")?;

    let image = load_image(&config.input)?;
    info!(
        input = %config.input.display(),
        height = image.height(),
        width = image.width(),
        "image loaded"
    );

    let result = pipeline.apply(image);
    for (index, op) in pipeline.describe().iter().enumerate() {
        info!(index, op = %op, "applied");
    }

    if config.display {
        warn!("display requested but no display surface is available; skipping");
    }

    if let Some(output) = config.output_path() {
        save_image(result, output)?;
        info!(output = %output.display(), "image saved");
    }

    Ok(())
}
