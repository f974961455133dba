//! Command line entry point: cluster the beats of an audio file by pitch

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;

use audio_kmedoids::clustering::kmedoids::DEFAULT_MAX_ITERATIONS;
use audio_kmedoids::{run, AnalysisConfig, AudioFrontEnd, JsonSink, TextSink, VisualizationSink};

/// command-line interface for beat clustering
#[derive(Parser)]
#[command(name = "audio-kmedoids", version, disable_version_flag = true)]
#[command(about = "cluster the beats of an audio file by their dominant frequency")]
struct Cli {
    /// audio file to analyze (wav, mp3, ...)
    filepath: PathBuf,

    /// number of clusters
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=8))]
    size: u8,

    /// print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// seed for the initial medoid draw (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// cap on clustering passes
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// write the result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = AnalysisConfig {
        cluster_size: cli.size as usize,
        max_iterations: cli.max_iterations,
        ..Default::default()
    };
    config.validate().context("invalid configuration")?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let stdout = io::stdout().lock();
    let mut sink: Box<dyn VisualizationSink> = if cli.json {
        Box::new(JsonSink::new(stdout).pretty())
    } else {
        Box::new(TextSink::new(stdout))
    };

    let front_end = AudioFrontEnd::new(&config);
    let result = run(&front_end, &cli.filepath, &config, &mut rng, sink.as_mut())
        .with_context(|| format!("failed to analyze {}", cli.filepath.display()))?;

    log::info!(
        "{} points in {} clusters ({} discarded), {:.2} ms",
        result.points.len(),
        result.clustering.medoids.len(),
        result.metadata.discarded_points,
        result.metadata.processing_time_ms
    );

    Ok(())
}
