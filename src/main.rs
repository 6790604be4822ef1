mod csv_out;
mod drivers;
mod engine;
mod sim;
mod wav_out;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use log::info;
use crate::csv_out::CsvSummaryWriter;
use crate::drivers::{EngineConfig, FoldPolicy, SpectralPipeline};
use crate::sim::SineSource;
use crate::wav_out::WavRawWriter;
#[derive(Parser)]
#[command(
    name = "accelspec",
    about = "reads a 3-axis acceleration stream and logs per-axis amplitude spectra to daily CSV files"
)]
struct Cli {
    /// Output directory for CSV (and WAV) files
    #[arg(short = 'd', long = "output-directory", default_value = ".")]
    output_dir: PathBuf,
    /// Averaging interval in seconds
    #[arg(short = 'a', long = "average-interval", default_value_t = 10)]
    average_interval: usize,
    /// Max. frequency in Hz
    #[arg(short = 'm', long = "max-frequency", default_value_t = 150)]
    max_frequency: usize,
    /// Calculate maximum instead of average
    #[arg(short = 'M', long)]
    calcmax: bool,
    /// Store a gravity-filtered wav file too
    #[arg(short = 'w', long)]
    wav: bool,
    /// Sample rate of the source in Hz
    #[arg(long, default_value_t = 1000)]
    rate: usize,
    /// Stop after this many seconds of input (runs until killed if omitted)
    #[arg(long)]
    duration: Option<u64>,
    /// JSON file with the full engine configuration; overrides the tuning
    /// flags above
    #[arg(long)]
    config: Option<PathBuf>,
}
impl Cli {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        if let Some(path) = &self.config {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            let config: EngineConfig = serde_json::from_str(&text)
                .with_context(|| format!("invalid config file {}", path.display()))?;
            return Ok(config);
        }
        Ok(EngineConfig {
            sample_rate_hz: self.rate,
            window_secs: self.average_interval,
            max_freq_hz: self.max_frequency,
            fold: if self.calcmax {
                FoldPolicy::Max
            } else {
                FoldPolicy::Mean
            },
            ..EngineConfig::default()
        })
    }
}
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.engine_config()?;
    let mut pipeline = SpectralPipeline::new(&config)?;
    if cli.wav {
        pipeline = pipeline.with_raw_sink(Box::new(WavRawWriter::new(
            &cli.output_dir,
            config.sample_rate_hz,
        )));
    }
    let mut sink = CsvSummaryWriter::new(&cli.output_dir, config.max_freq_hz);
    // Batches of roughly 10 ms keep the channel shallow at any sample rate.
    let batch_len = (config.sample_rate_hz / 100).max(1);
    let batch_interval = Duration::from_secs_f64(batch_len as f64 / config.sample_rate_hz as f64);
    let source = SineSource::new(config.sample_rate_hz, batch_len, cli.duration);
    info!(
        "capturing at {} Hz, {} s window, bins 0..={} Hz, policy {:?}",
        config.sample_rate_hz, config.window_secs, config.max_freq_hz, config.fold
    );
    let (batches, producer) = engine::spawn_sampler(source, batch_interval);
    let shutdown = AtomicBool::new(false);
    let report = engine::run(
        &mut pipeline,
        &mut sink,
        &batches,
        &shutdown,
        Duration::from_millis(config.poll_interval_ms),
    );
    producer
        .join()
        .map_err(|_| anyhow::anyhow!("sample producer thread panicked"))?;
    info!(
        "done: {} seconds processed, {} overruns",
        report.seconds_processed, report.overruns
    );
    Ok(())
}
