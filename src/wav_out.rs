use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use chrono::Local;
use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;
use crate::drivers::{CaptureError, RawSink, SampleTriple};
/// Acceleration mapped to +/-1.0 full scale in the WAV stream, in g.
pub const FULL_SCALE_G: f64 = 0.005;
/// Seconds for the gravity estimate to decay to half weight.
const GRAVITY_TAU_SECS: f64 = 10.0;
/// Exponential moving average tracking the gravity/DC offset per axis.
///
/// decay = 2^(-1 / (tau * R)), so a step input has moved the estimate half
/// way after tau seconds.
pub struct GravityFilter {
    decay: f64,
    estimate: [f64; 3],
}
impl GravityFilter {
    pub fn new(sample_rate_hz: usize) -> Self {
        Self {
            decay: 2.0_f64.powf(-1.0 / (GRAVITY_TAU_SECS * sample_rate_hz as f64)),
            estimate: [0.0; 3],
        }
    }
    /// Seed the estimate with the first sample of a fresh recording so the
    /// output does not start with a gravity-sized step.
    pub fn reset(&mut self, value: [f64; 3]) {
        self.estimate = value;
    }
    /// Update the offset estimate and return the offset-free sample.
    pub fn apply(&mut self, value: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for i in 0..3 {
            self.estimate[i] = self.decay * self.estimate[i] + (1.0 - self.decay) * value[i];
            out[i] = value[i] - self.estimate[i];
        }
        out
    }
}
/// Tees the raw sample stream into one 3-channel float WAV per calendar
/// day, normalized to full scale and with the gravity offset removed.
///
/// The filter keeps running even while no file is open, so the offset
/// estimate stays warm across a failed or delayed file creation.
pub struct WavRawWriter {
    output_dir: PathBuf,
    sample_rate_hz: usize,
    filter: GravityFilter,
    writer: Option<WavWriter<BufWriter<File>>>,
    current_path: Option<PathBuf>,
}
impl WavRawWriter {
    pub fn new(output_dir: impl Into<PathBuf>, sample_rate_hz: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            sample_rate_hz,
            filter: GravityFilter::new(sample_rate_hz),
            writer: None,
            current_path: None,
        }
    }
    fn spec(&self) -> WavSpec {
        WavSpec {
            channels: 3,
            sample_rate: self.sample_rate_hz as u32,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        }
    }
    /// Open today's file if it is not the current one. A new or reopened
    /// file reseeds the gravity estimate from the incoming sample.
    fn roll_file(&mut self, normalized: [f64; 3]) -> Result<(), CaptureError> {
        let path = self
            .output_dir
            .join(format!("{}_accel.wav", Local::now().format("%Y-%m-%d")));
        if self.current_path.as_deref() == Some(path.as_path()) && self.writer.is_some() {
            return Ok(());
        }
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        let writer = if path.exists() {
            WavWriter::append(&path)?
        } else {
            info!("created raw output file {}", path.display());
            WavWriter::create(&path, self.spec())?
        };
        self.filter.reset(normalized);
        self.current_path = Some(path);
        self.writer = Some(writer);
        Ok(())
    }
}
impl RawSink for WavRawWriter {
    fn write(&mut self, triple: &SampleTriple, batch_start: bool) -> Result<(), CaptureError> {
        let raw = triple.to_array();
        let normalized = [
            raw[0] / FULL_SCALE_G,
            raw[1] / FULL_SCALE_G,
            raw[2] / FULL_SCALE_G,
        ];
        if batch_start {
            self.roll_file(normalized)?;
        }
        let filtered = self.filter.apply(normalized);
        if let Some(writer) = self.writer.as_mut() {
            for channel in filtered {
                writer.write_sample(channel as f32)?;
            }
        }
        Ok(())
    }
}
