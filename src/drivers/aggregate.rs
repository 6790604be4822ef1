use chrono::Local;
use serde::Deserialize;
use crate::drivers::emit::SummarySink;
use crate::drivers::{Axis, CaptureError};
/// How the per-second spectra of a window are folded into one summary row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldPolicy {
    Mean,
    Max,
}
/// Rolling window of the last W per-second spectra for every axis.
///
/// Spectra are stored raw and folded only at emission time, which keeps the
/// two policies on one code path (see `fold_max` for a long-standing quirk
/// in the max scaling). One fill index is shared by all three axes, which
/// keeps their windows in lockstep.
pub struct SpectrumAggregator {
    windows: [Vec<Vec<f64>>; 3],
    fill: usize,
    window_secs: usize,
    sample_rate_hz: usize,
    max_freq_hz: usize,
    policy: FoldPolicy,
}
impl SpectrumAggregator {
    pub fn new(
        window_secs: usize,
        sample_rate_hz: usize,
        max_freq_hz: usize,
        policy: FoldPolicy,
    ) -> Self {
        let bins = sample_rate_hz / 2 + 1;
        let window = || {
            (0..window_secs)
                .map(|_| vec![0.0; bins])
                .collect::<Vec<_>>()
        };
        Self {
            windows: [window(), window(), window()],
            fill: 0,
            window_secs,
            sample_rate_hz,
            max_freq_hz,
            policy,
        }
    }
    pub fn fill_index(&self) -> usize {
        self.fill
    }
    /// Store the freshly computed spectrum for `axis` at the fill index.
    pub fn ingest(&mut self, axis: Axis, spectrum: &[f64]) {
        let row = &mut self.windows[axis.index()][self.fill];
        assert_eq!(spectrum.len(), row.len());
        row.copy_from_slice(spectrum);
    }
    /// Advance the fill index once all three axes of a second are ingested.
    ///
    /// When the window completes, one folded row per axis goes to the sink
    /// and the index wraps to zero. The index is reset before emitting, so a
    /// failed sink write costs exactly this one window. Returns true when an
    /// emission happened.
    pub fn complete_second(&mut self, sink: &mut dyn SummarySink) -> Result<bool, CaptureError> {
        self.fill += 1;
        if self.fill < self.window_secs {
            return Ok(false);
        }
        self.fill = 0;
        let timestamp = Local::now();
        let mut result = Ok(true);
        for axis in Axis::ALL {
            let values: Vec<f64> = (0..=self.max_freq_hz)
                .map(|k| match self.policy {
                    FoldPolicy::Mean => self.fold_mean(axis, k),
                    FoldPolicy::Max => self.fold_max(axis, k),
                })
                .collect();
            if let Err(err) = sink.emit(axis, timestamp, &values) {
                if result.is_ok() {
                    result = Err(err);
                } else {
                    log::error!("summary sink failure for axis {}: {err}", axis.label());
                }
            }
        }
        result
    }
    /// Arithmetic mean over the window, scaled to per-mille of full scale.
    fn fold_mean(&self, axis: Axis, k: usize) -> f64 {
        let sum: f64 = self.windows[axis.index()].iter().map(|row| row[k]).sum();
        sum / (self.window_secs as f64 * self.sample_rate_hz as f64 / 1000.0)
    }
    /// Running maximum over the window. The accumulator is rescaled by
    /// R/1000 on every iteration rather than once after the loop: for a
    /// rising window this collapses to a single division, for a falling one
    /// it compounds and under-reports. Kept as is so downstream CSV
    /// consumers keep seeing the numbers they calibrated against; the
    /// corrected form would divide once after the loop. See DESIGN.md.
    fn fold_max(&self, axis: Axis, k: usize) -> f64 {
        let scale = self.sample_rate_hz as f64 / 1000.0;
        let mut value = 0.0;
        for (j, row) in self.windows[axis.index()].iter().enumerate() {
            if row[k] > value || j == 0 {
                value = row[k];
            }
            value /= scale;
        }
        value
    }
}
