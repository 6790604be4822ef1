use serde::Deserialize;
use crate::drivers::aggregate::FoldPolicy;
use crate::drivers::error::CaptureError;
/// Values the processing core consumes, from the command line or a JSON
/// file. Defaults suit a 1 kHz sensor with a 10 second summary window.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Nominal sample rate R of the source, in Hz.
    pub sample_rate_hz: usize,
    /// Averaging window W, in whole seconds.
    pub window_secs: usize,
    /// Highest frequency bin written to summary rows, in Hz.
    pub max_freq_hz: usize,
    /// Window fold policy.
    pub fold: FoldPolicy,
    /// Circular pipeline depth P, in one-second slots.
    pub pipeline_len: usize,
    /// Consumer lag behind the write cursor, in slots. Unset selects P/10.
    pub consumer_lag: Option<usize>,
    /// Consumer poll delay while no slot is ready, in milliseconds.
    pub poll_interval_ms: u64,
}
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 1000,
            window_secs: 10,
            max_freq_hz: 150,
            fold: FoldPolicy::Mean,
            pipeline_len: 100,
            consumer_lag: None,
            poll_interval_ms: 2,
        }
    }
}
impl EngineConfig {
    pub fn consumer_lag(&self) -> usize {
        self.consumer_lag.unwrap_or(self.pipeline_len / 10)
    }
    /// Rejects impossible setups before any buffer is allocated.
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.sample_rate_hz == 0 {
            return Err(CaptureError::InvalidSampleRate);
        }
        if self.window_secs == 0 {
            return Err(CaptureError::InvalidWindow);
        }
        if self.max_freq_hz > self.sample_rate_hz / 2 {
            return Err(CaptureError::MaxFreqAboveNyquist {
                max_freq_hz: self.max_freq_hz,
                nyquist_hz: self.sample_rate_hz / 2,
            });
        }
        if self.pipeline_len == 0 {
            return Err(CaptureError::InvalidPipelineDepth);
        }
        if self.consumer_lag() >= self.pipeline_len {
            return Err(CaptureError::LagExceedsDepth {
                lag: self.consumer_lag(),
                depth: self.pipeline_len,
            });
        }
        Ok(())
    }
}
