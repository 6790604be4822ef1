use std::f64::consts::PI;
use crate::drivers::{CaptureError, SampleSource, SampleTriple};
/// Deterministic stand-in for the accelerometer.
///
/// Produces a fixed tone per axis, small enough to stay inside the sensor's
/// full scale, plus the 1 g gravity offset on z so the gravity filter has
/// something to remove. Useful for demo runs and end-to-end tests without
/// hardware attached.
pub struct SineSource {
    sample_rate_hz: usize,
    batch_len: usize,
    remaining: Option<usize>,
    position: usize,
}
impl SineSource {
    pub fn new(sample_rate_hz: usize, batch_len: usize, duration_secs: Option<u64>) -> Self {
        Self {
            sample_rate_hz,
            batch_len: batch_len.max(1),
            remaining: duration_secs.map(|secs| secs as usize * sample_rate_hz),
            position: 0,
        }
    }
    fn triple_at(&self, index: usize) -> SampleTriple {
        let t = index as f64 / self.sample_rate_hz as f64;
        SampleTriple::new(
            0.001 * (2.0 * PI * 50.0 * t).sin(),
            0.0005 * (2.0 * PI * 120.0 * t).sin(),
            1.0 + 0.0002 * (2.0 * PI * 33.0 * t).sin(),
        )
    }
}
impl SampleSource for SineSource {
    fn next_batch(&mut self) -> Result<Option<Vec<SampleTriple>>, CaptureError> {
        let len = match self.remaining {
            Some(0) => return Ok(None),
            Some(remaining) => remaining.min(self.batch_len),
            None => self.batch_len,
        };
        let batch: Vec<SampleTriple> = (0..len)
            .map(|i| self.triple_at(self.position + i))
            .collect();
        self.position += len;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= len;
        }
        Ok(Some(batch))
    }
}
