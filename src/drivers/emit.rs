use chrono::{DateTime, Local};
use crate::drivers::{Axis, CaptureError};
/// Receives one summary row per axis per emission event.
///
/// Implementations own file naming and rotation; the pipeline only supplies
/// the folded bin values and the wall-clock stamp of the emission. A failed
/// emit is recoverable: the pipeline logs it and carries on with the next
/// window.
pub trait SummarySink {
    fn emit(
        &mut self,
        axis: Axis,
        timestamp: DateTime<Local>,
        values: &[f64],
    ) -> Result<(), CaptureError>;
}
/// One emitted row, as captured by [`MemorySink`].
#[derive(Clone, Debug)]
pub struct SummaryRow {
    pub axis: Axis,
    pub timestamp: DateTime<Local>,
    pub values: Vec<f64>,
}
/// Collects rows in memory; useful for tests and deterministic playback.
#[derive(Default)]
pub struct MemorySink {
    pub rows: Vec<SummaryRow>,
}
impl SummarySink for MemorySink {
    fn emit(
        &mut self,
        axis: Axis,
        timestamp: DateTime<Local>,
        values: &[f64],
    ) -> Result<(), CaptureError> {
        self.rows.push(SummaryRow {
            axis,
            timestamp,
            values: values.to_vec(),
        });
        Ok(())
    }
}
