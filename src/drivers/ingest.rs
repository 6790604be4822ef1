use log::error;
use crate::drivers::ring::RingPipeline;
use crate::drivers::{Axis, CaptureError, SampleTriple};
/// Consumes the raw sample stream alongside spectral processing.
///
/// `batch_start` is true for the first triple of each delivered batch; sinks
/// use it to re-check their output key (date rollover) without paying for
/// the check on every sample.
pub trait RawSink {
    fn write(&mut self, triple: &SampleTriple, batch_start: bool) -> Result<(), CaptureError>;
}
/// Boundary between the sample source and the ring: the single writer.
///
/// Runs in whatever context delivers source batches, the way a sensor data
/// callback would. Every triple is teed to the optional raw sink, appended
/// to the active slot, and the slot is rotated once a full second has been
/// written.
pub struct IngestAdapter {
    raw_sink: Option<Box<dyn RawSink>>,
}
impl IngestAdapter {
    pub fn new() -> Self {
        Self { raw_sink: None }
    }
    pub fn with_raw_sink(sink: Box<dyn RawSink>) -> Self {
        Self {
            raw_sink: Some(sink),
        }
    }
    pub fn on_sample_batch(&mut self, ring: &mut RingPipeline, triples: &[SampleTriple]) {
        for (i, triple) in triples.iter().enumerate() {
            if let Some(sink) = self.raw_sink.as_deref_mut() {
                // Raw output is best effort; a failing tee never stalls
                // acquisition.
                if let Err(err) = sink.write(triple, i == 0) {
                    error!("raw sink write failed: {err}");
                }
            }
            for axis in Axis::ALL {
                ring.append(axis, triple.axis(axis));
            }
            ring.commit_row();
            if ring.slot_full() {
                ring.advance();
            }
        }
    }
}
impl Default for IngestAdapter {
    fn default() -> Self {
        Self::new()
    }
}
