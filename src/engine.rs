use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;
use log::{error, info};
use crate::drivers::{SampleSource, SampleTriple, SpectralPipeline, SummarySink};
/// What a finished engine run looked like.
#[derive(Clone, Copy, Debug)]
pub struct EngineReport {
    pub seconds_processed: u64,
    pub overruns: u64,
}
/// Spawns the producer thread feeding batches from `source` into the
/// returned channel.
///
/// `batch_interval` paces delivery to emulate a real sensor; pass zero to
/// push as fast as the source yields (tests). The thread ends when the
/// source is exhausted, fails, or the receiver goes away.
pub fn spawn_sampler<S>(
    mut source: S,
    batch_interval: Duration,
) -> (Receiver<Vec<SampleTriple>>, thread::JoinHandle<()>)
where
    S: SampleSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || loop {
        match source.next_batch() {
            Ok(Some(batch)) => {
                if tx.send(batch).is_err() {
                    break;
                }
                if !batch_interval.is_zero() {
                    thread::sleep(batch_interval);
                }
            }
            Ok(None) => break,
            Err(err) => {
                error!("sample source failure: {err}");
                break;
            }
        }
    });
    (rx, handle)
}
/// The consumer loop: interleaves channel draining with spectral processing
/// until the source disconnects or `shutdown` is raised.
///
/// Sink failures are logged and the loop carries on; the aggregation window
/// already accounted for the lost emission. Whatever partial slot is in
/// flight when the loop ends is discarded.
pub fn run(
    pipeline: &mut SpectralPipeline,
    sink: &mut dyn SummarySink,
    batches: &Receiver<Vec<SampleTriple>>,
    shutdown: &AtomicBool,
    poll_interval: Duration,
) -> EngineReport {
    let mut seconds = 0u64;
    loop {
        let mut disconnected = false;
        loop {
            match batches.try_recv() {
                Ok(batch) => pipeline.ingest_batch(&batch),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        match pipeline.process_ready(sink) {
            Ok(0) => {
                if disconnected {
                    break;
                }
                thread::sleep(poll_interval);
            }
            Ok(processed) => seconds += processed as u64,
            Err(err) => error!("summary emission failed: {err}"),
        }
        if shutdown.load(Ordering::Relaxed) {
            break;
        }
    }
    let report = EngineReport {
        seconds_processed: seconds,
        overruns: pipeline.overruns(),
    };
    info!(
        "engine stopped: {} seconds processed, {} overruns",
        report.seconds_processed, report.overruns
    );
    report
}
