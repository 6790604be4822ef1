pub mod aggregate;
pub mod config;
pub mod emit;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod ring;
pub mod source;
pub mod spectrum;
pub use aggregate::{FoldPolicy, SpectrumAggregator};
pub use config::EngineConfig;
pub use emit::{MemorySink, SummaryRow, SummarySink};
pub use error::CaptureError;
pub use ingest::{IngestAdapter, RawSink};
pub use pipeline::SpectralPipeline;
pub use ring::{RingPipeline, SlotSamples};
pub use source::{Axis, ManualSource, SampleSource, SampleTriple};
pub use spectrum::SpectrumEngine;
