use thiserror::Error;
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("averaging window must be at least one second")]
    InvalidWindow,
    #[error("max frequency {max_freq_hz} Hz exceeds the Nyquist limit of {nyquist_hz} Hz")]
    MaxFreqAboveNyquist { max_freq_hz: usize, nyquist_hz: usize },
    #[error("pipeline depth must be greater than zero")]
    InvalidPipelineDepth,
    #[error("consumer lag {lag} must stay below the pipeline depth {depth}")]
    LagExceedsDepth { lag: usize, depth: usize },
    #[error("sample source failure: {0}")]
    Source(String),
    #[error("summary sink failure: {0}")]
    Sink(#[from] std::io::Error),
    #[error("raw sink failure: {0}")]
    RawSink(String),
}
impl From<hound::Error> for CaptureError {
    fn from(value: hound::Error) -> Self {
        CaptureError::RawSink(value.to_string())
    }
}
