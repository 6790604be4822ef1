use std::collections::VecDeque;
use crate::drivers::CaptureError;
/// One reading from the accelerometer: acceleration along all three axes, in g.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleTriple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl SampleTriple {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}
/// Sensor axis identifier; the discriminant doubles as the buffer index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}
impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
    pub fn index(self) -> usize {
        self as usize
    }
    /// Lowercase label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}
/// Trait representing something that can yield sample batches on demand.
///
/// The hardware driver is an external collaborator; anything that produces
/// batches of triples at a nominal rate can stand behind this trait.
/// `Ok(None)` means the source is exhausted.
pub trait SampleSource {
    fn next_batch(&mut self) -> Result<Option<Vec<SampleTriple>>, CaptureError>;
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Vec<SampleTriple>>,
}
impl ManualSource {
    pub fn new(batches: impl IntoIterator<Item = Vec<SampleTriple>>) -> Self {
        Self {
            queue: batches.into_iter().collect(),
        }
    }
}
impl SampleSource for ManualSource {
    fn next_batch(&mut self) -> Result<Option<Vec<SampleTriple>>, CaptureError> {
        Ok(self.queue.pop_front())
    }
}
