use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};
use log::info;
use crate::drivers::{Axis, CaptureError, SummarySink};
/// Marker embedded in every output file name.
const OUTPUT_MARKER: &str = "accel";
/// Appends summary rows to one CSV file per calendar date and axis.
///
/// A file gets its header the first time a (date, axis) pair is seen; later
/// rows for the same pair are appended, so a restart within a day continues
/// the existing file. Files are reopened per row, which keeps the day
/// rollover and external log rotation trivially correct.
pub struct CsvSummaryWriter {
    output_dir: PathBuf,
    max_freq_hz: usize,
}
impl CsvSummaryWriter {
    pub fn new(output_dir: impl Into<PathBuf>, max_freq_hz: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_freq_hz,
        }
    }
    fn path_for(&self, axis: Axis, timestamp: &DateTime<Local>) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}_{}.csv",
            timestamp.format("%Y-%m-%d"),
            axis.label(),
            OUTPUT_MARKER
        ))
    }
    fn open(&self, path: &Path) -> std::io::Result<File> {
        if path.exists() {
            return OpenOptions::new().append(true).open(path);
        }
        let mut file = File::create(path)?;
        let mut header = String::from("timestamp");
        for freq in 0..=self.max_freq_hz {
            let _ = write!(header, ",{freq} Hz");
        }
        writeln!(file, "{header}")?;
        info!("created summary file {}", path.display());
        Ok(file)
    }
}
impl SummarySink for CsvSummaryWriter {
    fn emit(
        &mut self,
        axis: Axis,
        timestamp: DateTime<Local>,
        values: &[f64],
    ) -> Result<(), CaptureError> {
        let path = self.path_for(axis, &timestamp);
        let mut file = self.open(&path)?;
        let mut row = timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        for value in values {
            let _ = write!(row, ",{value:.6}");
        }
        writeln!(file, "{row}")?;
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn header_written_once_then_rows_append() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvSummaryWriter::new(dir.path(), 2);
        let stamp = Local::now();
        writer.emit(Axis::X, stamp, &[0.5, 1.0, 1.5]).unwrap();
        writer.emit(Axis::X, stamp, &[2.0, 2.5, 3.0]).unwrap();
        let path = writer.path_for(Axis::X, &stamp);
        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,0 Hz,1 Hz,2 Hz");
        assert!(lines[1].ends_with(",0.500000,1.000000,1.500000"));
        assert!(lines[2].ends_with(",2.000000,2.500000,3.000000"));
    }
    #[test]
    fn axes_write_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvSummaryWriter::new(dir.path(), 0);
        let stamp = Local::now();
        for axis in Axis::ALL {
            writer.emit(axis, stamp, &[1.0]).unwrap();
        }
        for axis in Axis::ALL {
            let path = writer.path_for(axis, &stamp);
            assert!(path.exists(), "missing file for axis {}", axis.label());
        }
    }
    #[test]
    fn missing_directory_is_a_sink_error() {
        let mut writer = CsvSummaryWriter::new("/nonexistent/accelspec-test", 0);
        let result = writer.emit(Axis::X, Local::now(), &[0.0]);
        assert!(matches!(result, Err(CaptureError::Sink(_))));
    }
}
