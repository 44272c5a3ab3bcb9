//! Statistics for conversion runs

use serde::Serialize;
use std::time::Duration;

/// Counters and timings for one conversion run
#[derive(Debug, Clone, Serialize)]
pub struct ConvertStats {
    /// Top-level elements seen in the input
    pub elements_scanned: u64,
    /// Normalized SMS records written to the output
    pub records_emitted: u64,
    /// Pre-existing `sms` elements dropped
    pub sms_skipped: u64,
    /// Group MMS messages dropped
    pub groups_skipped: u64,
    /// Unrecognized top-level elements ignored
    pub other_skipped: u64,
    /// Input file size in bytes
    pub input_size_bytes: u64,
    /// Output file size in bytes
    pub output_size_bytes: u64,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
    /// Input bytes processed per second
    pub throughput_bytes_per_sec: f64,
    /// When the statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ConvertStats {
    fn default() -> Self {
        Self {
            elements_scanned: 0,
            records_emitted: 0,
            sms_skipped: 0,
            groups_skipped: 0,
            other_skipped: 0,
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            throughput_bytes_per_sec: 0.0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl ConvertStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize timing-derived fields once the run is complete
    pub fn finish(&mut self, elapsed: Duration) {
        self.processing_time_ms = elapsed.as_millis() as u64;
        self.throughput_bytes_per_sec = if elapsed.as_secs_f64() > 0.0 {
            self.input_size_bytes as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        self.collected_at = chrono::Utc::now();
    }

    /// Human-readable summary for `--stats` output
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Conversion Statistics:\n");
        out.push_str(&format!("Elements scanned: {}\n", self.elements_scanned));
        out.push_str(&format!("Records emitted: {}\n", self.records_emitted));
        out.push_str(&format!("SMS entries skipped: {}\n", self.sms_skipped));
        out.push_str(&format!("Group messages skipped: {}\n", self.groups_skipped));
        out.push_str(&format!("Input size: {} bytes\n", self.input_size_bytes));
        out.push_str(&format!("Output size: {} bytes\n", self.output_size_bytes));
        out.push_str(&format!("Processing time: {}ms\n", self.processing_time_ms));
        out.push_str(&format!(
            "Throughput: {:.1} bytes/sec",
            self.throughput_bytes_per_sec
        ));
        out
    }
}
