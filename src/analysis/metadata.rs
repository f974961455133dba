//! Analysis metadata structures

use serde::{Deserialize, Serialize};

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Signal duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of beat boundaries supplied by the front-end
    pub beat_count: usize,

    /// Number of beat segments analyzed
    pub segment_count: usize,

    /// Segments dropped for being too short or out of the frequency band
    pub discarded_points: usize,

    /// Retained frequency band `[min, max]` in Hz
    pub frequency_range: [f64; 2],

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 0,
            beat_count: 0,
            segment_count: 0,
            discarded_points: 0,
            frequency_range: [0.0, 4000.0],
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
