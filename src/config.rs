//! Configuration parameters for audio analysis and clustering

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Smallest cluster count accepted by the pipeline
pub const MIN_CLUSTER_SIZE: usize = 2;

/// Largest cluster count accepted by the pipeline
pub const MAX_CLUSTER_SIZE: usize = 8;

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // Clustering
    /// Number of medoid clusters (default: 4, valid range 2-8)
    pub cluster_size: usize,

    /// Maximum number of assignment/update passes (default: 100)
    /// A value of 1 performs a single refinement pass before the final assignment.
    pub max_iterations: usize,

    // Frequency filter
    /// Lowest retained peak frequency in Hz, inclusive (default: 0.0)
    pub min_frequency: f64,

    /// Highest retained peak frequency in Hz, inclusive (default: 4000.0)
    pub max_frequency: f64,

    // Beat tracking
    /// Frame size for the onset envelope (default: 2048)
    pub frame_size: usize,

    /// Hop size for the onset envelope (default: 512)
    pub hop_size: usize,

    /// Minimum tempo to consider (default: 60.0)
    pub min_bpm: f32,

    /// Maximum tempo to consider (default: 180.0)
    pub max_bpm: f32,

    /// How strongly the beat tracker sticks to the estimated period (default: 100.0)
    pub tightness: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cluster_size: 4,
            max_iterations: 100,
            min_frequency: 0.0,
            max_frequency: 4000.0,
            frame_size: 2048,
            hop_size: 512,
            min_bpm: 60.0,
            max_bpm: 180.0,
            tightness: 100.0,
        }
    }
}

impl AnalysisConfig {
    /// Check that every parameter is usable before running the pipeline
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(MIN_CLUSTER_SIZE..=MAX_CLUSTER_SIZE).contains(&self.cluster_size) {
            return Err(AnalysisError::InvalidInput(format!(
                "Cluster size must be in [{}, {}], got {}",
                MIN_CLUSTER_SIZE, MAX_CLUSTER_SIZE, self.cluster_size
            )));
        }

        if self.max_iterations == 0 {
            return Err(AnalysisError::InvalidInput(
                "Max iterations must be > 0".to_string(),
            ));
        }

        if self.min_frequency > self.max_frequency {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid frequency range: [{:.2}, {:.2}]",
                self.min_frequency, self.max_frequency
            )));
        }

        if self.frame_size == 0 || self.hop_size == 0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Frame and hop sizes must be > 0, got frame={} hop={}",
                self.frame_size, self.hop_size
            )));
        }

        if self.min_bpm <= 0.0 || self.min_bpm >= self.max_bpm {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid BPM range: [{:.1}, {:.1}]",
                self.min_bpm, self.max_bpm
            )));
        }

        Ok(())
    }
}
