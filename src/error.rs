//! Error types for the audio k-medoids pipeline

use thiserror::Error;

/// Errors that can occur while analyzing and clustering audio
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Audio could not be opened or decoded
    #[error("Decoding error: {0}")]
    DecodingError(String),

    /// The signal front-end found no beats in the audio
    #[error("No beats detected in audio")]
    NoBeatsDetected,

    /// Beat segmentation was asked to split a signal without any boundaries
    #[error("Insufficient beats: at least one beat boundary is required for segmentation")]
    InsufficientBeats,

    /// More clusters were requested than there are points to cluster
    #[error("Cluster size error: requested {requested} clusters but only {available} points are available")]
    ClusterSize {
        /// Requested number of clusters
        requested: usize,
        /// Number of points available after filtering
        available: usize,
    },

    /// The visualization sink failed to render the result
    #[error("Sink error: {0}")]
    Sink(String),
}
