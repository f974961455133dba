//! Beat tracking modules
//!
//! Turns a mono signal into a tempo estimate and beat sample offsets:
//! - Energy flux onset envelope
//! - Autocorrelation tempo estimation
//! - Dynamic-programming beat placement

pub mod dynamic_programming;
pub mod tempo;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::onset::energy_flux::onset_envelope;

/// Tempo and beat positions of a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatGrid {
    /// Tempo estimate in beats per minute
    pub tempo_bpm: f32,

    /// Beat onsets in samples, ascending
    pub beats: Vec<usize>,
}

/// Beat tracker
#[derive(Debug, Clone, PartialEq)]
pub struct BeatTracker {
    /// Frame size for the onset envelope
    pub frame_size: usize,

    /// Hop size for the onset envelope
    pub hop_size: usize,

    /// Slowest tempo to consider
    pub min_bpm: f32,

    /// Fastest tempo to consider
    pub max_bpm: f32,

    /// Penalty weight for beat intervals that stray from the period
    pub tightness: f32,
}

impl Default for BeatTracker {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl BeatTracker {
    /// Create a beat tracker from the analysis configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            min_bpm: config.min_bpm,
            max_bpm: config.max_bpm,
            tightness: config.tightness,
        }
    }

    /// Estimate tempo and beat positions
    ///
    /// # Errors
    ///
    /// * `AnalysisError::InvalidInput` for a zero sample rate or invalid frame/hop sizes
    /// * `AnalysisError::NoBeatsDetected` if no tempo can be estimated (silence,
    ///   audio shorter than a few beats)
    pub fn track(&self, samples: &[f32], sample_rate: u32) -> Result<BeatGrid, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Invalid sample rate: 0".to_string(),
            ));
        }

        let mut envelope = onset_envelope(samples, self.frame_size, self.hop_size)?;

        // Normalize by standard deviation so tightness is scale-independent
        let n = envelope.len() as f32;
        if n > 0.0 {
            let mean = envelope.iter().sum::<f32>() / n;
            let std = (envelope.iter().map(|&x| (x - mean).powi(2)).sum::<f32>() / n).sqrt();
            if std > 0.0 {
                envelope.iter_mut().for_each(|x| *x /= std);
            }
        }

        let frame_duration = self.hop_size as f32 / sample_rate as f32;
        let tempo = tempo::estimate_tempo(&envelope, frame_duration, self.min_bpm, self.max_bpm)
            .ok_or(AnalysisError::NoBeatsDetected)?;

        let frames = dynamic_programming::track_beats(&envelope, tempo.period_frames, self.tightness);
        if frames.is_empty() {
            return Err(AnalysisError::NoBeatsDetected);
        }

        let beats: Vec<usize> = frames.iter().map(|&f| f * self.hop_size).collect();

        log::debug!(
            "Beat tracking: {:.1} BPM ({:.2} frames/beat), {} beats",
            tempo.bpm,
            tempo.period_frames,
            beats.len()
        );

        Ok(BeatGrid {
            tempo_bpm: tempo.bpm,
            beats,
        })
    }
}
