//! Signal front-end
//!
//! Loads an audio file and finds its beats. The pipeline only depends on the
//! [`SignalFrontEnd`] trait, so decoding and beat detection can be swapped
//! out (or stubbed in tests).

use std::path::Path;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::beat_tracking::BeatTracker;
use crate::io::decoder::decode_audio;
use crate::io::AudioSignal;

/// Everything the pipeline needs from an audio file
#[derive(Debug, Clone, PartialEq)]
pub struct FrontEndOutput {
    /// Decoded mono signal
    pub signal: AudioSignal,

    /// Tempo estimate in beats per minute
    pub tempo: f32,

    /// Beat onsets in samples, ascending
    pub beats: Vec<usize>,
}

/// Source of decoded audio and beat positions
pub trait SignalFrontEnd {
    /// Decode `path` and detect its beats
    ///
    /// # Errors
    ///
    /// * `AnalysisError::DecodingError` if the file cannot be decoded
    /// * `AnalysisError::NoBeatsDetected` if no beat is found
    fn load(&self, path: &Path) -> Result<FrontEndOutput, AnalysisError>;
}

/// Symphonia decoding followed by dynamic-programming beat tracking
#[derive(Debug, Clone, Default)]
pub struct AudioFrontEnd {
    tracker: BeatTracker,
}

impl AudioFrontEnd {
    /// Create a front-end using the beat tracking settings in `config`
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            tracker: BeatTracker::from_config(config),
        }
    }

    /// Detect beats in an already decoded signal
    pub fn analyze(&self, signal: AudioSignal) -> Result<FrontEndOutput, AnalysisError> {
        let grid = self.tracker.track(signal.samples(), signal.sample_rate())?;
        if grid.beats.is_empty() {
            return Err(AnalysisError::NoBeatsDetected);
        }

        Ok(FrontEndOutput {
            signal,
            tempo: grid.tempo_bpm,
            beats: grid.beats,
        })
    }
}

impl SignalFrontEnd for AudioFrontEnd {
    fn load(&self, path: &Path) -> Result<FrontEndOutput, AnalysisError> {
        let signal = decode_audio(path)?;
        let output = self.analyze(signal)?;

        log::info!(
            "Loaded {}: {:.2}s at {} Hz, {:.0} BPM, {} beats",
            path.display(),
            output.signal.duration_seconds(),
            output.signal.sample_rate(),
            output.tempo,
            output.beats.len()
        );

        Ok(output)
    }
}
