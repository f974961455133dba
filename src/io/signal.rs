//! Decoded audio signal

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::features::segmentation::Segment;

/// Mono audio samples with their sample rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSignal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSignal {
    /// Wrap mono samples recorded at `sample_rate` Hz
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `sample_rate` is 0
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Invalid sample rate: 0".to_string(),
            ));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// All samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Samples covered by `segment`, clipped to the signal
    pub fn segment(&self, segment: &Segment) -> &[f32] {
        let end = segment.end.min(self.samples.len());
        let start = segment.start.min(end);
        &self.samples[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_slice() {
        let signal = AudioSignal::new((0..10).map(|i| i as f32).collect(), 10).unwrap();
        let slice = signal.segment(&Segment { start: 2, end: 5 });
        assert_eq!(slice, &[2.0, 3.0, 4.0]);
        assert!(signal.segment(&Segment { start: 8, end: 20 }).len() == 2);
        assert_eq!(signal.duration_seconds(), 1.0);
    }

    #[test]
    fn test_zero_sample_rate() {
        assert!(AudioSignal::new(vec![0.0], 0).is_err());
    }
}
