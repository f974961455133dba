//! Beat segmentation
//!
//! Splits a signal into contiguous half-open sample ranges, one per beat.
//! Segment `i` runs from beat `i` to beat `i + 1`; the first segment is
//! extended back to sample 0 and the last one forward to the end of the
//! signal, so the segments always partition `[0, len)`.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Half-open sample range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// First sample (inclusive)
    pub start: usize,
    /// Last sample (exclusive)
    pub end: usize,
}

impl Segment {
    /// Number of samples in the segment
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the segment holds no samples
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, signal_len)` at the given beat boundaries
///
/// # Arguments
///
/// * `boundaries` - Beat onsets in samples, non-decreasing
/// * `signal_len` - Total number of samples in the signal
///
/// # Errors
///
/// * `AnalysisError::InsufficientBeats` if `boundaries` is empty
/// * `AnalysisError::InvalidInput` if `boundaries` is not sorted
///
/// Boundaries past the end of the signal are clamped to `signal_len`.
///
/// # Example
///
/// ```
/// use audio_kmedoids::features::segmentation::{segment_beats, Segment};
///
/// let segments = segment_beats(&[0, 100, 250], 300)?;
/// assert_eq!(segments[1], Segment { start: 100, end: 250 });
/// # Ok::<(), audio_kmedoids::AnalysisError>(())
/// ```
pub fn segment_beats(boundaries: &[usize], signal_len: usize) -> Result<Vec<Segment>, AnalysisError> {
    if boundaries.is_empty() {
        return Err(AnalysisError::InsufficientBeats);
    }

    if let Some(pos) = boundaries.windows(2).position(|w| w[0] > w[1]) {
        return Err(AnalysisError::InvalidInput(format!(
            "Beat boundaries must be non-decreasing: {} > {} at index {}",
            boundaries[pos],
            boundaries[pos + 1],
            pos
        )));
    }

    if boundaries.iter().any(|&b| b > signal_len) {
        log::warn!(
            "Beat boundaries exceed signal length {}, clamping",
            signal_len
        );
    }

    let last = boundaries.len() - 1;
    let segments = boundaries
        .iter()
        .enumerate()
        .map(|(i, &beat)| {
            let start = if i == 0 { 0 } else { beat.min(signal_len) };
            let end = if i == last {
                signal_len
            } else {
                boundaries[i + 1].min(signal_len)
            };
            Segment { start, end }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Segmented {} samples into {} beat segments",
        signal_len,
        segments.len()
    );

    Ok(segments)
}
