//! Channel mixing utilities (multichannel to mono conversion)

use crate::error::AnalysisError;

/// Average interleaved multichannel samples down to mono
///
/// # Arguments
///
/// * `interleaved` - Samples laid out frame by frame (`L R L R ...` for stereo)
/// * `channels` - Number of channels per frame
///
/// # Returns
///
/// One sample per frame. A trailing partial frame is dropped.
///
/// # Example
///
/// ```
/// use audio_kmedoids::preprocessing::channel_mixer::downmix;
///
/// let mono = downmix(&[1.0, 0.0, 0.5, 0.5], 2)?;
/// assert_eq!(mono, vec![0.5, 0.5]);
/// # Ok::<(), audio_kmedoids::AnalysisError>(())
/// ```
pub fn downmix(interleaved: &[f32], channels: usize) -> Result<Vec<f32>, AnalysisError> {
    if channels == 0 {
        return Err(AnalysisError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }

    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    if interleaved.len() % channels != 0 {
        log::warn!(
            "Dropping {} trailing samples that do not fill a {}-channel frame",
            interleaved.len() % channels,
            channels
        );
    }

    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_passthrough() {
        let samples = vec![0.1, -0.2, 0.3];
        assert_eq!(downmix(&samples, 1).unwrap(), samples);
    }

    #[test]
    fn test_stereo_average() {
        let mono = downmix(&[1.0, -1.0, 0.5, 0.25], 2).unwrap();
        assert_eq!(mono, vec![0.0, 0.375]);
    }

    #[test]
    fn test_partial_frame_dropped() {
        let mono = downmix(&[0.3, 0.3, 0.3, 0.9], 3).unwrap();
        assert_eq!(mono.len(), 1);
        assert!((mono[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_zero_channels() {
        assert!(downmix(&[0.0], 0).is_err());
    }
}
