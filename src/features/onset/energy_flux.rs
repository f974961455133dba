//! Energy flux onset envelope
//!
//! Frame-by-frame energy derivative used as the onset strength signal for
//! beat tracking.
//!
//! Each frame of `frame_size` samples, advanced by `hop_size`, is reduced to
//! its RMS level `E[n]`. The envelope is the half-wave rectified difference
//! `max(0, E[n] - E[n-1])`, with `0` for the first frame.
//!
//! # Example
//!
//! ```no_run
//! use audio_kmedoids::features::onset::energy_flux::onset_envelope;
//!
//! let samples = vec![0.0f32; 22050 * 30]; // 30 seconds of audio
//! let envelope = onset_envelope(&samples, 2048, 512)?;
//! println!("{} envelope frames", envelope.len());
//! # Ok::<(), audio_kmedoids::AnalysisError>(())
//! ```

use crate::error::AnalysisError;

/// Compute the energy flux onset envelope
///
/// Returns one flux value per frame; frame `i` starts at sample `i * hop_size`.
/// Audio shorter than one frame yields an empty envelope.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `frame_size` or `hop_size` is 0
pub fn onset_envelope(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<f32>, AnalysisError> {
    if frame_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }

    if hop_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }

    if frame_size > samples.len() {
        log::warn!(
            "Frame size ({}) larger than audio length ({}), returning empty envelope",
            frame_size,
            samples.len()
        );
        return Ok(Vec::new());
    }

    let num_frames = (samples.len() - frame_size) / hop_size + 1;

    log::debug!(
        "Computing energy flux envelope: {} samples, frame={}, hop={}, {} frames",
        samples.len(),
        frame_size,
        hop_size,
        num_frames
    );

    // RMS: sqrt(mean(squared samples))
    let frame_energies: Vec<f32> = (0..num_frames)
        .map(|i| {
            let start = i * hop_size;
            let frame = &samples[start..start + frame_size];
            let sum_sq: f32 = frame.iter().map(|&x| x * x).sum();
            (sum_sq / frame_size as f32).sqrt()
        })
        .collect();

    let mut envelope = Vec::with_capacity(num_frames);
    envelope.push(0.0);
    envelope.extend(
        frame_energies
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).max(0.0)),
    );

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_produces_flux_peak() {
        // Silence before, constant signal after sample 5000
        let mut samples = vec![0.0f32; 44100];
        for s in samples.iter_mut().skip(5000) {
            *s = 0.5;
        }

        let envelope = onset_envelope(&samples, 2048, 512).unwrap();
        let (peak_frame, peak) = envelope
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, v)| if v > best.1 { (i, v) } else { best });

        assert!(peak > 0.0);
        let peak_sample = peak_frame * 512;
        assert!(
            (3000..=8000).contains(&peak_sample),
            "Flux peak should be near the step at 5000, got {}",
            peak_sample
        );
    }

    #[test]
    fn test_envelope_is_non_negative() {
        let samples: Vec<f32> = (0..20000).map(|i| ((i as f32) * 0.01).sin() * (i % 3000) as f32 / 3000.0).collect();
        let envelope = onset_envelope(&samples, 1024, 256).unwrap();
        assert_eq!(envelope[0], 0.0);
        assert!(envelope.iter().all(|&v| v >= 0.0));
        assert_eq!(envelope.len(), (20000 - 1024) / 256 + 1);
    }

    #[test]
    fn test_too_short_audio() {
        let envelope = onset_envelope(&[0.5f32; 1000], 2048, 512).unwrap();
        assert!(envelope.is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let samples = vec![0.5f32; 4096];
        assert!(onset_envelope(&samples, 0, 512).is_err());
        assert!(onset_envelope(&samples, 2048, 0).is_err());
    }
}
