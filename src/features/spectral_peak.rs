//! Dominant spectral peak per segment
//!
//! Computes the DFT of a segment and picks the strongest non-DC bin.
//!
//! # Algorithm
//!
//! 1. Forward FFT of the segment (rustfft, complex input)
//! 2. Bin frequencies follow the usual DFT layout: bin `k` is `k * sr / n` for
//!    `k < ceil(n / 2)` and `(k - n) * sr / n` above that
//! 3. Argmax of `|X[k]|` over `k >= 1`, first maximum wins
//! 4. Frequency and amplitude (`20 * log10(|X[k]|)` dB) rounded to 2 decimals
//!
//! The input is real, so bins above `n / 2` mirror the ones below it and can
//! never hold a strictly larger magnitude than their earlier twin. Only bins
//! `1..=n/2` are scanned. For even `n` the last of those is the Nyquist bin,
//! which carries a negative frequency and is later dropped by the frequency
//! filter.
//!
//! A segment whose selected coefficient is exactly zero gets an amplitude of
//! negative infinity; that value is passed through as data.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Dominant frequency component of one segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralPeak {
    /// Bin frequency in Hz, rounded to 2 decimals
    pub frequency: f64,
    /// Bin magnitude in dB, rounded to 2 decimals
    pub amplitude: f64,
}

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Frequency of DFT bin `k` for an `n`-point transform
pub fn bin_frequency(k: usize, n: usize, sample_rate: u32) -> f64 {
    let bin_width = sample_rate as f64 / n as f64;
    if k < n.div_ceil(2) {
        k as f64 * bin_width
    } else {
        (k as f64 - n as f64) * bin_width
    }
}

/// Extracts spectral peaks, reusing FFT plans across segments
pub struct SpectralPeakExtractor {
    planner: FftPlanner<f32>,
    sample_rate: u32,
}

impl std::fmt::Debug for SpectralPeakExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralPeakExtractor")
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl SpectralPeakExtractor {
    /// Create an extractor for signals at `sample_rate` Hz
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `sample_rate` is 0
    pub fn new(sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Invalid sample rate: 0".to_string(),
            ));
        }

        Ok(Self {
            planner: FftPlanner::new(),
            sample_rate,
        })
    }

    /// Sample rate this extractor was built for
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Find the dominant non-DC peak of a segment
    ///
    /// Returns `None` for segments shorter than 2 samples, which have no
    /// bin other than DC.
    ///
    /// # Example
    ///
    /// ```
    /// use audio_kmedoids::features::spectral_peak::SpectralPeakExtractor;
    ///
    /// let sample_rate = 8000;
    /// let samples: Vec<f32> = (0..800)
    ///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
    ///     .collect();
    ///
    /// let mut extractor = SpectralPeakExtractor::new(sample_rate)?;
    /// let peak = extractor.extract(&samples).unwrap();
    /// assert_eq!(peak.frequency, 440.0);
    /// # Ok::<(), audio_kmedoids::AnalysisError>(())
    /// ```
    pub fn extract(&mut self, samples: &[f32]) -> Option<SpectralPeak> {
        let n = samples.len();
        if n < 2 {
            return None;
        }

        let mut spectrum: Vec<Complex<f32>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut spectrum);

        let mut best_bin = 1;
        let mut best_magnitude = spectrum[1].norm();
        for (k, value) in spectrum.iter().enumerate().take(n / 2 + 1).skip(2) {
            let magnitude = value.norm();
            if magnitude > best_magnitude {
                best_bin = k;
                best_magnitude = magnitude;
            }
        }

        let frequency = bin_frequency(best_bin, n, self.sample_rate);
        let amplitude = 20.0 * (best_magnitude as f64).log10();

        Some(SpectralPeak {
            frequency: round2(frequency),
            amplitude: round2(amplitude),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, amplitude: f32, len: usize, sample_rate: u32) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_bin_frequency_layout() {
        // n = 4, sr = 4: [0, 1, -2, -1]
        assert_eq!(bin_frequency(0, 4, 4), 0.0);
        assert_eq!(bin_frequency(1, 4, 4), 1.0);
        assert_eq!(bin_frequency(2, 4, 4), -2.0);
        assert_eq!(bin_frequency(3, 4, 4), -1.0);

        // n = 5, sr = 5: [0, 1, 2, -2, -1]
        assert_eq!(bin_frequency(2, 5, 5), 2.0);
        assert_eq!(bin_frequency(3, 5, 5), -2.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(52.04119), 52.04);
        assert_eq!(round2(439.996), 440.0);
        assert_eq!(round2(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn test_sine_peak() {
        // 10 Hz bins, 440 Hz lands exactly on bin 44
        let samples = sine(440.0, 1.0, 800, 8000);
        let mut extractor = SpectralPeakExtractor::new(8000).unwrap();
        let peak = extractor.extract(&samples).unwrap();

        assert_eq!(peak.frequency, 440.0);
        // |X[k]| = n / 2 = 400 for a unit sine, 20 * log10(400) = 52.04 dB
        assert!(
            (peak.amplitude - 52.04).abs() < 0.05,
            "Expected ~52.04 dB, got {}",
            peak.amplitude
        );
    }

    #[test]
    fn test_dc_is_excluded() {
        // Large DC offset with a small 1 kHz tone on top
        let samples: Vec<f32> = sine(1000.0, 0.1, 800, 8000)
            .into_iter()
            .map(|s| s + 5.0)
            .collect();
        let mut extractor = SpectralPeakExtractor::new(8000).unwrap();
        let peak = extractor.extract(&samples).unwrap();
        assert_eq!(peak.frequency, 1000.0);
    }

    #[test]
    fn test_silence_gives_negative_infinity() {
        let samples = vec![0.0f32; 256];
        let mut extractor = SpectralPeakExtractor::new(8000).unwrap();
        let peak = extractor.extract(&samples).unwrap();

        // All bins tie at zero, so the first non-DC bin wins
        assert_eq!(peak.frequency, 31.25);
        assert_eq!(peak.amplitude, f64::NEG_INFINITY);
    }

    #[test]
    fn test_nyquist_bin_is_negative() {
        // Alternating signal puts all energy in the Nyquist bin
        let samples: Vec<f32> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let mut extractor = SpectralPeakExtractor::new(8000).unwrap();
        let peak = extractor.extract(&samples).unwrap();
        assert_eq!(peak.frequency, -4000.0);
    }

    #[test]
    fn test_short_segments() {
        let mut extractor = SpectralPeakExtractor::new(8000).unwrap();
        assert!(extractor.extract(&[]).is_none());
        assert!(extractor.extract(&[0.5]).is_none());
        assert!(extractor.extract(&[0.5, -0.5]).is_some());
    }

    #[test]
    fn test_zero_sample_rate() {
        assert!(SpectralPeakExtractor::new(0).is_err());
    }
}
