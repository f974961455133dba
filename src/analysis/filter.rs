//! Audible-band frequency filter

use crate::features::spectral_peak::SpectralPeak;

/// Keeps peaks whose frequency lies in a closed band `[min_frequency, max_frequency]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyFilter {
    /// Lowest retained frequency in Hz (inclusive)
    pub min_frequency: f64,
    /// Highest retained frequency in Hz (inclusive)
    pub max_frequency: f64,
}

impl Default for FrequencyFilter {
    fn default() -> Self {
        Self {
            min_frequency: 0.0,
            max_frequency: 4000.0,
        }
    }
}

impl FrequencyFilter {
    /// Create a filter for the band `[min_frequency, max_frequency]`
    pub fn new(min_frequency: f64, max_frequency: f64) -> Self {
        Self {
            min_frequency,
            max_frequency,
        }
    }

    /// True if `frequency` is inside the band, bounds included
    pub fn contains(&self, frequency: f64) -> bool {
        frequency >= self.min_frequency && frequency <= self.max_frequency
    }

    /// Drop out-of-band peaks, preserving the order of the rest
    ///
    /// # Example
    ///
    /// ```
    /// use audio_kmedoids::analysis::filter::FrequencyFilter;
    /// use audio_kmedoids::features::spectral_peak::SpectralPeak;
    ///
    /// let peaks = vec![
    ///     SpectralPeak { frequency: -0.01, amplitude: 10.0 },
    ///     SpectralPeak { frequency: 4000.0, amplitude: 10.0 },
    /// ];
    /// let kept = FrequencyFilter::default().apply(peaks);
    /// assert_eq!(kept.len(), 1);
    /// ```
    pub fn apply(&self, peaks: Vec<SpectralPeak>) -> Vec<SpectralPeak> {
        let before = peaks.len();
        let kept: Vec<SpectralPeak> = peaks
            .into_iter()
            .filter(|peak| self.contains(peak.frequency))
            .collect();

        log::debug!(
            "Frequency filter [{:.2}, {:.2}] Hz kept {}/{} peaks",
            self.min_frequency,
            self.max_frequency,
            kept.len(),
            before
        );

        kept
    }
}
