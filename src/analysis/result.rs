//! Analysis result types

use serde::{Deserialize, Serialize};

use super::metadata::AnalysisMetadata;
use crate::clustering::Clustering;
use crate::features::notes::{find_note, NoteLabel};
use crate::features::spectral_peak::SpectralPeak;

/// One beat segment's peak, labeled with its note and (after clustering) its medoid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Peak frequency in Hz
    pub frequency: f64,

    /// Peak amplitude in dB (may be negative infinity for silent segments)
    pub amplitude: f64,

    /// Nearest note name
    pub note: String,

    /// Octave of the nearest note
    pub octave: u8,

    /// Frequency of the assigned cluster's medoid, set by clustering
    pub medoid: Option<f64>,
}

impl DataPoint {
    /// Create an unclustered point labeled with the note nearest to `frequency`
    ///
    /// # Example
    ///
    /// ```
    /// use audio_kmedoids::DataPoint;
    ///
    /// let point = DataPoint::new(440.0, -3.0);
    /// assert_eq!(point.note, "A");
    /// assert_eq!(point.octave, 4);
    /// assert!(point.medoid.is_none());
    /// ```
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self::with_label(frequency, amplitude, find_note(frequency))
    }

    /// Create an unclustered point with an explicit note label
    pub fn with_label(frequency: f64, amplitude: f64, label: NoteLabel) -> Self {
        Self {
            frequency,
            amplitude,
            note: label.note.to_string(),
            octave: label.octave,
            medoid: None,
        }
    }

    /// Note name with octave, e.g. "A4"
    pub fn note_name(&self) -> String {
        format!("{}{}", self.note, self.octave)
    }

    /// Medoid frequency as a category label, e.g. "440.0" or "440.5"
    ///
    /// Whole frequencies keep their trailing ".0".
    pub fn medoid_label(&self) -> Option<String> {
        self.medoid.map(|m| format!("{:?}", m))
    }
}

impl From<SpectralPeak> for DataPoint {
    fn from(peak: SpectralPeak) -> Self {
        Self::new(peak.frequency, peak.amplitude)
    }
}

/// Complete analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tempo estimate from the signal front-end, in beats per minute
    pub tempo: f32,

    /// Labeled and clustered points, one per retained beat segment
    pub points: Vec<DataPoint>,

    /// Clustering diagnostics
    pub clustering: Clustering,

    /// Metadata
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Distinct medoid frequencies, ascending
    pub fn medoid_frequencies(&self) -> Vec<f64> {
        let mut medoids: Vec<f64> = self.points.iter().filter_map(|p| p.medoid).collect();
        medoids.sort_by(f64::total_cmp);
        medoids.dedup();
        medoids
    }
}
