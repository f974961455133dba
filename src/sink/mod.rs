//! Visualization sinks
//!
//! A sink receives the final [`AnalysisResult`] and presents it. Results are
//! shown as two scatter views (frequency against amplitude, sized by
//! octave): one coloured by note, one coloured by medoid group.

pub mod json;
pub mod text;

use serde::Serialize;

pub use json::JsonSink;
pub use text::TextSink;

use crate::analysis::result::{AnalysisResult, DataPoint};
use crate::error::AnalysisError;

/// Discrete colour sequence; categories take colours in order of first appearance
pub const COLOR_PALETTE: [&str; 12] = [
    "#CFD8DC", "#F44336", "#9C27B0", "#3F51B5", "#03A9F4", "#009688", "#8BC34A", "#FFEB3B",
    "#FF9800", "#795548", "#607D8B", "#000000",
];

/// Consumer of analysis results
pub trait VisualizationSink {
    /// Present one analysis result
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Sink` if the result cannot be rendered
    fn render(&mut self, result: &AnalysisResult) -> Result<(), AnalysisError>;
}

/// Field used to colour a scatter view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorBy {
    /// Colour by note name
    Note,
    /// Colour by medoid group
    Medoid,
}

impl ColorBy {
    fn category(&self, point: &DataPoint) -> String {
        match self {
            ColorBy::Note => point.note.clone(),
            ColorBy::Medoid => point.medoid_label().unwrap_or_default(),
        }
    }
}

/// One marker of a scatter view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Frequency in Hz (x axis)
    pub frequency: f64,
    /// Amplitude in dB (y axis)
    pub amplitude: f64,
    /// Octave (marker size)
    pub octave: u8,
    /// Note name (hover)
    pub note: String,
    /// Medoid frequency label (hover)
    pub medoid: String,
    /// Colour category
    pub category: String,
    /// Marker colour
    pub color: &'static str,
}

/// Scatter plot description handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    /// Plot title
    pub title: String,
    /// Field the markers are coloured by
    pub color_by: ColorBy,
    /// Fixed x axis range in Hz
    pub frequency_range: [f64; 2],
    /// Categories with their colours, in legend order
    pub legend: Vec<(String, &'static str)>,
    /// Markers, sorted by the colour field
    pub points: Vec<ScatterPoint>,
}

/// Plot title shared by both views
pub fn title(tempo: f32) -> String {
    format!("Audio K-medoids (Tempo: {:.0} beats per minute)", tempo)
}

/// Build one scatter view coloured by `color_by`
pub fn scatter_view(result: &AnalysisResult, color_by: ColorBy) -> ScatterView {
    let mut points: Vec<&DataPoint> = result.points.iter().collect();
    match color_by {
        ColorBy::Note => points.sort_by(|a, b| a.note.cmp(&b.note)),
        ColorBy::Medoid => points.sort_by(|a, b| {
            let a = a.medoid.unwrap_or(f64::NEG_INFINITY);
            let b = b.medoid.unwrap_or(f64::NEG_INFINITY);
            a.total_cmp(&b)
        }),
    }

    let mut legend: Vec<(String, &'static str)> = Vec::new();
    let scatter_points = points
        .into_iter()
        .map(|point| {
            let category = color_by.category(point);
            let color = match legend.iter().find(|(c, _)| *c == category) {
                Some((_, color)) => *color,
                None => {
                    let color = COLOR_PALETTE[legend.len() % COLOR_PALETTE.len()];
                    legend.push((category.clone(), color));
                    color
                }
            };

            ScatterPoint {
                frequency: point.frequency,
                amplitude: point.amplitude,
                octave: point.octave,
                note: point.note.clone(),
                medoid: point.medoid_label().unwrap_or_default(),
                category,
                color,
            }
        })
        .collect();

    ScatterView {
        title: title(result.tempo),
        color_by,
        frequency_range: result.metadata.frequency_range,
        legend,
        points: scatter_points,
    }
}

/// The note view followed by the medoid view
pub fn scatter_views(result: &AnalysisResult) -> [ScatterView; 2] {
    [
        scatter_view(result, ColorBy::Note),
        scatter_view(result, ColorBy::Medoid),
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analysis::metadata::AnalysisMetadata;
    use crate::clustering::Clustering;

    pub(crate) fn sample_result() -> AnalysisResult {
        let raw = [
            (440.0, 30.0, 440.0),
            (261.63, 25.5, 261.63),
            (445.0, 28.0, 440.0),
            (262.0, 20.0, 261.63),
            (880.0, 10.0, 440.0),
        ];
        let points = raw
            .iter()
            .map(|&(f, a, m)| {
                let mut point = DataPoint::new(f, a);
                point.medoid = Some(m);
                point
            })
            .collect();

        AnalysisResult {
            tempo: 122.6,
            points,
            clustering: Clustering {
                medoids: vec![0, 1],
                assignments: vec![0, 1, 0, 1, 0],
                iterations: 2,
                converged: true,
                total_cost: 446.37,
            },
            metadata: AnalysisMetadata::default(),
        }
    }

    #[test]
    fn test_two_views() {
        let [notes, medoids] = scatter_views(&sample_result());
        assert_eq!(notes.color_by, ColorBy::Note);
        assert_eq!(medoids.color_by, ColorBy::Medoid);
        assert_eq!(notes.title, "Audio K-medoids (Tempo: 123 beats per minute)");
        assert_eq!(notes.points.len(), 5);
        assert_eq!(medoids.points.len(), 5);
        assert_eq!(notes.frequency_range, [0.0, 4000.0]);
    }

    #[test]
    fn test_note_view_sorted_and_coloured() {
        let view = scatter_view(&sample_result(), ColorBy::Note);
        let categories: Vec<&str> = view.points.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(categories, vec!["A", "A", "A", "C", "C"]);
        assert_eq!(view.legend, vec![("A".to_string(), COLOR_PALETTE[0]), ("C".to_string(), COLOR_PALETTE[1])]);
        assert!(view.points.iter().filter(|p| p.note == "C").all(|p| p.color == COLOR_PALETTE[1]));
    }

    #[test]
    fn test_medoid_view_groups() {
        let view = scatter_view(&sample_result(), ColorBy::Medoid);
        assert_eq!(view.legend.len(), 2);
        assert_eq!(view.legend[0].0, "261.63");
        assert_eq!(view.legend[1].0, "440.0");
        assert_eq!(view.points[0].medoid, "261.63");
    }

    #[test]
    fn test_palette_wraps() {
        let mut result = sample_result();
        result.points = (0..14)
            .map(|i| {
                let mut point = DataPoint::new(100.0 + i as f64, 0.0);
                point.medoid = Some(100.0 + i as f64);
                point
            })
            .collect();

        let view = scatter_view(&result, ColorBy::Medoid);
        assert_eq!(view.legend.len(), 14);
        assert_eq!(view.legend[12].1, COLOR_PALETTE[0]);
    }
}
