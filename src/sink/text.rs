//! Plain text table sink

use std::io::Write;

use super::{scatter_views, ScatterView, VisualizationSink};
use crate::analysis::result::AnalysisResult;
use crate::error::AnalysisError;

/// Writes each scatter view as an aligned table
#[derive(Debug)]
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    /// Create a sink writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_view(&mut self, view: &ScatterView) -> std::io::Result<()> {
        writeln!(self.writer, "{} [colour: {:?}]", view.title, view.color_by)?;
        writeln!(
            self.writer,
            "{:>10}  {:>10}  {:<4}  {:>6}  {:>10}  {}",
            "freq_hz", "amp_db", "note", "octave", "medoid", "colour"
        )?;
        for point in &view.points {
            writeln!(
                self.writer,
                "{:>10.2}  {:>10.2}  {:<4}  {:>6}  {:>10}  {}",
                point.frequency,
                point.amplitude,
                point.note,
                point.octave,
                point.medoid,
                point.color
            )?;
        }
        writeln!(self.writer)
    }
}

impl<W: Write> VisualizationSink for TextSink<W> {
    fn render(&mut self, result: &AnalysisResult) -> Result<(), AnalysisError> {
        for view in scatter_views(result).iter() {
            self.write_view(view)
                .map_err(|e| AnalysisError::Sink(format!("Failed to write table: {}", e)))?;
        }
        self.writer
            .flush()
            .map_err(|e| AnalysisError::Sink(format!("Failed to flush output: {}", e)))
    }
}
