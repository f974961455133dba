//! JSON sink

use std::io::Write;

use serde::Serialize;

use super::{scatter_views, ScatterView, VisualizationSink};
use crate::analysis::result::AnalysisResult;
use crate::error::AnalysisError;

#[derive(Serialize)]
struct Document<'a> {
    result: &'a AnalysisResult,
    views: [ScatterView; 2],
}

/// Writes the result and both scatter views as one JSON document
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    /// Create a sink writing compact JSON to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indent the output
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> VisualizationSink for JsonSink<W> {
    fn render(&mut self, result: &AnalysisResult) -> Result<(), AnalysisError> {
        let document = Document {
            result,
            views: scatter_views(result),
        };

        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)
        } else {
            serde_json::to_writer(&mut self.writer, &document)
        };
        written.map_err(|e| AnalysisError::Sink(format!("Failed to serialize result: {}", e)))?;

        writeln!(self.writer)
            .and_then(|_| self.writer.flush())
            .map_err(|e| AnalysisError::Sink(format!("Failed to write output: {}", e)))
    }
}
