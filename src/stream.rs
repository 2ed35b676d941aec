//! Streaming accumulation with a settle gate.
//!
//! Report text arrives as chunks from an upstream generator. The parser never
//! runs mid-stream: chunks only accumulate, and the full pipeline runs once
//! per settle. Each settle replaces the previous document wholesale; there
//! is no incremental diffing.

use crate::model::Document;
use crate::parser::{ParseOptions, ReportParser};

/// Accumulates streamed report text and parses on settle.
pub struct ReportStream {
    parser: ReportParser,
    buffer: String,
    streaming: bool,
    document: Option<Document>,
}

impl ReportStream {
    /// Create a stream with default parse options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a stream with custom parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            parser: ReportParser::with_options(options),
            buffer: String::new(),
            streaming: false,
            document: None,
        }
    }

    /// Append a chunk of raw text. Marks the stream as in-flight.
    pub fn push_chunk(&mut self, chunk: &str) {
        self.streaming = true;
        self.buffer.push_str(chunk);
    }

    /// Whether chunks are still arriving (no settle since the last push).
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Raw accumulated text so far.
    pub fn raw(&self) -> &str {
        &self.buffer
    }

    /// Settle the stream: run the full pipeline over everything accumulated.
    ///
    /// The resulting document replaces any previous one.
    pub fn settle(&mut self) -> &Document {
        self.streaming = false;
        let doc = self.parser.parse(&self.buffer);
        self.document.insert(doc)
    }

    /// The most recently settled document, if any.
    ///
    /// Returns `None` while streaming; consumers should show a pending
    /// state rather than a stale parse.
    pub fn document(&self) -> Option<&Document> {
        if self.streaming {
            return None;
        }
        self.document.as_ref()
    }

    /// Discard all accumulated text and any settled document.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.streaming = false;
        self.document = None;
    }
}

impl Default for ReportStream {
    fn default() -> Self {
        Self::new()
    }
}
