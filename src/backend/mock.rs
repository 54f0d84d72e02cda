//! Mock renderer for testing.
//!
//! Provides a configurable implementation of the renderer ports, letting
//! pipeline and HTTP tests run without an external engine.
//!
//! # Features
//!
//! - Configurable output bytes
//! - Error injection at build, ingest, and finish
//! - Call recording shared across every renderer the factory builds
//!
//! # Example
//!
//! ```rust
//! use pdf_courier::backend::MockRendererFactory;
//! use pdf_courier::PdfResponse;
//!
//! let factory = MockRendererFactory::new().with_output(b"%PDF-1.4".to_vec());
//!
//! let mut response = PdfResponse::new("<p>hi</p>");
//! response.renderer_factory = Some(Box::new(factory.clone()));
//! response.send().unwrap();
//!
//! assert_eq!(factory.build_count(), 1);
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{BackendError, ConfigurationError};
use crate::renderer::{DocumentRenderer, MarkupMode, RendererFactory, RendererSettings};

/// A call observed by a mock renderer, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `set_author` with the given value.
    SetAuthor(String),
    /// `set_title` with the given value.
    SetTitle(String),
    /// `ingest_markup` with the given content and mode.
    IngestMarkup {
        /// The markup text as received.
        markup: String,
        /// The ingestion mode used.
        mode: MarkupMode,
    },
    /// `request_print_dialog`.
    RequestPrintDialog,
    /// `finish` with the given download filename.
    Finish {
        /// The filename the output was asked to advertise.
        filename: String,
    },
}

/// Factory producing recording mock renderers.
///
/// Clones share state, so tests keep one clone for inspection and hand
/// the other to the response under test.
#[derive(Debug, Clone)]
pub struct MockRendererFactory {
    /// Calls made on every renderer built here, in order.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    /// The settings snapshot received by each build.
    settings_seen: Arc<Mutex<Vec<RendererSettings>>>,
    /// Bytes returned from `finish`.
    output: Vec<u8>,
    /// Error injected when building.
    fail_build: Option<String>,
    /// Error injected on the first `ingest_markup`.
    fail_ingest: Option<String>,
    /// Error injected on `finish`.
    fail_finish: Option<String>,
}

impl Default for MockRendererFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRendererFactory {
    /// Creates a mock factory that succeeds with a tiny PDF-shaped payload.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            settings_seen: Arc::new(Mutex::new(Vec::new())),
            output: b"%PDF-1.4\n%mock\n".to_vec(),
            fail_build: None,
            fail_ingest: None,
            fail_finish: None,
        }
    }

    /// Sets the bytes `finish` returns.
    pub fn with_output(mut self, output: impl Into<Vec<u8>>) -> Self {
        self.output = output.into();
        self
    }

    /// Makes every build fail with the given reason.
    pub fn with_build_error(mut self, reason: impl Into<String>) -> Self {
        self.fail_build = Some(reason.into());
        self
    }

    /// Makes `ingest_markup` fail with the given message.
    pub fn with_ingest_error(mut self, message: impl Into<String>) -> Self {
        self.fail_ingest = Some(message.into());
        self
    }

    /// Makes `finish` fail with the given message.
    pub fn with_finish_error(mut self, message: impl Into<String>) -> Self {
        self.fail_finish = Some(message.into());
        self
    }

    /// Number of renderers built so far.
    pub fn build_count(&self) -> usize {
        self.settings_seen.lock().unwrap().len()
    }

    /// The settings snapshot each build received.
    pub fn settings_seen(&self) -> Vec<RendererSettings> {
        self.settings_seen.lock().unwrap().clone()
    }

    /// All recorded renderer calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded renderer calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl RendererFactory for MockRendererFactory {
    fn build(
        &self,
        settings: &RendererSettings,
    ) -> Result<Box<dyn DocumentRenderer>, ConfigurationError> {
        self.settings_seen.lock().unwrap().push(settings.clone());

        if let Some(reason) = &self.fail_build {
            return Err(ConfigurationError::factory_failed(reason.clone()));
        }

        Ok(Box::new(MockRenderer {
            calls: Arc::clone(&self.calls),
            output: self.output.clone(),
            fail_ingest: self.fail_ingest.clone(),
            fail_finish: self.fail_finish.clone(),
        }))
    }
}

/// Renderer handle built by [`MockRendererFactory`].
#[derive(Debug)]
pub struct MockRenderer {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    output: Vec<u8>,
    fail_ingest: Option<String>,
    fail_finish: Option<String>,
}

impl MockRenderer {
    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DocumentRenderer for MockRenderer {
    fn set_author(&mut self, author: &str) {
        self.record(RecordedCall::SetAuthor(author.to_string()));
    }

    fn set_title(&mut self, title: &str) {
        self.record(RecordedCall::SetTitle(title.to_string()));
    }

    fn ingest_markup(&mut self, markup: &str, mode: MarkupMode) -> Result<(), BackendError> {
        self.record(RecordedCall::IngestMarkup {
            markup: markup.to_string(),
            mode,
        });
        match &self.fail_ingest {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn request_print_dialog(&mut self) {
        self.record(RecordedCall::RequestPrintDialog);
    }

    fn finish(&mut self, filename: &str) -> Result<Vec<u8>, BackendError> {
        self.record(RecordedCall::Finish {
            filename: filename.to_string(),
        });
        match &self.fail_finish {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(self.output.clone()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
