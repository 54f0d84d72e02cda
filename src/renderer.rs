//! Renderer ports: the backend handle contract and its factory.
//!
//! The response depends on these traits only; adapters (like the Pandoc
//! integration) provide the implementations. Swapping the factory on a
//! response is how alternative engines and test doubles are plugged in.

use std::fmt;

use crate::display::{DisplayLayout, DisplayMode};
use crate::error::{BackendError, ConfigurationError};
use crate::margins::Margins;
use crate::page::{Orientation, PageFormat};

/// How ingested markup is interpreted by the backend.
///
/// The numeric codes are the classic HTML ingestion modes of PDF engines;
/// the send pipeline always feeds document sources as [`MarkupMode::Body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupMode {
    /// A complete HTML document, headers included (mode 0).
    Document,
    /// Stylesheet content only (mode 1).
    Styles,
    /// Markup forming the whole document body (mode 2).
    Body,
}

impl MarkupMode {
    /// Numeric mode code.
    pub fn code(self) -> u8 {
        match self {
            MarkupMode::Document => 0,
            MarkupMode::Styles => 1,
            MarkupMode::Body => 2,
        }
    }
}

/// Configuration snapshot handed to renderer factories.
///
/// Captures the presentation fields of a response at the moment its
/// renderer is first needed. Margins arrive already parsed; a response
/// with a malformed margin string never reaches a factory.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererSettings {
    /// Paper size.
    pub format: PageFormat,
    /// Page orientation.
    pub orientation: Orientation,
    /// Validated page margins, millimetres.
    pub margins: Margins,
    /// Viewer zoom preference.
    pub display_mode: DisplayMode,
    /// Viewer page layout preference.
    pub display_layout: DisplayLayout,
}

/// Handle to a constructed backend renderer.
///
/// One handle serves exactly one document: metadata is recorded, markup
/// is ingested, before-complete hooks may mutate the in-progress document,
/// and [`finish`](DocumentRenderer::finish) produces the binary output.
/// Handles are exclusively owned by their response and never shared.
pub trait DocumentRenderer: Send {
    /// Record the document author metadata.
    fn set_author(&mut self, author: &str);

    /// Record the document title metadata.
    fn set_title(&mut self, title: &str);

    /// Feed markup text to the backend under the given ingestion mode.
    ///
    /// Input is always UTF-8. May be called more than once; content
    /// accumulates in call order.
    fn ingest_markup(&mut self, markup: &str, mode: MarkupMode) -> Result<(), BackendError>;

    /// Ask the viewer to open its print dialog when the document loads.
    ///
    /// Backends without a viewer preference channel ignore this; the
    /// default does nothing.
    fn request_print_dialog(&mut self) {}

    /// Produce the final binary PDF.
    ///
    /// `filename` is the download name the output will be served under,
    /// for backends that embed it.
    fn finish(&mut self, filename: &str) -> Result<Vec<u8>, BackendError>;
}

impl fmt::Debug for dyn DocumentRenderer + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn DocumentRenderer")
    }
}

/// Builds a renderer from a settings snapshot.
///
/// The stock implementation is [`PandocFactory`](crate::backend::PandocFactory);
/// install a different one on a response to target another engine, or
/// [`MockRendererFactory`](crate::backend::MockRendererFactory) to test
/// without a backend. Plain closures with the matching signature also
/// implement this trait.
pub trait RendererFactory: Send + Sync {
    /// Build a fresh renderer configured per `settings`.
    fn build(&self, settings: &RendererSettings)
        -> Result<Box<dyn DocumentRenderer>, ConfigurationError>;
}

impl<F> RendererFactory for F
where
    F: Fn(&RendererSettings) -> Result<Box<dyn DocumentRenderer>, ConfigurationError>
        + Send
        + Sync,
{
    fn build(
        &self,
        settings: &RendererSettings,
    ) -> Result<Box<dyn DocumentRenderer>, ConfigurationError> {
        self(settings)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
