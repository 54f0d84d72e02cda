//! The PDF document response.
//!
//! [`PdfResponse`] carries a markup source plus presentation settings,
//! builds its backend renderer lazily through a replaceable factory, and
//! turns into a finished PDF via [`send`](PdfResponse::send). The
//! pipeline stages run in a fixed order: resolve the source, construct
//! and configure the renderer, ingest the markup, request the print
//! dialog, run the before-complete hooks, and produce the output.

use std::fmt;

use crate::backend::PandocFactory;
use crate::display::{DisplayLayout, DisplayMode};
use crate::error::{ConfigurationError, HookError, SendError};
use crate::margins::Margins;
use crate::page::{Orientation, PageFormat};
use crate::renderer::{DocumentRenderer, MarkupMode, RendererFactory, RendererSettings};
use crate::source::DocumentSource;

/// Default margin string: top, right, bottom, left, header, footer (mm).
pub const DEFAULT_MARGINS: &str = "16,15,16,15,9,9";

/// Default document title, also the source of the default filename.
pub const DEFAULT_TITLE: &str = "Unnamed document";

/// Default document author metadata.
pub const DEFAULT_AUTHOR: &str = "pdf-courier";

/// Hook run against the live renderer just before final output.
pub type BeforeCompleteHook =
    Box<dyn FnOnce(&mut dyn DocumentRenderer) -> Result<(), HookError> + Send>;

/// An HTML document on its way to becoming a PDF HTTP response.
///
/// Construction never touches the backend; everything expensive is
/// deferred to [`send`](PdfResponse::send), which consumes the response.
/// Presentation fields are plain and public, adjusted between
/// construction and send:
///
/// ```rust
/// use pdf_courier::{Orientation, PdfResponse};
///
/// let mut pdf = PdfResponse::new("<h1>Hello</h1>");
/// pdf.title = "Greeting".to_string();
/// pdf.orientation = Orientation::Landscape;
/// pdf.margins = "10,10,10,10,5,5".to_string();
/// ```
///
/// The margin string stays unvalidated until a renderer is needed, so a
/// bad value surfaces from `send` (or [`renderer`](PdfResponse::renderer)),
/// not from the assignment.
pub struct PdfResponse {
    source: DocumentSource,

    /// Paper size handed to the backend.
    pub format: PageFormat,
    /// Page orientation.
    pub orientation: Orientation,
    /// Margin string: six positive integers `"top,right,bottom,left,header,footer"`, in millimetres.
    pub margins: String,
    /// Document author metadata.
    pub author: String,
    /// Document title; its slug becomes the download filename.
    pub title: String,
    /// Viewer zoom preference.
    pub display_mode: DisplayMode,
    /// Viewer page layout preference.
    pub display_layout: DisplayLayout,
    /// Builds the backend renderer on first use. Replace to target a
    /// different engine or a test double; `None` fails the send.
    pub renderer_factory: Option<Box<dyn RendererFactory>>,

    before_complete: Vec<BeforeCompleteHook>,
    renderer: Option<Box<dyn DocumentRenderer>>,
}

impl PdfResponse {
    /// Creates a response from literal markup, used verbatim.
    pub fn new(markup: impl Into<String>) -> Self {
        Self::from_source(DocumentSource::Markup(markup.into()))
    }

    /// Creates a response from a template-like value; its `Display` impl
    /// runs once, at send time.
    pub fn from_template(template: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self::from_source(DocumentSource::Template(Box::new(template)))
    }

    fn from_source(source: DocumentSource) -> Self {
        Self {
            source,
            format: PageFormat::default(),
            orientation: Orientation::default(),
            margins: DEFAULT_MARGINS.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            title: DEFAULT_TITLE.to_string(),
            display_mode: DisplayMode::default(),
            display_layout: DisplayLayout::default(),
            renderer_factory: Some(Box::new(PandocFactory::new())),
            before_complete: Vec::new(),
            renderer: None,
        }
    }

    /// The source this response was constructed with.
    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Registers a hook run just before the final output is produced.
    ///
    /// Hooks receive the same renderer handle the pipeline writes with,
    /// run in registration order, and run at most once. A hook error
    /// aborts the send; later hooks never run.
    pub fn on_before_complete<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut dyn DocumentRenderer) -> Result<(), HookError> + Send + 'static,
    {
        self.before_complete.push(Box::new(hook));
    }

    /// Snapshot of the presentation fields; the margin string is parsed here.
    fn settings(&self) -> Result<RendererSettings, ConfigurationError> {
        Ok(RendererSettings {
            format: self.format,
            orientation: self.orientation,
            margins: Margins::parse(&self.margins)?,
            display_mode: self.display_mode,
            display_layout: self.display_layout,
        })
    }

    /// The backend renderer, built on first call and reused afterwards.
    ///
    /// Margins are validated before the factory runs, so a malformed
    /// margin string never constructs a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingFactory`] when
    /// [`renderer_factory`](Self::renderer_factory) is `None`, a margin
    /// parse error when the margin string is malformed, and whatever the
    /// factory itself reports.
    pub fn renderer(&mut self) -> Result<&mut dyn DocumentRenderer, ConfigurationError> {
        let renderer = match self.renderer.take() {
            Some(renderer) => renderer,
            None => {
                let settings = self.settings()?;
                let factory = self
                    .renderer_factory
                    .as_ref()
                    .ok_or(ConfigurationError::MissingFactory)?;
                let renderer = factory.build(&settings)?;
                tracing::debug!(
                    format = %settings.format,
                    orientation = %settings.orientation,
                    "renderer constructed"
                );
                renderer
            }
        };
        Ok(self.renderer.insert(renderer).as_mut())
    }

    /// Runs the document through the full pipeline and returns the result.
    ///
    /// Stage order is fixed: the source is resolved to markup, the
    /// renderer is built (if not already) and given the author and title,
    /// the markup is ingested as document body content, the viewer print
    /// dialog is requested, the before-complete hooks run in order, and
    /// the backend produces the bytes. The response is consumed either
    /// way; a failed send cannot be retried.
    ///
    /// # Errors
    ///
    /// Configuration problems, backend failures, and hook failures are
    /// reported as the matching [`SendError`] variant.
    pub fn send(mut self) -> Result<RenderedDocument, SendError> {
        let markup = self.source.resolve();
        tracing::debug!(bytes = markup.len(), "document source resolved");

        let author = self.author.clone();
        let title = self.title.clone();
        let filename = filename_slug(&title);

        {
            let renderer = self.renderer()?;
            renderer.set_author(&author);
            renderer.set_title(&title);
            renderer.ingest_markup(&markup, MarkupMode::Body)?;
            renderer.request_print_dialog();
        }

        let hooks = std::mem::take(&mut self.before_complete);
        let total = hooks.len();
        for (index, hook) in hooks.into_iter().enumerate() {
            let renderer = self.renderer()?;
            if let Err(e) = hook(renderer) {
                tracing::warn!(hook = index + 1, total, error = %e, "before-complete hook failed");
                return Err(e.into());
            }
        }

        let renderer = self.renderer()?;
        let bytes = renderer.finish(&filename)?;
        tracing::debug!(filename = %filename, bytes = bytes.len(), "document emitted");

        Ok(RenderedDocument { filename, bytes })
    }
}

impl fmt::Debug for PdfResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfResponse")
            .field("source", &self.source)
            .field("format", &self.format)
            .field("orientation", &self.orientation)
            .field("margins", &self.margins)
            .field("author", &self.author)
            .field("title", &self.title)
            .field("display_mode", &self.display_mode)
            .field("display_layout", &self.display_layout)
            .field("hooks", &self.before_complete.len())
            .finish_non_exhaustive()
    }
}

/// Final product of a send: the PDF bytes and their download filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Slugified title, used in the content-disposition header.
    pub filename: String,
    /// The binary PDF.
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    /// MIME type of the payload.
    pub fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    /// Inline content-disposition advertising the filename.
    pub fn content_disposition(&self) -> String {
        format!("inline; filename=\"{}\"", self.filename)
    }
}

/// Slug form of a document title, used as the download filename.
///
/// Deterministic and idempotent: slugging a slug returns it unchanged.
/// Titles with no sluggable characters fall back to `"document"`.
pub fn filename_slug(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        "document".to_string()
    } else {
        slug
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockRendererFactory;

    // ───────────────────────────────────────────────────────────────
    // Default configuration tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn new_responses_carry_the_stock_configuration() {
        let response = PdfResponse::new("<p/>");
        assert_eq!(response.format, PageFormat::IsoA(4));
        assert_eq!(response.orientation, Orientation::Portrait);
        assert_eq!(response.margins, DEFAULT_MARGINS);
        assert_eq!(response.author, DEFAULT_AUTHOR);
        assert_eq!(response.title, DEFAULT_TITLE);
        assert_eq!(response.display_mode, DisplayMode::Default);
        assert_eq!(response.display_layout, DisplayLayout::Continuous);
        assert!(response.renderer_factory.is_some());
    }

    #[test]
    fn default_margins_parse() {
        assert_eq!(Margins::parse(DEFAULT_MARGINS).unwrap(), Margins::default());
    }

    #[test]
    fn source_accessor_exposes_the_markup() {
        let response = PdfResponse::new("<h1>kept</h1>");
        assert_eq!(response.source().resolve(), "<h1>kept</h1>");
    }

    // ───────────────────────────────────────────────────────────────
    // Renderer memoization tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn renderer_is_built_once_and_reused() {
        let factory = MockRendererFactory::new();
        let mut response = PdfResponse::new("<p/>");
        response.renderer_factory = Some(Box::new(factory.clone()));

        response.renderer().unwrap();
        response.renderer().unwrap();

        assert_eq!(factory.build_count(), 1);
    }

    #[test]
    fn missing_factory_is_a_configuration_error() {
        let mut response = PdfResponse::new("<p/>");
        response.renderer_factory = None;
        let err = response.renderer().unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingFactory));
    }

    #[test]
    fn malformed_margins_fail_before_the_factory_runs() {
        let factory = MockRendererFactory::new();
        let mut response = PdfResponse::new("<p/>");
        response.renderer_factory = Some(Box::new(factory.clone()));
        response.margins = "16,15,16".to_string();

        let err = response.renderer().unwrap_err();
        assert!(matches!(err, ConfigurationError::MarginCount { count: 3 }));
        assert_eq!(factory.build_count(), 0);
    }

    #[test]
    fn factory_failure_is_reported_as_configuration() {
        let factory = MockRendererFactory::new().with_build_error("no engine");
        let mut response = PdfResponse::new("<p/>");
        response.renderer_factory = Some(Box::new(factory));
        let err = response.renderer().unwrap_err();
        assert!(matches!(err, ConfigurationError::FactoryFailed(_)));
    }

    // ───────────────────────────────────────────────────────────────
    // Filename slug tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn filenames_are_slugged_titles() {
        assert_eq!(filename_slug("Unnamed document"), "unnamed-document");
        assert_eq!(filename_slug("Q3 Report: Final!"), "q3-report-final");
        assert_eq!(filename_slug("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn slugging_is_idempotent() {
        let once = filename_slug("Invoice #42 (draft)");
        assert_eq!(filename_slug(&once), once);
    }

    #[test]
    fn unsluggable_titles_fall_back() {
        assert_eq!(filename_slug(""), "document");
        assert_eq!(filename_slug("!!!"), "document");
    }

    // ───────────────────────────────────────────────────────────────
    // RenderedDocument tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn rendered_document_headers_are_inline_pdf() {
        let document = RenderedDocument {
            filename: "quarterly-report".to_string(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        };
        assert_eq!(document.content_type(), "application/pdf");
        assert_eq!(
            document.content_disposition(),
            "inline; filename=\"quarterly-report\""
        );
    }

    #[test]
    fn debug_reports_configuration_not_contents() {
        let mut response = PdfResponse::new("<h1>secret</h1>");
        response.on_before_complete(|_| Ok(()));
        let debug = format!("{response:?}");
        assert!(debug.contains("hooks: 1"));
        assert!(!debug.contains("secret"));
    }
}
