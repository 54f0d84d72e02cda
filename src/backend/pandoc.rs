//! Pandoc-backed renderer adapter.
//!
//! Drives the Pandoc executable as the PDF engine: markup is written to
//! its stdin as UTF-8 HTML and the finished PDF is read back from its
//! stdout, one subprocess per document. Page geometry and document
//! metadata travel as command-line variables.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{BackendError, ConfigurationError};
use crate::page::Orientation;
use crate::renderer::{DocumentRenderer, MarkupMode, RendererFactory, RendererSettings};

use super::locator;

/// Builds [`PandocRenderer`] handles.
///
/// The executable comes from the process-wide locator unless a path
/// override is supplied; overrides get the same environment expansion
/// and existence check, but are private to this factory.
///
/// # Example
///
/// ```rust,no_run
/// use pdf_courier::backend::PandocFactory;
/// use pdf_courier::PdfResponse;
///
/// let factory = PandocFactory::new().with_backend_path("${TOOLS_DIR}/pandoc");
/// let mut response = PdfResponse::new("<p>ready</p>");
/// response.renderer_factory = Some(Box::new(factory));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PandocFactory {
    /// Executable override. If None, the process-wide locator decides.
    backend_path: Option<String>,
}

impl PandocFactory {
    /// Create a factory that uses the process-wide backend.
    pub fn new() -> Self {
        Self { backend_path: None }
    }

    /// Override the backend executable for renderers built by this factory.
    pub fn with_backend_path(mut self, path: impl Into<String>) -> Self {
        self.backend_path = Some(path.into());
        self
    }

    fn executable(&self) -> Result<PathBuf, ConfigurationError> {
        match &self.backend_path {
            Some(raw) => locator::prepare(raw),
            None => locator::resolve().map(Path::to_path_buf),
        }
    }
}

impl RendererFactory for PandocFactory {
    fn build(
        &self,
        settings: &RendererSettings,
    ) -> Result<Box<dyn DocumentRenderer>, ConfigurationError> {
        let executable = self.executable()?;
        Ok(Box::new(PandocRenderer::new(executable, settings.clone())))
    }
}

/// Renderer handle backed by one Pandoc invocation.
///
/// Metadata and markup are buffered in memory; the subprocess runs once,
/// inside [`finish`](DocumentRenderer::finish). The print-dialog request
/// is ignored, since Pandoc has no viewer preference channel.
pub struct PandocRenderer {
    executable: PathBuf,
    settings: RendererSettings,
    author: Option<String>,
    title: Option<String>,
    markup: String,
}

impl PandocRenderer {
    fn new(executable: PathBuf, settings: RendererSettings) -> Self {
        Self {
            executable,
            settings,
            author: None,
            title: None,
            markup: String::new(),
        }
    }

    /// Assemble the Pandoc argument list for the buffered document.
    fn arguments(&self) -> Vec<String> {
        let (width, height) = self.settings.format.dimensions_mm();
        let margins = &self.settings.margins;

        let mut args = vec![
            "--from=html".to_string(),
            "--to=pdf".to_string(),
            "--pdf-engine=xelatex".to_string(),
            "--output=-".to_string(),
        ];

        if let Some(title) = &self.title {
            args.push(format!("--metadata=title:{title}"));
        }
        if let Some(author) = &self.author {
            args.push(format!("--metadata=author:{author}"));
        }

        for variable in [
            format!("geometry:paperwidth={width}mm"),
            format!("geometry:paperheight={height}mm"),
            format!("geometry:top={}mm", margins.top),
            format!("geometry:right={}mm", margins.right),
            format!("geometry:bottom={}mm", margins.bottom),
            format!("geometry:left={}mm", margins.left),
            format!("geometry:headsep={}mm", margins.header),
            format!("geometry:footskip={}mm", margins.footer),
        ] {
            args.push("-V".to_string());
            args.push(variable);
        }

        if self.settings.orientation == Orientation::Landscape {
            args.push("-V".to_string());
            args.push("geometry:landscape".to_string());
        }

        args
    }
}

impl DocumentRenderer for PandocRenderer {
    fn set_author(&mut self, author: &str) {
        self.author = Some(author.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn ingest_markup(&mut self, markup: &str, mode: MarkupMode) -> Result<(), BackendError> {
        match mode {
            MarkupMode::Styles => {
                self.markup.push_str("<style>");
                self.markup.push_str(markup);
                self.markup.push_str("</style>");
            }
            MarkupMode::Document | MarkupMode::Body => self.markup.push_str(markup),
        }
        Ok(())
    }

    fn finish(&mut self, filename: &str) -> Result<Vec<u8>, BackendError> {
        let mut child = Command::new(&self.executable)
            .args(self.arguments())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BackendError::io("Failed to start PDF backend", e))?;

        // Write markup to stdin; dropping the handle closes the pipe
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(self.markup.as_bytes()) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BackendError::io("Failed to write markup to PDF backend", e));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| BackendError::io("PDF backend execution failed", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::new(format!(
                "PDF backend exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(
            filename = %filename,
            bytes = output.stdout.len(),
            "PDF backend produced output"
        );
        Ok(output.stdout)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayLayout, DisplayMode};
    use crate::margins::Margins;
    use crate::page::PageFormat;

    fn settings() -> RendererSettings {
        RendererSettings {
            format: PageFormat::default(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            display_mode: DisplayMode::default(),
            display_layout: DisplayLayout::default(),
        }
    }

    fn renderer() -> PandocRenderer {
        PandocRenderer::new(PathBuf::from("/usr/bin/pandoc"), settings())
    }

    // ───────────────────────────────────────────────────────────────
    // Argument assembly tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn arguments_declare_html_to_pdf_conversion() {
        let args = renderer().arguments();
        assert!(args.contains(&"--from=html".to_string()));
        assert!(args.contains(&"--to=pdf".to_string()));
        assert!(args.contains(&"--pdf-engine=xelatex".to_string()));
        assert!(args.contains(&"--output=-".to_string()));
    }

    #[test]
    fn arguments_carry_page_geometry() {
        let args = renderer().arguments();
        assert!(args.contains(&"geometry:paperwidth=210mm".to_string()));
        assert!(args.contains(&"geometry:paperheight=297mm".to_string()));
        assert!(args.contains(&"geometry:top=16mm".to_string()));
        assert!(args.contains(&"geometry:right=15mm".to_string()));
        assert!(args.contains(&"geometry:bottom=16mm".to_string()));
        assert!(args.contains(&"geometry:left=15mm".to_string()));
        assert!(args.contains(&"geometry:headsep=9mm".to_string()));
        assert!(args.contains(&"geometry:footskip=9mm".to_string()));
    }

    #[test]
    fn arguments_include_metadata_once_set() {
        let mut renderer = renderer();
        assert!(!renderer.arguments().iter().any(|a| a.starts_with("--metadata=title")));

        renderer.set_title("Q3 Report");
        renderer.set_author("Finance");
        let args = renderer.arguments();
        assert!(args.contains(&"--metadata=title:Q3 Report".to_string()));
        assert!(args.contains(&"--metadata=author:Finance".to_string()));
    }

    #[test]
    fn landscape_orientation_adds_the_geometry_flag() {
        let mut landscape = settings();
        landscape.orientation = Orientation::Landscape;
        let rotated = PandocRenderer::new(PathBuf::from("pandoc"), landscape);
        assert!(rotated.arguments().contains(&"geometry:landscape".to_string()));

        let upright = renderer();
        assert!(!upright.arguments().contains(&"geometry:landscape".to_string()));
    }

    #[test]
    fn letter_format_uses_fractional_dimensions() {
        let mut letter = settings();
        letter.format = PageFormat::Letter;
        let renderer = PandocRenderer::new(PathBuf::from("pandoc"), letter);
        let args = renderer.arguments();
        assert!(args.contains(&"geometry:paperwidth=215.9mm".to_string()));
        assert!(args.contains(&"geometry:paperheight=279.4mm".to_string()));
    }

    // ───────────────────────────────────────────────────────────────
    // Markup buffering tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn markup_accumulates_in_call_order() {
        let mut renderer = renderer();
        renderer.ingest_markup("<h1>One</h1>", MarkupMode::Body).unwrap();
        renderer.ingest_markup("<p>Two</p>", MarkupMode::Body).unwrap();
        assert_eq!(renderer.markup, "<h1>One</h1><p>Two</p>");
    }

    #[test]
    fn style_markup_is_wrapped_in_style_tags() {
        let mut renderer = renderer();
        renderer.ingest_markup("p { margin: 0 }", MarkupMode::Styles).unwrap();
        assert_eq!(renderer.markup, "<style>p { margin: 0 }</style>");
    }

    #[test]
    fn print_dialog_request_is_ignored() {
        let mut renderer = renderer();
        renderer.request_print_dialog();
        assert!(renderer.markup.is_empty());
    }

    // ───────────────────────────────────────────────────────────────
    // Factory tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn factory_rejects_a_missing_override_path() {
        let factory = PandocFactory::new().with_backend_path("/nonexistent/pandoc-xyz");
        let err = factory.build(&settings()).unwrap_err();
        assert!(matches!(err, ConfigurationError::BackendUnavailable { .. }));
    }

    #[test]
    fn factory_accepts_an_existing_override_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let factory =
            PandocFactory::new().with_backend_path(file.path().to_string_lossy().into_owned());
        assert!(factory.build(&settings()).is_ok());
    }
}
