//! # pdf-courier
//!
//! Hands an HTML document to an external PDF engine and streams the
//! result back as an axum HTTP response.
//!
//! The crate is an adapter, not a renderer: layout, fonts, and pagination
//! belong to the backend executable (Pandoc by default, located once per
//! process). A [`PdfResponse`] carries the markup and presentation
//! settings, builds its renderer lazily through a replaceable
//! [`RendererFactory`], and emits the finished bytes with inline
//! disposition under a filename slugged from the document title.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pdf_courier::{Orientation, PdfResponse};
//!
//! async fn quarterly_report() -> axum::response::Response {
//!     let mut pdf = PdfResponse::new("<h1>Quarterly report</h1>");
//!     pdf.title = "Quarterly report".to_string();
//!     pdf.orientation = Orientation::Landscape;
//!     pdf.into_response_blocking().await
//! }
//! ```
//!
//! ## Testing without a backend
//!
//! The factory seam takes any [`RendererFactory`]; the bundled mock
//! records every renderer call:
//!
//! ```rust
//! use pdf_courier::backend::MockRendererFactory;
//! use pdf_courier::PdfResponse;
//!
//! let factory = MockRendererFactory::new();
//! let mut response = PdfResponse::new("<p>hi</p>");
//! response.renderer_factory = Some(Box::new(factory.clone()));
//!
//! let document = response.send().unwrap();
//! assert_eq!(document.filename, "unnamed-document");
//! assert_eq!(factory.build_count(), 1);
//! ```

pub mod backend;
pub mod display;
pub mod error;
pub mod http;
pub mod margins;
pub mod page;
pub mod renderer;
pub mod response;
pub mod source;

pub use display::{DisplayLayout, DisplayMode};
pub use error::{BackendError, ConfigurationError, HookError, SendError};
pub use crate::http::ErrorResponse;
pub use margins::Margins;
pub use page::{Orientation, PageFormat};
pub use renderer::{DocumentRenderer, MarkupMode, RendererFactory, RendererSettings};
pub use response::{
    filename_slug, BeforeCompleteHook, PdfResponse, RenderedDocument, DEFAULT_AUTHOR,
    DEFAULT_MARGINS, DEFAULT_TITLE,
};
pub use source::DocumentSource;
