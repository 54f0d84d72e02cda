//! Backend adapters.
//!
//! The stock adapter drives the Pandoc executable; the locator decides
//! which executable that is, once per process. A recording mock ships
//! here too so pipeline tests never need a real engine.

pub mod locator;
mod mock;
mod pandoc;

pub use mock::{MockRendererFactory, RecordedCall};
pub use pandoc::{PandocFactory, PandocRenderer};
