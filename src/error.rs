//! Error types for the PDF response pipeline.
//!
//! Failures fall into three families: configuration problems caught before
//! or while the backend renderer is constructed, opaque backend failures
//! propagated from the rendering engine, and failures raised by
//! user-registered before-complete hooks. [`SendError`] is the umbrella
//! returned by the send pipeline.

use thiserror::Error;

/// Errors raised by configuration validation and renderer construction.
///
/// None of these are retried: a response that fails configuration stays
/// failed until the caller fixes its fields or its factory.
#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    /// The margin string did not contain exactly six comma-separated values.
    #[error("Margins must list exactly six values (top,right,bottom,left,header,footer), got {count}")]
    MarginCount {
        /// Number of values actually present.
        count: usize,
    },

    /// A margin value was not a strictly positive integer.
    #[error("Margin '{field}' must be a positive integer, got '{value}'")]
    MarginValue {
        /// Which of the six margins was malformed.
        field: &'static str,
        /// The offending token, trimmed.
        value: String,
    },

    /// A page format token was not recognized.
    #[error("Unknown page format: {0}")]
    UnknownPageFormat(String),

    /// An orientation token was not recognized.
    #[error("Unknown orientation: {0}")]
    UnknownOrientation(String),

    /// A display mode token was not recognized.
    #[error("Unknown display mode: {0}")]
    UnknownDisplayMode(String),

    /// A display layout token was not recognized.
    #[error("Unknown display layout: {0}")]
    UnknownDisplayLayout(String),

    /// No renderer factory is installed on the response.
    #[error("No renderer factory is configured")]
    MissingFactory,

    /// The installed factory failed to produce a renderer.
    #[error("Renderer factory failed: {0}")]
    FactoryFailed(String),

    /// The backend executable could not be located or probed.
    #[error("PDF backend unavailable at '{path}': {reason}")]
    BackendUnavailable {
        /// The path or command name that was tried.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The process-wide backend path was set a second time.
    #[error("PDF backend path is already configured for this process")]
    BackendAlreadyConfigured,
}

impl ConfigurationError {
    /// Create a factory failure error.
    pub fn factory_failed(reason: impl Into<String>) -> Self {
        Self::FactoryFailed(reason.into())
    }

    /// Create a backend unavailable error.
    pub fn backend_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Opaque failure reported by the backend engine while ingesting markup
/// or producing output.
///
/// The pipeline never interprets these; they are carried through to the
/// caller verbatim.
#[derive(Debug, Error)]
#[error("PDF backend error: {message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<std::io::Error>,
}

impl BackendError {
    /// Create a backend error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend error wrapping an I/O failure.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }

    /// The backend's message, without the error prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure raised by a before-complete hook.
///
/// A failing hook aborts the send before any output is produced.
#[derive(Debug, Clone, Error)]
#[error("Before-complete hook failed: {message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The hook's message, without the error prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Umbrella error returned by the send pipeline.
///
/// Each variant wraps one error family transparently, so the display
/// string is always the underlying error's own.
#[derive(Debug, Error)]
pub enum SendError {
    /// The response or its backend was misconfigured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The backend engine failed while rendering.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A before-complete hook failed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
