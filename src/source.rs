//! Renderable document source.

use std::fmt;

/// Markup handed to the renderer: either literal text or a deferred
/// template rendered through its [`Display`](fmt::Display) impl.
///
/// Template sources are converted exactly once per send, at the start of
/// the pipeline; strings are used verbatim with no inspection.
pub enum DocumentSource {
    /// Raw markup, used as-is.
    Markup(String),
    /// A template-like value; `to_string()` runs at send time.
    Template(Box<dyn fmt::Display + Send + Sync>),
}

impl DocumentSource {
    /// Produce the markup text: literal sources verbatim, templates via
    /// their `Display` impl.
    pub fn resolve(&self) -> String {
        match self {
            DocumentSource::Markup(markup) => markup.clone(),
            DocumentSource::Template(template) => template.to_string(),
        }
    }
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Markup(markup) => f
                .debug_tuple("Markup")
                .field(&format_args!("{} bytes", markup.len()))
                .finish(),
            DocumentSource::Template(_) => f.debug_tuple("Template").finish(),
        }
    }
}

impl From<String> for DocumentSource {
    fn from(markup: String) -> Self {
        DocumentSource::Markup(markup)
    }
}

impl From<&str> for DocumentSource {
    fn from(markup: &str) -> Self {
        DocumentSource::Markup(markup.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting {
        name: &'static str,
    }

    impl fmt::Display for Greeting {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "<p>Hello, {}!</p>", self.name)
        }
    }

    #[test]
    fn markup_resolves_verbatim() {
        let source = DocumentSource::Markup("<h1>Title</h1>".to_string());
        assert_eq!(source.resolve(), "<h1>Title</h1>");
    }

    #[test]
    fn template_resolves_through_display() {
        let source = DocumentSource::Template(Box::new(Greeting { name: "world" }));
        assert_eq!(source.resolve(), "<p>Hello, world!</p>");
    }

    #[test]
    fn string_conversions_produce_markup() {
        assert!(matches!(DocumentSource::from("<p/>"), DocumentSource::Markup(_)));
        assert!(matches!(
            DocumentSource::from("<p/>".to_string()),
            DocumentSource::Markup(_)
        ));
    }

    #[test]
    fn debug_does_not_dump_the_markup() {
        let source = DocumentSource::Markup("<h1>secret</h1>".to_string());
        let debug = format!("{source:?}");
        assert!(debug.contains("bytes"));
        assert!(!debug.contains("secret"));
    }
}
