//! Process-wide location of the backend executable.
//!
//! The executable is chosen from, in order: the one-shot path installed
//! with [`set_backend_path`], the `PDF_COURIER_BACKEND` environment
//! variable (a `.env` file is honored), and finally the stock command
//! name. Whatever wins is environment-expanded and checked, and the
//! result is cached for the rest of the process. Failures are not
//! cached; a later call retries the lookup.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use once_cell::sync::OnceCell;

use crate::error::ConfigurationError;

/// Environment variable naming the backend executable.
pub const BACKEND_ENV_VAR: &str = "PDF_COURIER_BACKEND";

/// Command used when nothing else is configured.
pub const DEFAULT_BACKEND: &str = "pandoc";

static CONFIGURED_PATH: OnceCell<String> = OnceCell::new();
static RESOLVED: OnceCell<PathBuf> = OnceCell::new();

/// Install the process-wide backend path.
///
/// May be called at most once, during initialization; the value takes
/// precedence over the environment variable and the stock command. A
/// call made after the backend has already been resolved has no effect
/// on the cached result.
///
/// # Errors
///
/// Returns [`ConfigurationError::BackendAlreadyConfigured`] on a second
/// call.
pub fn set_backend_path(path: impl Into<String>) -> Result<(), ConfigurationError> {
    CONFIGURED_PATH
        .set(path.into())
        .map_err(|_| ConfigurationError::BackendAlreadyConfigured)
}

/// The resolved backend executable, located on first use.
///
/// # Errors
///
/// Returns [`ConfigurationError::BackendUnavailable`] when the configured
/// value does not point at a usable executable.
pub fn resolve() -> Result<&'static Path, ConfigurationError> {
    RESOLVED.get_or_try_init(locate).map(PathBuf::as_path)
}

fn locate() -> Result<PathBuf, ConfigurationError> {
    let raw = configured_value();
    let path = prepare(&raw)?;
    tracing::debug!(backend = %path.display(), "PDF backend resolved");
    Ok(path)
}

fn configured_value() -> String {
    if let Some(path) = CONFIGURED_PATH.get() {
        return path.clone();
    }
    dotenvy::dotenv().ok();
    std::env::var(BACKEND_ENV_VAR).unwrap_or_else(|_| DEFAULT_BACKEND.to_string())
}

/// Expand and check one candidate value, without touching the cache.
pub(crate) fn prepare(raw: &str) -> Result<PathBuf, ConfigurationError> {
    let expanded = expand_env(raw);
    verify(&expanded)?;
    Ok(PathBuf::from(expanded))
}

/// Expand `$VAR` and `${VAR}` references against the process environment.
///
/// Unset variables expand to the empty string; a `$` that does not start
/// a reference stays literal.
fn expand_env(input: &str) -> String {
    let mut expanded = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(position) = rest.find('$') {
        expanded.push_str(&rest[..position]);
        rest = &rest[position + 1..];

        if let Some(braced) = rest.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    expanded.push_str(&variable(&braced[..end]));
                    rest = &braced[end + 1..];
                }
                None => {
                    // Unterminated ${: keep the remainder literally
                    expanded.push_str("${");
                    expanded.push_str(braced);
                    rest = "";
                }
            }
        } else {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            if end == 0 {
                expanded.push('$');
            } else {
                expanded.push_str(&variable(&rest[..end]));
                rest = &rest[end..];
            }
        }
    }

    expanded.push_str(rest);
    expanded
}

fn variable(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// What "located" means: explicit paths must exist as regular files,
/// bare command names must answer a `--version` probe.
fn verify(candidate: &str) -> Result<(), ConfigurationError> {
    if candidate.contains('/') || candidate.contains(std::path::MAIN_SEPARATOR) {
        if Path::new(candidate).is_file() {
            Ok(())
        } else {
            Err(ConfigurationError::backend_unavailable(
                candidate,
                "no such file",
            ))
        }
    } else {
        probe(candidate)
    }
}

fn probe(command: &str) -> Result<(), ConfigurationError> {
    let output = std::process::Command::new(command)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => Err(ConfigurationError::backend_unavailable(
            command,
            format!("version probe exited with {}", output.status),
        )),
        Err(e) => Err(ConfigurationError::backend_unavailable(command, e.to_string())),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    // ───────────────────────────────────────────────────────────────
    // Environment expansion tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn expand_leaves_plain_strings_alone() {
        assert_eq!(expand_env("/usr/bin/pandoc"), "/usr/bin/pandoc");
        assert_eq!(expand_env("pandoc"), "pandoc");
    }

    #[test]
    fn expand_substitutes_bare_references() {
        std::env::set_var("PDF_COURIER_TEST_BARE", "/opt/tools");
        assert_eq!(expand_env("$PDF_COURIER_TEST_BARE/pandoc"), "/opt/tools/pandoc");
    }

    #[test]
    fn expand_substitutes_braced_references() {
        std::env::set_var("PDF_COURIER_TEST_BRACED", "/srv");
        assert_eq!(
            expand_env("${PDF_COURIER_TEST_BRACED}/bin/pandoc"),
            "/srv/bin/pandoc"
        );
    }

    #[test]
    fn expand_turns_unset_references_into_nothing() {
        assert_eq!(expand_env("${PDF_COURIER_TEST_UNSET}/pandoc"), "/pandoc");
    }

    #[test]
    fn expand_keeps_literal_dollars() {
        assert_eq!(expand_env("pan$"), "pan$");
        assert_eq!(expand_env("$$"), "$$");
        assert_eq!(expand_env("${unterminated"), "${unterminated");
    }

    // ───────────────────────────────────────────────────────────────
    // Verification tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn explicit_path_to_existing_file_verifies() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().into_owned();
        assert!(verify(&path).is_ok());
    }

    #[test]
    fn explicit_path_to_missing_file_is_unavailable() {
        let err = verify("/definitely/not/a/real/backend").unwrap_err();
        match err {
            ConfigurationError::BackendUnavailable { path, reason } => {
                assert_eq!(path, "/definitely/not/a/real/backend");
                assert_eq!(reason, "no such file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bare_name_that_cannot_spawn_is_unavailable() {
        let err = verify("pdf-courier-no-such-command").unwrap_err();
        assert!(matches!(err, ConfigurationError::BackendUnavailable { .. }));
    }

    #[test]
    fn prepare_expands_before_checking() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let dir = file.path().parent().unwrap().to_string_lossy().into_owned();
        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        std::env::set_var("PDF_COURIER_TEST_DIR", &dir);

        let path = prepare(&format!("${{PDF_COURIER_TEST_DIR}}/{name}")).unwrap();
        assert_eq!(path, file.path());
    }
}
