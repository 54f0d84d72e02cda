//! Integration test for backend location through the environment.
//!
//! The locator caches its result process-wide, so this file holds one
//! sequential test telling the whole story: failed lookups are retried,
//! the environment variable wins once it points somewhere real, the
//! first successful resolution sticks, and the one-shot path setter
//! rejects a second call.

use pdf_courier::backend::locator::{resolve, set_backend_path, BACKEND_ENV_VAR};
use pdf_courier::ConfigurationError;

#[test]
fn the_backend_is_located_once_per_process() {
    // A bogus path from the environment fails, and the failure is not cached
    std::env::set_var(BACKEND_ENV_VAR, "/nonexistent/backend/binary");
    let err = resolve().unwrap_err();
    assert!(matches!(err, ConfigurationError::BackendUnavailable { .. }));

    // Pointing the variable at a real file succeeds on retry
    let file = tempfile::NamedTempFile::new().unwrap();
    std::env::set_var(BACKEND_ENV_VAR, file.path());
    assert_eq!(resolve().unwrap(), file.path());

    // The resolution is cached: a stale variable no longer matters
    std::env::set_var(BACKEND_ENV_VAR, "/nonexistent/other");
    assert_eq!(resolve().unwrap(), file.path());

    // The one-shot setter still accepts its single call, but cannot
    // displace the cached resolution
    set_backend_path("/arrives/too/late").unwrap();
    assert_eq!(resolve().unwrap(), file.path());

    // A second set is rejected outright
    let err = set_backend_path("/again").unwrap_err();
    assert!(matches!(err, ConfigurationError::BackendAlreadyConfigured));
}
