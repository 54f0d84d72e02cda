//! Integration test for the one-shot backend path setter.
//!
//! Runs in its own process so the locator cache starts empty: here the
//! configured path is installed first and must win over the environment
//! variable, with `$VAR` references expanded along the way.

use pdf_courier::backend::locator::{resolve, set_backend_path, BACKEND_ENV_VAR};

#[test]
fn a_configured_path_wins_over_the_environment() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let dir = file.path().parent().unwrap().to_string_lossy().into_owned();
    let name = file.path().file_name().unwrap().to_string_lossy().into_owned();

    // The environment points somewhere bogus; the configured path is used instead
    std::env::set_var(BACKEND_ENV_VAR, "/nonexistent/env/backend");
    std::env::set_var("PDF_COURIER_TEST_TOOLS", &dir);
    set_backend_path(format!("${{PDF_COURIER_TEST_TOOLS}}/{name}")).unwrap();

    assert_eq!(resolve().unwrap(), file.path());
}
