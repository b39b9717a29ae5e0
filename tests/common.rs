use std::path::{Path, PathBuf};

use axum::Router;
use deadline_tracker::{create_app, AppConfig};

pub const TEST_REPO_URL: &str = "https://github.com/acme/tracker-fixture-repo";

/// Directory under `tests/fixtures` holding a `data/conferences.yaml`
pub fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Create the application router backed by a fixture directory
pub fn create_test_app(fixture: &str) -> Router {
    create_app(AppConfig {
        base_dir: fixture_dir(fixture),
        github_repo_url: TEST_REPO_URL.to_string(),
        ..Default::default()
    })
}
