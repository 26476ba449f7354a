//! Pagure test utilities

use std::sync::Arc;

use mockito::{Mock, ServerGuard};
use tempfile::TempDir;

use release_monitor::config::HttpConfig;
use release_monitor::project::NewProject;
use release_monitor::version::backends::PagureBackend;
use release_monitor::version::http::ReqwestClient;
use release_monitor::version::registry::BackendRegistry;
use release_monitor::version::store::{ProjectStore, SqliteStore};

/// Tags returned by the pagure project fixture
pub const PAGURE_TAGS: &str = r#"{
    "tags": [
        "0.1", "0.1.1", "0.1.2", "0.1.3", "0.1.4", "0.1.5", "0.1.6", "0.1.7",
        "0.1.8", "0.1.9", "0.1.10", "0.1.11", "0.1.12", "0.1.13", "0.1.14",
        "0.1.15", "0.1.16"
    ],
    "total_tags": 17
}"#;

/// Create a Pagure backend talking to the given mock server
pub fn create_backend(server: &ServerGuard) -> PagureBackend {
    let client = ReqwestClient::new(&HttpConfig::default()).unwrap();
    PagureBackend::with_base_url(Arc::new(client), &server.url())
}

/// Create a registry holding only a Pagure backend talking to the given mock server
pub fn create_registry(server: &ServerGuard) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(Arc::new(create_backend(server)));
    registry
}

/// Create a test store holding the `pagure` (#1) and `fake` (#2) projects
pub fn create_test_store() -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SqliteStore::new(&temp_dir.path().join("test.db")).unwrap();

    store
        .create(NewProject::new("pagure", "https://pagure.io/pagure", "pagure"))
        .unwrap();
    store
        .create(NewProject::new("fake", "https://pagure.io/fake", "pagure"))
        .unwrap();

    (temp_dir, store)
}

/// Mock the tags endpoint of the `pagure` project
pub async fn mock_pagure_tags(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/api/0/pagure/git/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PAGURE_TAGS)
        .create_async()
        .await
}

/// Mock the tags endpoint of the missing `fake` project
pub async fn mock_fake_not_found(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/api/0/fake/git/tags")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Project not found", "error_code": "ENOPROJECT"}"#)
        .create_async()
        .await
}
