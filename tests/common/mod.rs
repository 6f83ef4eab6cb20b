//! Common test utilities for backend integration tests
#![allow(dead_code)]

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};

use knowledgehub_backend::{
    routes, ApiError, AppState, ExternalBookResult, InMemoryBookStore, InMemoryUserStore,
    MemoryObjectStorage, SearchProvider,
};

/// Mock search provider with canned responses and recorded requests
#[derive(Default)]
pub struct MockSearchProvider {
    /// Results returned by `search`
    pub results: Mutex<Vec<ExternalBookResult>>,
    /// When set, `search` fails with a transport-style error
    pub fail_search: AtomicBool,
    /// Body returned by `fetch_detail`
    pub detail: Mutex<Value>,
    /// When set, `fetch_detail` fails with this upstream status
    pub detail_status: Mutex<Option<u16>>,
    /// (book_ids, address) pairs `fetch_detail` was called with
    pub detail_requests: Mutex<Vec<(Vec<String>, String)>>,
    /// Links returned by `fetch_download_links`
    pub links: Mutex<Vec<String>>,
    /// When set, `fetch_download_links` fails with this upstream status
    pub links_status: Mutex<Option<u16>>,
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, _query: &str) -> Result<Vec<ExternalBookResult>, ApiError> {
        if self.fail_search.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ApiError::Internal("connection reset".to_string()));
        }
        Ok(self.results.lock().unwrap().clone())
    }

    async fn fetch_detail(
        &self,
        book_ids: &[String],
        address: &str,
    ) -> Result<Value, ApiError> {
        self.detail_requests
            .lock()
            .unwrap()
            .push((book_ids.to_vec(), address.to_string()));

        if let Some(status) = *self.detail_status.lock().unwrap() {
            return Err(ApiError::Upstream {
                status,
                message: "Failed to fetch data from Glitter Node".to_string(),
            });
        }
        Ok(self.detail.lock().unwrap().clone())
    }

    async fn fetch_download_links(&self, _md5: &str) -> Result<Vec<String>, ApiError> {
        if let Some(status) = *self.links_status.lock().unwrap() {
            return Err(ApiError::Upstream {
                status,
                message: "Failed to fetch download links".to_string(),
            });
        }
        Ok(self.links.lock().unwrap().clone())
    }
}

/// Handles to the in-memory collaborators behind a test server
pub struct TestContext {
    pub users: Arc<InMemoryUserStore>,
    pub books: Arc<InMemoryBookStore>,
    pub storage: Arc<MemoryObjectStorage>,
    pub search: Arc<MockSearchProvider>,
}

/// Create a test server over in-memory stores and mock collaborators
pub fn create_test_server() -> (TestServer, TestContext) {
    let users = Arc::new(InMemoryUserStore::new());
    let books = Arc::new(InMemoryBookStore::new());
    let storage = Arc::new(MemoryObjectStorage::new());
    let search = Arc::new(MockSearchProvider::default());

    let state = Arc::new(AppState::new(
        users.clone(),
        books.clone(),
        storage.clone(),
        search.clone(),
    ));

    let server =
        TestServer::new(routes::create_router(state)).expect("Failed to create test server");

    (
        server,
        TestContext {
            users,
            books,
            storage,
            search,
        },
    )
}

/// Helper to create a user over the API
pub async fn create_user(server: &TestServer, username: &str, password: &str) {
    let response = server
        .post("/api/users")
        .json(&json!({
            "username": username,
            "password": password,
            "email": format!("{username}@example.com"),
            "role": "user",
        }))
        .await;
    assert_eq!(response.status_code(), 200);
}

/// Helper to upload a book over the API; returns its id
pub async fn upload_book(server: &TestServer, title: &str) -> String {
    let form = MultipartForm::new()
        .add_text("title", title)
        .add_text("author", "Frank Herbert")
        .add_text("publisher", "Chilton")
        .add_text("year", "1965")
        .add_text("format", "pdf")
        .add_part(
            "file",
            Part::bytes(b"book bytes".to_vec()).file_name("dune.pdf"),
        );

    let response = server.post("/api/admin/upload").multipart(form).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    body["bookId"].as_str().expect("No bookId").to_string()
}

/// An external search result with provider-shaped defaults
pub fn external_result(md5: &str, title: &str) -> ExternalBookResult {
    ExternalBookResult {
        md5: md5.to_string(),
        title: title.to_string(),
        author: "Unknown".to_string(),
        publisher: "Unknown Publisher".to_string(),
        year: "N/A".to_string(),
        descr: String::new(),
        format: "Unknown".to_string(),
        size: "N/A".to_string(),
        img_url: String::new(),
        language: None,
        pages: None,
        extension: None,
    }
}
