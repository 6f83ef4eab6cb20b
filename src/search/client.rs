//! External book-search client
//!
//! Talks to two third-party services: the book-search API (search and
//! per-book download links) and the book-detail service. Responses are
//! parsed defensively; every field access tolerates absence.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::types::ExternalBookResult;
use crate::config::SearchConfig;
use crate::error::ApiError;

/// Fixed query parameters sent with every search request
const SEARCH_CATEGORIES: &str = "fiction,nonfiction,comic,magazine,musicalscore,other,unknown";
const SEARCH_EXTENSIONS: &str = "pdf,epub,mobi,azw3";
const SEARCH_SOURCES: &str = "libgenLi,libgenRs";
const SEARCH_SKIP: &str = "0";
const SEARCH_LIMIT: &str = "40";
const SEARCH_SORT: &str = "mostRelevant";

/// Trait for the external search provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the provider's catalog for a free-text query
    async fn search(&self, query: &str) -> Result<Vec<ExternalBookResult>, ApiError>;

    /// Fetch detail records for known identifiers; the body is passed
    /// through to the caller verbatim
    async fn fetch_detail(&self, book_ids: &[String], address: &str)
        -> Result<Value, ApiError>;

    /// Fetch the download URLs for one content-hash identifier
    async fn fetch_download_links(&self, md5: &str) -> Result<Vec<String>, ApiError>;
}

/// HTTP implementation of [`SearchProvider`]
pub struct HttpSearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl HttpSearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SearchProvider for HttpSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<ExternalBookResult>, ApiError> {
        let url = format!("https://{}/search", self.config.api_host);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("cat", SEARCH_CATEGORIES),
                ("skip", SEARCH_SKIP),
                ("limit", SEARCH_LIMIT),
                ("ext", SEARCH_EXTENSIONS),
                ("sort", SEARCH_SORT),
                ("source", SEARCH_SOURCES),
            ])
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.api_host)
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        // A non-200 search is "no external results", not a failure
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "External search returned non-success");
            return Ok(Vec::new());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(parse_search_results(&body))
    }

    async fn fetch_detail(
        &self,
        book_ids: &[String],
        address: &str,
    ) -> Result<Value, ApiError> {
        let response = self
            .http
            .post(&self.config.detail_url)
            .json(&json!({
                "book_ids": book_ids,
                "address": address,
            }))
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream {
                status: response.status().as_u16(),
                message: "Failed to fetch data from Glitter Node".to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))
    }

    async fn fetch_download_links(&self, md5: &str) -> Result<Vec<String>, ApiError> {
        let url = format!("https://{}/download", self.config.api_host);

        let response = self
            .http
            .get(&url)
            .query(&[("md5", md5)])
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.api_host)
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream {
                status: response.status().as_u16(),
                message: "Failed to fetch download links".to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        match body.as_array() {
            Some(links) => Ok(links.iter().map(|l| text_of(l)).collect()),
            None => Err(ApiError::Internal("Unexpected response format".to_string())),
        }
    }
}

/// Parse the `books` array of a search response. Anything that is not an
/// array yields zero results.
pub fn parse_search_results(body: &Value) -> Vec<ExternalBookResult> {
    let Some(books) = body.get("books").and_then(Value::as_array) else {
        return Vec::new();
    };

    books.iter().map(parse_book).collect()
}

fn parse_book(node: &Value) -> ExternalBookResult {
    ExternalBookResult {
        md5: text_or(node, "md5", "").trim().to_string(),
        title: text_or(node, "title", "Untitled"),
        author: text_or(node, "author", "Unknown"),
        publisher: text_or(node, "publisher", "Unknown Publisher"),
        year: text_or(node, "year", "N/A"),
        descr: text_or(node, "descr", ""),
        format: text_or(node, "format", "Unknown"),
        size: text_or(node, "size", "N/A"),
        img_url: text_or(node, "imgUrl", ""),
        language: node
            .get("language")
            .map(|_| text_or(node, "language", "Unknown")),
        pages: node.get("pages").map(|_| text_or(node, "pages", "N/A")),
        extension: node
            .get("extension")
            .map(|_| text_or(node, "extension", "")),
    }
}

/// Read a field as text: strings verbatim, numbers as their decimal form,
/// anything else (missing, null, nested) as the default.
fn text_or(node: &Value, key: &str, default: &str) -> String {
    match node.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
