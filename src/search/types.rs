//! Search result shapes

use serde::{Deserialize, Serialize};

use crate::store::AdminBook;

/// A book returned by the external search provider. Ephemeral, never
/// persisted; identified by the provider's content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalBookResult {
    pub md5: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub descr: String,
    pub format: String,
    pub size: String,
    pub img_url: String,
    pub language: Option<String>,
    pub pages: Option<String>,
    pub extension: Option<String>,
}

/// One entry of the aggregated search output.
///
/// Field names in the serialized form are fixed by the consuming frontend;
/// `is_admin_book` marks provenance (local record vs external provider).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub format: String,
    pub size: String,
    #[serde(rename = "imgUrl")]
    pub img_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub descr: String,
    #[serde(rename = "isAdminBook")]
    pub is_admin_book: bool,
}

impl SearchResultItem {
    /// Convert a locally administered record, filling display defaults for
    /// the fields an admin upload may omit.
    pub fn from_local(book: &AdminBook) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            year: book.year.clone(),
            format: book.format.clone(),
            size: book.size.clone().unwrap_or_else(|| "N/A".to_string()),
            img_url: book.img_url.clone().unwrap_or_default(),
            language: Some(book.language.clone()),
            pages: None,
            extension: None,
            descr: book.description.clone(),
            is_admin_book: true,
        }
    }

    /// Convert an external provider result
    pub fn from_external(book: ExternalBookResult) -> Self {
        Self {
            id: book.md5,
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            year: book.year,
            format: book.format,
            size: book.size,
            img_url: book.img_url,
            language: book.language,
            pages: book.pages,
            extension: book.extension,
            descr: book.descr,
            is_admin_book: false,
        }
    }
}
