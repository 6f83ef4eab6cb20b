//! Admin book management endpoints
//!
//! Uploads write the file to object storage before the record is created;
//! deletes remove the object before the record. A replacement file on
//! update deletes the old object, uploads the new one, then saves the
//! record with the new key.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, Query, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::error::ApiError;
use crate::search::SearchProvider;
use crate::state::AppState;
use crate::storage::ObjectStorage;
use crate::store::{BookStore, NewBook, UserStore};

/// Lifetime of presigned download URLs
const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// A multipart form split into its file part and text fields
struct UploadForm {
    file: Option<(String, Bytes)>,
    fields: HashMap<String, String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut file = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            file = Some((filename, data));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            fields.insert(name, value);
        }
    }

    Ok(UploadForm { file, fields })
}

fn required(fields: &mut HashMap<String, String>, name: &str) -> Result<String, ApiError> {
    fields
        .remove(name)
        .ok_or_else(|| ApiError::ValidationError(format!("{name} is required")))
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// POST /api/admin/upload
pub async fn upload_book<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let mut form = read_form(multipart).await?;

    let (filename, data) = form
        .file
        .take()
        .ok_or_else(|| ApiError::ValidationError("file is required".to_string()))?;

    let title = required(&mut form.fields, "title")?;
    let author = required(&mut form.fields, "author")?;
    let publisher = required(&mut form.fields, "publisher")?;
    let year = required(&mut form.fields, "year")?;
    let format = required(&mut form.fields, "format")?;
    let language = form
        .fields
        .remove("language")
        .unwrap_or_else(|| "Unknown".to_string());
    let description = form.fields.remove("description").unwrap_or_default();

    // The object must land before the record exists
    let storage_key = state.storage.put(&filename, data).await?;

    let book = state.books.create(NewBook {
        title,
        author,
        publisher,
        year,
        format,
        size: None,
        language,
        img_url: None,
        storage_key,
        description,
    })?;

    Ok(Json(UploadResponse {
        message: "Book uploaded successfully".to_string(),
        book_id: book.id,
    }))
}

#[derive(Deserialize)]
pub struct BookIdQuery {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

#[derive(Serialize)]
pub struct DownloadUrlResponse {
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
}

/// GET /api/admin/download?bookId=
pub async fn download_book<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Query(query): Query<BookIdQuery>,
) -> Result<Json<DownloadUrlResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let book = state
        .books
        .get(&query.book_id)?
        .ok_or(ApiError::BookNotFound)?;

    let download_url = state
        .storage
        .presign_download(&book.storage_key, DOWNLOAD_URL_TTL)
        .await?;

    Ok(Json(DownloadUrlResponse { download_url }))
}

#[derive(Deserialize, Default)]
pub struct UpdateBookParams {
    #[serde(rename = "bookId")]
    pub book_id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<String>,
    pub format: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
}

/// PUT /api/admin/update
///
/// Metadata is accepted from query parameters or multipart form fields
/// (the admin frontend sends a form); an optional `file` part replaces the
/// stored object.
pub async fn update_book<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Query(params): Query<UpdateBookParams>,
    multipart: Option<Multipart>,
) -> Result<Json<MessageResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let mut form = match multipart {
        Some(multipart) => read_form(multipart).await?,
        None => UploadForm {
            file: None,
            fields: HashMap::new(),
        },
    };

    // Query parameters win over form fields
    let book_id = params
        .book_id
        .or_else(|| form.fields.remove("bookId"))
        .ok_or_else(|| ApiError::ValidationError("bookId is required".to_string()))?;

    let mut book = state.books.get(&book_id)?.ok_or(ApiError::BookNotFound)?;

    if let Some(title) = params.title.or_else(|| form.fields.remove("title")) {
        book.title = title;
    }
    if let Some(author) = params.author.or_else(|| form.fields.remove("author")) {
        book.author = author;
    }
    if let Some(publisher) = params.publisher.or_else(|| form.fields.remove("publisher")) {
        book.publisher = publisher;
    }
    if let Some(year) = params.year.or_else(|| form.fields.remove("year")) {
        book.year = year;
    }
    if let Some(format) = params.format.or_else(|| form.fields.remove("format")) {
        book.format = format;
    }
    if let Some(language) = params.language.or_else(|| form.fields.remove("language")) {
        book.language = language;
    }
    if let Some(description) = params
        .description
        .or_else(|| form.fields.remove("description"))
    {
        book.description = description;
    }

    // Replace the stored file: delete the old object, upload the new one
    if let Some((filename, data)) = form.file.take() {
        state.storage.delete(&book.storage_key).await?;
        book.storage_key = state.storage.put(&filename, data).await?;
    }

    state.books.update(&book)?;

    Ok(Json(MessageResponse::new("Book updated successfully")))
}

/// DELETE /api/admin/delete?bookId=
pub async fn delete_book<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Query(query): Query<BookIdQuery>,
) -> Result<Json<MessageResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let book = state
        .books
        .get(&query.book_id)?
        .ok_or(ApiError::BookNotFound)?;

    // Object first, then the record
    state.storage.delete(&book.storage_key).await?;
    state.books.delete(&book.id)?;

    Ok(Json(MessageResponse::new("Book deleted successfully")))
}
