//! Data models for catalog storage

use serde::{Deserialize, Serialize};

/// A user account.
///
/// Passwords are stored and compared verbatim; the user-list endpoint
/// serializes the full record, password included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub email: String,
    /// Free-form role string (e.g. "admin", "user")
    pub role: String,
}

/// Fields for creating a user; the store generates the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// A locally administered book record.
///
/// `storage_key` names the uploaded file in the object-storage bucket and is
/// expected to reference a live object for the lifetime of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// Year as free text, not validated as numeric
    pub year: String,
    pub format: String,
    pub size: Option<String>,
    pub language: String,
    pub img_url: Option<String>,
    pub storage_key: String,
    pub description: String,
}

/// Fields for creating a book record; the store generates the id.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub format: String,
    pub size: Option<String>,
    pub language: String,
    pub img_url: Option<String>,
    pub storage_key: String,
    pub description: String,
}
