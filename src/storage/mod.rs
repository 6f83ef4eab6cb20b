//! Object storage for uploaded book files
//!
//! One trait over two backends: the R2 bucket (S3 API) used in production
//! and an in-memory store for tests.

pub mod memory;
pub mod r2;

pub use memory::{MemoryObjectStorage, StorageOp};
pub use r2::R2ObjectStorage;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ApiError;

/// Trait for binary object storage keyed by generated identifiers.
///
/// Keys are `"{random token}-{original filename}"`, minted by `put`. Deletes
/// do not distinguish a missing object from a removed one.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store a payload under a fresh key built from the original filename;
    /// returns the key
    async fn put(&self, filename: &str, data: Bytes) -> Result<String, ApiError>;

    /// Remove the object under the key
    async fn delete(&self, key: &str) -> Result<(), ApiError>;

    /// Mint a time-limited URL granting unauthenticated download of the object
    async fn presign_download(&self, key: &str, expires_in: Duration)
        -> Result<String, ApiError>;
}
