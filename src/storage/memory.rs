//! In-memory object storage
//!
//! Keeps objects in a map and records every mutating call so tests can
//! assert the exact storage traffic an operation produced.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use super::ObjectStorage;
use crate::error::ApiError;

/// A recorded storage mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Put { key: String },
    Delete { key: String },
}

/// In-memory object storage with an operation history
pub struct MemoryObjectStorage {
    objects: RwLock<HashMap<String, Bytes>>,
    ops: RwLock<Vec<StorageOp>>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            ops: RwLock::new(Vec::new()),
        }
    }

    /// Whether an object exists under the key
    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().unwrap().contains_key(key)
    }

    /// Number of stored objects
    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    /// All mutating operations, in call order
    pub fn operations(&self) -> Vec<StorageOp> {
        self.ops.read().unwrap().clone()
    }
}

impl Default for MemoryObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(&self, filename: &str, data: Bytes) -> Result<String, ApiError> {
        let key = format!("{}-{}", Uuid::new_v4(), filename);
        self.objects.write().unwrap().insert(key.clone(), data);
        self.ops
            .write()
            .unwrap()
            .push(StorageOp::Put { key: key.clone() });
        Ok(key)
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        // Removing a missing key is indistinguishable from a successful delete
        self.objects.write().unwrap().remove(key);
        self.ops.write().unwrap().push(StorageOp::Delete {
            key: key.to_string(),
        });
        Ok(())
    }

    async fn presign_download(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, ApiError> {
        Ok(format!(
            "https://objects.local/{}?expires={}",
            key,
            expires_in.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_keys_carry_the_filename() {
        let storage = MemoryObjectStorage::new();

        let key = storage
            .put("dune.pdf", Bytes::from_static(b"bytes"))
            .await
            .unwrap();

        assert!(key.ends_with("-dune.pdf"));
        assert!(storage.contains(&key));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let storage = MemoryObjectStorage::new();

        let key = storage
            .put("dune.pdf", Bytes::from_static(b"bytes"))
            .await
            .unwrap();
        storage.delete(&key).await.unwrap();
        storage.delete(&key).await.unwrap();

        assert!(!storage.contains(&key));
        assert_eq!(storage.operations().len(), 3);
    }

    #[tokio::test]
    async fn test_presigned_url_path_encodes_the_key() {
        let storage = MemoryObjectStorage::new();

        let key = storage
            .put("dune.pdf", Bytes::from_static(b"bytes"))
            .await
            .unwrap();
        let url = storage
            .presign_download(&key, Duration::from_secs(3600))
            .await
            .unwrap();

        assert!(url.contains(&key));
        assert!(url.contains("expires=3600"));
    }
}
