//! R2 object storage over the S3 API

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use uuid::Uuid;

use super::ObjectStorage;
use crate::config::StorageConfig;
use crate::error::ApiError;

/// Object storage backed by an R2 bucket.
///
/// R2 speaks the S3 API; the region is required by the SDK but ignored by
/// the endpoint.
pub struct R2ObjectStorage {
    client: Client,
    bucket: String,
}

impl R2ObjectStorage {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        );
        let endpoint = format!("https://{}.r2.cloudflarestorage.com", config.account_id);

        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for R2ObjectStorage {
    async fn put(&self, filename: &str, data: Bytes) -> Result<String, ApiError> {
        let key = format!("{}-{}", Uuid::new_v4(), filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(key)
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn presign_download(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, ApiError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}
