//! S3-compatible storage backend.
//!
//! Talks to any S3 API endpoint (Yandex Object Storage by default) through
//! `aws-sdk-s3`. The SDK is async; [`S3Store`] owns a current-thread tokio
//! runtime and blocks on each request, so callers see a plain synchronous
//! [`ObjectStore`].
//!
//! ## Call mapping
//!
//! | Trait method | SDK call |
//! |---|---|
//! | `list_objects` | `list_objects_v2`, following continuation tokens |
//! | `put_object` | `put_object` with an explicit content type |
//! | `get_object` | `get_object`, body collected in memory |
//! | `delete_object` | `delete_object` |
//! | `list_buckets` / `create_bucket` | `list_buckets` / `create_bucket` |
//! | `put_bucket_public_read` | `put_bucket_acl` with canned `public-read` |
//! | `put_bucket_website` | `put_bucket_website` |

use super::backend::{ObjectStore, StoreError};
use crate::config::ArchiveConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketCannedAcl, ErrorDocument, IndexDocument, WebsiteConfiguration};
use tokio::runtime::Runtime;
use tracing::debug;

/// Provider name attached to the static credentials.
const CREDENTIALS_PROVIDER: &str = "cloudphoto-config";

/// Object store backed by an S3-compatible service.
pub struct S3Store {
    client: Client,
    bucket: String,
    runtime: Runtime,
}

fn request_error<E>(operation: &'static str, err: E) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::Request {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
}

impl S3Store {
    /// Build a client from the persisted configuration.
    ///
    /// No request is made here; bad credentials surface on the first call.
    pub fn connect(config: &ArchiveConfig) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            CREDENTIALS_PROVIDER,
        );
        let sdk_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint_url)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket.clone(),
            runtime,
        })
    }

    async fn list_all(&self, prefix: Option<&str>) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_prefix(prefix.map(str::to_string))
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| request_error("ListObjectsV2", e))?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );

            match response.next_continuation_token() {
                Some(token) if response.is_truncated() == Some(true) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        debug!(bucket = %self.bucket, ?prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| request_error("PutObject", e))?;
        debug!(bucket = %self.bucket, key, size, content_type, "put object");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StoreError::NotFound(key.to_string())
                } else {
                    request_error("GetObject", e)
                }
            })?;
        let data = output
            .body
            .collect()
            .await
            .map_err(|e| request_error("GetObject", e))?;
        let bytes = data.into_bytes().to_vec();
        debug!(bucket = %self.bucket, key, size = bytes.len(), "got object");
        Ok(bytes)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| request_error("DeleteObject", e))?;
        debug!(bucket = %self.bucket, key, "deleted object");
        Ok(())
    }

    async fn bucket_names(&self) -> Result<Vec<String>, StoreError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| request_error("ListBuckets", e))?;
        Ok(output
            .buckets()
            .iter()
            .filter_map(|b| b.name())
            .map(str::to_string)
            .collect())
    }

    async fn create(&self) -> Result<(), StoreError> {
        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| request_error("CreateBucket", e))?;
        debug!(bucket = %self.bucket, "created bucket");
        Ok(())
    }

    async fn public_read(&self) -> Result<(), StoreError> {
        self.client
            .put_bucket_acl()
            .bucket(&self.bucket)
            .acl(BucketCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| request_error("PutBucketAcl", e))?;
        debug!(bucket = %self.bucket, "bucket set to public-read");
        Ok(())
    }

    async fn website(&self, index_document: &str, error_document: &str) -> Result<(), StoreError> {
        let index = IndexDocument::builder()
            .suffix(index_document)
            .build()
            .map_err(|e| request_error("PutBucketWebsite", e))?;
        let error = ErrorDocument::builder()
            .key(error_document)
            .build()
            .map_err(|e| request_error("PutBucketWebsite", e))?;
        let configuration = WebsiteConfiguration::builder()
            .index_document(index)
            .error_document(error)
            .build();

        self.client
            .put_bucket_website()
            .bucket(&self.bucket)
            .website_configuration(configuration)
            .send()
            .await
            .map_err(|e| request_error("PutBucketWebsite", e))?;
        debug!(bucket = %self.bucket, index_document, error_document, "website hosting configured");
        Ok(())
    }
}

impl ObjectStore for S3Store {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn list_objects(&self, prefix: Option<&str>) -> Result<Vec<String>, StoreError> {
        self.runtime.block_on(self.list_all(prefix))
    }

    fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.runtime.block_on(self.put(key, body, content_type))
    }

    fn get_object(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.runtime.block_on(self.get(key))
    }

    fn delete_object(&self, key: &str) -> Result<(), StoreError> {
        self.runtime.block_on(self.delete(key))
    }

    fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        self.runtime.block_on(self.bucket_names())
    }

    fn create_bucket(&self) -> Result<(), StoreError> {
        self.runtime.block_on(self.create())
    }

    fn put_bucket_public_read(&self) -> Result<(), StoreError> {
        self.runtime.block_on(self.public_read())
    }

    fn put_bucket_website(
        &self,
        index_document: &str,
        error_document: &str,
    ) -> Result<(), StoreError> {
        self.runtime
            .block_on(self.website(index_document, error_document))
    }
}
