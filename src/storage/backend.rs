//! Storage backend trait and shared error type.
//!
//! The [`ObjectStore`] trait is the only way the rest of the crate touches the
//! bucket. A store is bound to one bucket when it is constructed, so commands
//! receive the bucket context explicitly instead of reaching for a global
//! client.
//!
//! The production implementation is
//! [`S3Store`](super::s3_backend::S3Store).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Storage runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Content type for uploaded photos.
pub const JPEG: &str = "image/jpeg";
/// Content type for generated site pages.
pub const HTML: &str = "text/html; charset=utf-8";

/// Operations the archive needs from object storage.
///
/// Every call is blocking and performs exactly one logical request. Listing
/// returns keys in the order the backend reports them; callers that need a
/// stable order sort or group them themselves.
pub trait ObjectStore {
    /// Name of the bucket this store is bound to.
    fn bucket(&self) -> &str;

    /// Keys of all objects, optionally restricted to those starting with `prefix`.
    fn list_objects(&self, prefix: Option<&str>) -> Result<Vec<String>, StoreError>;

    fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str)
    -> Result<(), StoreError>;

    fn get_object(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Delete `key`. Deleting a key that does not exist succeeds.
    fn delete_object(&self, key: &str) -> Result<(), StoreError>;

    /// Names of all buckets visible to the credentials.
    fn list_buckets(&self) -> Result<Vec<String>, StoreError>;

    /// Create the bound bucket.
    fn create_bucket(&self) -> Result<(), StoreError>;

    /// Grant anonymous read access to the bound bucket.
    fn put_bucket_public_read(&self) -> Result<(), StoreError>;

    /// Enable static website hosting with the given index and error documents.
    fn put_bucket_website(&self, index_document: &str, error_document: &str)
    -> Result<(), StoreError>;
}
