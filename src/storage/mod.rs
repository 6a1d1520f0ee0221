//! Object storage access.
//!
//! | Operation | S3 API call |
//! |---|---|
//! | **List objects** | `ListObjectsV2` (all pages) |
//! | **Put / get / delete object** | `PutObject` / `GetObject` / `DeleteObject` |
//! | **Bucket bootstrap** | `ListBuckets`, `CreateBucket` |
//! | **Website hosting** | `PutBucketAcl` (public-read), `PutBucketWebsite` |
//!
//! The module is split into:
//! - **Backend**: [`ObjectStore`] trait every command is written against
//! - **S3 backend**: [`S3Store`], the production implementation

pub mod backend;
pub mod s3_backend;

pub use backend::{ObjectStore, StoreError};
pub use s3_backend::S3Store;
