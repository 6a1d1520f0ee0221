//! # Cloudphoto
//!
//! A personal photo archive kept in an S3-compatible bucket, plus a generated
//! static website that mirrors it. The bucket is the data source: key prefixes
//! are albums, objects under them are photos.
//!
//! # Data Model
//!
//! ```text
//! bucket/
//! ├── vacation/a.jpg       # album "vacation", photo "a.jpg"
//! ├── vacation/b.jpg
//! ├── family/c.jpg         # album "family"
//! ├── index.html           # generated site (top-level keys are never albums)
//! ├── album1.html
//! ├── album2.html
//! └── error.html
//! ```
//!
//! Albums are never declared. An album exists exactly as long as at least one
//! key carries its prefix, and every command that needs the album list
//! rebuilds it from a fresh listing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`keys`] | Mapping between local files, object keys, and `(album, photo)` pairs |
//! | [`hierarchy`] | Album → photos grouping rebuilt from a flat key listing |
//! | [`archive`] | `list`, `upload`, `download`, `delete`, and bucket bootstrap |
//! | [`generate`] | Static site synthesis and publication (`mksite`) |
//! | [`storage`] | [`ObjectStore`](storage::ObjectStore) trait and the S3 backend |
//! | [`scan`] | Local photo discovery for uploads |
//! | [`config`] | Persisted connection settings (`cloudphotorc`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Store Instead of a Global Client
//!
//! Every command takes a store bound to one bucket as an argument. Tests run
//! the same commands against an in-memory store; the binary passes an
//! [`S3Store`](storage::S3Store).
//!
//! ## Synchronous Core
//!
//! Commands issue one request at a time, in order. The S3 SDK is async, so the
//! S3 backend owns a small current-thread runtime and blocks on each call; no
//! other module knows about async.
//!
//! ## Deterministic Site Output
//!
//! Album pages are numbered in sorted album-name order. The same bucket
//! contents always yield the same `albumN.html` assignment.
//!
//! ## Different Failure Policies per Command
//!
//! `upload` is best-effort: a failed photo is reported and the rest are still
//! sent. `download` and `delete` stop at the first failure. Empty results
//! (`NoAlbumsFound`, `AlbumNotFound`) are their own error kinds, separate from
//! I/O failures.

pub mod archive;
pub mod config;
pub mod generate;
pub mod hierarchy;
pub mod keys;
pub mod output;
pub mod scan;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_helpers;
