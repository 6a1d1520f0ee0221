//! Archive commands: list, upload, download, delete, and bucket bootstrap.
//!
//! Every command is a single shot: at most one listing followed by one request
//! per affected object, executed in order. Nothing is remembered between
//! commands; the bucket is the only source of truth.
//!
//! ## Failure policy
//!
//! | Command | Empty scope | Per-item storage failure |
//! |---|---|---|
//! | `list` (all albums) | [`ArchiveError::NoAlbumsFound`] | - |
//! | `list` (one album) | [`ArchiveError::AlbumNotFound`] | - |
//! | `upload` | - | reported in [`UploadReport`], batch continues |
//! | `download` | [`ArchiveError::AlbumNotFound`] | aborts (local write failures too) |
//! | `delete` (album) | [`ArchiveError::AlbumNotFound`] | aborts |
//! | `delete` (photo) | not checked, deleting a missing key is a no-op | aborts |
//! | `init` | - | bucket listing failure removes the saved config |
//!
//! No command retries.

use crate::config::{self, ArchiveConfig, ConfigError};
use crate::hierarchy::Hierarchy;
use crate::keys;
use crate::scan::{self, ScanError};
use crate::storage::backend::{JPEG, ObjectStore, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("No albums found")]
    NoAlbumsFound,
    #[error("Album not found: {0}")]
    AlbumNotFound(String),
    #[error("Local IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

// ============================================================================
// List
// ============================================================================

/// Sorted names of every album in the bucket.
///
/// Only keys of the form `album/photo` count. A bucket holding nothing but
/// top-level keys (such as the generated `index.html` and `error.html`) has
/// no albums and fails with [`ArchiveError::NoAlbumsFound`], as does an
/// empty bucket. Likewise [`list_photos`] reports a lone `album/` folder
/// marker as [`ArchiveError::AlbumNotFound`] rather than an empty list.
pub fn list_albums(store: &impl ObjectStore) -> Result<Vec<String>, ArchiveError> {
    let hierarchy = Hierarchy::build(store.list_objects(None)?);
    if hierarchy.is_empty() {
        return Err(ArchiveError::NoAlbumsFound);
    }
    Ok(hierarchy
        .album_names()
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Photo names of `album`, in listing order.
pub fn list_photos(store: &impl ObjectStore, album: &str) -> Result<Vec<String>, ArchiveError> {
    let hierarchy = album_hierarchy(store, album)?;
    Ok(hierarchy.photos_of(album).to_vec())
}

/// Album names when `album` is `None`, otherwise the photos of that album.
pub fn list(store: &impl ObjectStore, album: Option<&str>) -> Result<Vec<String>, ArchiveError> {
    match album {
        Some(album) if !album.is_empty() => list_photos(store, album),
        _ => list_albums(store),
    }
}

/// Prefixed listing of one album, failing when the album has no photos.
fn album_hierarchy(store: &impl ObjectStore, album: &str) -> Result<Hierarchy, ArchiveError> {
    let prefix = keys::album_prefix(album);
    let hierarchy = Hierarchy::build(store.list_objects(Some(&prefix))?);
    if !hierarchy.contains_album(album) {
        return Err(ArchiveError::AlbumNotFound(album.to_string()));
    }
    Ok(hierarchy)
}

// ============================================================================
// Upload
// ============================================================================

/// A photo that could not be uploaded, with the reason.
#[derive(Debug)]
pub struct UploadFailure {
    pub path: PathBuf,
    pub key: String,
    pub error: ArchiveError,
}

/// Outcome of a best-effort upload batch.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Keys written, in upload order.
    pub uploaded: Vec<String>,
    pub failed: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Upload `files` into `album` as `image/jpeg`.
///
/// Each file is read and sent independently. A file that cannot be read or
/// sent is recorded in [`UploadReport::failed`] and logged; the remaining
/// files are still uploaded.
pub fn upload(store: &impl ObjectStore, files: &[PathBuf], album: &str) -> UploadReport {
    let mut report = UploadReport::default();

    for path in files {
        let key = keys::local_to_key(path, album);
        let result = fs::read(path)
            .map_err(|source| ArchiveError::Io {
                path: path.clone(),
                source,
            })
            .and_then(|body| {
                store
                    .put_object(&key, body, JPEG)
                    .map_err(ArchiveError::from)
            });

        match result {
            Ok(()) => report.uploaded.push(key),
            Err(error) => {
                warn!(path = %path.display(), %key, %error, "photo upload failed");
                report.failed.push(UploadFailure {
                    path: path.clone(),
                    key,
                    error,
                });
            }
        }
    }

    info!(
        album,
        uploaded = report.uploaded.len(),
        failed = report.failed.len(),
        "upload finished"
    );
    report
}

/// Scan `dir` for photos and upload them into `album`.
///
/// A directory without photos fails before any request is made.
pub fn upload_dir(
    store: &impl ObjectStore,
    dir: &Path,
    album: &str,
) -> Result<UploadReport, ArchiveError> {
    let files = scan::find_images(dir)?;
    Ok(upload(store, &files, album))
}

// ============================================================================
// Download
// ============================================================================

/// Download every photo of `album` into `dir`.
///
/// Files are named after the last segment of their key; the album directory
/// is not recreated locally. The first failed request or local write aborts
/// the command. Returns the written paths.
pub fn download(
    store: &impl ObjectStore,
    album: &str,
    dir: &Path,
) -> Result<Vec<PathBuf>, ArchiveError> {
    let prefix = keys::album_prefix(album);
    let object_keys = store.list_objects(Some(&prefix))?;
    if !Hierarchy::build(&object_keys).contains_album(album) {
        return Err(ArchiveError::AlbumNotFound(album.to_string()));
    }

    let mut written = Vec::new();
    for key in object_keys.iter().filter(|k| k.len() > prefix.len()) {
        let body = store.get_object(key)?;
        let path = dir.join(keys::basename(key));
        fs::write(&path, body).map_err(|source| ArchiveError::Io {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    info!(album, count = written.len(), dir = %dir.display(), "download finished");
    Ok(written)
}

// ============================================================================
// Delete
// ============================================================================

/// Delete one photo, or the whole album when `photo` is `None`.
///
/// A single photo is deleted by key without checking that it exists. Deleting
/// an album lists it first and fails with [`ArchiveError::AlbumNotFound`] if
/// it is empty. Returns the deleted keys.
pub fn delete(
    store: &impl ObjectStore,
    album: &str,
    photo: Option<&str>,
) -> Result<Vec<String>, ArchiveError> {
    if let Some(photo) = photo.filter(|p| !p.is_empty()) {
        let key = keys::photo_key(album, photo);
        store.delete_object(&key)?;
        info!(%key, "photo deleted");
        return Ok(vec![key]);
    }

    let prefix = keys::album_prefix(album);
    let object_keys = store.list_objects(Some(&prefix))?;
    if object_keys.is_empty() {
        return Err(ArchiveError::AlbumNotFound(album.to_string()));
    }
    for key in &object_keys {
        store.delete_object(key)?;
    }

    info!(album, count = object_keys.len(), "album deleted");
    Ok(object_keys)
}

// ============================================================================
// Bucket bootstrap
// ============================================================================

/// Whether [`ensure_bucket`] found the bucket or had to create it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Existing,
    Created,
}

#[derive(Error, Debug)]
pub enum BucketError {
    #[error("Invalid credentials, cannot list buckets: {0}")]
    Credentials(#[source] StoreError),
    #[error("Cannot create bucket: {0}")]
    Create(#[source] StoreError),
}

/// Make sure the store's bucket exists, creating it if it is not listed.
///
/// A failing bucket listing almost always means wrong access keys and is
/// reported as [`BucketError::Credentials`].
pub fn ensure_bucket(store: &impl ObjectStore) -> Result<BucketStatus, BucketError> {
    let buckets = store.list_buckets().map_err(BucketError::Credentials)?;
    if buckets.iter().any(|b| b == store.bucket()) {
        return Ok(BucketStatus::Existing);
    }
    store.create_bucket().map_err(BucketError::Create)?;
    info!(bucket = store.bucket(), "bucket created");
    Ok(BucketStatus::Created)
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Bucket(#[from] BucketError),
    #[error("Cannot remove rejected config {path}: {source}")]
    Rollback {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Save `config` to `config_path`, then make sure its bucket exists.
///
/// When the bucket listing fails the credentials are rejected and the file
/// just written is removed again. A failure to create the bucket keeps the
/// config, since the credentials themselves were accepted.
pub fn init_archive(
    store: &impl ObjectStore,
    config_path: &Path,
    settings: &ArchiveConfig,
) -> Result<BucketStatus, InitError> {
    config::save_config(config_path, settings)?;
    match ensure_bucket(store) {
        Ok(status) => {
            info!(path = %config_path.display(), "config saved");
            Ok(status)
        }
        Err(err @ BucketError::Credentials(_)) => {
            fs::remove_file(config_path).map_err(|source| InitError::Rollback {
                path: config_path.to_path_buf(),
                source,
            })?;
            warn!(path = %config_path.display(), "credentials rejected, config removed");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
