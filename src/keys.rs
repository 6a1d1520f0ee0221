//! Object key conventions shared by every command.
//!
//! A photo lives at `<album>/<photo>` in the bucket. The album is the text
//! before the **first** `/`; the photo is the literal remainder, which may
//! itself contain `/`:
//!
//! - `vacation/a.jpg` → album `vacation`, photo `a.jpg`
//! - `vacation/raw/a.jpg` → album `vacation`, photo `raw/a.jpg`
//! - `index.html` → not a photo (no separator)
//!
//! Keys are always `/`-delimited, regardless of the host's path separator.

use std::path::Path;

/// Separator between album and photo in an object key.
pub const SEPARATOR: char = '/';

/// Build the object key for a local file uploaded into `album`.
///
/// Only the file's base name is used; the directory it came from is not
/// part of the key.
pub fn local_to_key(local_file: &Path, album: &str) -> String {
    let name = local_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    photo_key(album, &name)
}

/// Compose `<album>/<photo>`.
pub fn photo_key(album: &str, photo: &str) -> String {
    format!("{album}{SEPARATOR}{photo}")
}

/// Listing prefix selecting every photo of `album`.
///
/// The trailing separator keeps `trip` from matching `trip2/...`.
pub fn album_prefix(album: &str) -> String {
    format!("{album}{SEPARATOR}")
}

/// Split a key into `(album, photo)`.
///
/// Returns `None` for keys without a separator; those are top-level objects
/// such as the generated site pages and never belong to an album.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(SEPARATOR)
}

/// Final segment of a key, used as the local file name on download.
pub fn basename(key: &str) -> &str {
    key.rsplit(SEPARATOR).next().unwrap_or(key)
}
