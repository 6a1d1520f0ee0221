//! Local photo discovery.
//!
//! Finds the photos `upload` should send: regular files directly inside one
//! directory (no recursion) with a `.jpg` or `.jpeg` extension, compared
//! case-insensitively.
//!
//! ```text
//! ~/Pictures/trip/
//! ├── 001.jpg          # uploaded
//! ├── 002.JPEG         # uploaded
//! ├── notes.txt        # skipped: not a photo
//! ├── .hidden.jpg      # uploaded: hidden files are still files
//! └── raw/             # skipped: subdirectories are not scanned
//!     └── 003.jpg
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("No photos (.jpg/.jpeg) found in {0}")]
    NoImages(PathBuf),
}

/// File extensions accepted for upload (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Photos directly inside `dir`, sorted by path.
///
/// Fails with [`ScanError::NoImages`] when the directory holds none, so an
/// upload from the wrong directory is reported instead of silently doing
/// nothing.
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| ScanError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    if images.is_empty() {
        return Err(ScanError::NoImages(dir.to_path_buf()));
    }
    images.sort();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{file_names, write_photos};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_jpg_and_jpeg_only() {
        let tmp = TempDir::new().unwrap();
        write_photos(tmp.path(), &["b.jpeg", "a.jpg", "notes.txt", "c.png"]);
        let images = find_images(tmp.path()).unwrap();
        assert_eq!(file_names(&images), vec!["a.jpg", "b.jpeg"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        write_photos(tmp.path(), &["UPPER.JPG", "Mixed.JpEg"]);
        let images = find_images(tmp.path()).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn subdirectories_are_not_scanned() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("raw")).unwrap();
        fs::write(tmp.path().join("raw/deep.jpg"), b"x").unwrap();
        fs::create_dir(tmp.path().join("folder.jpg")).unwrap();
        fs::write(tmp.path().join("top.jpg"), b"x").unwrap();

        let images = find_images(tmp.path()).unwrap();
        assert_eq!(file_names(&images), vec!["top.jpg"]);
    }

    #[test]
    fn directory_without_photos_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("readme.md"), b"x").unwrap();
        assert!(matches!(
            find_images(tmp.path()),
            Err(ScanError::NoImages(p)) if p == tmp.path()
        ));
    }

    #[test]
    fn missing_directory_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            find_images(&missing),
            Err(ScanError::ReadDir { .. })
        ));
    }
}
