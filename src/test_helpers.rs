//! Shared test utilities for the cloudphoto test suite.
//!
//! Local photo fixtures for scan/upload/download tests. The in-memory bucket
//! lives next to the trait it implements, in
//! [`storage::backend::tests`](crate::storage::backend::tests).

use std::fs;
use std::path::{Path, PathBuf};

/// Write one small file per name into `dir`, with body `bytes of <name>`.
///
/// Returns the created paths in argument order.
pub fn write_photos(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, format!("bytes of {name}")).unwrap();
            path
        })
        .collect()
}

/// File names of `paths`, in order. Panics on paths without a file name.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .unwrap_or_else(|| panic!("path without file name: {}", p.display()))
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}
