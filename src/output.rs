//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## List
//!
//! One name per line, nothing else, so the output can be piped:
//!
//! ```text
//! family
//! vacation
//! ```
//!
//! ## Upload
//!
//! ```text
//! Uploaded 2 of 3 photos to vacation
//!     vacation/a.jpg
//!     vacation/c.jpg
//! ```
//!
//! Failures go to stderr, one line each:
//!
//! ```text
//! Failed to upload b.jpg: Storage error: PutObject failed: ...
//! ```
//!
//! ## Mksite
//!
//! ```text
//! 001 family (1 photos) → album1.html
//! 002 vacation (2 photos) → album2.html
//! https://photos.website.yandexcloud.net/
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout/stderr. Format functions are
//! pure and do no I/O.

use crate::archive::UploadReport;
use crate::generate::SiteReport;
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional photo count.
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({} photos)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// List
// ============================================================================

pub fn format_names(names: &[String]) -> Vec<String> {
    names.to_vec()
}

pub fn print_names(names: &[String]) {
    for line in format_names(names) {
        println!("{}", line);
    }
}

// ============================================================================
// Upload
// ============================================================================

/// Summary and uploaded keys.
pub fn format_upload_report(report: &UploadReport, album: &str) -> Vec<String> {
    let total = report.uploaded.len() + report.failed.len();
    let mut lines = vec![format!(
        "Uploaded {} of {} photos to {}",
        report.uploaded.len(),
        total,
        album
    )];
    for key in &report.uploaded {
        lines.push(format!("{}{}", indent(1), key));
    }
    lines
}

/// One line per failed photo.
pub fn format_upload_failures(report: &UploadReport) -> Vec<String> {
    report
        .failed
        .iter()
        .map(|f| format!("Failed to upload {}: {}", file_name(&f.path), f.error))
        .collect()
}

/// Print the summary to stdout and each failure to stderr.
pub fn print_upload_report(report: &UploadReport, album: &str) {
    for line in format_upload_report(report, album) {
        println!("{}", line);
    }
    for line in format_upload_failures(report) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Download / delete
// ============================================================================

pub fn format_download_output(album: &str, written: &[PathBuf], dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Downloaded {} photos from {} to {}",
        written.len(),
        album,
        dir.display()
    )];
    for path in written {
        lines.push(format!("{}{}", indent(1), file_name(path)));
    }
    lines
}

pub fn print_download_output(album: &str, written: &[PathBuf], dir: &Path) {
    for line in format_download_output(album, written, dir) {
        println!("{}", line);
    }
}

pub fn format_delete_output(deleted: &[String]) -> Vec<String> {
    let mut lines = vec![format!("Deleted {} objects", deleted.len())];
    for key in deleted {
        lines.push(format!("{}{}", indent(1), key));
    }
    lines
}

pub fn print_delete_output(deleted: &[String]) {
    for line in format_delete_output(deleted) {
        println!("{}", line);
    }
}

// ============================================================================
// Mksite
// ============================================================================

/// Album pages in number order, then the public site URL on the last line.
pub fn format_site_report(report: &SiteReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            format!(
                "{} \u{2192} {}",
                entity_header(i + 1, &page.album, Some(page.photo_count)),
                page.file
            )
        })
        .collect();
    lines.push(report.url.clone());
    lines
}

pub fn print_site_report(report: &SiteReport) {
    for line in format_site_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ArchiveError, UploadFailure};
    use crate::generate::PublishedPage;

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn entity_header_with_count() {
        assert_eq!(
            entity_header(1, "vacation", Some(5)),
            "001 vacation (5 photos)"
        );
    }

    #[test]
    fn entity_header_without_count() {
        assert_eq!(entity_header(2, "family", None), "002 family");
    }

    #[test]
    fn names_are_printed_verbatim() {
        let names = vec!["family".to_string(), "vacation".to_string()];
        assert_eq!(format_names(&names), names);
    }

    #[test]
    fn upload_report_summary_and_failures() {
        let report = UploadReport {
            uploaded: vec!["trip/a.jpg".to_string()],
            failed: vec![UploadFailure {
                path: PathBuf::from("/photos/b.jpg"),
                key: "trip/b.jpg".to_string(),
                error: ArchiveError::AlbumNotFound("x".to_string()),
            }],
        };
        assert_eq!(
            format_upload_report(&report, "trip"),
            vec!["Uploaded 1 of 2 photos to trip", "    trip/a.jpg"]
        );
        assert_eq!(
            format_upload_failures(&report),
            vec!["Failed to upload b.jpg: Album not found: x"]
        );
    }

    #[test]
    fn download_output_lists_file_names() {
        let written = vec![PathBuf::from("/out/a.jpg"), PathBuf::from("/out/b.jpg")];
        let lines = format_download_output("trip", &written, Path::new("/out"));
        assert_eq!(lines[0], "Downloaded 2 photos from trip to /out");
        assert_eq!(lines[1], "    a.jpg");
        assert_eq!(lines[2], "    b.jpg");
    }

    #[test]
    fn delete_output_lists_keys() {
        let lines = format_delete_output(&["trip/a.jpg".to_string()]);
        assert_eq!(lines, vec!["Deleted 1 objects", "    trip/a.jpg"]);
    }

    #[test]
    fn site_report_ends_with_url() {
        let report = SiteReport {
            url: "https://photos.website.yandexcloud.net/".to_string(),
            pages: vec![PublishedPage {
                file: "album1.html".to_string(),
                album: "family".to_string(),
                photo_count: 3,
            }],
        };
        assert_eq!(
            format_site_report(&report),
            vec![
                "001 family (3 photos) \u{2192} album1.html",
                "https://photos.website.yandexcloud.net/",
            ]
        );
    }

    #[test]
    fn site_report_without_albums_is_just_url() {
        let report = SiteReport {
            url: "https://b.website.example.net/".to_string(),
            pages: vec![],
        };
        assert_eq!(
            format_site_report(&report),
            vec!["https://b.website.example.net/"]
        );
    }
}
