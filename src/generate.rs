//! Static website synthesis.
//!
//! Rebuilds the gallery site from the current bucket contents and publishes it
//! into the same bucket, then turns on website hosting.
//!
//! ## Generated Pages
//!
//! - **Index page** (`index.html`): list of albums, each linking to its page
//! - **Album pages** (`album1.html`, `album2.html`, ...): grid of the album's photos
//! - **Error page** (`error.html`): static asset, uploaded byte-for-byte
//!
//! ## Page Numbering
//!
//! Albums are numbered in sorted name order, so the same bucket contents always
//! produce the same pages. Numbers are not stable identifiers: adding or
//! removing an album renumbers every album after it.
//!
//! ## Publication Order
//!
//! ```text
//! 1. List the whole bucket and rebuild the hierarchy
//! 2. Upload album pages in number order
//! 3. Upload index.html
//! 4. Upload error.html
//! 5. Set public-read ACL and website hosting (index.html / error.html)
//! ```
//!
//! Publication is not transactional. A failure stops at that step and leaves
//! earlier uploads in place; running the command again overwrites them.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping, so there is
//! no runtime template failure to handle.

use crate::hierarchy::Hierarchy;
use crate::storage::backend::{HTML, ObjectStore, StoreError};
use maud::{DOCTYPE, Markup, html};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub const INDEX_PAGE: &str = "index.html";
pub const ERROR_PAGE: &str = "error.html";

const CSS: &str = include_str!("../static/style.css");
const ERROR_HTML: &[u8] = include_bytes!("../static/error.html");

/// Characters encoded in URL path segments: everything except unreserved ones.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One photo as shown on an album page.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoLink {
    pub url: String,
    pub name: String,
}

/// One album page to publish.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumPage {
    /// Object key of the page, e.g. `album1.html`.
    pub file: String,
    /// Album name.
    pub name: String,
    pub photos: Vec<PhotoLink>,
}

/// Everything needed to render the site, derived from one hierarchy snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteManifest {
    pub albums: Vec<AlbumPage>,
}

impl SiteManifest {
    /// `(page file, album name)` pairs for the index page.
    pub fn index_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.albums
            .iter()
            .map(|a| (a.file.as_str(), a.name.as_str()))
    }
}

/// A page that was uploaded, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedPage {
    pub file: String,
    pub album: String,
    pub photo_count: usize,
}

/// Result of a successful synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteReport {
    /// Public base URL of the site.
    pub url: String,
    /// Album pages in number order.
    pub pages: Vec<PublishedPage>,
}

/// Public base URL of a bucket's website, with a trailing slash.
pub fn website_url(bucket: &str, website_domain: &str) -> String {
    format!("https://{bucket}.website.{website_domain}/")
}

/// Page file name for the `number`-th album (1-based).
pub fn album_page_name(number: usize) -> String {
    format!("album{number}.html")
}

/// Public URL of a photo: `<base>/<album>/<photo>` with each segment encoded.
///
/// Slashes inside the photo name stay path separators, matching the object key.
pub fn photo_url(base_url: &str, album: &str, photo: &str) -> String {
    let path: Vec<String> = std::iter::once(album)
        .chain(photo.split('/'))
        .map(|segment| utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string())
        .collect();
    format!("{}/{}", base_url.trim_end_matches('/'), path.join("/"))
}

/// Assign page names and photo URLs for every album in `hierarchy`.
pub fn build_manifest(hierarchy: &Hierarchy, base_url: &str) -> SiteManifest {
    let albums = hierarchy
        .iter()
        .enumerate()
        .map(|(idx, (album, photos))| AlbumPage {
            file: album_page_name(idx + 1),
            name: album.to_string(),
            photos: photos
                .iter()
                .map(|photo| PhotoLink {
                    url: photo_url(base_url, album, photo),
                    name: photo.clone(),
                })
                .collect(),
        })
        .collect();
    SiteManifest { albums }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the index page listing every album.
pub fn render_index(manifest: &SiteManifest) -> Markup {
    let content = html! {
        header.site-header {
            h1 { "Photo archive" }
        }
        main.index-page {
            ul.album-list {
                @for (file, name) in manifest.index_entries() {
                    li {
                        a href=(file) { (name) }
                    }
                }
            }
        }
    };
    base_document("Photo archive", content)
}

/// Renders one album page with all of its photos.
pub fn render_album_page(album: &AlbumPage) -> Markup {
    let content = html! {
        header.site-header {
            nav.breadcrumb {
                a href=(INDEX_PAGE) { "Photo archive" }
                " › "
                (album.name)
            }
            h1 { (album.name) }
        }
        main.album-page {
            div.photo-grid {
                @for photo in &album.photos {
                    figure {
                        img src=(photo.url) alt=(photo.name) loading="lazy";
                        figcaption { (photo.name) }
                    }
                }
            }
        }
    };
    base_document(&album.name, content)
}

// ============================================================================
// Publication
// ============================================================================

/// Rebuild the site from the bucket contents and publish it.
///
/// See the [module docs](self) for the publication order. Returns the public
/// site URL and the album pages that were written.
pub fn generate(
    store: &impl ObjectStore,
    website_domain: &str,
) -> Result<SiteReport, GenerateError> {
    let url = website_url(store.bucket(), website_domain);
    let hierarchy = Hierarchy::build(store.list_objects(None)?);
    let manifest = build_manifest(&hierarchy, &url);

    let mut pages = Vec::with_capacity(manifest.albums.len());
    for album in &manifest.albums {
        let page = render_album_page(album).into_string();
        store.put_object(&album.file, page.into_bytes(), HTML)?;
        info!(page = %album.file, album = %album.name, "published album page");
        pages.push(PublishedPage {
            file: album.file.clone(),
            album: album.name.clone(),
            photo_count: album.photos.len(),
        });
    }

    let index = render_index(&manifest).into_string();
    store.put_object(INDEX_PAGE, index.into_bytes(), HTML)?;
    store.put_object(ERROR_PAGE, ERROR_HTML.to_vec(), HTML)?;

    store.put_bucket_public_read()?;
    store.put_bucket_website(INDEX_PAGE, ERROR_PAGE)?;

    info!(%url, albums = pages.len(), "site published");
    Ok(SiteReport { url, pages })
}
