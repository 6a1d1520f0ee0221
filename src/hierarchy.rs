//! Album → photo grouping reconstructed from a flat key listing.
//!
//! The bucket has no notion of folders. Albums exist only because keys share
//! a prefix, so every command that needs albums rebuilds a [`Hierarchy`] from
//! a fresh listing and throws it away afterwards. Nothing is cached between
//! commands: another invocation may have changed the bucket in the meantime.
//!
//! Albums are kept in a `BTreeMap`, so iteration is sorted by album name.
//! Site generation relies on this to number album pages reproducibly.

use crate::keys;
use std::collections::BTreeMap;

/// Albums and their photos at the moment of a single listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    albums: BTreeMap<String, Vec<String>>,
}

impl Hierarchy {
    /// Group `keys` by album.
    ///
    /// Keys without a separator (site pages, stray uploads) and keys with an
    /// empty photo part (`album/` folder markers) are skipped. Photo names are
    /// kept in listing order and not deduplicated; storage keys are unique.
    pub fn build<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut albums: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for key in keys {
            let Some((album, photo)) = keys::split_key(key.as_ref()) else {
                continue;
            };
            if photo.is_empty() {
                continue;
            }
            albums
                .entry(album.to_string())
                .or_default()
                .push(photo.to_string());
        }
        Self { albums }
    }

    /// Distinct album names, sorted.
    pub fn album_names(&self) -> Vec<&str> {
        self.albums.keys().map(String::as_str).collect()
    }

    /// Photos of `album`, or an empty slice if the album is absent.
    pub fn photos_of(&self, album: &str) -> &[String] {
        self.albums.get(album).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_album(&self, album: &str) -> bool {
        self.albums.contains_key(album)
    }

    /// `(album, photos)` pairs in album-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.albums
            .iter()
            .map(|(name, photos)| (name.as_str(), photos.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hierarchy {
        Hierarchy::build(["vacation/a.jpg", "vacation/b.jpg", "family/c.jpg"])
    }

    #[test]
    fn groups_photos_by_album() {
        let h = sample();
        assert_eq!(h.album_names(), vec!["family", "vacation"]);
        assert_eq!(h.photos_of("vacation"), ["a.jpg", "b.jpg"]);
        assert_eq!(h.photos_of("family"), ["c.jpg"]);
    }

    #[test]
    fn album_names_are_distinct() {
        let h = Hierarchy::build(["a/1.jpg", "a/2.jpg", "a/3.jpg"]);
        assert_eq!(h.album_names(), vec!["a"]);
        assert_eq!(h.album_names().len(), 1);
    }

    #[test]
    fn top_level_keys_never_form_albums() {
        let h = Hierarchy::build(["index.html", "album1.html", "error.html"]);
        assert!(h.is_empty());
    }

    #[test]
    fn folder_marker_without_photo_is_ignored() {
        let h = Hierarchy::build(["empty/", "full/x.jpg"]);
        assert!(!h.contains_album("empty"));
        assert!(h.contains_album("full"));
    }

    #[test]
    fn nested_photo_names_are_kept_verbatim() {
        let h = Hierarchy::build(["trip/raw/a.jpg"]);
        assert_eq!(h.photos_of("trip"), ["raw/a.jpg"]);
    }

    #[test]
    fn missing_album_has_no_photos() {
        assert!(sample().photos_of("missing").is_empty());
    }

    #[test]
    fn empty_listing_builds_empty_hierarchy() {
        let h = Hierarchy::build(Vec::<String>::new());
        assert!(h.is_empty());
        assert_eq!(h.album_names().len(), 0);
    }

    #[test]
    fn iteration_is_sorted_regardless_of_listing_order() {
        let h = Hierarchy::build(["zoo/1.jpg", "alps/2.jpg", "mid/3.jpg", "alps/1.jpg"]);
        let names: Vec<&str> = h.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alps", "mid", "zoo"]);
        assert_eq!(h.photos_of("alps"), ["2.jpg", "1.jpg"]);
    }

    #[test]
    fn album_present_iff_some_key_has_its_prefix() {
        let keys = ["a/x", "b", "c/", "d/y/z", "/w"];
        let h = Hierarchy::build(keys);
        assert_eq!(h.album_names(), vec!["", "a", "d"]);
    }
}
