use std::collections::HashSet;

use crate::model::{
    entry::{DirectoryEntry, Entry, FileEntry},
    object::StoredObject,
};

/// Reconciles a flat key listing into the direct children of `prefix`.
///
/// The first pass emits objects that sit directly under the prefix: plain
/// names become files and zero-byte `name/` markers become directories. The
/// second pass synthesizes a directory for every first path segment that
/// the first pass did not produce, which covers directories that only exist
/// because deeper keys share their prefix. Names are unique in the result
/// and the backend's listing order is kept.
///
/// A `name/` key with a non-zero size is not reported as a file, since the
/// name could never be a path segment again; it only yields a synthesized
/// directory in the second pass.
pub fn list_entries(prefix: &str, objects: &[StoredObject]) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for object in objects {
        let Some(name) = object.key.strip_prefix(prefix) else {
            continue;
        };

        let entry = match name.split_once('/') {
            None if !name.is_empty() => Entry::File(FileEntry {
                name: name.to_string(),
                size: object.size,
                modified: object.modified_time,
                etag: object.etag.clone().unwrap_or_default(),
            }),
            Some((dir, "")) if !dir.is_empty() && object.size == 0 => {
                Entry::Directory(DirectoryEntry {
                    name: dir.to_string(),
                    modified: Some(object.modified_time),
                    etag: object.etag.clone(),
                })
            }
            _ => continue,
        };

        if seen.insert(entry.name().to_string()) {
            entries.push(entry);
        }
    }

    for object in objects {
        let Some(name) = object.key.strip_prefix(prefix) else {
            continue;
        };

        let first = name.split('/').next().unwrap_or("");
        if first.is_empty() || seen.contains(first) {
            continue;
        }

        seen.insert(first.to_string());
        entries.push(Entry::Directory(DirectoryEntry {
            name: first.to_string(),
            modified: None,
            etag: None,
        }));
    }

    entries
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    fn object(key: &str, size: u64) -> StoredObject {
        StoredObject {
            key: key.to_string(),
            size,
            modified_time: SystemTime::UNIX_EPOCH + Duration::from_secs(size),
            etag: Some(format!("\"etag-{}\"", key)),
        }
    }

    fn summary(entries: &[Entry]) -> Vec<(&str, bool, u64)> {
        entries
            .iter()
            .map(|e| (e.name(), e.is_dir(), e.size()))
            .collect()
    }

    #[test]
    fn test_list_entries() {
        let objects = vec![
            object("/bucket-root/a.txt", 10),
            object("/bucket-root/sub/b.txt", 5),
        ];

        let cases = vec![
            (
                "/bucket-root/",
                vec![("a.txt", false, 10), ("sub", true, 0)],
            ),
            ("/bucket-root/sub/", vec![("b.txt", false, 5)]),
            ("/bucket-root/missing/", vec![]),
        ];

        for (prefix, expected) in cases {
            let entries = list_entries(prefix, &objects);
            assert_eq!(summary(&entries), expected, "failed for case: {}", prefix);
        }
    }

    #[test]
    fn test_list_entries_marker_and_children_are_one_entry() {
        let objects = vec![
            object("root/sub/deep/x", 3),
            object("root/sub/", 0),
            object("root/sub/y", 4),
            object("root/other/z", 1),
        ];

        let entries = list_entries("root/", &objects);

        assert_eq!(summary(&entries), vec![("sub", true, 0), ("other", true, 0)]);

        let Entry::Directory(marker) = &entries[0] else {
            panic!("expected directory entry");
        };
        assert_eq!(marker.modified, Some(SystemTime::UNIX_EPOCH));
        assert_eq!(marker.etag.as_deref(), Some("\"etag-root/sub/\""));

        let Entry::Directory(synthesized) = &entries[1] else {
            panic!("expected directory entry");
        };
        assert_eq!(synthesized.modified, None);
        assert_eq!(synthesized.etag, None);
    }

    #[test]
    fn test_list_entries_skips_deeper_descendants() {
        let objects = vec![
            object("root/a/b/c/", 0),
            object("root/a/b/d.txt", 2),
            object("root/e.txt", 7),
        ];

        let entries = list_entries("root/", &objects);

        assert_eq!(summary(&entries), vec![("e.txt", false, 7), ("a", true, 0)]);
    }

    #[test]
    fn test_list_entries_ignores_self_marker() {
        let objects = vec![object("root/", 0), object("root/f", 1)];

        let entries = list_entries("root/", &objects);

        assert_eq!(summary(&entries), vec![("f", false, 1)]);
    }

    #[test]
    fn test_list_entries_file_and_marker_with_same_name() {
        let objects = vec![object("root/dup", 9), object("root/dup/", 0)];

        let entries = list_entries("root/", &objects);

        assert_eq!(summary(&entries), vec![("dup", false, 9)]);
    }

    #[test]
    fn test_list_entries_nonempty_slash_key_is_a_directory() {
        let objects = vec![object("root/odd/", 12)];

        let entries = list_entries("root/", &objects);

        assert_eq!(summary(&entries), vec![("odd", true, 0)]);
        assert_eq!(entries[0].modified(), None);
    }

    #[test]
    fn test_list_entries_bucket_top_level() {
        let objects = vec![object("top.txt", 1), object("dir/inner.txt", 2)];

        let entries = list_entries("", &objects);

        assert_eq!(summary(&entries), vec![("top.txt", false, 1), ("dir", true, 0)]);
    }

    #[test]
    fn test_list_entries_ignores_foreign_keys() {
        let objects = vec![object("elsewhere/a", 1), object("root/b", 2)];

        let entries = list_entries("root/", &objects);

        assert_eq!(summary(&entries), vec![("b", false, 2)]);
    }
}
