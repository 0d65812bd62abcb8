use std::time::SystemTime;

#[derive(Clone, Debug, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub modified: SystemTime,
    pub etag: String,
}

/// A directory below the current prefix.
///
/// Object storage has no directories, so these are either backed by a
/// zero-byte `name/` marker object (and carry its mtime and etag) or
/// synthesized from deeper keys, in which case both are `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryEntry {
    pub name: String,
    pub modified: Option<SystemTime>,
    pub etag: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    File(FileEntry),
    Directory(DirectoryEntry),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => &file.name,
            Entry::Directory(dir) => &dir.name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Entry::File(file) => file.size,
            Entry::Directory(_) => 0,
        }
    }

    pub fn modified(&self) -> Option<SystemTime> {
        match self {
            Entry::File(file) => Some(file.modified),
            Entry::Directory(dir) => dir.modified,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }
}
