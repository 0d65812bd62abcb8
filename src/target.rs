use std::{io, time::SystemTime};

use crate::{error::TargetError, model::entry::Entry};

pub mod listing;
pub mod s3;
pub mod writable;

/// A handle receiving one file's content, stored when closed.
pub trait Writable: io::Write {
    /// Destination key of the content.
    fn key(&self) -> &str;

    /// Stores the accumulated content. Consumes the handle.
    fn close(self) -> Result<(), TargetError>;
}

/// A synchronization endpoint navigated like a directory tree.
///
/// A target starts closed. `open` positions it at its root, after which
/// `cwd` moves it around below that root and never above it.
pub trait Target {
    type File<'a>: Writable
    where
        Self: 'a;

    fn open(&mut self) -> Result<(), TargetError>;

    fn close(&mut self) -> Result<(), TargetError>;

    fn is_open(&self) -> bool;

    fn root(&self) -> &str;

    /// Current directory.
    fn pwd(&self) -> &str;

    /// Changes the current directory and returns the new one.
    fn cwd(&mut self, name: &str) -> Result<&str, TargetError>;

    fn mkdir(&mut self, name: &str) -> Result<(), TargetError>;

    /// Entries directly below the current directory.
    fn get_dir(&mut self) -> Result<Vec<Entry>, TargetError>;

    /// Opens `name` in the current directory for writing. The handle borrows
    /// the target, so only one can be in flight at a time.
    fn open_writable(&mut self, name: &str) -> Result<Self::File<'_>, TargetError>;

    fn set_mtime(&mut self, name: &str, mtime: SystemTime, size: u64) -> Result<(), TargetError>;

    /// Whether `set_mtime` has any effect. Callers that need modification
    /// times preserved must track them elsewhere when this is `false`.
    fn supports_set_mtime(&self) -> bool;

    /// Depth-first listing of the tree below the current directory as
    /// `(directory, entry)` pairs. The current directory is restored before
    /// returning, including on error.
    fn walk(&mut self) -> Result<Vec<(String, Entry)>, TargetError> {
        let start = self.pwd().to_string();
        let mut out = Vec::new();

        let res = walk_into(self, &mut out);
        while self.pwd() != start {
            self.cwd("..")?;
        }

        res.map(|_| out)
    }
}

fn walk_into<T: Target + ?Sized>(
    target: &mut T,
    out: &mut Vec<(String, Entry)>,
) -> Result<(), TargetError> {
    let dir = target.pwd().to_string();

    for entry in target.get_dir()? {
        // dot segments would resolve back up the tree
        let descend = entry.is_dir() && !matches!(entry.name(), "." | "..");
        let name = entry.name().to_string();
        out.push((dir.clone(), entry));

        if descend {
            target.cwd(&name)?;
            walk_into(target, out)?;
            target.cwd("..")?;
        }
    }

    Ok(())
}
