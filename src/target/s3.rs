use std::{fmt, time::SystemTime};

use tracing::{debug, error, info, span, Level};

use crate::{
    adapters,
    config::TargetOptions,
    error::TargetError,
    model::entry::Entry,
    target::{self, listing, writable::S3File},
    util,
};

/// Presents a bucket prefix as a directory tree.
///
/// Directories are implied by `/` in keys, listing maps to a prefix query and
/// every file is uploaded whole when its writable is closed. Modification
/// times cannot be set on stored objects.
pub struct S3Target {
    client: Box<dyn adapters::ObjectStore>,
    bucket: String,
    root: String,
    cur_dir: String,
    dry_run: bool,
    open: bool,
}

impl S3Target {
    pub fn new(client: Box<dyn adapters::ObjectStore>, options: TargetOptions) -> Self {
        let root = util::path::normalize(&options.root);

        Self {
            client,
            bucket: options.bucket,
            cur_dir: root.clone(),
            root,
            dry_run: options.dry_run,
            open: false,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn ensure_open(&self) -> Result<(), TargetError> {
        if self.open {
            Ok(())
        } else {
            Err(TargetError::Closed)
        }
    }
}

impl fmt::Display for S3Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<S3:{} + {}>",
            self.root,
            util::path::relative_to(&self.root, &self.cur_dir)
        )
    }
}

impl target::Target for S3Target {
    type File<'a> = S3File<'a>;

    fn open(&mut self) -> Result<(), TargetError> {
        let span = span!(Level::INFO, "open", context = "open");
        let _e = span.enter();
        info!(bucket = %self.bucket, root = %self.root, dry_run = self.dry_run, "called");

        self.cur_dir = self.root.clone();
        self.open = true;

        Ok(())
    }

    fn close(&mut self) -> Result<(), TargetError> {
        let span = span!(Level::INFO, "close", context = "close");
        let _e = span.enter();
        info!(bucket = %self.bucket, root = %self.root, "called");

        self.open = false;

        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn root(&self) -> &str {
        &self.root
    }

    fn pwd(&self) -> &str {
        &self.cur_dir
    }

    fn cwd(&mut self, name: &str) -> Result<&str, TargetError> {
        self.ensure_open()?;

        let path = util::path::normalize(&util::path::join(&self.cur_dir, name));
        if !util::path::is_within(&self.root, &path) {
            let err = TargetError::OutsideRoot {
                root: self.root.clone(),
                path,
            };
            error!(error_message=%err, error_group="cwd");
            return Err(err);
        }

        debug!(from = %self.cur_dir, to = %path, "changing directory");
        self.cur_dir = path;

        Ok(&self.cur_dir)
    }

    fn mkdir(&mut self, name: &str) -> Result<(), TargetError> {
        debug!(
            path = %util::path::join(&self.cur_dir, name),
            "traversing directory, nothing to create"
        );

        Ok(())
    }

    fn get_dir(&mut self) -> Result<Vec<Entry>, TargetError> {
        self.ensure_open()?;

        let span = span!(Level::INFO, "get_dir", context = "get_dir");
        let _e = span.enter();

        let prefix = util::path::dir_prefix(&self.cur_dir);
        info!(bucket = %self.bucket, prefix = %prefix, "called");

        let objects = match self.client.list_objects(&self.bucket, &prefix) {
            Err(err) => {
                error!(error_message=%err, error_group="list_objects");
                return Err(err.into());
            }
            Ok(objects) => objects,
        };

        let entries = listing::list_entries(&prefix, &objects);
        debug!(objects = objects.len(), entries = entries.len(), "listed");

        Ok(entries)
    }

    fn open_writable(&mut self, name: &str) -> Result<S3File<'_>, TargetError> {
        self.ensure_open()?;

        if !util::path::is_plain_name(name) {
            let err = TargetError::InvalidName {
                name: name.to_string(),
            };
            error!(error_message=%err, error_group="open_writable");
            return Err(err);
        }

        let key = util::path::join(&self.cur_dir, name);
        debug!(bucket = %self.bucket, key = %key, "opening writable");

        Ok(S3File::new(
            self.client.as_ref(),
            &self.bucket,
            key,
            self.dry_run,
        ))
    }

    fn set_mtime(&mut self, name: &str, mtime: SystemTime, size: u64) -> Result<(), TargetError> {
        let secs = mtime
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        debug!(name = name, mtime = secs, size = size, "ignoring source mtime");

        Ok(())
    }

    fn supports_set_mtime(&self) -> bool {
        false
    }
}
