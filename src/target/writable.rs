use std::{
    io,
    time::{Duration, Instant},
};

use tracing::{debug, error, info};

use crate::{adapters, error::TargetError, target};

const PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Accumulates one object's content in memory and uploads it in a single
/// `put_object` when closed.
///
/// Dropping an unclosed file uploads it as well, so content written under a
/// scope is stored on every exit path. Errors raised from `Drop` can only be
/// logged; call [`target::Writable::close`] to observe them.
pub struct S3File<'a> {
    client: &'a dyn adapters::ObjectStore,
    bucket: &'a str,
    key: String,
    data: Vec<u8>,
    dry_run: bool,
    last_update: Option<Instant>,
    closed: bool,
}

impl<'a> S3File<'a> {
    pub fn new(
        client: &'a dyn adapters::ObjectStore,
        bucket: &'a str,
        key: String,
        dry_run: bool,
    ) -> Self {
        Self {
            client,
            bucket,
            key,
            data: Vec::new(),
            dry_run,
            last_update: None,
            closed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn append(&mut self, chunk: &[u8]) {
        let due = self
            .last_update
            .map_or(true, |last| last.elapsed() > PROGRESS_INTERVAL);
        if due {
            self.last_update = Some(Instant::now());
            let received_mb = self.data.len() as f64 / (1024.0 * 1024.0);
            debug!(key = %self.key, received_mb, "buffering chunk in memory");
        }

        self.data.extend_from_slice(chunk);
    }

    fn upload(&mut self) -> Result<(), TargetError> {
        self.closed = true;
        let data = std::mem::take(&mut self.data);

        debug!(bucket = %self.bucket, key = %self.key, length = data.len(), "writing object");
        if self.dry_run {
            info!(key = %self.key, length = data.len(), "dry run, skipping upload");
            return Ok(());
        }

        self.client.put_object(self.bucket, &self.key, data)?;
        Ok(())
    }
}

impl io::Write for S3File<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl target::Writable for S3File<'_> {
    fn key(&self) -> &str {
        &self.key
    }

    fn close(mut self) -> Result<(), TargetError> {
        self.upload()
    }
}

impl Drop for S3File<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        if let Err(err) = self.upload() {
            error!(error_message=%err, error_group="put_object", key=%self.key);
        }
    }
}
