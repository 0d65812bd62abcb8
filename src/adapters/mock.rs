use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::SystemTime,
};

use crate::{adapters, error::ObjectError, model};

/// In-memory backend. Lists in insertion order, records every upload and
/// counts calls so callers can assert on backend traffic.
#[derive(Default)]
pub struct MockClient {
    objects: Mutex<Vec<model::object::StoredObject>>,
    puts: Mutex<Vec<(String, String, Vec<u8>)>>,
    list_calls: AtomicUsize,
    fail_puts: bool,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects<'a>(objects: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let client = Self::new();
        for (key, size) in objects {
            client.insert(key, size);
        }
        client
    }

    /// A backend whose uploads always fail.
    pub fn failing_puts() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, key: &str, size: u64) {
        let mut objects = self
            .objects
            .lock()
            .expect("failed to acquire `objects` guard");
        objects.retain(|o| o.key != key);
        objects.push(model::object::StoredObject {
            key: key.to_string(),
            size,
            modified_time: SystemTime::UNIX_EPOCH,
            etag: Some(format!("\"{:x}\"", size)),
        });
    }

    /// `(bucket, key, body)` of every upload, oldest first.
    pub fn puts(&self) -> Vec<(String, String, Vec<u8>)> {
        self.puts
            .lock()
            .expect("failed to acquire `puts` guard")
            .clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl adapters::ObjectStore for MockClient {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError> {
        if self.fail_puts {
            return Err(ObjectError::PutObject {
                key: key.to_string(),
                message: "mock upload failure".to_string(),
            });
        }

        self.insert(key, body.len() as u64);
        self.puts
            .lock()
            .expect("failed to acquire `puts` guard")
            .push((bucket.to_string(), key.to_string(), body));

        Ok(())
    }

    fn list_objects(
        &self,
        _bucket: &str,
        prefix: &str,
    ) -> Result<Vec<model::object::StoredObject>, ObjectError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let objects = self
            .objects
            .lock()
            .expect("failed to acquire `objects` guard");

        Ok(objects
            .iter()
            .filter(|o| o.key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
