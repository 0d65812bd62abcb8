use std::sync::Arc;

use crate::{error::ObjectError, model};

pub mod mock;
pub mod s3;

/// The storage calls a target needs from its backend.
pub trait ObjectStore: Send + Sync {
    /// Creates or replaces `key` with `body`.
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError>;

    /// Every object whose key starts with `prefix`, following continuation
    /// tokens until the listing is complete.
    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<model::object::StoredObject>, ObjectError>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError> {
        (**self).put_object(bucket, key, body)
    }

    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<model::object::StoredObject>, ObjectError> {
        (**self).list_objects(bucket, prefix)
    }
}
