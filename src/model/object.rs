use std::time::SystemTime;

/// One key as returned by a backend listing.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub size: u64,
    pub modified_time: SystemTime,
    pub etag: Option<String>,
}
