use std::io;

use thiserror::Error;

/// Failure reported by an object storage backend.
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("failed to put_object at: {key}, {message}")]
    PutObject { key: String, message: String },

    #[error("failed to list_objects at: {prefix}, {message}")]
    ListObjects { prefix: String, message: String },

    #[error("failed to drive storage request: {0}")]
    Runtime(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("tried to navigate outside root {root:?}: {path:?}")]
    OutsideRoot { root: String, path: String },

    #[error("target is not open")]
    Closed,

    #[error("not a file name in the current directory: {name:?}")]
    InvalidName { name: String },

    #[error("invalid target uri: {0}")]
    InvalidUri(String),

    #[error(transparent)]
    Backend(#[from] ObjectError),
}
