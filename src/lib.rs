//! Presents an S3 bucket prefix as a synchronization target: a directory
//! tree that can be listed, navigated and written to.

pub mod adapters;
pub mod config;
pub mod error;
pub mod model;
pub mod target;
pub mod util;

pub use config::TargetOptions;
pub use error::{ObjectError, TargetError};
pub use target::{s3::S3Target, Target, Writable};
