use crate::{error::TargetError, util};

/// Where an `S3Target` lives and how it behaves. The client handle is
/// supplied separately, already configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetOptions {
    /// Key prefix acting as the target's root directory.
    pub root: String,
    pub bucket: String,
    /// Log uploads instead of performing them.
    pub dry_run: bool,
}

impl TargetOptions {
    /// Builds options from an `s3://bucket/root` URI.
    pub fn from_uri(target_uri: &str, dry_run: bool) -> Result<Self, TargetError> {
        let (bucket, root) = util::object::parse_target_uri(target_uri)?;

        Ok(Self {
            root: root.to_string(),
            bucket: bucket.to_string(),
            dry_run,
        })
    }
}
