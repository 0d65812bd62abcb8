use crate::error::TargetError;

const S3_SCHEME: &str = "s3://";

/// Splits `s3://bucket/some/root` into `("bucket", "some/root")`.
pub fn parse_target_uri(target_uri: &str) -> Result<(&str, &str), TargetError> {
    let rest = target_uri
        .strip_prefix(S3_SCHEME)
        .ok_or_else(|| TargetError::InvalidUri(format!("unsupported scheme: {}", target_uri)))?;

    let (bucket, root) = rest.split_once('/').unwrap_or((rest, ""));
    if bucket.is_empty() {
        return Err(TargetError::InvalidUri(format!(
            "missing bucket: {}",
            target_uri
        )));
    }

    Ok((bucket, root))
}
