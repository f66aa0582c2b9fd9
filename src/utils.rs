use crate::error::{Error, Result};

/// Reject empty or whitespace-only bucket names before any request is built.
pub fn validate_bucket_name(bucket: &str) -> Result<()> {
    if bucket.trim().is_empty() {
        return Err(Error::InvalidBucketName(bucket.to_string()));
    }
    Ok(())
}
