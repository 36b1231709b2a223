#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything an [`UploadSession`](crate::UploadSession) needs to know about where files come
/// from and where they go. Built once at startup and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Config {
    /// Region of the object store, e.g. `eu-west-1`
    pub region: String,
    /// Bucket that receives the uploads. Created on connect if it does not exist.
    pub bucket_name: String,
    /// Custom endpoint for S3-compatible stores (minio, localstack...). Empty means the
    /// default AWS endpoint for `region`.
    pub bucket_endpoint: String,
    /// Key prefix under which the source tree is placed
    pub bucket_destination_prefix: String,
    /// Directory to replicate. Relative paths are resolved against the working directory.
    pub source_path: PathBuf,
}
