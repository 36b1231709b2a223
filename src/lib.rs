//! # S3 directory upload
//! Replicate a local directory tree into an S3 bucket.
//!
//! - Relative paths become object keys, under `<prefix>/<name of source dir>/`.
//! - Hidden entries (dot-prefixed names, and everything below a dot-prefixed directory) are
//! skipped, except for files called `.env`.
//! - Content types are inferred from file extensions.
//! - The bucket is created if it does not exist yet.
//!
//! Start with [`UploadSession::upload_from`].

use tracing::{debug, info};

pub mod cli;
mod config;
pub mod err;
pub mod filter;
pub mod key;
pub mod stats;
pub mod store;
pub mod upload;
mod walk;

pub use config::*;
pub use err::Error;
pub use stats::{FileOutcome, Outcome, RunStats};
pub use store::{s3_client, ObjectStore};
pub use walk::resolve_source;

#[cfg(test)]
mod mock;

/// One upload run against one bucket.
///
/// The session remembers whether the bucket has been verified, so [`connect`](Self::connect)
/// talks to the store at most once.
#[derive(Clone, Debug)]
pub struct UploadSession<S> {
    store: S,
    config: Config,
    connected: bool,
}

impl<S: ObjectStore> UploadSession<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            connected: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Make sure the configured bucket exists, creating it if the store reports it missing.
    /// Any other failure of the existence check is returned as is; no creation is attempted.
    pub async fn connect(&mut self) -> Result<(), Error> {
        if self.connected {
            return Ok(());
        }
        let bucket = self.config.bucket_name.as_str();
        if self.store.bucket_exists(bucket).await? {
            debug!(bucket, "bucket exists");
        } else {
            info!(bucket, "bucket not found, creating it");
            self.store.create_bucket(bucket).await?;
        }
        self.connected = true;
        Ok(())
    }
}
