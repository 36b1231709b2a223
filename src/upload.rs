use crate::{err, key::ObjectTarget, store::ObjectStore, Error};
use aws_sdk_s3::primitives::ByteStream;
use futures::TryFutureExt;
use futures_stopwatch::try_stopwatch;
use snafu::ResultExt;
use std::time::Duration;
use tokio::fs::File;

/// Result of a single successful upload.
#[derive(Debug, Clone, Copy)]
pub struct UploadReport {
    /// Size of the uploaded body in bytes
    pub size: u64,
    /// Time spent in the `put_object` request
    pub elapsed: Duration,
}

/// Stream the open `file` into `bucket` under `target.key`. One attempt; `file` is consumed
/// and released when the request is done, whatever its outcome.
pub async fn put_file<S>(
    store: &S,
    bucket: &str,
    target: &ObjectTarget,
    file: File,
) -> Result<UploadReport, Error>
where
    S: ObjectStore + ?Sized,
{
    let size = file
        .metadata()
        .await
        .with_context(|| err::Io {
            description: format!("metadata of {}", target.key),
        })?
        .len();
    let body = ByteStream::read_from()
        .file(file)
        .build()
        .await
        .context(err::ByteStream {
            key: target.key.as_str(),
        })?;

    try_stopwatch(store.put_object(bucket, &target.key, target.content_type, body))
        .map_ok(|((), elapsed)| UploadReport { size, elapsed })
        .await
}
