use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStreamError;
use crate::stats::RunStats;
use snafu::{Backtrace, Snafu};
use std::io;

#[derive(Snafu, Debug)]
#[snafu(visibility = "pub")]
pub enum Error {
    #[snafu(display("Io error: {}: {}", description, source))]
    Io {
        source: io::Error,
        description: String,
        backtrace: Backtrace,
    },
    #[snafu(display("Cannot resolve source path {}: {}", path, source))]
    ResolvePath { source: io::Error, path: String },
    /// The source root could not be read. `stats` holds whatever was recorded before.
    #[snafu(display("Error walking source tree: {}", source))]
    Walk {
        source: walkdir::Error,
        stats: RunStats,
    },

    // AWS SDK Errors
    #[snafu(display("S3 'head bucket' error on bucket '{}': {:?}", bucket, source))]
    HeadBucket {
        source: SdkError<HeadBucketError>,
        bucket: String,
    },
    #[snafu(display("S3 'create bucket' error on bucket '{}': {:?}", bucket, source))]
    CreateBucket {
        source: SdkError<CreateBucketError>,
        bucket: String,
    },
    #[snafu(display("S3 'put object' error on key '{}': {}", key, source))]
    PutObject {
        source: SdkError<PutObjectError>,
        key: String,
        backtrace: Backtrace,
    },
    #[snafu(display("Cannot stream body for key '{}': {}", key, source))]
    ByteStream { source: ByteStreamError, key: String },

    #[snafu(display("{}", source))]
    AnyError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
