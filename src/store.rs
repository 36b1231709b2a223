//! The object-store operations the uploader needs, and their implementation on the AWS SDK
//! client.
use crate::{err, Config, Error};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::Region,
    operation::head_bucket::HeadBucketError,
    primitives::ByteStream,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client,
};
use snafu::futures::TryFutureExt as S;
use snafu::ResultExt;

/// Region in which S3 refuses an explicit location constraint
const DEFAULT_REGION: &str = "us-east-1";

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// `Ok(false)` only when the store positively reports the bucket as missing. Any other
    /// failure is an error.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error>;

    async fn create_bucket(&self, bucket: &str) -> Result<(), Error>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<(), Error>;
}

#[async_trait]
impl ObjectStore for Client {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        match self.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e)
                if e
                    .as_service_error()
                    .map_or(false, HeadBucketError::is_not_found) =>
            {
                Ok(false)
            }
            Err(e) => Err(e).context(err::HeadBucket { bucket }),
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), Error> {
        let mut request = Client::create_bucket(self).bucket(bucket);
        if let Some(region) = self.config().region() {
            if region.as_ref() != DEFAULT_REGION {
                request = request.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(region.as_ref()))
                        .build(),
                );
            }
        }
        request
            .send()
            .context(err::CreateBucket { bucket })
            .await
            .map(drop)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<(), Error> {
        Client::put_object(self)
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .context(err::PutObject { key })
            .await
            .map(drop)
    }
}

/// S3 client for `config`: default credential chain, the configured region, and path-style
/// addressing against `bucket_endpoint` when one is given.
pub async fn s3_client(config: &Config) -> Client {
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared).force_path_style(true);
    if !config.bucket_endpoint.is_empty() {
        builder = builder.endpoint_url(&config.bucket_endpoint);
    }
    Client::from_conf(builder.build())
}
