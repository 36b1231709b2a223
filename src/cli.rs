//! Command line and environment configuration for the `upload` binary.
use crate::Config;
use clap::Parser;
use std::path::PathBuf;

/// Upload a directory tree to an S3 bucket.
///
/// Every option can also be given through its environment variable, or through a `.env` file
/// in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "upload", version, about)]
pub struct Cli {
    /// Region of the object store
    #[arg(long, env = "S3_UPLOAD_REGION")]
    pub region: String,

    /// Bucket to upload into; created if missing
    #[arg(long, env = "S3_UPLOAD_BUCKET")]
    pub bucket: String,

    /// Endpoint of an S3-compatible store (empty for AWS)
    #[arg(long, env = "S3_UPLOAD_ENDPOINT", default_value = "")]
    pub endpoint: String,

    /// Key prefix for all uploaded objects
    #[arg(long, env = "S3_UPLOAD_BUCKET_PATH", default_value = "")]
    pub bucket_path: String,

    /// Directory to upload
    #[arg(long, env = "S3_UPLOAD_SOURCE_PATH")]
    pub source_path: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            region: cli.region,
            bucket_name: cli.bucket,
            bucket_endpoint: cli.endpoint,
            bucket_destination_prefix: cli.bucket_path,
            source_path: cli.source_path,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_build_config() {
        let cli = Cli::try_parse_from([
            "upload",
            "--region",
            "eu-west-1",
            "--bucket",
            "site-backup",
            "--endpoint",
            "http://localhost:9000",
            "--bucket-path",
            "backup",
            "--source-path",
            "/data/site",
        ])
        .unwrap();
        assert_eq!(
            Config::from(cli),
            Config {
                region: "eu-west-1".into(),
                bucket_name: "site-backup".into(),
                bucket_endpoint: "http://localhost:9000".into(),
                bucket_destination_prefix: "backup".into(),
                source_path: PathBuf::from("/data/site"),
            }
        );
    }

    #[test]
    fn endpoint_and_prefix_may_be_empty() {
        let cli = Cli::try_parse_from([
            "upload",
            "--region=us-east-1",
            "--bucket=b",
            "--endpoint=",
            "--source-path=.",
        ])
        .unwrap();
        assert!(cli.endpoint.is_empty());
        assert!(cli.bucket_path.is_empty());
    }
}
