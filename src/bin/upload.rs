use clap::Parser;
use s3_upload::{cli::Cli, s3_client, Config, Error, UploadSession};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine: everything may come from the environment or flags
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Cli::parse());
    let source = config.source_path.clone();
    let mut session = UploadSession::new(s3_client(&config).await, config);

    match session.upload_from(&source).await {
        Ok(stats) => println!("{}", stats),
        Err(e) => {
            if let Error::Walk { stats, .. } = &e {
                println!("{}", stats);
            }
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
