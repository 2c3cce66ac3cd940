use anyhow::Result;
use fillang::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load env variables from .env if present
    let _ = dotenvy::dotenv();
    // stdout is reserved for the per-file summary lines
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let _cli = <Cli as clap::Parser>::parse();

    cli::handle_fill().await
}
