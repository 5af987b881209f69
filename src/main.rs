use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use ubermelon::{
    cli::{Args, CliApp},
    utils::{log_directive_from_env, Config},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directive_from_env(args.verbose)))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let app = CliApp::new(config).await.map_err(|e| {
        tracing::error!("Failed to start: {:#}", e);
        e
    })?;
    app.run(args).await
}
