use anyhow::Result;
use clap::Parser;
use miichu::{App, AppConfig, Cli};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.verbose {
        eprintln!("{}", app_core::branding::banner());
    }

    let config = AppConfig::new(cli.api_url, cli.data_dir)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    let mut app = App::open(&config)?;
    let screen = app.start().await;
    tracing::debug!(screen = screen.to_path(), "started");

    let output = app.run(cli.command).await?;
    println!("{}", output);
    Ok(())
}
