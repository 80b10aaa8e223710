//! cheerlights: poll a color feed and mirror it into a terminal document.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

mod cli;
mod cmd_once;
mod cmd_watch;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = log_filter(
        std::env::var("CHEERLIGHTS_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
    );
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let use_color = render::resolve_color(&args.color);
    let fetcher =
        cheerlights_http::HttpFetcher::with_timeout(Duration::from_secs(args.timeout_secs))?;

    // No subcommand: start polling right away with the top-level options.
    let command = args
        .command
        .unwrap_or_else(|| cli::Command::Watch(args.watch.clone()));

    match command {
        cli::Command::Watch(opts) => {
            tracing::info!("cheerlights watch starting");
            cmd_watch::cmd_watch(&args.url, &opts, fetcher, use_color).await?;
        }
        cli::Command::Once(opts) => {
            cmd_once::cmd_once(&args.url, &opts, Arc::new(fetcher), use_color).await?;
        }
    }

    Ok(())
}

/// Log filter: `CHEERLIGHTS_LOG`, then `RUST_LOG`, then `info`.
fn log_filter(cheerlights_log: Option<String>, rust_log: Option<String>) -> String {
    cheerlights_log
        .or(rust_log)
        .unwrap_or_else(|| "info".to_string())
}
