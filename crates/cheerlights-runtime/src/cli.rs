//! CLI definition using clap derive.

use cheerlights_core::{DEFAULT_ENDPOINT, DEFAULT_PERIOD_MS};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cheerlights",
    about = "Poll the CheerLights color and show it in the terminal"
)]
pub struct Cli {
    /// URL returning the current color as plain text
    #[arg(long, short = 'u', global = true, env = "CHEERLIGHTS_URL", default_value = DEFAULT_ENDPOINT)]
    pub url: String,

    /// Color output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: String,

    /// HTTP request timeout in seconds
    #[arg(
        long,
        global = true,
        default_value = "10",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Options for the default `watch` command
    #[command(flatten)]
    pub watch: WatchOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll on a timer and redraw on every new color (default)
    Watch(WatchOpts),
    /// Fetch the color once and print it
    Once(OnceOpts),
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct WatchOpts {
    /// Interval between polls in milliseconds
    #[arg(long, env = "CHEERLIGHTS_PERIOD_MS", default_value_t = DEFAULT_PERIOD_MS)]
    pub period_ms: u64,

    /// Abort fetches still in flight when polling stops
    #[arg(long)]
    pub abort_in_flight: bool,
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OnceOpts {
    /// Print the update as JSON
    #[arg(long)]
    pub json: bool,
}
