use clap::{Parser, Subcommand};
use std::path::PathBuf;

use reqkit::humanize::ByteSize;

#[derive(Parser, Debug)]
#[command(name = "reqkit")]
#[command(about = "Request parsing helpers: operator tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the database connection string built from configuration
    ConnString(ConfigArgs),
    /// Print the effective configuration as TOML (secrets omitted)
    ShowConfig(ConfigArgs),
    /// Run a file through the strict JSON body decoder
    CheckJson(CheckJsonArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (defaults to $REQKIT_CONFIG or config/reqkit.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct CheckJsonArgs {
    /// JSON document to check
    pub file: PathBuf,

    /// Body size limit, e.g. "1MB" or "4096" (defaults to limits.max_body_bytes)
    #[arg(long)]
    pub max_bytes: Option<ByteSize>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
