mod cli;

use clap::Parser;
use cli::{CheckJsonArgs, Cli, Commands, ConfigArgs};
use reqkit::config::Config;
use reqkit::json;
use tracing_subscriber::EnvFilter;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ConnString(args) => conn_string(args)?,
        Commands::ShowConfig(args) => show_config(args)?,
        Commands::CheckJson(args) => check_json(args).await?,
    }

    Ok(())
}

fn load_config(args: ConfigArgs) -> Result<Config, AnyError> {
    let config = match args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn show_config(args: ConfigArgs) -> Result<(), AnyError> {
    let config = load_config(args)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn conn_string(args: ConfigArgs) -> Result<(), AnyError> {
    let config = load_config(args)?;

    if config.database.password.is_none() {
        tracing::warn!("no database password in environment, connection string has an empty password");
    }
    println!("{}", config.database.connection_params());

    Ok(())
}

async fn check_json(args: CheckJsonArgs) -> Result<(), AnyError> {
    let max_bytes = match args.max_bytes {
        Some(size) => size,
        None => load_config(args.config)?.limits.max_body_bytes,
    };
    let limit = max_bytes.as_usize();

    let bytes = tokio::fs::read(&args.file).await?;
    tracing::debug!(file = %args.file.display(), size = bytes.len(), %max_bytes, "checking JSON document");

    let body = json::read_json_body(axum::body::Body::from(bytes), limit).await?;
    let value: serde_json::Value = json::decode_with_limit(&body, limit)?;

    let kind = match value {
        serde_json::Value::Object(ref map) => format!("object with {} keys", map.len()),
        serde_json::Value::Array(ref items) => format!("array with {} items", items.len()),
        _ => "scalar".to_string(),
    };
    println!("ok: {kind}");

    Ok(())
}
