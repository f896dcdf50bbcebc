use anyhow::{bail, Result};
use clap::Parser;
use gitfolio::{logging, App, Config};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gitfolio", version, about = "A terminal portfolio built from your GitHub profile")]
struct Cli {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub username, overriding the config file
    #[arg(short, long)]
    username: Option<String>,

    /// Theme to start with
    #[arg(short, long)]
    theme: Option<String>,

    /// Write a default config file and exit
    #[arg(long)]
    init: bool,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match cli.log_file {
        Some(path) => path,
        None => logging::default_log_path()?,
    };
    logging::init(&log_path)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if cli.init {
        if config_path.exists() {
            bail!("{} already exists", config_path.display());
        }
        Config::default().save(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_or_init(&config_path)?;
    if let Some(username) = cli.username {
        config.github.username = username;
    }

    info!(config = %config_path.display(), "starting gitfolio");
    let mut app = App::new(config, config_path, cli.theme)?;
    app.run().await
}
