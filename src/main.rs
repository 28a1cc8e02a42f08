#[macro_use]
extern crate tracing;

use std::env;
use std::path::PathBuf;

use anyhow::anyhow;
use beamshot::cli::Cli;
use beamshot::headless;
use beamshot_config::Config;
use clap::Parser;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "beamshot=debug,beamshot_config=debug";

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    info!("starting version {}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|err| anyhow!("{err:?}"))?,
        None => load_default_config(),
    };

    let report = headless::run(&cli, &config)?;
    info!(
        "ended in {:?} after {:?} ({} frames), send confirmed: {}",
        report.phase, report.elapsed, report.frames, report.confirmed
    );

    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "beamshot")?;
    Some(dirs.config_dir().join("config.kdl"))
}

/// Loads the config from the default location, falling back to the stock one.
fn load_default_config() -> Config {
    let Some(path) = default_config_path() else {
        debug!("no config directory, using the default config");
        return Config::default();
    };

    if !path.exists() {
        debug!("{path:?} does not exist, using the default config");
        return Config::default();
    }

    match Config::load(&path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err:?}");
            Config::default()
        }
    }
}
