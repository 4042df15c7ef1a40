pub mod bootstrap_config;
mod config;

use crate::config::{load_config, ConfigError};
use bootstrap_config::BootstrapConfig;
use common::util::logging;
use data_loader::consistency::check_consistency;
use data_loader::{DataLoadError, DatasetCache};
use log::{debug, error, info};
use polars::error::PolarsError;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() {
    let _ = run()
        .await
        .inspect_err(|err| error!(target: "main", "{}", err));
}

async fn run() -> Result<(), TripInsightsError> {
    let bootstrap_config = BootstrapConfig::read();

    logging::initialize_logging(bootstrap_config.log_level.into())?;
    print_startup_message();

    let config = load_config(&bootstrap_config)?;

    // Input files are loaded once up front so that broken files are reported before serving
    let cache = Arc::new(DatasetCache::new(config.data_files().clone()));
    let data = logging::run_with_spinner("main", "Loading trip tables", || cache.get())?;
    info!(
        target: "main",
        "Loaded {} purpose, {} income, {} duration and {} length rows for {} zones",
        data.purpose.len(), data.income.len(), data.duration.len(), data.length.len(), data.zones.len()
    );
    match data.zone_extent()? {
        Some((lo, hi)) => debug!(target: "main", "O-D rows cover zone ids {lo} to {hi}"),
        None => info!(target: "main", "Trip tables don't contain any O-D rows"),
    }
    let report = check_consistency(&data)?;
    if !report.is_consistent() {
        info!(target: "main", "Zone totals might not match the category charts, see warnings above");
    }

    info!(target: "visualization", "Launching visualization server");
    let server = visualization::build_server(config, cache)?;
    let server_handle = server.handle();
    tokio::spawn(server);

    signal::ctrl_c().await?;
    info!(target: "main", "Received shutdown signal");

    server_handle.stop(true).await;
    debug!(target: "main", "Visualization server stopped");

    Ok(())
}

fn print_startup_message() {
    info!("\n  _____     _         ___           _       _     _\n |_   _| __(_)_ __   |_ _|_ __  ___(_) __ _| |__ | |_ ___\n   | || '__| | '_ \\   | || '_ \\/ __| |/ _` | '_ \\| __/ __|\n   | || |  | | |_) |  | || | | \\__ \\ | (_| | | | | |_\\__ \\\n   |_||_|  |_| .__/  |___|_| |_|___/_|\\__, |_| |_|\\__|___/\n             |_|                      |___/\n O - D   T R I P   A N A L Y T I C S\n");
}

#[derive(thiserror::Error, Debug)]
pub enum TripInsightsError {
    Logging(#[from] log::SetLoggerError),
    Config(#[from] ConfigError),
    DataLoad(#[from] DataLoadError),
    Polars(#[from] PolarsError),
    IO(#[from] std::io::Error),
}

impl Display for TripInsightsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let err: &dyn Display = match self {
            TripInsightsError::Logging(err) => err,
            TripInsightsError::Config(err) => err,
            TripInsightsError::DataLoad(err) => err,
            TripInsightsError::Polars(err) => err,
            TripInsightsError::IO(err) => err,
        };
        let prefix = match self {
            TripInsightsError::Logging(_) => "Initializing logging",
            TripInsightsError::Config(_) => "Reading config file",
            TripInsightsError::DataLoad(_) => "Loading input files",
            TripInsightsError::Polars(_) => "Processing trip tables",
            TripInsightsError::IO(_) => "Error during IO",
        };
        write!(f, "{}: {}", prefix, err)
    }
}
