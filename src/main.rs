//! src/main.rs
//!
//! Batch-runner: `scqbf [CONFIG.toml]`. Zonder argument worden de
//! standaardinstellingen gebruikt (map `instances/`, één configuratie).

use scqbf::batch::run_batch;
use scqbf::config::BatchConfig;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> ExitCode {
    enable_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => match BatchConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("could not load configuration '{path}': {e}");
                return ExitCode::FAILURE;
            }
        },
        None => BatchConfig::default(),
    };

    match run_batch(&config) {
        Ok(results) => {
            let feasible = results.iter().filter(|r| r.feasible).count();
            tracing::info!("{} runs finished, {} feasible", results.len(), feasible);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("batch failed: {e}");
            ExitCode::FAILURE
        }
    }
}
