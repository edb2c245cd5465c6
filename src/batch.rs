//! src/batch.rs
//!
//! Draait GRASP over een map met instanties en een lijst van configuraties,
//! parallel via Rayon (feature `parallel_batch`). Elke taak geeft haar
//! resultaat als waarde terug; de coördinator verzamelt ze en schrijft
//! daarna de CSV en de logbestanden per instantie.

use crate::{
    config::{BatchConfig, ConfigError, Experiment},
    grasp::Grasp,
    instance::{Instance, InstanceError},
};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[cfg(feature = "parallel_batch")]
use rayon::prelude::*;

/// Kopregel van het resultatenbestand.
pub const CSV_HEADER: &str = "Instance,Configuration,Value,Time_Seconds,Feasible";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load instance: {0}")]
    Instance(#[from] InstanceError),

    #[error("no instances found in {}", .0.display())]
    NoInstances(PathBuf),

    #[cfg(feature = "parallel_batch")]
    #[error("could not build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Uitkomst van één (instantie, configuratie)-combinatie.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentResult {
    pub instance: String,
    pub config: String,
    /// Doelwaarde van de incumbent; `None` als de run mislukte of niets vond.
    pub value: Option<f64>,
    pub time_seconds: u64,
    pub feasible: bool,
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

/// Bestandsnaam van `path` als tekst.
fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Alle gewone bestanden in `dir`, gesorteerd op naam.
pub fn discover_instances(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    files.sort();
    Ok(files)
}

fn try_experiment(
    path: &Path,
    config: &BatchConfig,
    experiment: &Experiment,
) -> Result<(Option<f64>, u64, bool), BatchError> {
    let instance = Instance::from_path(path)?;
    let mut grasp = Grasp::new(config.params_for(experiment))?;
    let outcome = grasp.run(&instance);

    let feasible = instance.is_feasible(&outcome.best.solution);
    let value = (!outcome.best.is_empty()).then_some(outcome.best.value);
    Ok((value, outcome.elapsed.as_secs(), feasible))
}

/// Laadt de instantie in `path` en draait één experiment erop. Fouten worden
/// gelogd en leveren een resultaat zonder waarde op.
pub fn run_experiment(path: &Path, config: &BatchConfig, experiment: &Experiment) -> ExperimentResult {
    let instance = display_name(path);
    let mut result = ExperimentResult {
        instance,
        config: experiment.name.clone(),
        value: None,
        time_seconds: 0,
        feasible: false,
    };

    match try_experiment(path, config, experiment) {
        Ok((value, time_seconds, feasible)) => {
            result.value = value;
            result.time_seconds = time_seconds;
            result.feasible = feasible;
        }
        Err(e) => {
            error!(instance = %result.instance, config = %result.config, "run failed: {e}");
        }
    }
    result
}

/// Draait elk experiment op elke instantie; de volgorde van het resultaat is
/// instantie-major, zoals de invoer.
pub fn run_jobs(config: &BatchConfig, instances: &[PathBuf]) -> Vec<ExperimentResult> {
    let jobs: Vec<(&PathBuf, &Experiment)> = instances
        .iter()
        .flat_map(|p| config.experiments.iter().map(move |e| (p, e)))
        .collect();

    #[cfg(feature = "parallel_batch")]
    let results = jobs
        .par_iter()
        .map(|&(p, e)| run_experiment(p, config, e))
        .collect();

    #[cfg(not(feature = "parallel_batch"))]
    let results = jobs
        .iter()
        .map(|&(p, e)| run_experiment(p, config, e))
        .collect();

    results
}

/// Voegt `results` toe aan het CSV-bestand `path`; schrijft de kopregel als
/// het bestand nog niet bestond.
pub fn write_csv(path: impl AsRef<Path>, results: &[ExperimentResult]) -> io::Result<()> {
    let path = path.as_ref();
    let file_exists = path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if !file_exists {
        writeln!(file, "{CSV_HEADER}")?;
    }
    for r in results {
        let value = r
            .value
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "NA".to_string());
        writeln!(
            file,
            "{},{},{},{},{}",
            r.instance,
            r.config,
            value,
            r.time_seconds,
            yes_no(r.feasible)
        )?;
    }
    Ok(())
}

/// Voegt een blok met de resultaten van één instantie toe aan
/// `<dir>/<stam van instance>.log`.
pub fn append_instance_log(
    dir: impl AsRef<Path>,
    instance: &str,
    results: &[ExperimentResult],
) -> io::Result<PathBuf> {
    let stem = Path::new(instance)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(instance);
    let path = dir.as_ref().join(format!("{stem}.log"));
    let mut log = OpenOptions::new().create(true).append(true).open(&path)?;

    writeln!(
        log,
        "=== Execution at {} ===",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(log, "Running instance: {instance}")?;
    for r in results {
        let value = r
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NA".to_string());
        writeln!(
            log,
            "{} -> Value={} Time={}s Feasible={}",
            r.config,
            value,
            r.time_seconds,
            yes_no(r.feasible)
        )?;
    }
    writeln!(log)?;
    Ok(path)
}

/// Voert de volledige batch uit: instanties zoeken, experimenten draaien,
/// logs en CSV schrijven.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<ExperimentResult>, BatchError> {
    config.validate()?;

    let instances = discover_instances(&config.instances_dir)?;
    if instances.is_empty() {
        return Err(BatchError::NoInstances(config.instances_dir.clone()));
    }
    fs::create_dir_all(&config.logs_dir)?;

    info!(
        instances = instances.len(),
        experiments = config.experiments.len(),
        "starting batch"
    );

    #[cfg(feature = "parallel_batch")]
    let results = {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        info!(threads = pool.current_num_threads(), "using worker threads");
        pool.install(|| run_jobs(config, &instances))
    };

    #[cfg(not(feature = "parallel_batch"))]
    let results = run_jobs(config, &instances);

    for path in &instances {
        let name = display_name(path);
        let own: Vec<ExperimentResult> = results
            .iter()
            .filter(|r| r.instance == name)
            .cloned()
            .collect();
        append_instance_log(&config.logs_dir, &name, &own)?;
    }
    write_csv(&config.results_csv, &results)?;

    info!(results = results.len(), csv = %config.results_csv.display(), "batch finished");
    Ok(results)
}
