//! src/config.rs
//!
//! Configuratie voor batch-experimenten, in te lezen uit TOML.
//!
//! ```
//! use scqbf::config::BatchConfig;
//!
//! let config = BatchConfig::from_toml_str(r#"
//!     instances_dir = "instances"
//!     max_iterations = 500
//!     time_limit = 60.0
//!
//!     [[experiments]]
//!     name = "SAMPLED+BEST"
//!     construction_method = "sampled_greedy"
//!     search_method = "best_improving"
//!     alpha = 0.2
//! "#).unwrap();
//!
//! assert_eq!(config.experiments.len(), 1);
//! assert_eq!(config.max_iterations, 500);
//! ```

use crate::params::{ConstructionMethod, Params, SearchMethod};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuratiefout.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown {kind} method '{name}'")]
    UnknownMethod { kind: &'static str, name: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Eén benoemde GRASP-configuratie binnen een batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    #[serde(default)]
    pub construction_method: ConstructionMethod,
    #[serde(default)]
    pub search_method: SearchMethod,
    pub alpha: f64,
    #[serde(default = "default_inclusion_probability")]
    pub random_inclusion_probability: f64,
}

fn default_inclusion_probability() -> f64 {
    Params::default().random_inclusion_probability
}

/// Instellingen voor een volledige batch: welke instanties, welke
/// configuraties, en waar de resultaten terechtkomen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BatchConfig {
    pub instances_dir: PathBuf,
    /// CSV-bestand waaraan resultaten worden toegevoegd.
    pub results_csv: PathBuf,
    /// Map voor de logbestanden per instantie.
    pub logs_dir: PathBuf,
    /// Aantal worker-threads; `None` gebruikt alle beschikbare cores.
    pub threads: Option<usize>,
    pub max_iterations: usize,
    pub time_limit: f64,
    pub seed: Option<u64>,
    pub experiments: Vec<Experiment>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            instances_dir: PathBuf::from("instances"),
            results_csv: PathBuf::from("results.csv"),
            logs_dir: PathBuf::from("logs"),
            threads: None,
            max_iterations: 10_000,
            time_limit: 600.0, // 10 minuten
            seed: None,
            experiments: vec![Experiment {
                name: "STANDARD+ALPHA".to_string(),
                construction_method: ConstructionMethod::Standard,
                search_method: SearchMethod::FirstImproving,
                alpha: 0.3,
                random_inclusion_probability: default_inclusion_probability(),
            }],
        }
    }
}

impl BatchConfig {
    /// Laadt de configuratie uit een TOML-bestand.
    ///
    /// # Errors
    ///
    /// Geeft een fout als het bestand niet bestaat, ongeldige TOML bevat of
    /// parameters buiten hun bereik heeft.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parset en valideert de configuratie uit een TOML-string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// De GRASP-parameters voor `experiment`, met de budgetten van deze batch.
    pub fn params_for(&self, experiment: &Experiment) -> Params {
        Params {
            alpha: experiment.alpha,
            max_iterations: self.max_iterations,
            time_limit: self.time_limit,
            construction_method: experiment.construction_method,
            search_method: experiment.search_method,
            random_inclusion_probability: experiment.random_inclusion_probability,
            seed: self.seed,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.experiments.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one experiment must be configured".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid("threads must be at least 1".to_string()));
        }
        for experiment in &self.experiments {
            self.params_for(experiment).validate().map_err(|e| match e {
                ConfigError::Invalid(msg) => {
                    ConfigError::Invalid(format!("experiment '{}': {msg}", experiment.name))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}
