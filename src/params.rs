//! src/params.rs
//!
//! Bundelt alle afstembare parameters voor één GRASP-run.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Constructiestrategie voor de greedy-gerandomiseerde fase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionMethod {
    /// RCL over alle kandidaten, uniforme keuze uit de RCL.
    #[default]
    Standard,
    /// Willekeurige inclusie per set, daarna pure greedy aanvulling.
    RandomPlusGreedy,
    /// RCL over een willekeurige steekproef van `max(1, n/4)` kandidaten.
    SampledGreedy,
}

/// Acceptatiebeleid van de lokale zoektocht.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    #[default]
    FirstImproving,
    BestImproving,
}

impl ConstructionMethod {
    pub const ALL: [ConstructionMethod; 3] = [
        ConstructionMethod::Standard,
        ConstructionMethod::RandomPlusGreedy,
        ConstructionMethod::SampledGreedy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConstructionMethod::Standard => "standard",
            ConstructionMethod::RandomPlusGreedy => "random_plus_greedy",
            ConstructionMethod::SampledGreedy => "sampled_greedy",
        }
    }
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 2] = [SearchMethod::FirstImproving, SearchMethod::BestImproving];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMethod::FirstImproving => "first_improving",
            SearchMethod::BestImproving => "best_improving",
        }
    }
}

impl fmt::Display for ConstructionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstructionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMethod {
                kind: "construction",
                name: s.to_string(),
            })
    }
}

impl FromStr for SearchMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMethod {
                kind: "search",
                name: s.to_string(),
            })
    }
}

/// Alle afstembare besturingselementen voor GRASP.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Params {
    /// RCL-parameter in `[0, 1]`: 0 is puur greedy, 1 is puur willekeurig.
    pub alpha: f64,
    pub max_iterations: usize,
    /// Tijdslimiet in seconden (wandklok), gecontroleerd tussen iteraties.
    pub time_limit: f64,
    pub construction_method: ConstructionMethod,
    pub search_method: SearchMethod,
    /// Inclusiekans per set in de willekeurige fase van `RandomPlusGreedy`.
    pub random_inclusion_probability: f64,
    /// Vaste seed; `None` seedt vanuit de systeemklok.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            alpha: 0.1,
            max_iterations: 1_000,
            time_limit: 1_800.0, // 30 minuten
            construction_method: ConstructionMethod::Standard,
            search_method: SearchMethod::FirstImproving,
            random_inclusion_probability: 0.3,
            seed: None,
        }
    }
}

impl Params {
    pub fn new(
        alpha: f64,
        max_iterations: usize,
        time_limit: f64,
        construction_method: ConstructionMethod,
        search_method: SearchMethod,
    ) -> Self {
        Self {
            alpha,
            max_iterations,
            time_limit,
            construction_method,
            search_method,
            ..Self::default()
        }
    }

    /// Legt de seed vast voor reproduceerbare runs.
    pub fn with_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_random_inclusion_probability(&mut self, probability: f64) -> &mut Self {
        self.random_inclusion_probability = probability;
        self
    }

    /// De tijdslimiet als `Duration`; `None` als de limiet oneindig is.
    pub fn time_budget(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.time_limit).ok()
    }

    /// Controleert de bereiken van alle parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ConfigError::Invalid(format!(
                "alpha must lie in [0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.random_inclusion_probability) {
            return Err(ConfigError::Invalid(format!(
                "random_inclusion_probability must lie in [0, 1], got {}",
                self.random_inclusion_probability
            )));
        }
        if self.time_limit.is_nan() || self.time_limit < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_limit must be a non-negative number of seconds, got {}",
                self.time_limit
            )));
        }
        Ok(())
    }
}
