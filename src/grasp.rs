//! src/grasp.rs
//!
//! De GRASP-hoofdlus: herhaal constructie → lokale zoektocht → evaluatie en
//! houd de beste haalbare oplossing (de incumbent) bij, binnen een
//! iteratiebudget en een tijdslimiet.
//!
//! De tijdslimiet wordt alleen tussen iteraties gecontroleerd; een lopende
//! iteratie wordt altijd afgemaakt.
use crate::{
    config::ConfigError,
    construct::ConstructFn,
    instance::Instance,
    local_search::SearchFn,
    params::Params,
    solution::Solution,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// De random-generator van een GRASP-run.
pub type GraspRng = ChaCha8Rng;

/// Beste oplossing tot nu toe, met haar doelwaarde.
#[derive(Clone, Debug, PartialEq)]
pub struct Incumbent {
    pub solution: Solution,
    pub value: f64,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self {
            solution: Solution::empty(),
            value: f64::NEG_INFINITY,
        }
    }
}

impl Incumbent {
    /// `true` zolang er nog geen oplossing is geaccepteerd.
    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    /// Vervangt de incumbent als `value` strikt beter is.
    fn offer(&mut self, solution: Solution, value: f64) -> bool {
        if value > self.value {
            self.solution = solution;
            self.value = value;
            true
        } else {
            false
        }
    }
}

/// Waarom de lus stopte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    IterationLimit,
    TimeLimit,
}

/// Resultaat van één GRASP-run.
#[derive(Clone, Debug)]
pub struct GraspOutcome {
    pub best: Incumbent,
    /// Aantal volledig afgeronde iteraties.
    pub iterations: usize,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
    /// `(iteratie, waarde)` voor elke nieuwe incumbent, 1-gebaseerd.
    pub improvements: Vec<(usize, f64)>,
}

/// Een geconfigureerde GRASP-oplosser met eigen generator.
pub struct Grasp {
    params: Params,
    rng: GraspRng,
    construct: ConstructFn,
    search: SearchFn,
}

/// Seed uit de systeemklok (nanoseconden sinds de epoch).
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

impl Grasp {
    /// Valideert `params`, seedt de generator (met `params.seed` of de klok) en
    /// kiest de constructie- en zoekstrategie.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        params.validate()?;
        let seed = params.seed.unwrap_or_else(clock_seed);
        debug!(seed, "seeding GRASP generator");
        Ok(Self {
            construct: params.construction_method.strategy(),
            search: params.search_method.strategy(),
            rng: GraspRng::seed_from_u64(seed),
            params,
        })
    }

    /// Voert GRASP uit op `instance` en geeft de incumbent met statistieken terug.
    ///
    /// Alleen haalbare oplossingen komen in aanmerking als incumbent; de
    /// incumbent is leeg als geen enkele iteratie een haalbare oplossing opleverde.
    pub fn run(&mut self, instance: &Instance) -> GraspOutcome {
        info!(
            event = "grasp_start",
            alpha = self.params.alpha,
            max_iterations = self.params.max_iterations,
            time_limit = self.params.time_limit,
            construction = %self.params.construction_method,
            search = %self.params.search_method,
            num_sets = instance.num_sets(),
        );

        let start = Instant::now();
        let budget = self.params.time_budget();
        let mut best = Incumbent::default();
        let mut improvements = Vec::new();
        let mut iterations = 0usize;
        let mut stop_reason = StopReason::IterationLimit;

        while iterations < self.params.max_iterations {
            if budget.is_some_and(|b| start.elapsed() >= b) {
                info!(event = "time_limit_reached", iteration = iterations);
                stop_reason = StopReason::TimeLimit;
                break;
            }

            // 1. Constructie
            let constructed = (self.construct)(instance, &self.params, &mut self.rng);

            // 2. Lokale zoektocht
            let improved = (self.search)(instance, constructed);

            // 3. Evaluatie
            let value = instance.evaluate(&improved.solution);
            let feasible = instance.is_feasible(&improved.solution);
            iterations += 1;

            debug!(
                iteration = iterations,
                value,
                feasible,
                moves = improved.moves,
                "iteration finished"
            );

            // 4. Update incumbent
            if feasible && best.offer(improved.solution, value) {
                info!(event = "new_best", iteration = iterations, value);
                improvements.push((iterations, value));
            }

            if iterations % 100 == 0 {
                info!(event = "progress", iteration = iterations, best_value = best.value);
            }
        }

        let elapsed = start.elapsed();
        info!(
            event = "grasp_end",
            best_value = best.value,
            iterations,
            elapsed_ms = elapsed.as_millis() as u64,
        );

        GraspOutcome {
            best,
            iterations,
            elapsed,
            stop_reason,
            improvements,
        }
    }

    /// Zoals [`Grasp::run`], maar geeft alleen de beste oplossing terug.
    pub fn solve(&mut self, instance: &Instance) -> Solution {
        self.run(instance).best.solution
    }
}
