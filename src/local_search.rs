// Bestand: src/local_search.rs
//!
//! Implementeert de verbeterfase van GRASP: lokale zoektocht over de flip- en
//! swap-omgeving, met first-improving of best-improving acceptatie.
//!
//! Een buur wordt alleen geaccepteerd als hij haalbaar is (volledige dekking)
//! en een strikt hogere doelwaarde heeft. Een onhaalbare startoplossing wordt
//! dus nooit expliciet gerepareerd.
use crate::{instance::Instance, params::SearchMethod, solution::Solution};

/// Toestand van één lokale zoektocht.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Improving,
    /// Geen enkele flip of swap verbetert de oplossing nog haalbaar.
    Converged,
}

/// Een zet in de flip+swap omgeving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Flip(usize),
    Swap(usize, usize),
}

impl Move {
    /// Past de zet toe op een kopie van `sol`.
    pub fn apply(self, sol: &Solution) -> Solution {
        match self {
            Move::Flip(i) => sol.flipped(i),
            Move::Swap(i, j) => sol.swapped(i, j),
        }
    }
}

/// Resultaat van een lokale zoektocht.
#[derive(Clone, Debug)]
pub struct LocalSearchOutcome {
    pub solution: Solution,
    pub value: f64,
    /// Aantal geaccepteerde zetten.
    pub moves: usize,
    /// Doelwaarde na elke geaccepteerde zet.
    pub trajectory: Vec<f64>,
}

impl LocalSearchOutcome {
    fn start(instance: &Instance, solution: Solution) -> Self {
        let value = instance.evaluate(&solution);
        Self {
            solution,
            value,
            moves: 0,
            trajectory: Vec::new(),
        }
    }

    fn accept(&mut self, solution: Solution, value: f64) {
        self.solution = solution;
        self.value = value;
        self.moves += 1;
        self.trajectory.push(value);
    }
}

/// Een lokale-zoekstrategie, eenmalig gekozen bij het configureren van GRASP.
pub type SearchFn = fn(&Instance, Solution) -> LocalSearchOutcome;

impl SearchMethod {
    pub fn strategy(self) -> SearchFn {
        match self {
            SearchMethod::FirstImproving => first_improving,
            SearchMethod::BestImproving => best_improving,
        }
    }
}

/*────────── Neighbourhoods ──────────*/

/// Alle flips, in indexvolgorde.
pub fn flip_moves(n: usize) -> impl Iterator<Item = Move> {
    (0..n).map(Move::Flip)
}

/// Alle swaps `(i, j)` met `i < j` en verschillende bits, lexicografisch.
pub fn swap_moves(sol: &Solution) -> impl Iterator<Item = Move> + '_ {
    let n = sol.len();
    (0..n).flat_map(move |i| {
        (i + 1..n)
            .filter(move |&j| sol.is_selected(i) != sol.is_selected(j))
            .map(move |j| Move::Swap(i, j))
    })
}

/// Eerst de flip-omgeving, daarna de swap-omgeving.
fn neighbourhood(sol: &Solution) -> impl Iterator<Item = Move> + '_ {
    flip_moves(sol.len()).chain(swap_moves(sol))
}

/// Waarde van een buur als die haalbaar is.
#[inline]
fn feasible_value(instance: &Instance, neighbour: &Solution) -> Option<f64> {
    if instance.is_feasible(neighbour) {
        Some(instance.evaluate(neighbour))
    } else {
        None
    }
}

/*────────── First-improving ──────────*/

/// De eerste strikt verbeterende, haalbare buur in scanvolgorde.
fn first_improvement(instance: &Instance, sol: &Solution, current: f64) -> Option<(Solution, f64)> {
    neighbourhood(sol).find_map(|mv| {
        let neighbour = mv.apply(sol);
        match feasible_value(instance, &neighbour) {
            Some(value) if value > current => Some((neighbour, value)),
            _ => None,
        }
    })
}

/// Accepteert telkens de eerste verbetering en begint de scan opnieuw bovenaan
/// de flip-omgeving. Swaps worden pas bekeken als geen flip verbetert.
pub fn first_improving(instance: &Instance, solution: Solution) -> LocalSearchOutcome {
    let mut outcome = LocalSearchOutcome::start(instance, solution);
    let mut state = SearchState::Improving;

    while state == SearchState::Improving {
        state = match first_improvement(instance, &outcome.solution, outcome.value) {
            Some((neighbour, value)) => {
                outcome.accept(neighbour, value);
                SearchState::Improving
            }
            None => SearchState::Converged,
        };
    }
    outcome
}

/*────────── Best-improving ──────────*/

/// De beste strikt verbeterende, haalbare buur over de hele omgeving.
/// Bij gelijke waarde wint de eerst gevonden buur.
fn best_improvement(instance: &Instance, sol: &Solution, current: f64) -> Option<(Solution, f64)> {
    let mut best: Option<(Solution, f64)> = None;
    let mut best_value = current;

    for mv in neighbourhood(sol) {
        let neighbour = mv.apply(sol);
        if let Some(value) = feasible_value(instance, &neighbour) {
            if value > best_value {
                best_value = value;
                best = Some((neighbour, value));
            }
        }
    }
    best
}

/// Scant elke iteratie de volledige flip- en swap-omgeving en accepteert de
/// beste verbetering.
pub fn best_improving(instance: &Instance, solution: Solution) -> LocalSearchOutcome {
    let mut outcome = LocalSearchOutcome::start(instance, solution);
    let mut state = SearchState::Improving;

    while state == SearchState::Improving {
        state = match best_improvement(instance, &outcome.solution, outcome.value) {
            Some((neighbour, value)) => {
                outcome.accept(neighbour, value);
                SearchState::Improving
            }
            None => SearchState::Converged,
        };
    }
    outcome
}
