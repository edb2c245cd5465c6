//! src/construct.rs
//!
//! Heuristieken voor het construeren van een initiële selectie van sets.
//!
//! • `construct_standard`          – RCL over alle kandidaten
//! • `construct_random_plus_greedy` – willekeurige inclusie + greedy aanvulling
//! • `construct_sampled_greedy`     – RCL over een steekproef van kandidaten
//!
//! Alle drie stoppen zodra het universum gedekt is, of zodra geen enkele
//! ongeselecteerde set nog een ongedekt element kan afdekken. In dat laatste
//! geval wordt de (onhaalbare) oplossing zonder reparatie teruggegeven.
use crate::{
    cover::UncoveredSet,
    grasp::GraspRng,
    instance::Instance,
    params::{ConstructionMethod, Params},
    rcl::build_rcl,
    score::{candidate_benefit, score_candidates},
    solution::Solution,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Een constructiestrategie, eenmalig gekozen bij het configureren van GRASP.
pub type ConstructFn = fn(&Instance, &Params, &mut GraspRng) -> Solution;

impl ConstructionMethod {
    /// De functie die deze strategie implementeert.
    pub fn strategy(self) -> ConstructFn {
        match self {
            ConstructionMethod::Standard => construct_standard::<GraspRng>,
            ConstructionMethod::RandomPlusGreedy => construct_random_plus_greedy::<GraspRng>,
            ConstructionMethod::SampledGreedy => construct_sampled_greedy::<GraspRng>,
        }
    }
}

/// Steekproefgrootte voor `SampledGreedy`: een kwart van de sets, minstens 1.
#[inline]
pub fn sample_size(num_sets: usize) -> usize {
    (num_sets / 4).max(1)
}

/// Kan een nog ongeselecteerde set minstens één ongedekt element afdekken?
fn can_progress(instance: &Instance, sol: &Solution, uncovered: &UncoveredSet) -> bool {
    sol.bitset()
        .iter_zeros()
        .any(|i| uncovered.gain(instance, i) > 0)
}

/// Moet de constructie verder? Logt een stagnatie als het universum niet gedekt is.
fn keep_going(instance: &Instance, sol: &Solution, uncovered: &UncoveredSet) -> bool {
    if uncovered.is_empty() {
        return false;
    }
    if !can_progress(instance, sol, uncovered) {
        debug!(
            uncovered = uncovered.len(),
            selected = sol.count(),
            "construction stalled, returning partial solution"
        );
        return false;
    }
    true
}

fn add_set(instance: &Instance, sol: &mut Solution, uncovered: &mut UncoveredSet, i: usize) {
    sol.select(i);
    uncovered.cover(instance, i);
}

/*───────────────────────────────────────────────────────────*/
/*  Standard                                                 */
/*───────────────────────────────────────────────────────────*/

/// Waardeert in elke stap alle ongeselecteerde sets, bouwt de RCL en kiest
/// daar uniform willekeurig uit.
pub fn construct_standard<R>(instance: &Instance, params: &Params, rng: &mut R) -> Solution
where
    R: Rng + ?Sized,
{
    let mut sol = Solution::new(instance.num_sets());
    let mut uncovered = UncoveredSet::new(instance);

    while keep_going(instance, &sol, &uncovered) {
        let ranked = score_candidates(instance, &sol, sol.bitset().iter_zeros(), &uncovered);
        let rcl = build_rcl(&ranked, params.alpha);

        if let Some(&chosen) = rcl.choose(rng) {
            add_set(instance, &mut sol, &mut uncovered, chosen);
        } else {
            // Lege RCL: geen kandidaten meer.
            break;
        }
    }
    sol
}

/*───────────────────────────────────────────────────────────*/
/*  Random-plus-greedy                                       */
/*───────────────────────────────────────────────────────────*/

/// 1. Neem elke set onafhankelijk op met kans `random_inclusion_probability`.
/// 2. Vul greedy aan: steeds de kandidaat met de hoogste waarde (de eerste bij
///    een gelijke stand), zonder RCL en zonder willekeur.
pub fn construct_random_plus_greedy<R>(instance: &Instance, params: &Params, rng: &mut R) -> Solution
where
    R: Rng + ?Sized,
{
    let n = instance.num_sets();
    let mut sol = Solution::new(n);
    let mut uncovered = UncoveredSet::new(instance);

    // 1. Willekeurige fase.
    for i in 0..n {
        if rng.gen_bool(params.random_inclusion_probability) {
            add_set(instance, &mut sol, &mut uncovered, i);
        }
    }

    // 2. Greedy fase.
    while keep_going(instance, &sol, &uncovered) {
        let mut best: Option<(usize, f64)> = None;
        for i in sol.bitset().iter_zeros() {
            let benefit = candidate_benefit(instance, &sol, i, &uncovered);
            if best.map_or(true, |(_, b)| benefit > b) {
                best = Some((i, benefit));
            }
        }

        match best {
            Some((chosen, _)) => add_set(instance, &mut sol, &mut uncovered, chosen),
            None => break,
        }
    }
    sol
}

/*───────────────────────────────────────────────────────────*/
/*  Sampled-greedy                                           */
/*───────────────────────────────────────────────────────────*/

/// Trekt in elke stap een steekproef van `max(1, n/4)` ongeselecteerde sets
/// (schudden en afkappen), waardeert alleen die, en kiest uit hun RCL.
pub fn construct_sampled_greedy<R>(instance: &Instance, params: &Params, rng: &mut R) -> Solution
where
    R: Rng + ?Sized,
{
    let n = instance.num_sets();
    let size = sample_size(n);
    let mut sol = Solution::new(n);
    let mut uncovered = UncoveredSet::new(instance);

    while keep_going(instance, &sol, &uncovered) {
        let mut sample: Vec<usize> = sol.bitset().iter_zeros().collect();
        if sample.is_empty() {
            break;
        }
        sample.shuffle(rng);
        sample.truncate(size);

        let ranked = score_candidates(instance, &sol, sample, &uncovered);
        let rcl = build_rcl(&ranked, params.alpha);

        if let Some(&chosen) = rcl.choose(rng) {
            add_set(instance, &mut sol, &mut uncovered, chosen);
        } else {
            break;
        }
    }
    sol
}
