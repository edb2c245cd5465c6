//! src/score.rs
//!
//! Greedy-waardering van een kandidaat-set tijdens de constructie. De waarde
//! combineert dekkingsvoortgang (zwaar gewogen), de lineaire coëfficiënt en de
//! interacties met de reeds geselecteerde sets.

use crate::{cover::UncoveredSet, instance::Instance, solution::Solution};

/// Gewicht per nieuw gedekt element; domineert de doelfunctietermen.
pub const COVERAGE_WEIGHT: f64 = 100.0;

/// Een kandidaat met zijn greedy-waarde, vers berekend per constructiestap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateBenefit {
    pub score: f64,
    pub index: usize,
}

/// Berekent de greedy-waarde van het toevoegen van `candidate` aan `sol`.
///
/// `100 · |S_c ∩ U| + a_cc + Σ_{i ∈ sol} a_min(i,c),max(i,c)`
pub fn candidate_benefit(
    instance: &Instance,
    sol: &Solution,
    candidate: usize,
    uncovered: &UncoveredSet,
) -> f64 {
    let coverage = uncovered.gain(instance, candidate) as f64 * COVERAGE_WEIGHT;
    let linear = instance.linear_coefficient(candidate);
    let quadratic: f64 = sol
        .selected()
        .map(|i| instance.quadratic_coefficient(i.min(candidate), i.max(candidate)))
        .sum();
    coverage + linear + quadratic
}

/// Sorteert aflopend op waarde; bij gelijke waarde komt de hoogste index eerst.
pub fn rank(benefits: &mut [CandidateBenefit]) {
    benefits.sort_unstable_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.index.cmp(&a.index))
    });
}

/// Waardeert alle `candidates` en geeft ze gerangschikt terug.
pub fn score_candidates<I>(
    instance: &Instance,
    sol: &Solution,
    candidates: I,
    uncovered: &UncoveredSet,
) -> Vec<CandidateBenefit>
where
    I: IntoIterator<Item = usize>,
{
    let mut benefits: Vec<CandidateBenefit> = candidates
        .into_iter()
        .map(|index| CandidateBenefit {
            score: candidate_benefit(instance, sol, index, uncovered),
            index,
        })
        .collect();
    rank(&mut benefits);
    benefits
}
