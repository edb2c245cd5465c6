//! src/rcl.rs
//!
//! Bouwt de Restricted Candidate List uit een gerangschikte kandidatenlijst.

use crate::score::CandidateBenefit;

/// Geeft de indices terug van alle kandidaten met een waarde binnen
/// `alpha · (max - min)` van de beste waarde, in rangvolgorde.
///
/// Hier betekent `alpha = 0` puur greedy en `alpha = 1` puur willekeurig; in
/// een drempel van de vorm `min + alpha·(max - min)` is die betekenis omgekeerd.
///
/// `ranked` moet aflopend gesorteerd zijn (zie [`crate::score::rank`]). Een lege
/// invoer geeft een lege RCL; de beste kandidaat zit er altijd in.
pub fn build_rcl(ranked: &[CandidateBenefit], alpha: f64) -> Vec<usize> {
    let (Some(first), Some(last)) = (ranked.first(), ranked.last()) else {
        return Vec::new();
    };
    let max_benefit = first.score;
    let min_benefit = last.score;

    // Gelijk aan max - alpha·(max - min), maar exact op de randen alpha = 0 en 1.
    let threshold = if alpha <= 0.0 {
        max_benefit
    } else {
        (min_benefit + (1.0 - alpha) * (max_benefit - min_benefit)).min(max_benefit)
    };

    ranked
        .iter()
        .filter(|c| c.score >= threshold)
        .map(|c| c.index)
        .collect()
}
