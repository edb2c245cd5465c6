//! src/solution.rs
//!
//! Representeert een kandidaat-oplossing voor MAX-SC-QBF: één bit per set,
//! waarbij bit `i` aangeeft of set `i` geselecteerd is. Buren worden altijd als
//! onafhankelijke kopie gebouwd (`clone`), nooit als alias van de incumbent.

use bitvec::prelude::*;
use std::fmt;

/// Een binaire selectie van sets met vaste lengte.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    bits: BitVec,
}

impl Solution {
    /*────────── Constructors ──────────*/

    /// Creëert een oplossing voor `n` sets waarin niets geselecteerd is.
    pub fn new(n: usize) -> Self {
        Self {
            bits: bitvec![0; n],
        }
    }

    /// De lege oplossing (lengte 0), startwaarde van de incumbent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bouwt een oplossing van lengte `n` met de gegeven sets geselecteerd.
    pub fn from_indices(n: usize, selected: &[usize]) -> Self {
        let mut sol = Self::new(n);
        for &i in selected {
            sol.select(i);
        }
        sol
    }

    /*────────── Queries ──────────*/

    /// Aantal sets waarvoor deze oplossing een bit heeft.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` voor de lege oplossing (lengte 0).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn is_selected(&self, i: usize) -> bool {
        self.bits[i]
    }

    /// Aantal geselecteerde sets.
    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Geeft een onveranderlijke slice van de onderliggende bits.
    #[inline]
    pub fn bitset(&self) -> &BitSlice {
        &self.bits
    }

    /// Itereert over de indices van de geselecteerde sets, oplopend.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Verzamelt de geselecteerde indices in een vector.
    pub fn to_indices(&self) -> Vec<usize> {
        self.selected().collect()
    }

    /*────────── Mutators ──────────*/

    /// Selecteert set `i`. Negeert de operatie als `i` al geselecteerd is.
    #[inline]
    pub fn select(&mut self, i: usize) {
        self.bits.set(i, true);
    }

    /// Zet bit `i` om (0 -> 1 of 1 -> 0).
    #[inline]
    pub fn flip(&mut self, i: usize) {
        let v = self.bits[i];
        self.bits.set(i, !v);
    }

    /// Verwisselt de bits op posities `i` en `j`.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.bits.swap(i, j);
    }

    /*────────── Neighbours ──────────*/

    /// Kopie van deze oplossing met bit `i` omgezet.
    pub fn flipped(&self, i: usize) -> Self {
        let mut neighbour = self.clone();
        neighbour.flip(i);
        neighbour
    }

    /// Kopie van deze oplossing met bits `i` en `j` verwisseld.
    pub fn swapped(&self, i: usize, j: usize) -> Self {
        let mut neighbour = self.clone();
        neighbour.swap(i, j);
        neighbour
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (k, i) in self.selected().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{i}")?;
        }
        write!(f, "}}")
    }
}
