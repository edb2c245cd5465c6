//! src/cover.rs
//!
//! Houdt bij welke elementen van het universum nog niet gedekt zijn tijdens
//! één constructie. Intern een `BitVec` over de universumposities van de
//! instantie; de verzameling krimpt monotoon.

use crate::instance::Instance;
use bitvec::prelude::*;

/// Handmatige intersectie-telling tussen twee bitslices van gelijke lengte.
pub(crate) fn count_intersecting_ones(a: &BitSlice, b: &BitSlice) -> usize {
    a.iter()
        .by_vals()
        .zip(b.iter().by_vals())
        .filter(|&(x, y)| x && y)
        .count()
}

/// De nog ongedekte elementen van het universum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UncoveredSet {
    missing: BitVec,
}

impl UncoveredSet {
    /// Start met het volledige universum van `instance` als ongedekt.
    pub fn new(instance: &Instance) -> Self {
        Self {
            missing: bitvec![1; instance.universe_size()],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.missing.not_any()
    }

    /// Aantal nog ongedekte elementen.
    #[inline]
    pub fn len(&self) -> usize {
        self.missing.count_ones()
    }

    /// Aantal ongedekte elementen dat set `set` zou afdekken.
    #[inline]
    pub fn gain(&self, instance: &Instance, set: usize) -> usize {
        count_intersecting_ones(instance.coverage_mask(set), &self.missing)
    }

    /// Verwijdert alle elementen van `set`. Reeds gedekte elementen blijven gedekt.
    pub fn cover(&mut self, instance: &Instance, set: usize) {
        for pos in instance.coverage_mask(set).iter_ones() {
            self.missing.set(pos, false);
        }
    }
}
