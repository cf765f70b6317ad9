//! Restriction (dam, culvert, falls) counts per reach.

use std::collections::HashMap;

use fp_core::{ReachId, Real};

/// Number of passage restrictions on each reach.
///
/// Only counts matter to the model, so restriction identities are dropped
/// on the way in. Reaches absent from the table have no restrictions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictionTable {
    counts: HashMap<ReachId, u32>,
    rows: usize,
}

impl RestrictionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(reach, restriction)` rows, one row per restriction.
    ///
    /// Restriction IDs need not be unique; each row counts once.
    pub fn from_rows<I, R, D>(rows: I) -> Self
    where
        I: IntoIterator<Item = (R, D)>,
        R: Into<ReachId>,
    {
        let mut table = Self::new();
        for (reach, _restriction) in rows {
            table.add(reach, 1);
        }
        table
    }

    /// Build from precomputed `(reach, count)` pairs.
    pub fn from_counts<I, R>(counts: I) -> Self
    where
        I: IntoIterator<Item = (R, u32)>,
        R: Into<ReachId>,
    {
        let mut table = Self::new();
        for (reach, count) in counts {
            table.add(reach, count);
        }
        table
    }

    /// Add `count` restrictions to `reach`.
    pub fn add(&mut self, reach: impl Into<ReachId>, count: u32) -> &mut Self {
        let entry = self.counts.entry(reach.into()).or_insert(0);
        *entry = entry.saturating_add(count);
        self.rows = self.rows.saturating_add(count as usize);
        self
    }

    /// Restrictions on `reach` (zero if absent).
    pub fn count(&self, reach: &ReachId) -> u32 {
        self.counts.get(reach).copied().unwrap_or(0)
    }

    /// Surviving fraction after passing every restriction on `reach`.
    ///
    /// `survival^0 == 1`, so unrestricted reaches do not attenuate.
    pub fn attenuation(&self, reach: &ReachId, survival: Real) -> Real {
        match self.count(reach) {
            0 => 1.0,
            k => survival.powi(i32::try_from(k).unwrap_or(i32::MAX)),
        }
    }

    /// Total number of restrictions in the table.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// True if the table holds no restrictions.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of distinct restricted reaches.
    pub fn restricted_reaches(&self) -> usize {
        self.counts.values().filter(|&&c| c > 0).count()
    }
}
