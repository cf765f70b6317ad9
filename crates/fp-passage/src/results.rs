//! Per-origin passage results.

use std::collections::{BTreeMap, HashMap};

use fp_core::{ReachId, Real};

/// Remaining population at one reach.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachFraction {
    pub reach: ReachId,
    /// Remaining population in percent (0-100 scale)
    pub remaining: Real,
}

/// Everything reached upstream of a single origin before the cutoff.
///
/// The origin is always the first record, whatever its own percentage.
/// Every other record is strictly above the cutoff. In braided networks a
/// reach reachable along several paths is recorded once per path; summing
/// those is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PassageResult {
    origin: ReachId,
    records: Vec<ReachFraction>,
    first_seen: HashMap<ReachId, usize>,
}

impl PassageResult {
    pub(crate) fn new(origin: ReachId, remaining: Real) -> Self {
        let mut result = Self {
            origin: origin.clone(),
            records: Vec::new(),
            first_seen: HashMap::new(),
        };
        result.record(origin, remaining);
        result
    }

    pub(crate) fn record(&mut self, reach: ReachId, remaining: Real) {
        self.first_seen
            .entry(reach.clone())
            .or_insert(self.records.len());
        self.records.push(ReachFraction { reach, remaining });
    }

    /// The origin this result is named after.
    pub fn origin(&self) -> &ReachId {
        &self.origin
    }

    /// Remaining percentage at the origin itself (after its own restrictions).
    pub fn origin_remaining(&self) -> Real {
        self.records[0].remaining
    }

    /// All records in discovery (breadth-first) order.
    pub fn records(&self) -> &[ReachFraction] {
        &self.records
    }

    /// Remaining percentage at `reach`, from the first path that reached it.
    ///
    /// In braided networks a reach can carry several records, one per path;
    /// this returns only the first. Use [`PassageResult::fractions`] for all
    /// of them, or sum tables per reach with `fp_results::combine_by_reach`.
    pub fn fraction(&self, reach: &ReachId) -> Option<Real> {
        self.first_seen
            .get(reach)
            .map(|&idx| self.records[idx].remaining)
    }

    /// Every recorded percentage at `reach`, in discovery order.
    pub fn fractions<'r>(&'r self, reach: &'r ReachId) -> impl Iterator<Item = Real> + 'r {
        self.records
            .iter()
            .filter(move |r| &r.reach == reach)
            .map(|r| r.remaining)
    }

    /// Total percentage at `reach` summed over every path.
    pub fn total_fraction(&self, reach: &ReachId) -> Real {
        self.fractions(reach).sum()
    }

    /// True if `reach` was reached before the cutoff.
    pub fn contains(&self, reach: &ReachId) -> bool {
        self.first_seen.contains_key(reach)
    }

    /// Number of records (at least one: the origin).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Never true; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct reaches reached.
    pub fn distinct_reaches(&self) -> usize {
        self.first_seen.len()
    }

    /// `(reach, remaining percent)` rows, the natural tabular output.
    pub fn to_table(&self) -> Vec<(ReachId, Real)> {
        self.records
            .iter()
            .map(|r| (r.reach.clone(), r.remaining))
            .collect()
    }
}

/// One labeled result per origin, ordered by origin ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassageResults {
    by_origin: BTreeMap<ReachId, PassageResult>,
}

impl PassageResults {
    /// Collect per-origin results.
    pub fn collect(results: impl IntoIterator<Item = PassageResult>) -> Self {
        results.into_iter().collect()
    }

    /// Result for `origin`.
    pub fn get(&self, origin: &ReachId) -> Option<&PassageResult> {
        self.by_origin.get(origin)
    }

    /// Iterate results in origin order.
    pub fn iter(&self) -> impl Iterator<Item = &PassageResult> {
        self.by_origin.values()
    }

    /// Iterate origins in order.
    pub fn origins(&self) -> impl Iterator<Item = &ReachId> {
        self.by_origin.keys()
    }

    /// Number of origins.
    pub fn len(&self) -> usize {
        self.by_origin.len()
    }

    /// True if no origin was traced.
    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }

    /// Total records across all origins.
    pub fn total_records(&self) -> usize {
        self.by_origin.values().map(PassageResult::len).sum()
    }

    /// Consume into the underlying origin-keyed map.
    pub fn into_map(self) -> BTreeMap<ReachId, PassageResult> {
        self.by_origin
    }
}

impl FromIterator<PassageResult> for PassageResults {
    fn from_iter<T: IntoIterator<Item = PassageResult>>(iter: T) -> Self {
        Self {
            by_origin: iter
                .into_iter()
                .map(|result| (result.origin.clone(), result))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PassageResults {
    type Item = &'a PassageResult;
    type IntoIter = std::collections::btree_map::Values<'a, ReachId, PassageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_origin.values()
    }
}
