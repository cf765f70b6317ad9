//! The upstream passage traversal.

use std::collections::VecDeque;

use fp_core::{FpError, FpResult, ReachId, ReachSet, Real};
use fp_graph::ReachGraph;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::params::{INITIAL_POPULATION, PassageParams};
use crate::restrictions::RestrictionTable;
use crate::results::{PassageResult, PassageResults};
use crate::splitting::SplittingAttribute;

/// A validated passage model over read-only inputs.
///
/// The graph may be pre-pruned to a habitat subnetwork
/// (see [`ReachGraph::habitat_subnetwork`]). Nothing here is mutated while
/// tracing, so origins can be traced concurrently.
#[derive(Debug, Clone)]
pub struct PassageModel<'a> {
    graph: &'a ReachGraph,
    restrictions: &'a RestrictionTable,
    splitting: &'a SplittingAttribute,
    params: PassageParams,
}

impl<'a> PassageModel<'a> {
    /// Validate inputs and build a model.
    pub fn new(
        graph: &'a ReachGraph,
        restrictions: &'a RestrictionTable,
        splitting: &'a SplittingAttribute,
        params: PassageParams,
    ) -> FpResult<Self> {
        params.validate()?;
        if graph.edge_count() == 0 {
            return Err(FpError::invalid("from-to edge set has length zero"));
        }
        if restrictions.is_empty() {
            return Err(FpError::invalid("restriction table has length zero"));
        }

        Ok(Self {
            graph,
            restrictions,
            splitting,
            params,
        })
    }

    /// Parameters this model runs with.
    pub fn params(&self) -> &PassageParams {
        &self.params
    }

    /// Trace every origin, one independent traversal each.
    ///
    /// Any failing origin aborts the whole run; no partial results are
    /// returned.
    pub fn run(&self, origins: &ReachSet) -> FpResult<PassageResults> {
        if origins.is_empty() {
            return Err(FpError::invalid("origin list has length zero"));
        }

        info!(
            origins = origins.len(),
            pass_rate = self.params.pass_rate,
            cutoff = self.params.cutoff,
            splitting = %self.splitting.describe(),
            "Running passage model"
        );

        let results = origins
            .par_iter()
            .map(|origin| self.trace_origin(origin))
            .collect::<FpResult<Vec<PassageResult>>>()?;

        let results = PassageResults::collect(results);
        info!(
            origins = results.len(),
            records = results.total_records(),
            "Passage model complete"
        );
        Ok(results)
    }

    /// Breadth-first walk upstream from a single origin.
    pub fn trace_origin(&self, origin: &ReachId) -> FpResult<PassageResult> {
        debug!(origin = %origin, "Analyzing passage upstream of origin");

        let survival = self.params.survival();
        let start = INITIAL_POPULATION * self.restrictions.attenuation(origin, survival);

        let mut result = PassageResult::new(origin.clone(), start);
        let mut queue: VecDeque<(ReachId, Real)> = VecDeque::new();
        queue.push_back((origin.clone(), start));

        let mut steps = 0_usize;
        while let Some((reach, remaining)) = queue.pop_front() {
            if steps == self.params.max_steps {
                return Err(FpError::CycleSuspected {
                    origin: origin.clone(),
                    steps,
                });
            }
            steps += 1;

            let upstream = self.graph.upstream_of(&reach);
            let shares = match upstream.len() {
                // Branch tip
                0 => continue,
                1 => vec![1.0],
                _ => self.splitting.shares(upstream)?,
            };

            for (up, share) in upstream.iter().zip(shares) {
                let passed = remaining * share * self.restrictions.attenuation(up, survival);
                if passed > self.params.cutoff {
                    result.record(up.clone(), passed);
                    queue.push_back((up.clone(), passed));
                }
            }
        }

        debug!(
            origin = %origin,
            reaches = result.len(),
            steps,
            "Origin traced"
        );
        Ok(result)
    }
}

/// Run the passage model with default step cap.
///
/// `pass_rate` is the percent surviving one restriction (0-100) and
/// `cutoff` the percent at or below which a branch is dropped (1-100).
pub fn run_passage_model(
    restrictions: &RestrictionTable,
    origins: &ReachSet,
    graph: &ReachGraph,
    pass_rate: Real,
    cutoff: Real,
    splitting: &SplittingAttribute,
) -> FpResult<PassageResults> {
    let params = PassageParams::new(pass_rate, cutoff);
    PassageModel::new(graph, restrictions, splitting, params)?.run(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::{Tolerances, nearly_equal};

    fn id(v: u64) -> ReachId {
        ReachId::from(v)
    }

    fn origins(values: &[u64]) -> ReachSet {
        values.iter().map(|&v| id(v)).collect()
    }

    /// Dam table with one restriction far away from the reaches under test.
    fn remote_dam() -> RestrictionTable {
        RestrictionTable::from_rows([(999, "remote")])
    }

    #[test]
    fn origin_without_upstream_is_alone() {
        // 1 -> 2 -> 3, origin 1 is a headwater
        let graph = ReachGraph::from_edges([(1, 2), (2, 3)]).unwrap();
        let dams = RestrictionTable::from_rows([(2, "d1")]);
        let results = run_passage_model(
            &dams,
            &origins(&[1]),
            &graph,
            50.0,
            1.0,
            &SplittingAttribute::NoSplit,
        )
        .unwrap();

        let result = results.get(&id(1)).unwrap();
        assert_eq!(result.to_table(), vec![(id(1), 100.0)]);
    }

    #[test]
    fn single_dam_halves_population() {
        // 3 -> 2 -> 1, dam on 2, origin 1
        let graph = ReachGraph::from_edges([(3, 2), (2, 1)]).unwrap();
        let dams = RestrictionTable::from_rows([(2, "d1")]);
        let results = run_passage_model(
            &dams,
            &origins(&[1]),
            &graph,
            50.0,
            1.0,
            &SplittingAttribute::NoSplit,
        )
        .unwrap();

        let result = results.get(&id(1)).unwrap();
        assert_eq!(result.fraction(&id(1)), Some(100.0));
        assert_eq!(result.fraction(&id(2)), Some(50.0));
        // unrestricted single-parent step carries the population unchanged
        assert_eq!(result.fraction(&id(3)), Some(50.0));
    }

    #[test]
    fn restriction_on_origin_applies_first() {
        let graph = ReachGraph::from_edges([(2, 1)]).unwrap();
        let dams = RestrictionTable::from_counts([(1, 2)]);
        let params = PassageParams::new(50.0, 1.0);
        let splitting = SplittingAttribute::NoSplit;
        let model = PassageModel::new(&graph, &dams, &splitting, params).unwrap();

        let result = model.trace_origin(&id(1)).unwrap();
        assert_eq!(result.origin_remaining(), 25.0);
        assert_eq!(result.fraction(&id(2)), Some(25.0));
    }

    #[test]
    fn proportional_confluence() {
        // 6 and 7 join at 5
        let graph = ReachGraph::from_edges([(6, 5), (7, 5)]).unwrap();
        let splitting = SplittingAttribute::proportional([(6, 30.0), (7, 70.0)]).unwrap();
        let results = run_passage_model(
            &remote_dam(),
            &origins(&[5]),
            &graph,
            50.0,
            1.0,
            &splitting,
        )
        .unwrap();

        let result = results.get(&id(5)).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(result.fraction(&id(6)).unwrap(), 30.0, tol));
        assert!(nearly_equal(result.fraction(&id(7)).unwrap(), 70.0, tol));
    }

    #[test]
    fn no_split_confluence_gives_full_population() {
        let graph = ReachGraph::from_edges([(6, 5), (7, 5)]).unwrap();
        let results = run_passage_model(
            &remote_dam(),
            &origins(&[5]),
            &graph,
            50.0,
            1.0,
            &SplittingAttribute::NoSplit,
        )
        .unwrap();

        let result = results.get(&id(5)).unwrap();
        assert_eq!(result.fraction(&id(6)), Some(100.0));
        assert_eq!(result.fraction(&id(7)), Some(100.0));
    }

    #[test]
    fn fraction_equal_to_cutoff_is_excluded() {
        // one dam at 50% from 100 gives exactly 50
        let graph = ReachGraph::from_edges([(2, 1), (3, 2)]).unwrap();
        let dams = RestrictionTable::from_rows([(2, "d")]);
        let results = run_passage_model(
            &dams,
            &origins(&[1]),
            &graph,
            50.0,
            50.0,
            &SplittingAttribute::NoSplit,
        )
        .unwrap();

        let result = results.get(&id(1)).unwrap();
        assert!(!result.contains(&id(2)));
        assert!(!result.contains(&id(3)));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn origin_below_cutoff_is_still_reported() {
        let graph = ReachGraph::from_edges([(2, 1)]).unwrap();
        let dams = RestrictionTable::from_counts([(1, 10)]);
        let results = run_passage_model(
            &dams,
            &origins(&[1]),
            &graph,
            10.0,
            1.0,
            &SplittingAttribute::NoSplit,
        )
        .unwrap();

        let result = results.get(&id(1)).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.origin_remaining() < 1.0);
    }

    #[test]
    fn cycle_without_attenuation_hits_step_cap() {
        // 1 <- 2 <- 3 <- 2 ...
        let graph = ReachGraph::from_edges([(2, 1), (3, 2), (2, 3)]).unwrap();
        let splitting = SplittingAttribute::NoSplit;
        let params = PassageParams::new(100.0, 1.0).with_max_steps(50);
        let dams = remote_dam();
        let model = PassageModel::new(&graph, &dams, &splitting, params).unwrap();

        let err = model.run(&origins(&[1])).unwrap_err();
        assert!(matches!(err, FpError::CycleSuspected { steps: 50, .. }));
    }

    #[test]
    fn cycle_with_attenuation_terminates() {
        let graph = ReachGraph::from_edges([(2, 1), (3, 2), (2, 3)]).unwrap();
        let dams = RestrictionTable::from_rows([(3, "d")]);
        let results = run_passage_model(
            &dams,
            &origins(&[1]),
            &graph,
            50.0,
            10.0,
            &SplittingAttribute::NoSplit,
        )
        .unwrap();

        // 2:100, 3:50, 2:50, 3:25, 2:25, 3:12.5, 2:12.5 then 6.25 drops
        let result = results.get(&id(1)).unwrap();
        assert_eq!(result.len(), 8);
        assert_eq!(result.fraction(&id(3)), Some(50.0));
    }

    /// `n` diamonds in series above origin 0; every diamond doubles the
    /// number of paths to the reaches above it.
    fn braids_in_series(n: u64) -> ReachGraph {
        let edges: Vec<(u64, u64)> = (0..n)
            .flat_map(|k| {
                let base = 3 * k;
                [
                    (base + 1, base),
                    (base + 2, base),
                    (base + 3, base + 1),
                    (base + 3, base + 2),
                ]
            })
            .collect();
        ReachGraph::from_edges(edges).unwrap()
    }

    #[test]
    fn braided_reach_is_recorded_once_per_path() {
        let graph = braids_in_series(2);
        let results = run_passage_model(
            &remote_dam(),
            &origins(&[0]),
            &graph,
            100.0,
            1.0,
            &SplittingAttribute::NoSplit,
        )
        .unwrap();
        let result = results.get(&id(0)).unwrap();

        assert_eq!(result.fractions(&id(3)).count(), 2);
        assert_eq!(result.fractions(&id(6)).count(), 4);
        assert_eq!(result.fraction(&id(6)), Some(100.0));
        assert_eq!(result.total_fraction(&id(6)), 400.0);
    }

    #[test]
    fn acyclic_braids_can_exhaust_the_step_cap() {
        let graph = braids_in_series(12);
        let dams = remote_dam();
        let splitting = SplittingAttribute::NoSplit;
        let params = PassageParams::new(100.0, 1.0).with_max_steps(1_000);
        let model = PassageModel::new(&graph, &dams, &splitting, params).unwrap();

        let err = model.run(&origins(&[0])).unwrap_err();
        assert!(matches!(err, FpError::CycleSuspected { steps: 1_000, .. }));
        assert!(err.to_string().contains("braids"));
    }

    #[test]
    fn invalid_inputs_abort() {
        let graph = ReachGraph::from_edges([(2, 1)]).unwrap();
        let none = SplittingAttribute::NoSplit;

        let empty_dams = RestrictionTable::new();
        assert!(
            run_passage_model(&empty_dams, &origins(&[1]), &graph, 50.0, 1.0, &none)
                .unwrap_err()
                .is_invalid_input()
        );

        let dams = remote_dam();
        assert!(run_passage_model(&dams, &ReachSet::new(), &graph, 50.0, 1.0, &none).is_err());
        assert!(run_passage_model(&dams, &origins(&[1]), &graph, 150.0, 1.0, &none).is_err());
        assert!(run_passage_model(&dams, &origins(&[1]), &graph, 50.0, 0.0, &none).is_err());
    }

    #[test]
    fn missing_attribute_at_confluence_aborts_whole_run() {
        // origin 5 has a confluence lacking values; origin 1 is fine
        let graph = ReachGraph::from_edges([(6, 5), (7, 5), (2, 1)]).unwrap();
        let splitting = SplittingAttribute::proportional([(6, 1.0)]).unwrap();
        let err = run_passage_model(
            &remote_dam(),
            &origins(&[1, 5]),
            &graph,
            50.0,
            1.0,
            &splitting,
        )
        .unwrap_err();
        assert!(err.to_string().contains("branch 7"));
    }
}
