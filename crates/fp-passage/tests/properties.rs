//! Property tests for the passage traversal on random trees.

use fp_core::{ReachId, ReachSet, Real};
use fp_graph::ReachGraph;
use fp_passage::{PassageModel, PassageParams, RestrictionTable, SplittingAttribute};
use proptest::prelude::*;

/// Random tree rooted at 0: reach `i` drains into some reach `< i`.
fn tree(parents: &[usize]) -> ReachGraph {
    let pairs: Vec<(u64, u64)> = parents
        .iter()
        .enumerate()
        .map(|(i, &p)| ((i + 1) as u64, (p % (i + 1)) as u64))
        .collect();
    ReachGraph::from_edges(pairs).unwrap()
}

fn root() -> ReachSet {
    [ReachId::from(0_u64)].into_iter().collect()
}

proptest! {
    #[test]
    fn recorded_reaches_exceed_cutoff(
        parents in prop::collection::vec(0_usize..64, 1..40),
        dams in prop::collection::vec((0_u64..41, 1_u32..3), 1..10),
        pass_rate in 0.0_f64..=100.0,
        cutoff in 1.0_f64..=100.0,
    ) {
        let graph = tree(&parents);
        let dams = RestrictionTable::from_counts(dams);
        let splitting = SplittingAttribute::NoSplit;
        let params = PassageParams::new(pass_rate, cutoff);
        let model = PassageModel::new(&graph, &dams, &splitting, params).unwrap();

        let results = model.run(&root()).unwrap();
        let result = results.get(&ReachId::from(0_u64)).unwrap();
        for record in &result.records()[1..] {
            prop_assert!(record.remaining > cutoff);
        }
    }

    #[test]
    fn population_never_grows_upstream(
        parents in prop::collection::vec(0_usize..64, 1..40),
        weights in prop::collection::vec(0.1_f64..10.0, 41),
        dams in prop::collection::vec((0_u64..41, 1_u32..3), 1..10),
        pass_rate in 0.0_f64..=100.0,
    ) {
        let graph = tree(&parents);
        let dams = RestrictionTable::from_counts(dams);
        let splitting = SplittingAttribute::proportional(
            weights.iter().enumerate().map(|(i, &w)| (i as u64, w)),
        )
        .unwrap();
        let model =
            PassageModel::new(&graph, &dams, &splitting, PassageParams::new(pass_rate, 1.0))
                .unwrap();

        let results = model.run(&root()).unwrap();
        let result = results.get(&ReachId::from(0_u64)).unwrap();
        for record in &result.records()[1..] {
            let parent = &graph.downstream_of(&record.reach)[0];
            let parent_remaining: Real = result.fraction(parent).unwrap();
            prop_assert!(record.remaining <= parent_remaining + 1e-9);
        }
    }

    #[test]
    fn identical_inputs_identical_results(
        parents in prop::collection::vec(0_usize..64, 1..40),
        pass_rate in 0.0_f64..=100.0,
    ) {
        let graph = tree(&parents);
        let dams = RestrictionTable::from_rows([(1_u64, "d")]);
        let splitting = SplittingAttribute::NoSplit;
        let params = PassageParams::new(pass_rate, 1.0);
        let model = PassageModel::new(&graph, &dams, &splitting, params).unwrap();

        prop_assert_eq!(model.run(&root()).unwrap(), model.run(&root()).unwrap());
    }
}
