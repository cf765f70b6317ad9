//! Main stem and origin detection on a small basin.

use fp_core::{ReachId, ReachSet};
use fp_graph::ReachGraph;
use fp_network::{HydroUnits, find_main_stems, find_origins};

fn set(values: &[u64]) -> ReachSet {
    values.iter().map(|&v| ReachId::from(v)).collect()
}

/// ```text
///  upper basin "UP":   201 -> 200
///  middle basin "MID": 100 -> 101 -> 102         (200 drains into 100)
///  outlet:             102 -> 1 (estuary, not in any unit)
///  tributary "TA":     300 -> 301 -> 101
///  tributary "TB":     400 -> 102
/// ```
fn basin() -> (HydroUnits, ReachGraph) {
    let graph = ReachGraph::from_edges([
        (201, 200),
        (200, 100),
        (100, 101),
        (101, 102),
        (102, 1),
        (300, 301),
        (301, 101),
        (400, 102),
    ])
    .unwrap();
    let units = HydroUnits::from_rows([
        ("UP", 201),
        ("UP", 200),
        ("MID", 100),
        ("MID", 101),
        ("MID", 102),
        ("TA", 300),
        ("TA", 301),
        ("TB", 400),
    ])
    .unwrap();
    (units, graph)
}

#[test]
fn main_stem_threads_through_middle_basin() {
    let (units, graph) = basin();
    let main_stems = find_main_stems(&units, &graph).unwrap();

    // 200 enters MID; MID exits to 1. Tributary mouths 301 and 400 also
    // drain into MID from outside, so they start walks of their own.
    assert_eq!(main_stems, set(&[200, 100, 101, 102, 1, 301, 400]));
}

#[test]
fn origins_sit_just_upstream_of_main_stem() {
    let (units, graph) = basin();
    let main_stems = find_main_stems(&units, &graph).unwrap();
    let origins = find_origins(&main_stems, &graph).unwrap();

    assert_eq!(origins, set(&[201, 300]));
    assert!(origins.is_disjoint(&main_stems));
}

#[test]
fn externally_defined_main_stem() {
    let (_, graph) = basin();
    // A stream-order derived main stem: 200 .. 102
    let origins = find_origins(&set(&[200, 100, 101, 102]), &graph).unwrap();
    assert_eq!(origins, set(&[201, 301, 400]));
}
