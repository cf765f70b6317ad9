//! Main stem identification.
//!
//! A unit is crossed by the main stem wherever flow enters it from outside:
//! some reach upstream of the unit drains into a reach inside it. Walking
//! downstream from every such entry point until flow leaves the unit marks
//! the pass-through path. Units without an entry point (headwater
//! tributaries) contribute nothing.

use std::collections::{HashSet, VecDeque};

use fp_core::{FpError, FpResult, ReachId, ReachSet};
use fp_graph::ReachGraph;
use tracing::{debug, info};

use crate::units::{HydroUnits, UnitId};

/// Global set of main stem reaches (not scoped to any unit).
pub type MainStemSet = ReachSet;

/// Find every main stem reach across all units.
///
/// The result of each unit is merged into the running total; a unit that
/// yields nothing leaves earlier units' reaches untouched.
pub fn find_main_stems(units: &HydroUnits, graph: &ReachGraph) -> FpResult<MainStemSet> {
    if units.is_empty() {
        return Err(FpError::invalid("hydrologic unit table has length zero"));
    }
    if graph.edge_count() == 0 {
        return Err(FpError::invalid("from-to edge set has length zero"));
    }

    info!(units = units.len(), "Processing unique hydrologic units");

    let mut main_stems = MainStemSet::new();
    for (unit, reaches) in units.iter() {
        let found = unit_main_stems(reaches, graph);
        if found.is_empty() {
            debug!(unit = %unit, "Unit has no pass-through flow");
            continue;
        }
        debug!(unit = %unit, reaches = found.len(), "Unit main stem found");
        main_stems.extend(found);
    }

    info!(
        main_stems = main_stems.len(),
        "Found unique main stem reaches"
    );
    Ok(main_stems)
}

/// Main stem reaches crossing a single unit.
///
/// Includes the outside reach flow enters from and the outside reach flow
/// exits into, so neighbouring units' main stems join up.
fn unit_main_stems(reaches: &ReachSet, graph: &ReachGraph) -> ReachSet {
    // Entry points: reaches outside the unit draining into it
    let mut frontier: VecDeque<ReachId> = reaches
        .iter()
        .flat_map(|reach| graph.upstream_of(reach))
        .filter(|up| !reaches.contains(*up))
        .cloned()
        .collect();

    let mut marked = ReachSet::new();
    let mut visited: HashSet<ReachId> = HashSet::new();

    while let Some(reach) = frontier.pop_front() {
        // Cycles inside a unit would otherwise spin forever
        if !visited.insert(reach.clone()) {
            continue;
        }

        let inside = reaches.contains(&reach);
        let down = graph
            .downstream_of(&reach)
            .iter()
            .find(|d| inside || reaches.contains(*d));

        match down {
            Some(d) if reaches.contains(d) => frontier.push_back(d.clone()),
            Some(d) => {
                marked.insert(d.clone());
            }
            // Network mouth inside the unit: nothing further downstream
            None => {}
        }
        marked.insert(reach);
    }

    marked
}

/// Units whose reaches contribute to the main stem, for reporting.
pub fn units_with_main_stem<'a>(
    units: &'a HydroUnits,
    main_stems: &MainStemSet,
) -> Vec<&'a UnitId> {
    units
        .iter()
        .filter(|(_, reaches)| reaches.iter().any(|r| main_stems.contains(r)))
        .map(|(unit, _)| unit)
        .collect()
}
