//! Hydrologic unit grouping (tributaries, sub-basins, HUCs).

use std::collections::{BTreeMap, HashMap};

use fp_core::{FpError, FpResult, ReachId, ReachSet};

/// Identifier of a hydrologic unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub String);

impl UnitId {
    /// Create a new unit ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UnitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A one-to-many grouping of units to the reaches inside them.
///
/// Usually produced by a spatial join of unit polygons against the stream
/// network. Every reach belongs to at most one unit.
#[derive(Debug, Clone, Default)]
pub struct HydroUnits {
    units: BTreeMap<UnitId, ReachSet>,
    reach_unit: HashMap<ReachId, UnitId>,
}

impl HydroUnits {
    /// Build the grouping from `(unit, reach)` rows.
    ///
    /// Fails with `InvalidInput` if there are no rows or if a reach is
    /// assigned to two different units. Repeated identical rows are fine.
    pub fn from_rows<I, U, R>(rows: I) -> FpResult<Self>
    where
        I: IntoIterator<Item = (U, R)>,
        U: Into<UnitId>,
        R: Into<ReachId>,
    {
        let mut grouping = Self::default();
        for (unit, reach) in rows {
            grouping.insert(unit.into(), reach.into())?;
        }
        if grouping.is_empty() {
            return Err(FpError::invalid("hydrologic unit table has length zero"));
        }
        Ok(grouping)
    }

    fn insert(&mut self, unit: UnitId, reach: ReachId) -> FpResult<()> {
        if let Some(existing) = self.reach_unit.get(&reach) {
            if *existing != unit {
                return Err(FpError::InvalidInput {
                    what: format!(
                        "reach {} belongs to both unit '{}' and unit '{}'",
                        reach, existing, unit
                    ),
                });
            }
            return Ok(());
        }
        self.reach_unit.insert(reach.clone(), unit.clone());
        self.units.entry(unit).or_default().insert(reach);
        Ok(())
    }

    /// Number of distinct units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True if no unit has been recorded.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterate units in ID order with their reach sets.
    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &ReachSet)> {
        self.units.iter()
    }

    /// Reaches inside `unit`, if the unit exists.
    pub fn reaches(&self, unit: &UnitId) -> Option<&ReachSet> {
        self.units.get(unit)
    }

    /// The unit containing `reach`.
    pub fn unit_of(&self, reach: &ReachId) -> Option<&UnitId> {
        self.reach_unit.get(reach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rows_by_unit() {
        let units =
            HydroUnits::from_rows([("A", 1), ("A", 2), ("B", 3), ("A", 2)]).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units.reaches(&UnitId::from("A")).unwrap().len(), 2);
        assert_eq!(
            units.unit_of(&ReachId::from(3)).map(UnitId::as_str),
            Some("B")
        );
    }

    #[test]
    fn reach_in_two_units_is_invalid() {
        let err = HydroUnits::from_rows([("A", 1), ("B", 1)]).unwrap_err();
        assert!(err.to_string().contains("both unit"));
    }

    #[test]
    fn empty_rows_are_invalid() {
        let rows: Vec<(&str, u64)> = Vec::new();
        assert!(HydroUnits::from_rows(rows).is_err());
    }
}
