//! Population splitting at confluences.

use std::collections::HashMap;

use fp_core::{FpError, FpResult, ReachId, Real};

/// Continuous per-reach attribute (discharge, wetted width, depth, ...).
///
/// Values are finite and non-negative. Equal values for every reach give
/// an even split.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValues {
    name: Option<String>,
    values: HashMap<ReachId, Real>,
}

impl AttributeValues {
    /// Build from `(reach, value)` pairs.
    ///
    /// Fails with `InvalidInput` on an empty mapping or on a negative or
    /// non-finite value.
    pub fn new<I, R>(pairs: I) -> FpResult<Self>
    where
        I: IntoIterator<Item = (R, Real)>,
        R: Into<ReachId>,
    {
        let mut values = HashMap::new();
        for (reach, value) in pairs {
            let reach = reach.into();
            if !value.is_finite() || value < 0.0 {
                return Err(FpError::InvalidInput {
                    what: format!(
                        "splitting attribute for reach {} must be a finite, non-negative number (got {})",
                        reach, value
                    ),
                });
            }
            values.insert(reach, value);
        }
        if values.is_empty() {
            return Err(FpError::invalid("splitting attribute table has length zero"));
        }
        Ok(Self { name: None, values })
    }

    /// Attach the attribute's name (used in log output).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The attribute's name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Value for `reach`.
    pub fn get(&self, reach: &ReachId) -> Option<Real> {
        self.values.get(reach).copied()
    }

    /// Number of reaches with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated mapping.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How a confluence divides the population arriving from downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum SplittingAttribute {
    /// Every branch receives the full population, so each branch shows its
    /// highest potential; branch totals may exceed the parent's percentage.
    NoSplit,
    /// Branches share the population in proportion to an attribute.
    Proportional(AttributeValues),
}

impl SplittingAttribute {
    /// Proportional splitting by the given `(reach, value)` pairs.
    pub fn proportional<I, R>(pairs: I) -> FpResult<Self>
    where
        I: IntoIterator<Item = (R, Real)>,
        R: Into<ReachId>,
    {
        Ok(SplittingAttribute::Proportional(AttributeValues::new(pairs)?))
    }

    /// Short description for log output.
    pub fn describe(&self) -> String {
        match self {
            SplittingAttribute::NoSplit => "no splitting at confluences".to_string(),
            SplittingAttribute::Proportional(values) => match values.name() {
                Some(name) => format!("proportional to {name}"),
                None => "proportional to reach attribute".to_string(),
            },
        }
    }

    /// Share of the parent population each branch receives, in branch order.
    ///
    /// Proportional shares sum to one. A branch missing from the attribute
    /// table, or a confluence whose values sum to zero, is `InvalidInput`.
    pub fn shares(&self, branches: &[ReachId]) -> FpResult<Vec<Real>> {
        let values = match self {
            SplittingAttribute::NoSplit => return Ok(vec![1.0; branches.len()]),
            SplittingAttribute::Proportional(values) => values,
        };

        let attrs = branches
            .iter()
            .map(|reach| {
                values.get(reach).ok_or_else(|| FpError::InvalidInput {
                    what: format!("confluence branch {} has no splitting attribute value", reach),
                })
            })
            .collect::<FpResult<Vec<Real>>>()?;

        let total: Real = attrs.iter().sum();
        if total <= 0.0 {
            let names: Vec<&str> = branches.iter().map(ReachId::as_str).collect();
            return Err(FpError::InvalidInput {
                what: format!(
                    "splitting attribute sums to zero at confluence of [{}]",
                    names.join(", ")
                ),
            });
        }

        Ok(attrs.into_iter().map(|a| a / total).collect())
    }
}
