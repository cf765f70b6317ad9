//! Study schema definitions.

use fp_core::ReachId;
use serde::{Deserialize, Serialize};

use crate::migrate::LATEST_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Study {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub network: NetworkDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitMemberDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_stems: Option<Vec<ReachId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origins: Option<Vec<ReachId>>,
    #[serde(default)]
    pub restrictions: Vec<RestrictionDef>,
    #[serde(default)]
    pub splitting: SplittingDef,
    #[serde(default)]
    pub parameters: ParametersDef,
}

impl Study {
    /// A minimal study over `edges` with default parameters and no splitting.
    pub fn new(name: impl Into<String>, edges: Vec<EdgeDef>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            network: NetworkDef {
                edges,
                habitat: None,
            },
            units: Vec::new(),
            main_stems: None,
            origins: None,
            restrictions: Vec::new(),
            splitting: SplittingDef::None,
            parameters: ParametersDef::default(),
        }
    }

    /// Where the origins of a run come from.
    pub fn origin_source(&self) -> OriginSource {
        if self.origins.is_some() {
            OriginSource::Explicit
        } else if self.main_stems.is_some() {
            OriginSource::MainStems
        } else if !self.units.is_empty() {
            OriginSource::Units
        } else {
            OriginSource::Missing
        }
    }
}

/// How origins are resolved, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginSource {
    /// `origins` listed directly.
    Explicit,
    /// Derived from the listed `main_stems`.
    MainStems,
    /// Main stems derived from `units`, origins from those.
    Units,
    /// None of the above is present.
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDef {
    pub edges: Vec<EdgeDef>,
    /// If set, the network is pruned to these reaches before the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat: Option<Vec<ReachId>>,
}

/// One from-to row: `from` flows into `to`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDef {
    pub from: ReachId,
    pub to: ReachId,
}

impl EdgeDef {
    pub fn new(from: impl Into<ReachId>, to: impl Into<ReachId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One row of the unit/reach spatial join.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitMemberDef {
    pub unit: String,
    pub reach: ReachId,
}

/// One restriction on a reach. The ID is informational.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestrictionDef {
    pub reach: ReachId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum SplittingDef {
    /// Each confluence branch receives the full population.
    #[default]
    None,
    Proportional {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribute: Option<String>,
        values: Vec<AttributeValueDef>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeValueDef {
    pub reach: ReachId,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParametersDef {
    #[serde(default = "default_pass_rate")]
    pub pass_rate: f64,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

fn default_pass_rate() -> f64 {
    100.0
}

fn default_cutoff() -> f64 {
    1.0
}

impl Default for ParametersDef {
    fn default() -> Self {
        Self {
            pass_rate: default_pass_rate(),
            cutoff: default_cutoff(),
            max_steps: None,
        }
    }
}
