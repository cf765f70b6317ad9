//! Passage model parameters.

use fp_core::{FpError, FpResult, Real, ensure_in_range};

/// Starting population at every origin, in percent.
pub const INITIAL_POPULATION: Real = 100.0;

/// Default cap on worklist expansions per origin.
///
/// The worklist holds one entry per path, so the cap bounds paths rather than
/// reaches. Besides cycles, an acyclic braided network can reach it: with no
/// attenuation every braid in series doubles the paths above it.
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Passage model configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassageParams {
    /// Percent of the population passing a single restriction (0-100)
    pub pass_rate: Real,
    /// Percent population at or below which a branch is dropped (1-100)
    pub cutoff: Real,
    /// Maximum worklist expansions per origin before a cycle is suspected
    pub max_steps: usize,
}

impl Default for PassageParams {
    fn default() -> Self {
        Self {
            pass_rate: 100.0,
            cutoff: 1.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl PassageParams {
    /// Parameters with the given pass rate and cutoff and the default step cap.
    pub fn new(pass_rate: Real, cutoff: Real) -> Self {
        Self {
            pass_rate,
            cutoff,
            ..Self::default()
        }
    }

    /// Override the per-origin step cap.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> FpResult<()> {
        ensure_in_range(self.pass_rate, 0.0, 100.0, "pass_rate")?;
        ensure_in_range(self.cutoff, 1.0, 100.0, "cutoff")?;
        if self.max_steps == 0 {
            return Err(FpError::invalid("max_steps must be at least 1"));
        }
        Ok(())
    }

    /// Fraction of the population surviving one restriction.
    pub fn survival(&self) -> Real {
        self.pass_rate / 100.0
    }
}
