use crate::FpError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FpError::NonFinite { what, value: v })
    }
}

/// Ensure `v` is finite and lies within the closed interval `[lo, hi]`.
pub fn ensure_in_range(v: Real, lo: Real, hi: Real, what: &'static str) -> Result<Real, FpError> {
    let v = ensure_finite(v, what)?;
    if v < lo || v > hi {
        return Err(FpError::InvalidInput {
            what: format!("{what} must be between {lo} and {hi} (got {v})"),
        });
    }
    Ok(v)
}
