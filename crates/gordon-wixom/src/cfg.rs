//! Resolutions and tolerances of the interpolant.
//!
//! - `SurfaceCfg`: sampling resolutions (curve samples N, directions M) plus
//!   the epsilons used by the intersector, the classifier, and the evaluator.
//! - `CfgError`: rejected configurations (checked once, at construction).

use std::fmt;

/// Interpolant configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceCfg {
    /// Number N of boundary samples (polygon vertices).
    pub curve_samples: usize,
    /// Number M of sampled directions over a full turn.
    pub directions: usize,
    /// Phase offset (radians) of the first direction; keeps rays off the axes.
    pub phase: f64,
    /// Ray/edge pairs with `|cross(edge, ray)|` at or below this are parallel.
    pub eps_parallel: f64,
    /// Hits this close to a classified vertex are the vertex itself.
    pub eps_vertex: f64,
    /// Hits this close to a concave endpoint are tagged concave-adjacent.
    pub eps_concave: f64,
    /// Hits this close to the query point mean the query is on the boundary.
    /// At 0.0 only exact hits count, which sampled vertices always give;
    /// points inside an edge may miss by rounding and then take the `h(x)`
    /// fallback instead.
    pub eps_boundary: f64,
    /// Drop concave-adjacent hits before weighting. Off by default.
    pub exclude_concave_hits: bool,
}

impl Default for SurfaceCfg {
    fn default() -> Self {
        Self {
            curve_samples: 256,
            directions: 100,
            phase: 1e-3,
            eps_parallel: 1e-12,
            eps_vertex: 1e-9,
            eps_concave: 1e-6,
            eps_boundary: 0.0,
            exclude_concave_hits: false,
        }
    }
}

impl SurfaceCfg {
    /// Same configuration with another curve resolution.
    pub fn with_curve_samples(self, curve_samples: usize) -> Self {
        Self {
            curve_samples,
            ..self
        }
    }

    /// Same configuration with another angular resolution.
    pub fn with_directions(self, directions: usize) -> Self {
        Self { directions, ..self }
    }

    /// Angular step between consecutive sampled directions.
    #[inline]
    pub fn delta_theta(&self) -> f64 {
        std::f64::consts::TAU / self.directions as f64
    }

    pub fn validate(&self) -> Result<(), CfgError> {
        if self.curve_samples < 3 {
            return Err(CfgError::TooFewSamples {
                got: self.curve_samples,
            });
        }
        if self.directions == 0 {
            return Err(CfgError::NoDirections);
        }
        if !self.phase.is_finite() {
            return Err(CfgError::BadTolerance {
                name: "phase",
                value: self.phase,
            });
        }
        let eps = [
            ("eps_parallel", self.eps_parallel),
            ("eps_vertex", self.eps_vertex),
            ("eps_concave", self.eps_concave),
            ("eps_boundary", self.eps_boundary),
        ];
        for (name, value) in eps {
            if !value.is_finite() || value < 0.0 {
                return Err(CfgError::BadTolerance { name, value });
            }
        }
        Ok(())
    }
}

/// Errors surfaced by `SurfaceCfg::validate`.
#[derive(Debug, Clone, PartialEq)]
pub enum CfgError {
    /// A closed polygon needs at least three vertices.
    TooFewSamples { got: usize },
    /// The direction integral needs at least one direction.
    NoDirections,
    /// A tolerance (or the phase) is negative or not finite.
    BadTolerance { name: &'static str, value: f64 },
}

impl fmt::Display for CfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CfgError::TooFewSamples { got } => {
                write!(f, "curve_samples must be at least 3 (got {got})")
            }
            CfgError::NoDirections => write!(f, "directions must be at least 1"),
            CfgError::BadTolerance { name, value } => {
                write!(f, "{name} must be finite and non-negative (got {value})")
            }
        }
    }
}

impl std::error::Error for CfgError {}
