//! Discretized boundary: samples, reflex flags, and bounds as one snapshot.
//!
//! Purpose
//! - `Discretization` is everything a surface derives from its curve. It is
//!   built in one go (`discretize` then `classify`) and never mutated, so a
//!   surface swaps the whole value when the curve changes and readers can
//!   never see samples from one curve next to flags from another.
//! - The ray queries (`intersect`, `contains`) run against the snapshot.
//!
//! Code cross-refs: `discretize::discretize`, `concave::classify`,
//! `intersect::intersect`, `crate::surface::Surface`

mod concave;
mod discretize;
mod intersect;

pub use concave::classify;
pub use discretize::discretize;
pub use intersect::{intersect, Hit, RayHits};

use crate::cfg::SurfaceCfg;
use crate::curves::BoundaryCurve;
use crate::planar::{signed_area, unit_at, Bounds, Point2, Vec2};

/// Direction of the containment ray; oblique so it rarely grazes vertices
/// of axis-aligned or regular polygons.
const CONTAINS_ANGLE: f64 = 0.618_033_988_749_894_8;

/// Immutable sampling of a boundary curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Discretization {
    samples: Vec<Point2>,
    concave: Vec<bool>,
    bounds: Bounds,
}

impl Discretization {
    /// Sample `curve` at `cfg.curve_samples` points and classify reflex vertices.
    pub fn build(curve: &dyn BoundaryCurve, cfg: &SurfaceCfg) -> Self {
        let (samples, bounds) = discretize(curve, cfg.curve_samples);
        Self::from_samples(samples, bounds, cfg)
    }

    /// Wrap an explicit closed polygon (bounds recomputed from the points).
    pub fn from_polygon(samples: Vec<Point2>, cfg: &SurfaceCfg) -> Self {
        let bounds = Bounds::of(&samples).unwrap_or(Bounds::at(Point2::origin()));
        Self::from_samples(samples, bounds, cfg)
    }

    fn from_samples(samples: Vec<Point2>, bounds: Bounds, cfg: &SurfaceCfg) -> Self {
        let concave = classify(&samples, cfg);
        tracing::debug!(
            samples = samples.len(),
            concave = concave.iter().filter(|c| **c).count(),
            area = signed_area(&samples),
            min = ?bounds.min,
            max = ?bounds.max,
            "discretized boundary"
        );
        Self {
            samples,
            concave,
            bounds,
        }
    }

    #[inline]
    pub fn samples(&self) -> &[Point2] {
        &self.samples
    }

    /// Reflex flags, parallel to `samples`.
    #[inline]
    pub fn concave(&self) -> &[bool] {
        &self.concave
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Indices of reflex vertices.
    pub fn concave_indices(&self) -> Vec<usize> {
        self.concave
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.then_some(i))
            .collect()
    }

    /// Closed edge list `(i, (i + 1) % n)`.
    pub fn segments(&self) -> Vec<[usize; 2]> {
        let n = self.samples.len();
        (0..n).map(|i| [i, (i + 1) % n]).collect()
    }

    /// Hits of the line through `x` along `direction`, tagged with reflex adjacency.
    pub fn intersect(&self, x: Point2, direction: Vec2, cfg: &SurfaceCfg) -> RayHits {
        intersect(&self.samples, &self.concave, x, direction, cfg)
    }

    /// Point-in-polygon by ray parity. Points on the boundary may go either way.
    pub fn contains(&self, x: Point2, cfg: &SurfaceCfg) -> bool {
        if !self.bounds.contains(x) {
            return false;
        }
        let hits = intersect(&self.samples, &[], x, unit_at(CONTAINS_ANGLE), cfg);
        hits.far.len() % 2 == 1
    }
}
