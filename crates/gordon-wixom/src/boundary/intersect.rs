//! Line/polygon intersection split at the query point.
//!
//! For each edge `p0 → p1` (unit direction `s`, length `len`) solve
//! `p0 + t·s = x + τ·d`. Accepted hits satisfy `0 ≤ t < len`, so a line
//! through a shared vertex is counted once. `τ < 0` puts the hit on the near
//! half-line, `τ ≥ 0` on the far one; both lists are sorted by distance to x.

use crate::cfg::SurfaceCfg;
use crate::planar::{solve_columns, Point2, Vec2};

/// One crossing of the line with the polygon boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: Point2,
    /// Euclidean distance from the query point.
    pub distance: f64,
    /// Within `eps_concave` of a reflex endpoint of the crossed edge.
    pub near_concave: bool,
}

/// Hits on the two half-lines through the query point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RayHits {
    /// Behind the query point (`τ < 0`).
    pub near: Vec<Hit>,
    /// At or ahead of the query point (`τ ≥ 0`).
    pub far: Vec<Hit>,
}

impl RayHits {
    pub fn len(&self) -> usize {
        self.near.len() + self.far.len()
    }

    pub fn is_empty(&self) -> bool {
        self.near.is_empty() && self.far.is_empty()
    }

    /// Closest hit on either side.
    pub fn closest(&self) -> Option<&Hit> {
        // Each list is sorted, so only the heads compete.
        match (self.near.first(), self.far.first()) {
            (Some(a), Some(b)) => Some(if a.distance <= b.distance { a } else { b }),
            (a, b) => a.or(b),
        }
    }

    /// Drop hits tagged as concave-adjacent.
    pub fn without_concave(mut self) -> Self {
        self.near.retain(|h| !h.near_concave);
        self.far.retain(|h| !h.near_concave);
        self
    }
}

/// Intersect the line `x + τ·direction` with the closed polygon `samples`.
///
/// `concave` is parallel to `samples`; an empty slice disables tagging.
/// Zero-length and parallel edges are skipped.
pub fn intersect(
    samples: &[Point2],
    concave: &[bool],
    x: Point2,
    direction: Vec2,
    cfg: &SurfaceCfg,
) -> RayHits {
    let n = samples.len();
    let flag = |k: usize| concave.get(k).copied().unwrap_or(false);
    let mut hits = RayHits::default();
    for i in 0..n {
        let j = (i + 1) % n;
        let p0 = samples[i];
        let diff = samples[j] - p0;
        let len = diff.norm();
        if len < f64::MIN_POSITIVE {
            continue;
        }
        let s = diff / len;
        let Some((t, tau)) = solve_columns(s, direction, x - p0, cfg.eps_parallel) else {
            continue;
        };
        if !(0.0..len).contains(&t) {
            continue;
        }
        let point = p0 + s * t;
        let near_concave =
            (flag(i) && t <= cfg.eps_concave) || (flag(j) && len - t <= cfg.eps_concave);
        let hit = Hit {
            point,
            distance: (point - x).norm(),
            near_concave,
        };
        if tau < 0.0 {
            hits.near.push(hit);
        } else {
            hits.far.push(hit);
        }
    }
    hits.near.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.far.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
