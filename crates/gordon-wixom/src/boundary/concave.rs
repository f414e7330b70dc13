//! Reflex-vertex detection by tangent-ray parity.
//!
//! The tangent at sample i is the chord between its cyclic neighbours. Both
//! half-lines of that tangent start inside the polygon at a reflex vertex and
//! outside at a convex one, so the number of boundary crossings behind the
//! vertex is odd exactly for reflex vertices. Hits within `eps_vertex` of the
//! sample are the vertex itself and are not counted.
//!
//! The count is exact only when the tangent avoids other polygon vertices;
//! samples on straight runs next to sharp corners can flip.

use super::intersect::intersect;
use crate::cfg::SurfaceCfg;
use crate::planar::Point2;

/// One flag per sample, true for reflex (locally concave) vertices.
pub fn classify(samples: &[Point2], cfg: &SurfaceCfg) -> Vec<bool> {
    (0..samples.len())
        .map(|i| is_reflex(samples, i, cfg))
        .collect()
}

fn is_reflex(samples: &[Point2], i: usize, cfg: &SurfaceCfg) -> bool {
    let n = samples.len();
    let prev = samples[(i + n - 1) % n];
    let next = samples[(i + 1) % n];
    let Some(tangent) = (next - prev).try_normalize(0.0) else {
        return false;
    };
    let hits = intersect(samples, &[], samples[i], tangent, cfg);
    let crossings = hits
        .near
        .iter()
        .filter(|h| h.distance > cfg.eps_vertex)
        .count();
    crossings % 2 == 1
}
