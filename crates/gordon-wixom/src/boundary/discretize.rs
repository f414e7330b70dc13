//! Fixed-resolution sampling of a boundary curve into a closed polygon.

use crate::curves::BoundaryCurve;
use crate::planar::{Bounds, Point2};

/// Sample `curve` at `t = i / n` for `i in 0..n`.
///
/// Edge i of the implied polygon joins sample i to sample `(i + 1) % n`.
/// The bounds are seeded by the first sample; `n == 0` yields no samples and
/// a degenerate box at the origin.
pub fn discretize(curve: &dyn BoundaryCurve, n: usize) -> (Vec<Point2>, Bounds) {
    let mut samples = Vec::with_capacity(n);
    let mut bounds: Option<Bounds> = None;
    for i in 0..n {
        let p = curve.point(i as f64 / n as f64);
        match bounds.as_mut() {
            Some(b) => b.grow(p),
            None => bounds = Some(Bounds::at(p)),
        }
        samples.push(p);
    }
    (samples, bounds.unwrap_or(Bounds::at(Point2::origin())))
}
