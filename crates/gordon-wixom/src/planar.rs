//! Planar primitives shared by every other module.
//!
//! - `Point2` is a location, `Vec2` a displacement; both are nalgebra values,
//!   so `Point2 - Point2 = Vec2` and `Point2 + Vec2 = Point2` come for free.
//! - `cross`: scalar 2D cross product, the determinant of `[a b]`.
//! - `Bounds`: axis-aligned bounding rectangle, grown one point at a time.

use nalgebra::Matrix2;

pub type Point2 = nalgebra::Point2<f64>;
pub type Vec2 = nalgebra::Vector2<f64>;

/// Signed area of the parallelogram spanned by `a` and `b`.
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Solve `s·t - d·tau = rhs` for `(t, tau)`.
///
/// Returns None when the columns are (numerically) parallel, i.e.
/// `|cross(s, d)| <= eps_det`, or when the solution is not finite.
#[inline]
pub fn solve_columns(s: Vec2, d: Vec2, rhs: Vec2, eps_det: f64) -> Option<(f64, f64)> {
    let det = cross(s, d);
    if !det.is_finite() || det.abs() <= eps_det {
        return None;
    }
    let t = cross(rhs, d) / det;
    let tau = cross(rhs, s) / det;
    if t.is_finite() && tau.is_finite() {
        Some((t, tau))
    } else {
        None
    }
}

/// Unit vector at angle `theta` (radians, CCW from +x).
#[inline]
pub fn unit_at(theta: f64) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Tightest axis-aligned rectangle containing a point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    /// Degenerate rectangle holding a single point.
    #[inline]
    pub fn at(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    #[inline]
    pub fn grow(&mut self, p: Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Bounds of a non-empty point set; None for an empty slice.
    pub fn of(points: &[Point2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = Self::at(*first);
        for p in rest {
            b.grow(*p);
        }
        Some(b)
    }

    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Signed area of a closed polygon (shoelace). Positive for CCW order.
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let p = points[i].coords;
        let q = points[(i + 1) % n].coords;
        acc += Matrix2::from_columns(&[p, q]).determinant();
    }
    0.5 * acc
}
