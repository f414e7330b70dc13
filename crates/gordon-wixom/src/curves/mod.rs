//! Boundary curves and height fields.
//!
//! Purpose
//! - `BoundaryCurve` and `HeightField` are the two caller-supplied
//!   capabilities of a surface. Both are single-method traits with blanket
//!   impls for closures, so callers pass either a named type or a `Fn`.
//! - Stock shapes (`Circle`, `RadialWave`, `PolygonCurve`) and height fields
//!   cover the driver presets in `presets` and the tests.
//!
//! Contract
//! - A curve traces a simple closed loop exactly once for t in [0, 1).
//!   Nothing here validates that; self-intersecting input yields garbage.
//! - A height field is defined on the boundary. Interior values are only
//!   read by the evaluator's fallback path.

pub mod presets;
pub mod rand;

use std::f64::consts::{PI, TAU};

use crate::planar::{Point2, Vec2};

/// Closed parametric boundary `t ∈ [0,1) ↦ point`.
pub trait BoundaryCurve: Send + Sync {
    fn point(&self, t: f64) -> Point2;
}

impl<F> BoundaryCurve for F
where
    F: Fn(f64) -> Point2 + Send + Sync,
{
    #[inline]
    fn point(&self, t: f64) -> Point2 {
        self(t)
    }
}

/// Scalar height `point ↦ value`.
pub trait HeightField: Send + Sync {
    fn height(&self, p: Point2) -> f64;
}

impl<F> HeightField for F
where
    F: Fn(Point2) -> f64 + Send + Sync,
{
    #[inline]
    fn height(&self, p: Point2) -> f64 {
        self(p)
    }
}

/// Constant height, handy for reproduction checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(pub f64);

impl HeightField for Constant {
    #[inline]
    fn height(&self, _p: Point2) -> f64 {
        self.0
    }
}

/// Counterclockwise circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn unit() -> Self {
        Self::new(Point2::origin(), 1.0)
    }
}

impl BoundaryCurve for Circle {
    #[inline]
    fn point(&self, t: f64) -> Point2 {
        let th = TAU * t;
        self.center + Vec2::new(th.cos(), th.sin()) * self.radius
    }
}

/// Radius modulated by a sine in the curve parameter:
/// `r(t) = radius + amplitude · sin(lobes · 2πt + phase)`.
///
/// `modulate_x`/`modulate_y` select which coordinate uses the modulated
/// radius; the other one keeps `radius`. Both on gives a star-like flower,
/// x only gives the lopsided egg of preset `surface1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialWave {
    pub radius: f64,
    pub amplitude: f64,
    pub lobes: u32,
    pub phase: f64,
    pub modulate_x: bool,
    pub modulate_y: bool,
}

impl RadialWave {
    /// Flower with `lobes` petals; simple as long as `amplitude < radius`.
    pub fn flower(radius: f64, amplitude: f64, lobes: u32) -> Self {
        Self {
            radius,
            amplitude,
            lobes,
            phase: 0.0,
            modulate_x: true,
            modulate_y: true,
        }
    }
}

impl BoundaryCurve for RadialWave {
    fn point(&self, t: f64) -> Point2 {
        let th = TAU * t;
        let r = self.radius + self.amplitude * (f64::from(self.lobes) * th + self.phase).sin();
        let rx = if self.modulate_x { r } else { self.radius };
        let ry = if self.modulate_y { r } else { self.radius };
        Point2::new(rx * th.cos(), ry * th.sin())
    }
}

/// Closed polyline through `vertices`, uniform in t per edge.
///
/// With N samples and N a multiple of `vertices.len()`, every vertex is hit
/// by a sample and the samples in between are exact edge interpolants.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonCurve {
    vertices: Vec<Point2>,
}

impl PolygonCurve {
    /// None for fewer than three vertices.
    pub fn new(vertices: Vec<Point2>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Self { vertices })
    }

    /// Axis-aligned CCW square `[-half, half]²`, starting at `(half, half)`.
    pub fn square(half: f64) -> Self {
        Self {
            vertices: vec![
                Point2::new(half, half),
                Point2::new(-half, half),
                Point2::new(-half, -half),
                Point2::new(half, -half),
            ],
        }
    }

    /// CCW star with `points` tips at radius `outer` and notches at `inner`.
    /// Vertex 2k is a tip, vertex 2k+1 a notch; notches are reflex when
    /// `inner < outer · cos(π / points)`.
    pub fn star(points: usize, outer: f64, inner: f64) -> Option<Self> {
        if points < 2 {
            return None;
        }
        let n = 2 * points;
        let vertices = (0..n)
            .map(|k| {
                let th = PI * k as f64 / points as f64;
                let r = if k % 2 == 0 { outer } else { inner };
                Point2::new(r * th.cos(), r * th.sin())
            })
            .collect();
        Some(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }
}

impl BoundaryCurve for PolygonCurve {
    fn point(&self, t: f64) -> Point2 {
        let n = self.vertices.len();
        let s = t.rem_euclid(1.0) * n as f64;
        let k = (s.floor() as usize).min(n - 1);
        let u = s - k as f64;
        let a = self.vertices[k];
        let b = self.vertices[(k + 1) % n];
        // a + (b - a)·u keeps axis-aligned edges exactly on their line.
        a + (b - a) * u
    }
}

/// `0.5·sin(2πx) + 0.5·sin(2πx)`, the driver's height for the first presets.
pub fn sine_x(p: Point2) -> f64 {
    0.5 * (p.x * TAU).sin() + 0.5 * (p.x * TAU).sin()
}

/// Radial ripple `sin(π·|p|) + 0.1·|p|²`.
pub fn ripple(p: Point2) -> f64 {
    let r2 = p.coords.norm_squared();
    (r2.sqrt() * PI).sin() + r2 * 0.1
}

/// `ripple` plus a six-fold angular twist `sin(6·atan2(x, y))`.
pub fn ripple_twist(p: Point2) -> f64 {
    ripple(p) + (p.x.atan2(p.y) * 6.0).sin()
}
