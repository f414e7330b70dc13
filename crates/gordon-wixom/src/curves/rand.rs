//! Random star-shaped boundaries (Fourier radial jitter + replay tokens).
//!
//! Model
//! - `r(θ) = base_radius · (1 + Σ_k a_k cos(kθ) + b_k sin(kθ))` for
//!   k = 2..=harmonics+1, with Σ|a_k| + |b_k| ≤ `jitter` < 1. The radius stays
//!   positive, so the curve is simple and star-shaped around the origin.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::BoundaryCurve;
use crate::planar::Point2;

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    /// Number of Fourier modes above the ellipse mode.
    pub harmonics: usize,
    /// Total relative amplitude budget, clamped to [0, 0.9].
    pub jitter: f64,
    pub base_radius: f64,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            harmonics: 5,
            jitter: 0.4,
            base_radius: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Star-shaped closed curve with a Fourier-modulated radius.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomRadialCurve {
    pub base_radius: f64,
    /// `(a_k, b_k)` for k = 2, 3, …
    pub modes: Vec<(f64, f64)>,
}

impl RandomRadialCurve {
    /// Relative radius `r(θ) / base_radius`.
    pub fn relative_radius(&self, theta: f64) -> f64 {
        let mut r = 1.0;
        for (i, (a, b)) in self.modes.iter().enumerate() {
            let k = (i + 2) as f64;
            r += a * (k * theta).cos() + b * (k * theta).sin();
        }
        r
    }
}

impl BoundaryCurve for RandomRadialCurve {
    fn point(&self, t: f64) -> Point2 {
        let th = TAU * t;
        let r = self.base_radius * self.relative_radius(th);
        Point2::new(r * th.cos(), r * th.sin())
    }
}

/// Draw a random star-shaped curve.
pub fn draw_radial_curve(cfg: RadialCfg, tok: ReplayToken) -> RandomRadialCurve {
    let mut rng = tok.to_std_rng();
    let budget = cfg.jitter.clamp(0.0, 0.9);
    let raw: Vec<(f64, f64)> = (0..cfg.harmonics)
        .map(|_| (rng.gen::<f64>() * 2.0 - 1.0, rng.gen::<f64>() * 2.0 - 1.0))
        .collect();
    let total: f64 = raw.iter().map(|(a, b)| a.abs() + b.abs()).sum();
    let scale = if total > 0.0 {
        budget * rng.gen::<f64>() / total
    } else {
        0.0
    };
    RandomRadialCurve {
        base_radius: cfg.base_radius.max(1e-9),
        modes: raw.into_iter().map(|(a, b)| (a * scale, b * scale)).collect(),
    }
}
