//! The driver's eight demo surfaces (`surface0` … `surface7`).
//!
//! Each preset pairs a `RadialWave` boundary of base radius 2 with one of the
//! stock height fields. `surface6` repeats `surface5`; the driver writes both.

use std::sync::Arc;

use super::{ripple, ripple_twist, sine_x, BoundaryCurve, HeightField, RadialWave};
use crate::cfg::{CfgError, SurfaceCfg};
use crate::planar::Point2;
use crate::surface::Surface;

/// A named boundary/height pair.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub name: &'static str,
    pub curve: RadialWave,
    pub height: fn(Point2) -> f64,
}

impl Preset {
    pub fn curve(&self) -> Arc<dyn BoundaryCurve> {
        Arc::new(self.curve)
    }

    pub fn height(&self) -> Arc<dyn HeightField> {
        Arc::new(self.height)
    }

    /// Build the interpolant for this preset.
    pub fn surface(&self, cfg: SurfaceCfg) -> Result<Surface, CfgError> {
        Surface::from_shared(self.curve(), self.height(), cfg)
    }
}

/// `0.5·sin(2πx) · 0.5·sin(2πx)`.
fn sine_x_squared(p: Point2) -> f64 {
    let s = 0.5 * (p.x * std::f64::consts::TAU).sin();
    s * s
}

const R: f64 = 2.0;

fn egg() -> RadialWave {
    RadialWave {
        modulate_y: false,
        ..RadialWave::flower(R, 1.0, 2)
    }
}

/// All presets in driver order.
pub fn all() -> Vec<Preset> {
    vec![
        Preset {
            name: "surface0",
            curve: RadialWave::flower(R, 0.0, 0),
            height: sine_x,
        },
        Preset {
            name: "surface1",
            curve: egg(),
            height: sine_x,
        },
        Preset {
            name: "surface2",
            curve: RadialWave::flower(R, 0.5, 4),
            height: sine_x,
        },
        Preset {
            name: "surface3",
            curve: RadialWave::flower(R, 0.5, 6),
            height: sine_x_squared,
        },
        Preset {
            name: "surface4",
            curve: RadialWave::flower(R, 1.0, 6),
            height: ripple,
        },
        Preset {
            name: "surface5",
            curve: RadialWave::flower(R, 1.0, 6),
            height: ripple_twist,
        },
        Preset {
            name: "surface6",
            curve: RadialWave::flower(R, 1.0, 6),
            height: ripple_twist,
        },
        Preset {
            name: "surface7",
            curve: RadialWave::flower(R, 1.0, 4),
            height: ripple_twist,
        },
    ]
}

pub fn by_name(name: &str) -> Option<Preset> {
    all().into_iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_found() {
        let presets = all();
        assert_eq!(presets.len(), 8);
        for p in &presets {
            assert_eq!(by_name(p.name).map(|q| q.name), Some(p.name));
        }
        assert!(by_name("surface8").is_none());
    }

    #[test]
    fn surface0_is_the_radius_two_circle() {
        let s = by_name("surface0")
            .unwrap()
            .surface(SurfaceCfg::default())
            .unwrap();
        for p in s.discretized_curve() {
            assert!((p.coords.norm() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn every_preset_builds_from_its_shared_parts() {
        let cfg = SurfaceCfg::default().with_curve_samples(64).with_directions(24);
        for p in all() {
            let s = p.surface(cfg).unwrap();
            assert_eq!(s.discretized_curve().len(), 64, "{}", p.name);
            let x = s.discretized_curve()[5];
            assert_eq!(s.eval(x), (p.height)(x), "{}", p.name);
            assert!(s.eval(Point2::origin()).is_finite(), "{}", p.name);
        }
    }

    #[test]
    fn egg_only_stretches_x() {
        let c = egg();
        // t = 1/8: sin(4π/8) = 1, so the x radius is 3 while y keeps 2.
        let p = c.point(0.125);
        let th = std::f64::consts::TAU * 0.125;
        assert!((p.x - 3.0 * th.cos()).abs() < 1e-12);
        assert!((p.y - 2.0 * th.sin()).abs() < 1e-12);
    }
}
