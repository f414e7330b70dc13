//! Boundary interpolation over closed planar curves.
//!
//! A `Surface` takes a closed parametric curve and a height function defined
//! on it, and estimates the height anywhere inside: lines through the query
//! point are intersected with a polygonal sampling of the curve, and the
//! boundary heights at the hits are blended with alternating inverse-distance
//! weights, integrated over line direction (a modified Gordon–Wixom scheme).
//!
//! Layout
//! - `planar`: point/vector aliases over nalgebra, 2D cross product, bounds.
//! - `curves`: the `BoundaryCurve`/`HeightField` capabilities, stock shapes,
//!   driver presets, random star-shaped curves.
//! - `boundary`: discretization, reflex-vertex flags, ray intersection.
//! - `surface`: the evaluator.
//! - `cfg`: resolutions and tolerances.
//!
//! Not provided: harmonicity, self-intersecting curves, adaptive sampling,
//! gradients of the field.

pub mod boundary;
pub mod cfg;
pub mod curves;
pub mod planar;
pub mod surface;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use boundary::{Discretization, Hit, RayHits};
pub use cfg::{CfgError, SurfaceCfg};
pub use curves::{BoundaryCurve, HeightField};
pub use planar::{Bounds, Point2, Vec2};
pub use surface::{Estimate, Surface};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::curves::presets::{self, Preset};
    pub use crate::curves::rand::{draw_radial_curve, RadialCfg, RandomRadialCurve, ReplayToken};
    pub use crate::curves::{
        ripple, ripple_twist, sine_x, BoundaryCurve, Circle, Constant, HeightField, PolygonCurve,
        RadialWave,
    };
    pub use crate::{Bounds, CfgError, Estimate, Point2, Surface, SurfaceCfg, Vec2};
}
