//! Accuracy and timing probe on the unit circle.
//!
//! Purpose
//! - Show how the interior estimate at the origin converges to the mean
//!   boundary height (0 for `sin(2πx)`) as the direction count M grows.
//! - Give a rough per-evaluation cost for N = 256.

use std::f64::consts::TAU;
use std::time::Instant;

use gordon_wixom::prelude::*;

fn main() {
    let height = |p: Point2| (TAU * p.x).sin();
    for m in [10usize, 25, 50, 100, 200, 400] {
        let cfg = SurfaceCfg::default().with_directions(m);
        let surface = Surface::with_cfg(Circle::unit(), height, cfg).expect("valid cfg");
        let start = Instant::now();
        let v = surface.eval(Point2::origin());
        let elapsed_us = start.elapsed().as_secs_f64() * 1e6;
        println!("directions={m} value_at_origin={v:+.3e} eval_time_us={elapsed_us:.1}");
    }
}
