//! Height-field meshes over a surface's boundary, written as Wavefront OBJ.
//!
//! - Vertices: the boundary samples plus a square grid of interior points
//!   kept at least half a grid step away from every boundary edge.
//! - Faces: unconstrained Delaunay (`delaunator`) filtered to triangles whose
//!   centroid lies inside the boundary.
//! - OBJ layout matches the demo viewer input: `v x h y` (height on the
//!   second axis), 1-based `f a b c`.

use std::io::Write;

use anyhow::{bail, Result};
use gordon_wixom::{Point2, Surface};

/// Triangle mesh with heights attached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub points: Vec<Point2>,
    pub heights: Vec<f64>,
    pub faces: Vec<[usize; 3]>,
}

/// Distance from `p` to the segment `a → b`.
fn segment_distance(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let u = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * u)).norm()
}

/// Boundary samples followed by interior grid points with spacing `spacing`.
pub fn sample_points(surface: &Surface, spacing: f64) -> Result<Vec<Point2>> {
    if !(spacing.is_finite() && spacing > 0.0) {
        bail!("spacing must be positive (got {spacing})");
    }
    let boundary = surface.discretized_curve();
    let edges = surface.boundary().segments();
    let mut points = boundary.to_vec();
    let b = surface.bounding_rect();
    let clearance = 0.5 * spacing;
    let nx = (b.extent().x / spacing).ceil() as usize;
    let ny = (b.extent().y / spacing).ceil() as usize;
    for iy in 0..=ny {
        for ix in 0..=nx {
            let p = Point2::new(
                b.min.x + ix as f64 * spacing,
                b.min.y + iy as f64 * spacing,
            );
            if !surface.contains(p) {
                continue;
            }
            if edges
                .iter()
                .any(|&[i, j]| segment_distance(p, boundary[i], boundary[j]) < clearance)
            {
                continue;
            }
            points.push(p);
        }
    }
    Ok(points)
}

/// Triangulate and evaluate the surface at every vertex.
pub fn build(surface: &Surface, spacing: f64) -> Result<Mesh> {
    let points = sample_points(surface, spacing)?;
    let delaunator_points: Vec<delaunator::Point> = points
        .iter()
        .map(|p| delaunator::Point { x: p.x, y: p.y })
        .collect();
    let triangulation = delaunator::triangulate(&delaunator_points);
    let faces: Vec<[usize; 3]> = triangulation
        .triangles
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .filter(|t| {
            let sum = points[t[0]].coords + points[t[1]].coords + points[t[2]].coords;
            surface.contains(Point2::from(sum / 3.0))
        })
        .collect();
    if faces.is_empty() {
        bail!("triangulation produced no interior faces");
    }
    let heights = points.iter().map(|p| surface.eval(*p)).collect();
    tracing::info!(vertices = points.len(), faces = faces.len(), "mesh built");
    Ok(Mesh {
        points,
        heights,
        faces,
    })
}

impl Mesh {
    pub fn write_obj<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        for (p, h) in self.points.iter().zip(&self.heights) {
            writeln!(w, "v {} {} {}", p.x, h, p.y)?;
        }
        for f in &self.faces {
            writeln!(w, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
        }
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gordon_wixom::curves::{Circle, Constant, PolygonCurve};

    #[test]
    fn circle_mesh_covers_the_disk() {
        let s = Surface::new(Circle::unit(), Constant(0.5));
        let mesh = build(&s, 0.2).unwrap();
        assert!(mesh.points.len() > 256);
        assert_eq!(mesh.points.len(), mesh.heights.len());
        assert!(mesh.heights.iter().all(|h| (h - 0.5).abs() < 1e-9));
        // Triangle areas add up to roughly the disk area.
        let area: f64 = mesh
            .faces
            .iter()
            .map(|f| {
                let a = mesh.points[f[1]] - mesh.points[f[0]];
                let b = mesh.points[f[2]] - mesh.points[f[0]];
                0.5 * (a.x * b.y - a.y * b.x).abs()
            })
            .sum();
        assert!((area - std::f64::consts::PI).abs() < 0.05, "area {area}");
    }

    #[test]
    fn grid_points_stay_inside_and_clear_of_the_boundary() {
        let s = Surface::new(PolygonCurve::square(1.0), Constant(0.0));
        let pts = sample_points(&s, 0.25).unwrap();
        let interior = &pts[256..];
        assert!(!interior.is_empty());
        for p in interior {
            // Half a step from every side of the square.
            assert!(p.x.abs() <= 0.875 + 1e-12 && p.y.abs() <= 0.875 + 1e-12);
        }
    }

    #[test]
    fn clearance_is_measured_to_edges_not_just_samples() {
        // Coarse square: the midpoint (0, 0.95) of the top edge is far from
        // both top corners but only 0.05 below the edge itself.
        let cfg = gordon_wixom::SurfaceCfg::default().with_curve_samples(4);
        let s = Surface::with_cfg(PolygonCurve::square(1.0), Constant(0.0), cfg).unwrap();
        let pts = sample_points(&s, 0.05).unwrap();
        assert_eq!(&pts[..4], s.discretized_curve());
        for p in &pts[4..] {
            assert!(1.0 - p.x.abs() >= 0.025 - 1e-12, "{p}");
            assert!(1.0 - p.y.abs() >= 0.025 - 1e-12, "{p}");
        }
        let top = (Point2::new(1.0, 1.0), Point2::new(-1.0, 1.0));
        assert!(segment_distance(Point2::new(0.0, 0.95), top.0, top.1) < 0.051);
        assert!((segment_distance(Point2::new(3.0, 1.0), top.0, top.1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn obj_uses_height_as_second_axis_and_one_based_faces() {
        let mesh = Mesh {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 2.0),
            ],
            heights: vec![5.0, 6.0, 7.0],
            faces: vec![[0, 1, 2]],
        };
        let mut out = Vec::new();
        mesh.write_obj(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["v 0 5 0", "v 1 6 0", "v 0 7 2", "f 1 2 3"]);
    }

    #[test]
    fn rejects_bad_spacing() {
        let s = Surface::new(Circle::unit(), Constant(0.0));
        assert!(build(&s, 0.0).is_err());
        assert!(build(&s, f64::NAN).is_err());
        assert!(sample_points(&s, 0.0).is_err());
        assert!(sample_points(&s, -1.0).is_err());
        assert!(sample_points(&s, f64::INFINITY).is_err());
    }
}
