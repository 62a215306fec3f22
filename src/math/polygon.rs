//! Regular-polygon trigonometry and planar polygon helpers.
//!
//! All regular polygons here have unit side length.

use std::f64::consts::PI;

use super::{centroid, Point3, Vector3, TOLERANCE};

/// Distance from the centre of a unit-edge regular `n`-gon to a vertex.
#[must_use]
pub fn circumradius(n: usize) -> f64 {
    1.0 / (2.0 * (PI / sides(n)).sin())
}

/// Distance from the centre of a unit-edge regular `n`-gon to an edge midpoint.
///
/// A digon (`n == 2`) has inradius zero.
#[must_use]
pub fn inradius(n: usize) -> f64 {
    if n == 2 {
        return 0.0;
    }
    1.0 / (2.0 * (PI / sides(n)).tan())
}

/// Vertices of a unit-edge regular `n`-gon lying in the plane `y = height`,
/// centred on the y axis.
///
/// Vertex `k` sits at angle `2πk/n + phase`, measured from +z towards +x.
#[must_use]
pub fn ring(n: usize, height: f64, phase: f64) -> Vec<Point3> {
    let r = circumradius(n);
    (0..n)
        .map(|k| {
            let angle = 2.0 * PI * sides(k) / sides(n) + phase;
            Point3::new(r * angle.sin(), height, r * angle.cos())
        })
        .collect()
}

/// Unnormalized polygon normal by Newell's method. Its length is twice the
/// polygon's area.
#[must_use]
pub fn newell(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Unit normal of a polygon; the zero vector for a degenerate polygon.
#[must_use]
pub fn normal(points: &[Point3]) -> Vector3 {
    newell(points)
        .try_normalize(TOLERANCE)
        .unwrap_or_else(Vector3::zeros)
}

/// Area of a planar polygon.
#[must_use]
pub fn area(points: &[Point3]) -> f64 {
    0.5 * newell(points).norm()
}

/// Whether every point lies within `tolerance` of the polygon's best plane.
#[must_use]
pub fn is_planar(points: &[Point3], tolerance: f64) -> bool {
    let n = normal(points);
    if n == Vector3::zeros() {
        return false;
    }
    let c = centroid(points);
    points.iter().all(|p| n.dot(&(p - c)).abs() <= tolerance)
}

#[allow(clippy::cast_precision_loss)]
fn sides(n: usize) -> f64 {
    n as f64
}
