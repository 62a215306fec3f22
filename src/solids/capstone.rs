//! Pyramids, cupolae, rotundae and the capstones built from them.

use std::f64::consts::PI;
use std::sync::OnceLock;

use nalgebra::{Rotation3, Vector3 as NVector3};

use super::{classical, elementary};
use crate::error::{MeshError, Result};
use crate::math::polygon::{circumradius, inradius, ring};
use crate::math::{Point3, Vector3};
use crate::mesh::{CapType, Polyhedron};
use crate::specs::{Capstone, Classical, ClassicalOperation, Family, FacetType, Gyration, Twist};

#[allow(clippy::cast_precision_loss)]
fn sides(n: usize) -> f64 {
    n as f64
}

fn turn_about_y(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&NVector3::y_axis(), angle)
}

/// Angle of a point about the y axis, from +z towards +x.
fn azimuth(p: &Point3) -> f64 {
    p.x.atan2(p.z)
}

/// `x` reduced into `[-period / 2, period / 2]`.
fn wrap(x: f64, period: f64) -> f64 {
    x - period * (x / period).round()
}

fn pyramid_points(n: usize) -> Vec<Point3> {
    let r = circumradius(n);
    let mut points = ring(n, 0.0, 0.0);
    points.push(Point3::new(0.0, (1.0 - r * r).sqrt(), 0.0));
    points
}

fn cupola_points(m: usize) -> Vec<Point3> {
    let gap = inradius(2 * m) - inradius(m);
    let height = (1.0 - gap * gap).sqrt();
    let mut points = ring(2 * m, 0.0, 0.0);
    if m == 2 {
        let (s, c) = (PI / 4.0).sin_cos();
        points.push(Point3::new(0.5 * c, height, -0.5 * s));
        points.push(Point3::new(-0.5 * c, height, 0.5 * s));
    } else {
        points.extend(ring(m, height, -PI / (2.0 * sides(m))));
    }
    points
}

/// The upper half of the icosidodecahedron about a pentagon axis, turned so
/// its base matches `ring(10, 0, 0)` with a pentagon on the first base edge.
fn rotunda_points() -> Result<&'static [Point3]> {
    static ROTUNDA: OnceLock<Vec<Point3>> = OnceLock::new();
    if let Some(points) = ROTUNDA.get() {
        return Ok(points);
    }
    let id = classical::build(&Classical::new(Family::Icosahedral, ClassicalOperation::Rectify))?;
    let pentagon = id
        .faces_with_sides(5)
        .next()
        .ok_or_else(|| MeshError::InvalidMesh("icosidodecahedron without pentagons".into()))?;
    let axis = pentagon.centroid() - id.centroid();
    let upright = Rotation3::rotation_between(&axis, &Vector3::y())
        .unwrap_or_else(|| Rotation3::from_axis_angle(&NVector3::x_axis(), PI));
    let mut points: Vec<Point3> = id
        .positions()
        .iter()
        .map(|p| upright * Point3::from(p - id.centroid()))
        .filter(|p| p.y > -1e-9)
        .collect();
    let first_base = points
        .iter()
        .find(|p| p.y.abs() < 1e-9)
        .copied()
        .ok_or_else(|| MeshError::InvalidMesh("rotunda without a base".into()))?;
    let align = turn_about_y(-azimuth(&first_base));
    points = points.iter().map(|p| align * p).collect();

    let hull = Polyhedron::from_points(points.clone())?;
    let base_vertex = |angle: f64| {
        (0..points.len()).min_by(|&a, &b| {
            let score = |i: usize| {
                points[i].y.abs() + wrap(azimuth(&points[i]) - angle, 2.0 * PI).abs()
            };
            score(a).total_cmp(&score(b))
        })
    };
    let (Some(a), Some(b)) = (base_vertex(0.0), base_vertex(2.0 * PI / 10.0)) else {
        return Err(MeshError::InvalidMesh("rotunda base not found".into()).into());
    };
    let first_edge_is_pentagon = hull.faces().any(|f| {
        f.num_sides() == 5 && f.vertex_indices().contains(&a) && f.vertex_indices().contains(&b)
    });
    if !first_edge_is_pentagon {
        let step = turn_about_y(2.0 * PI / 10.0);
        points = points.iter().map(|p| step * p).collect();
    }
    Ok(ROTUNDA.get_or_init(|| points))
}

fn cap_points(kind: CapType, base_sides: usize) -> Result<Vec<Point3>> {
    Ok(match kind {
        CapType::Pyramid => pyramid_points(base_sides),
        CapType::Cupola => cupola_points(base_sides / 2),
        CapType::Rotunda => rotunda_points()?.to_vec(),
    })
}

/// Azimuth of the top face's first vertex, modulo its symmetry.
fn top_phase(kind: CapType, base_sides: usize) -> Result<f64> {
    Ok(match kind {
        CapType::Pyramid => 0.0,
        CapType::Cupola => -PI / sides(base_sides),
        CapType::Rotunda => {
            let points = rotunda_points()?;
            let top = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
            points
                .iter()
                .filter(|p| (p.y - top).abs() < 1e-9)
                .map(|p| azimuth(p).rem_euclid(2.0 * PI / 5.0))
                .fold(f64::MAX, f64::min)
        }
    })
}

/// A lone cap with a unit-edge base of `base_sides` sides, and the index of
/// its base face.
///
/// # Errors
///
/// Returns an error if no cap of that kind has such a base.
pub fn cap(kind: CapType, base_sides: usize) -> Result<(Polyhedron, usize)> {
    let valid = match kind {
        CapType::Pyramid => (3..=5).contains(&base_sides),
        CapType::Cupola => [4, 6, 8, 10].contains(&base_sides),
        CapType::Rotunda => base_sides == 10,
    };
    if !valid {
        return Err(MeshError::InvalidMesh(format!(
            "no {} has a {base_sides}-gonal base",
            kind.name()
        ))
        .into());
    }
    let solid = Polyhedron::from_points(cap_points(kind, base_sides)?)?;
    let base = solid
        .faces()
        .find(|f| f.num_sides() == base_sides && f.normal().y < -1.0 + 1e-6)
        .map(|f| f.index())
        .ok_or_else(|| MeshError::InvalidMesh(format!("{} has no base", kind.name())))?;
    Ok((solid, base))
}

/// Height of the band between the two base rings.
fn band_height(capstone: &Capstone) -> f64 {
    let n = capstone.base_sides();
    if capstone.is_elongated() {
        1.0
    } else if capstone.is_gyroelongated() {
        let chord = 2.0 * circumradius(n) * (PI / (2.0 * sides(n))).sin();
        (1.0 - chord * chord).sqrt()
    } else {
        0.0
    }
}

fn cap_kinds(capstone: &Capstone) -> Vec<CapType> {
    let count = usize::from(capstone.count());
    if capstone.is_primary() {
        return vec![CapType::Pyramid; count];
    }
    let rotundae = usize::from(capstone.rotunda_count());
    let mut kinds = vec![CapType::Cupola; count - rotundae];
    kinds.extend(vec![CapType::Rotunda; rotundae]);
    kinds
}

/// Rotation of the lower cap about the axis after mirroring it below the base.
fn lower_phase(capstone: &Capstone, upper: CapType, lower: CapType) -> Result<f64> {
    let n = capstone.base_sides();
    if capstone.is_gyroelongated() {
        let half_step = PI / sides(n);
        return Ok(if capstone.twist() == Some(Twist::Left) {
            half_step
        } else {
            -half_step
        });
    }
    if upper == CapType::Pyramid {
        return Ok(0.0);
    }
    let period = 2.0 * PI / sides(capstone.base());
    let want_aligned = capstone.gyrate() != Some(Gyration::Gyro);
    let offset = top_phase(lower, n)? - top_phase(upper, n)?;
    Ok([0.0, 2.0 * PI / sides(n)]
        .into_iter()
        .find(|candidate| (wrap(offset + candidate, period).abs() < 1e-9) == want_aligned)
        .unwrap_or(0.0))
}

pub(super) fn build(capstone: &Capstone) -> Result<Polyhedron> {
    if capstone.is_snub() {
        return match capstone.base() {
            2 => elementary::snub_disphenoid(),
            3 => classical::build(
                &Classical::new(Family::Icosahedral, ClassicalOperation::Regular)
                    .with_facet(FacetType::Vertex),
            ),
            _ => elementary::snub_square_antiprism(),
        };
    }
    let n = capstone.base_sides();
    let half = band_height(capstone) / 2.0;
    let mut points = ring(n, half, 0.0);
    if !capstone.is_shortened() {
        let phase = if capstone.is_gyroelongated() { PI / sides(n) } else { 0.0 };
        points.extend(ring(n, -half, phase));
    }
    let kinds = cap_kinds(capstone);
    if let Some(&upper) = kinds.first() {
        points.extend(
            cap_points(upper, n)?
                .into_iter()
                .filter(|p| p.y > 1e-9)
                .map(|p| p + Vector3::new(0.0, half, 0.0)),
        );
    }
    if let [upper, lower] = kinds[..] {
        let turn = turn_about_y(lower_phase(capstone, upper, lower)?);
        points.extend(
            cap_points(lower, n)?
                .into_iter()
                .filter(|p| p.y > 1e-9)
                .map(|p| turn * Point3::new(p.x, -p.y, p.z) - Vector3::new(0.0, half, 0.0)),
        );
    }
    Polyhedron::from_points(points)
}
