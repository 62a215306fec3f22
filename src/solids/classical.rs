//! Platonic and Archimedean solids by Wythoff construction.
//!
//! Each family has a reflection triangle whose corners point at a face
//! centre, an edge midpoint and a vertex of the regular solid. A seed point
//! at prescribed distances from the three mirrors is reflected until closed;
//! its orbit is the vertex set.

use crate::error::Result;
use crate::math::{self, Matrix3, Point3, Vector3, PHI};
use crate::mesh::Polyhedron;
use crate::specs::{Classical, ClassicalOperation, FacetType, Family, Twist};

/// Distances of the snub seed from the face, edge and vertex mirrors,
/// giving unit edges.
const SNUB_SEEDS: [[f64; 3]; 3] = [
    [0.353_553_390_593_273_73, 0.218_508_012_224_410_5, 0.353_553_390_593_273_73],
    [0.368_676_352_880_163_87, 0.200_445_282_300_331_7, 0.337_753_973_813_752_4],
    [0.374_821_658_114_562_36, 0.192_893_711_352_359_17, 0.330_921_024_729_844_2],
];

struct Mirrors {
    face: Vector3,
    edge: Vector3,
    vertex: Vector3,
}

impl Mirrors {
    fn new(family: Family) -> Self {
        let (f, e, v) = match family {
            Family::Tetrahedral => (
                Vector3::new(1.0, 1.0, -1.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 1.0),
            ),
            Family::Octahedral => (
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(0.0, 1.0, 1.0),
                Vector3::new(1.0, 1.0, 1.0),
            ),
            Family::Icosahedral => (
                Vector3::new(0.0, PHI, 1.0),
                Vector3::new(PHI, PHI * PHI, 1.0),
                Vector3::new(1.0, 1.0, 1.0),
            ),
        };
        // Each mirror contains the other two corners and faces its own.
        let facing = |a: &Vector3, b: &Vector3, towards: &Vector3| {
            let n = a.cross(b).normalize();
            if n.dot(towards) < 0.0 {
                -n
            } else {
                n
            }
        };
        Self {
            face: facing(&e, &v, &f),
            edge: facing(&f, &v, &e),
            vertex: facing(&f, &e, &v),
        }
    }

    fn rows(&self) -> [Vector3; 3] {
        [self.face, self.edge, self.vertex]
    }

    /// The point at the given distances from the face, edge and vertex mirrors.
    fn seed(&self, distances: Vector3) -> Point3 {
        math::solve3(self.rows(), distances).map_or_else(Point3::origin, Point3::from)
    }
}

fn reflection(normal: &Vector3) -> Matrix3 {
    Matrix3::identity() - 2.0 * normal * normal.transpose()
}

/// Closure of `seed` under the generators.
fn orbit(seed: Point3, generators: &[Matrix3]) -> Vec<Point3> {
    let mut points = vec![seed];
    let mut i = 0;
    while i < points.len() {
        let current = points[i];
        for g in generators {
            let image = Point3::from(g * current.coords);
            if points.iter().all(|p| (p - image).norm() > 1e-7) {
                points.push(image);
            }
        }
        i += 1;
    }
    points
}

fn wythoff_distances(solid: &Classical) -> Vector3 {
    let vertex_facet = solid.facet() == Some(FacetType::Vertex);
    let d = match (solid.operation(), vertex_facet) {
        (ClassicalOperation::Regular, false) => [0.0, 0.0, 1.0],
        (ClassicalOperation::Regular, true) => [1.0, 0.0, 0.0],
        (ClassicalOperation::Truncate, false) => [0.0, 1.0, 1.0],
        (ClassicalOperation::Truncate, true) => [1.0, 1.0, 0.0],
        (ClassicalOperation::Rectify, _) => [0.0, 1.0, 0.0],
        (ClassicalOperation::Cantellate, _) => [1.0, 0.0, 1.0],
        (ClassicalOperation::Bevel | ClassicalOperation::Snub, _) => [1.0, 1.0, 1.0],
    };
    Vector3::from(d) * 0.5
}

fn snub_points(family: Family) -> Vec<Point3> {
    let mirrors = Mirrors::new(family);
    let [nf, ne, nv] = mirrors.rows().map(|n| reflection(&n));
    // Rotations about the face centre and the vertex.
    let about_face = nv * ne;
    let about_vertex = ne * nf;
    let seed = mirrors.seed(Vector3::from(SNUB_SEEDS[family.n() - 3]));
    orbit(seed, &[about_face, about_vertex])
}

/// Unit-edge embedding of a classical solid centred on the origin.
pub(super) fn build(solid: &Classical) -> Result<Polyhedron> {
    let points = if solid.is_snub() {
        let points = snub_points(solid.family());
        if solid.twist() == Some(Twist::Right) {
            points.into_iter().map(|p| Point3::new(-p.x, p.y, p.z)).collect()
        } else {
            points
        }
    } else {
        let mirrors = Mirrors::new(solid.family());
        let generators = mirrors.rows().map(|n| reflection(&n));
        orbit(mirrors.seed(wythoff_distances(solid)), &generators)
    };
    Polyhedron::from_points(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn solid(family: Family, operation: ClassicalOperation) -> Polyhedron {
        build(&Classical::new(family, operation)).unwrap()
    }

    #[test]
    fn regular_solids() {
        let cube = solid(Family::Octahedral, ClassicalOperation::Regular);
        assert_eq!(cube.faces_by_sides(), [(4, 6)].into());
        assert_relative_eq!(cube.edge_length(), 1.0, epsilon = 1e-9);
        let icosahedron = build(
            &Classical::new(Family::Icosahedral, ClassicalOperation::Regular)
                .with_facet(FacetType::Vertex),
        )
        .unwrap();
        assert_eq!(icosahedron.faces_by_sides(), [(3, 20)].into());
    }

    #[test]
    fn every_classical_solid_is_unit_edged_and_valid() {
        for specs in Classical::get_all() {
            let solid = build(&specs).unwrap();
            assert!(solid.is_valid(), "{} is invalid", specs.name());
            assert!(solid.is_convex(), "{} is not convex", specs.name());
            assert_relative_eq!(solid.edge_length(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(solid.centroid().coords.norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn archimedean_vertex_figures() {
        let id = solid(Family::Icosahedral, ClassicalOperation::Rectify);
        assert_eq!(id.vertex_configuration(), &[("3.5.3.5".to_string(), 30)].into());
        let snub_cube = solid(Family::Octahedral, ClassicalOperation::Snub);
        assert_eq!(snub_cube.vertex_configuration(), &[("3.3.3.3.4".to_string(), 24)].into());
        let bevel = solid(Family::Tetrahedral, ClassicalOperation::Bevel);
        assert_eq!(bevel.faces_by_sides(), [(4, 6), (6, 8)].into());
    }

    #[test]
    fn snub_twists_are_mirror_images() {
        let left = solid(Family::Icosahedral, ClassicalOperation::Snub);
        let right = build(
            &Classical::new(Family::Icosahedral, ClassicalOperation::Snub).with_twist(Twist::Right),
        )
        .unwrap();
        assert!(left.is_same(&right));
        assert_eq!(left.num_vertices(), 60);
    }
}
