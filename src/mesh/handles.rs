use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use itertools::Itertools;

use super::{cycle_pairs, Polyhedron};
use crate::math::{self, polygon, Point3, Vector3};

// --- Vertex ---

/// A vertex of a [`Polyhedron`], identified by the owning mesh and an index.
#[derive(Clone, Copy)]
pub struct Vertex<'a> {
    polyhedron: &'a Polyhedron,
    index: usize,
}

impl<'a> Vertex<'a> {
    pub(super) fn new(polyhedron: &'a Polyhedron, index: usize) -> Self {
        Self { polyhedron, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn polyhedron(&self) -> &'a Polyhedron {
        self.polyhedron
    }

    #[must_use]
    pub fn position(&self) -> Point3 {
        self.polyhedron.vertices[self.index]
    }

    /// Faces around this vertex in rotational order.
    pub fn adjacent_faces(&self) -> impl Iterator<Item = Face<'a>> + 'a {
        let polyhedron = self.polyhedron;
        polyhedron.vertex_face_cycles()[self.index]
            .iter()
            .map(move |&f| Face::new(polyhedron, f))
    }

    /// Vertices sharing an edge with this one.
    pub fn adjacent_vertices(&self) -> impl Iterator<Item = Vertex<'a>> + 'a {
        let polyhedron = self.polyhedron;
        let index = self.index;
        polyhedron.vertex_face_cycles()[index].iter().map(move |&f| {
            let face = &polyhedron.faces[f];
            let i = face.iter().position(|&x| x == index).unwrap_or(0);
            Vertex::new(polyhedron, face[(i + 1) % face.len()])
        })
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.polyhedron.vertex_face_cycles()[self.index].len()
    }

    /// The vertex figure: face side counts around the vertex, written from
    /// the lexicographically smallest rotation or reflection, e.g. `"3.4.3.5"`.
    #[must_use]
    pub fn configuration(&self) -> String {
        let sides: Vec<usize> = self.adjacent_faces().map(|f| f.num_sides()).collect();
        canonical_cycle(&sides).iter().join(".")
    }
}

impl PartialEq for Vertex<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.polyhedron, other.polyhedron) && self.index == other.index
    }
}

impl Eq for Vertex<'_> {}

impl Hash for Vertex<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.polyhedron, state);
        self.index.hash(state);
    }
}

impl fmt::Debug for Vertex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex").field("index", &self.index).finish()
    }
}

// --- Face ---

/// A face of a [`Polyhedron`], identified by the owning mesh and an index.
#[derive(Clone, Copy)]
pub struct Face<'a> {
    polyhedron: &'a Polyhedron,
    index: usize,
}

impl<'a> Face<'a> {
    pub(super) fn new(polyhedron: &'a Polyhedron, index: usize) -> Self {
        Self { polyhedron, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn polyhedron(&self) -> &'a Polyhedron {
        self.polyhedron
    }

    #[must_use]
    pub fn vertex_indices(&self) -> &'a [usize] {
        &self.polyhedron.faces[self.index]
    }

    #[must_use]
    pub fn num_sides(&self) -> usize {
        self.vertex_indices().len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'a>> + 'a {
        let polyhedron = self.polyhedron;
        self.vertex_indices()
            .iter()
            .map(move |&v| Vertex::new(polyhedron, v))
    }

    #[must_use]
    pub fn points(&self) -> Vec<Point3> {
        self.vertex_indices()
            .iter()
            .map(|&v| self.polyhedron.vertices[v])
            .collect()
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        math::centroid(&self.points())
    }

    /// Outward unit normal.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        polygon::normal(&self.points())
    }

    /// Signed distance of `point` from the face plane, positive outside.
    #[must_use]
    pub fn plane_distance(&self, point: &Point3) -> f64 {
        self.normal().dot(&(point - self.centroid()))
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        polygon::area(&self.points())
    }

    /// Length of the face's first side.
    #[must_use]
    pub fn side_length(&self) -> f64 {
        let pts = self.points();
        (pts[1] - pts[0]).norm()
    }

    /// Whether all sides are equal and all vertices equidistant from the centre.
    #[must_use]
    pub fn is_regular(&self, tolerance: f64) -> bool {
        let pts = self.points();
        let c = math::centroid(&pts);
        let side = self.side_length();
        let radius = (pts[0] - c).norm();
        cycle_pairs(self.vertex_indices()).all(|(a, b)| {
            let (pa, pb) = (self.polyhedron.vertices[a], self.polyhedron.vertices[b]);
            ((pb - pa).norm() - side).abs() <= tolerance
                && ((pa - c).norm() - radius).abs() <= tolerance
        })
    }

    /// Edges of the face in winding order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'a>> + 'a {
        let polyhedron = self.polyhedron;
        cycle_pairs(self.vertex_indices()).map(move |(a, b)| Edge::new(polyhedron, a, b))
    }

    /// Faces across each edge, in winding order.
    pub fn adjacent_faces(&self) -> impl Iterator<Item = Face<'a>> + 'a {
        let polyhedron = self.polyhedron;
        polyhedron.face_adjacency()[self.index]
            .iter()
            .map(move |&f| Face::new(polyhedron, f))
    }
}

impl PartialEq for Face<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.polyhedron, other.polyhedron) && self.index == other.index
    }
}

impl Eq for Face<'_> {}

impl Hash for Face<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.polyhedron, state);
        self.index.hash(state);
    }
}

impl fmt::Debug for Face<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Face")
            .field("index", &self.index)
            .field("sides", &self.num_sides())
            .finish()
    }
}

// --- Edge ---

/// An undirected edge, stored with its smaller vertex index first.
#[derive(Clone, Copy)]
pub struct Edge<'a> {
    polyhedron: &'a Polyhedron,
    a: usize,
    b: usize,
}

impl<'a> Edge<'a> {
    pub(super) fn new(polyhedron: &'a Polyhedron, a: usize, b: usize) -> Self {
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        Self { polyhedron, a, b }
    }

    #[must_use]
    pub fn vertex_indices(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    #[must_use]
    pub fn vertices(&self) -> (Vertex<'a>, Vertex<'a>) {
        (
            Vertex::new(self.polyhedron, self.a),
            Vertex::new(self.polyhedron, self.b),
        )
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.polyhedron.vertices[self.b] - self.polyhedron.vertices[self.a]).norm()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        math::centroid(&[self.polyhedron.vertices[self.a], self.polyhedron.vertices[self.b]])
    }

    /// The two faces sharing the edge: the one traversing `a -> b`, then the
    /// one traversing `b -> a`.
    #[must_use]
    pub fn faces(&self) -> (Face<'a>, Face<'a>) {
        let left = self.polyhedron.half_edges[&(self.a, self.b)];
        let right = self.polyhedron.half_edges[&(self.b, self.a)];
        (
            Face::new(self.polyhedron, left),
            Face::new(self.polyhedron, right),
        )
    }
}

impl PartialEq for Edge<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.polyhedron, other.polyhedron) && self.a == other.a && self.b == other.b
    }
}

impl Eq for Edge<'_> {}

impl fmt::Debug for Edge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Edge").field(&self.a).field(&self.b).finish()
    }
}

// --- Facet ---

/// A face, or a vertex standing in for the face of the dual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet<'a> {
    Face(Face<'a>),
    Vertex(Vertex<'a>),
}

impl Facet<'_> {
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        match self {
            Self::Face(face) => face.centroid(),
            Self::Vertex(vertex) => vertex.position(),
        }
    }

    /// Outward direction: the face normal, or the direction from the solid's
    /// centroid to the vertex.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        match self {
            Self::Face(face) => face.normal(),
            Self::Vertex(vertex) => (vertex.position() - vertex.polyhedron().centroid())
                .try_normalize(crate::math::TOLERANCE)
                .unwrap_or_else(Vector3::zeros),
        }
    }
}

/// Smallest rotation or reflection of a cyclic sequence.
fn canonical_cycle(seq: &[usize]) -> Vec<usize> {
    let reversed: Vec<usize> = seq.iter().rev().copied().collect();
    (0..seq.len())
        .flat_map(|start| {
            [seq, reversed.as_slice()].map(|s| {
                s[start..].iter().chain(&s[..start]).copied().collect::<Vec<_>>()
            })
        })
        .min()
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use approx::assert_relative_eq;

    use super::*;
    use crate::mesh::tests::{cube, tetrahedron};

    #[test]
    fn canonical_cycle_picks_smallest() {
        assert_eq!(canonical_cycle(&[5, 3, 4, 3]), vec![3, 4, 3, 5]);
        assert_eq!(canonical_cycle(&[6, 3, 3, 4]), vec![3, 3, 4, 6]);
        assert_eq!(canonical_cycle(&[4, 6, 3, 3]), vec![3, 3, 4, 6]);
    }

    #[test]
    fn face_normals_point_outward() {
        let cube = cube();
        let c = cube.centroid();
        for face in cube.faces() {
            assert!(face.normal().dot(&(face.centroid() - c)) > 0.0);
            assert!(face.is_regular(1e-9));
            assert_relative_eq!(face.area(), 1.0);
        }
    }

    #[test]
    fn handles_compare_by_mesh_and_index() {
        let a = cube();
        let b = cube();
        assert_eq!(a.face(2), a.face(2));
        assert_ne!(a.face(2), b.face(2));
        assert_ne!(a.vertex(0), a.vertex(1));
        let set: HashSet<_> = a.faces().chain(a.faces()).collect();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn vertex_neighbours() {
        let tet = tetrahedron();
        let v = tet.vertex(0);
        assert_eq!(v.degree(), 3);
        let mut neighbours: Vec<usize> = v.adjacent_vertices().map(|n| n.index()).collect();
        neighbours.sort_unstable();
        assert_eq!(neighbours, vec![1, 2, 3]);
        assert_eq!(v.configuration(), "3.3.3");
    }

    #[test]
    fn face_adjacency_follows_edges() {
        let cube = cube();
        let top = cube.face(1);
        let adjacent: Vec<usize> = top.adjacent_faces().map(|f| f.index()).collect();
        assert_eq!(adjacent.len(), 4);
        assert!(!adjacent.contains(&0));
        for (edge, face) in top.edges().zip(top.adjacent_faces()) {
            let (left, right) = edge.faces();
            assert!(left == face || right == face);
        }
    }

    #[test]
    fn edge_midpoint_and_length() {
        let cube = cube();
        let edge = cube.face(0).edges().next().unwrap();
        assert_relative_eq!(edge.length(), 1.0);
        let (a, b) = edge.vertex_indices();
        assert!(a < b);
        assert_relative_eq!(
            edge.midpoint(),
            crate::math::centroid(&[cube.positions()[a], cube.positions()[b]])
        );
    }

    #[test]
    fn vertex_facet_normal_points_away_from_centre() {
        let cube = cube();
        let facet = Facet::Vertex(cube.vertex(6));
        let n = facet.normal();
        assert_relative_eq!(n, Vector3::new(1.0, 1.0, 1.0).normalize(), epsilon = 1e-12);
    }
}
