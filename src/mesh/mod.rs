//! Immutable indexed polygon meshes and the queries operations rely on.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use itertools::Itertools;

use crate::config::EngineConfig;
use crate::error::{MeshError, Result};
use crate::math::{self, polygon, Point3, TOLERANCE};

mod builder;
mod caps;
mod export;
mod handles;
mod hull;
mod measure;
mod signature;

pub use builder::Builder;
pub use caps::{attach, Cap, CapType};
pub use export::SolidData;
pub use handles::{Edge, Face, Facet, Vertex};

/// Canonical vertex figure (`"3.4.3.4"`) to the number of vertices having it.
pub type VertexConfiguration = BTreeMap<String, usize>;

/// A closed, orientable polygon mesh.
///
/// Faces are wound counter-clockwise seen from outside. A polyhedron is never
/// mutated after construction; derived data is computed on first access and
/// cached for the lifetime of the instance.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
    /// Directed edge `(a, b)` to the face traversing it.
    half_edges: HashMap<(usize, usize), usize>,
    edges: OnceLock<Vec<(usize, usize)>>,
    adjacency: OnceLock<Vec<Vec<usize>>>,
    vertex_faces: OnceLock<Vec<Vec<usize>>>,
    centroid: OnceLock<Point3>,
    configuration: OnceLock<VertexConfiguration>,
    signature: OnceLock<Vec<(u64, usize)>>,
}

impl Polyhedron {
    /// Creates a polyhedron from vertex positions and face index lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a face has fewer than three vertices, repeats a
    /// vertex, references a missing vertex or has no area, if a vertex is
    /// used by no face, if any edge is not shared by exactly two oppositely
    /// wound faces, if a vertex joins two separate fans of faces, or if the
    /// faces fall apart into several pieces.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Result<Self> {
        let count = vertices.len();
        let mut half_edges = HashMap::new();
        let mut used = vec![false; count];

        for (f, face) in faces.iter().enumerate() {
            if face.len() < 3 || !face.iter().all_unique() {
                return Err(MeshError::DegenerateFace {
                    face: f,
                    sides: face.len(),
                }
                .into());
            }
            if let Some(&index) = face.iter().find(|&&i| i >= count) {
                return Err(MeshError::VertexOutOfRange { face: f, index, count }.into());
            }
            let points: Vec<Point3> = face.iter().map(|&i| vertices[i]).collect();
            if polygon::area(&points) < TOLERANCE {
                return Err(MeshError::DegenerateFace {
                    face: f,
                    sides: face.len(),
                }
                .into());
            }
            for (a, b) in cycle_pairs(face) {
                used[a] = true;
                if half_edges.insert((a, b), f).is_some() {
                    return Err(MeshError::InvalidMesh(format!(
                        "edge ({a}, {b}) is traversed twice in the same direction"
                    ))
                    .into());
                }
            }
        }

        if let Some((a, b)) = half_edges
            .keys()
            .find(|(a, b)| !half_edges.contains_key(&(*b, *a)))
        {
            return Err(
                MeshError::InvalidMesh(format!("edge ({a}, {b}) borders a single face")).into(),
            );
        }
        if let Some(v) = used.iter().position(|u| !u) {
            return Err(MeshError::InvalidMesh(format!("vertex {v} belongs to no face")).into());
        }

        let polyhedron = Self {
            vertices,
            faces,
            half_edges,
            edges: OnceLock::new(),
            adjacency: OnceLock::new(),
            vertex_faces: OnceLock::new(),
            centroid: OnceLock::new(),
            configuration: OnceLock::new(),
            signature: OnceLock::new(),
        };
        polyhedron.check_manifold()?;
        Ok(polyhedron)
    }

    /// Each vertex has one fan of faces and the faces form one piece.
    fn check_manifold(&self) -> Result<()> {
        let mut incident = vec![0_usize; self.vertices.len()];
        for &v in self.faces.iter().flatten() {
            incident[v] += 1;
        }
        let pinched = (0..self.vertices.len()).find(|&v| self.vertex_faces(v).len() != incident[v]);
        if let Some(v) = pinched {
            return Err(
                MeshError::InvalidMesh(format!("vertex {v} joins separate fans of faces")).into(),
            );
        }
        if self.faces.is_empty() {
            return Ok(());
        }
        let mut reached = vec![false; self.faces.len()];
        reached[0] = true;
        let mut pending = vec![0];
        while let Some(f) = pending.pop() {
            for &g in &self.face_adjacency()[f] {
                if !reached[g] {
                    reached[g] = true;
                    pending.push(g);
                }
            }
        }
        match reached.iter().position(|&r| !r) {
            Some(f) => {
                Err(MeshError::InvalidMesh(format!("face {f} is not connected to face 0")).into())
            }
            None => Ok(()),
        }
    }

    // --- Raw data ---

    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.vertices
    }

    #[must_use]
    pub fn face_lists(&self) -> &[Vec<usize>] {
        &self.faces
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edge_pairs().len()
    }

    // --- Handles ---

    /// Handle to vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Vertex<'_> {
        assert!(index < self.vertices.len(), "vertex {index} out of range");
        Vertex::new(self, index)
    }

    /// Handle to face `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn face(&self, index: usize) -> Face<'_> {
        assert!(index < self.faces.len(), "face {index} out of range");
        Face::new(self, index)
    }

    /// Handle to face `index`, or an error if there is no such face.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ForeignElement`] if `index` is out of range.
    pub fn try_face(&self, index: usize) -> Result<Face<'_>> {
        if index < self.faces.len() {
            Ok(Face::new(self, index))
        } else {
            Err(MeshError::ForeignElement("face").into())
        }
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_>> {
        (0..self.vertices.len()).map(move |i| Vertex::new(self, i))
    }

    pub fn faces(&self) -> impl Iterator<Item = Face<'_>> {
        (0..self.faces.len()).map(move |i| Face::new(self, i))
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.edge_pairs()
            .iter()
            .map(move |&(a, b)| Edge::new(self, a, b))
    }

    /// Faces with exactly `sides` vertices.
    pub fn faces_with_sides(&self, sides: usize) -> impl Iterator<Item = Face<'_>> {
        self.faces().filter(move |f| f.num_sides() == sides)
    }

    /// The face with the most sides; the lowest index wins ties.
    #[must_use]
    pub fn largest_face(&self) -> Face<'_> {
        let index = self
            .faces
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, f)| f.len())
            .map_or(0, |(i, _)| i);
        Face::new(self, index)
    }

    /// Number of faces of each side count.
    #[must_use]
    pub fn faces_by_sides(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for face in &self.faces {
            *counts.entry(face.len()).or_insert(0) += 1;
        }
        counts
    }

    // --- Derived topology ---

    /// Undirected edges as `(a, b)` with `a < b`, in face order.
    pub(crate) fn edge_pairs(&self) -> &[(usize, usize)] {
        self.edges.get_or_init(|| {
            self.faces
                .iter()
                .flat_map(|f| cycle_pairs(f))
                .filter(|(a, b)| a < b)
                .collect()
        })
    }

    /// The face traversing the directed edge `(a, b)`.
    pub(crate) fn face_on(&self, a: usize, b: usize) -> Option<usize> {
        self.half_edges.get(&(a, b)).copied()
    }

    /// For each face, the faces across its edges in edge order.
    #[must_use]
    pub fn face_adjacency(&self) -> &[Vec<usize>] {
        self.adjacency.get_or_init(|| {
            self.faces
                .iter()
                .map(|f| {
                    cycle_pairs(f)
                        .map(|(a, b)| self.half_edges[&(b, a)])
                        .collect()
                })
                .collect()
        })
    }

    /// For each vertex, its faces in rotational order.
    pub(crate) fn vertex_face_cycles(&self) -> &[Vec<usize>] {
        self.vertex_faces.get_or_init(|| {
            let mut first = vec![usize::MAX; self.vertices.len()];
            for (f, face) in self.faces.iter().enumerate() {
                for &v in face {
                    if first[v] == usize::MAX {
                        first[v] = f;
                    }
                }
            }
            first
                .iter()
                .enumerate()
                .map(|(v, &start)| self.walk_around(v, start))
                .collect()
        })
    }

    /// Faces around vertex `v` in rotational order.
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of range.
    #[must_use]
    pub fn vertex_faces(&self, v: usize) -> &[usize] {
        &self.vertex_face_cycles()[v]
    }

    fn walk_around(&self, v: usize, start: usize) -> Vec<usize> {
        let mut cycle = vec![start];
        let mut current = start;
        while cycle.len() <= self.faces.len() {
            let face = &self.faces[current];
            let Some(i) = face.iter().position(|&x| x == v) else {
                break;
            };
            let next_vertex = face[(i + 1) % face.len()];
            let Some(next) = self.face_on(next_vertex, v) else {
                break;
            };
            if next == start {
                break;
            }
            cycle.push(next);
            current = next;
        }
        cycle
    }

    /// The vertex figures of the solid, e.g. `{"3.5.3.5": 30}` for the
    /// icosidodecahedron.
    #[must_use]
    pub fn vertex_configuration(&self) -> &VertexConfiguration {
        self.configuration.get_or_init(|| {
            let mut config = VertexConfiguration::new();
            for v in self.vertices() {
                *config.entry(v.configuration()).or_insert(0) += 1;
            }
            config
        })
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        *self.centroid.get_or_init(|| math::centroid(&self.vertices))
    }

    /// Length of the first edge. Every edge of a regular-faced solid has it.
    #[must_use]
    pub fn edge_length(&self) -> f64 {
        self.edge_pairs()
            .first()
            .map_or(0.0, |&(a, b)| (self.vertices[b] - self.vertices[a]).norm())
    }

    // --- Validity ---

    /// Whether the mesh is a genus-0 solid with planar faces and uniform edges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_with(&EngineConfig::default())
    }

    #[must_use]
    pub fn is_valid_with(&self, config: &EngineConfig) -> bool {
        let euler = self.vertices.len() + self.faces.len();
        if euler != self.num_edges() + 2 {
            return false;
        }
        let edge = self.edge_length();
        let uniform = self
            .edges()
            .all(|e| (e.length() - edge).abs() <= config.merge_tolerance * edge.max(1.0));
        uniform
            && self
                .faces()
                .all(|f| polygon::is_planar(&f.points(), config.planarity_tolerance))
    }

    /// Whether every vertex lies strictly behind each face plane it is not on.
    ///
    /// Coplanar neighbouring faces make a solid non-convex by this test.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        self.is_convex_with(&EngineConfig::default())
    }

    #[must_use]
    pub fn is_convex_with(&self, config: &EngineConfig) -> bool {
        self.faces().all(|face| {
            let on_face = face.vertex_indices();
            (0..self.vertices.len())
                .filter(|v| !on_face.contains(v))
                .all(|v| face.plane_distance(&self.vertices[v]) < -config.planarity_tolerance)
        })
    }
}

/// Consecutive vertex pairs of a face, closing back to the first vertex.
pub(crate) fn cycle_pairs(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    face.iter().copied().circular_tuple_windows()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn cube() -> Polyhedron {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        Polyhedron::new(vertices, faces).unwrap()
    }

    pub(crate) fn tetrahedron() -> Polyhedron {
        let vertices = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 1], vec![1, 3, 2]];
        Polyhedron::new(vertices, faces).unwrap()
    }

    #[test]
    fn cube_counts() {
        let cube = cube();
        assert_eq!(cube.num_vertices(), 8);
        assert_eq!(cube.num_faces(), 6);
        assert_eq!(cube.num_edges(), 12);
        assert_eq!(cube.faces_by_sides(), BTreeMap::from([(4, 6)]));
    }

    #[test]
    fn edges_are_half_of_face_degrees() {
        for solid in [cube(), tetrahedron()] {
            let total: usize = solid.face_lists().iter().map(Vec::len).sum();
            assert_eq!(solid.num_edges() * 2, total);
            for edge in solid.edges() {
                let (left, right) = edge.faces();
                assert_ne!(left, right);
            }
        }
    }

    #[test]
    fn cube_vertex_configuration() {
        let cube = cube();
        assert_eq!(
            cube.vertex_configuration(),
            &VertexConfiguration::from([("4.4.4".to_string(), 8)])
        );
    }

    #[test]
    fn vertex_face_cycle_is_complete() {
        let cube = cube();
        for cycle in cube.vertex_face_cycles() {
            assert_eq!(cycle.len(), 3);
        }
        let around = cube.vertex_faces(0);
        assert!(around.iter().all(|&f| cube.face_lists()[f].contains(&0)));
        assert!(cube.face_adjacency().iter().all(|faces| faces.len() == 4));
    }

    #[test]
    fn open_mesh_is_rejected() {
        let cube = cube();
        let faces = cube.face_lists()[1..].to_vec();
        let result = Polyhedron::new(cube.positions().to_vec(), faces);
        assert!(matches!(
            result,
            Err(crate::PolyhedraError::Mesh(MeshError::InvalidMesh(_)))
        ));
    }

    #[test]
    fn pinched_vertex_is_rejected() {
        // A second tetrahedron mirrored through vertex 0, touching only there.
        let tet = tetrahedron();
        let mut vertices = tet.positions().to_vec();
        let mirrored = tet.positions()[1..].iter().map(|p| Point3::from(p.coords.map(|c| 2.0 - c)));
        vertices.extend(mirrored);
        let mut faces = tet.face_lists().to_vec();
        faces.extend(tet.face_lists().iter().map(|f| {
            f.iter().rev().map(|&v| if v == 0 { 0 } else { v + 3 }).collect::<Vec<_>>()
        }));
        let Err(crate::PolyhedraError::Mesh(MeshError::InvalidMesh(message))) =
            Polyhedron::new(vertices, faces)
        else {
            panic!("a pinched vertex was accepted");
        };
        assert!(message.contains("vertex 0"), "{message}");
    }

    #[test]
    fn inconsistent_winding_is_rejected() {
        let cube = cube();
        let mut faces = cube.face_lists().to_vec();
        faces[0].reverse();
        assert!(Polyhedron::new(cube.positions().to_vec(), faces).is_err());
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let cube = cube();
        let mut faces = cube.face_lists().to_vec();
        faces[0][0] = 42;
        assert!(matches!(
            Polyhedron::new(cube.positions().to_vec(), faces),
            Err(crate::PolyhedraError::Mesh(MeshError::VertexOutOfRange {
                face: 0,
                index: 42,
                count: 8
            }))
        ));
    }

    #[test]
    fn two_sided_face_is_rejected() {
        let result = Polyhedron::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            vec![vec![0, 1]],
        );
        assert!(matches!(
            result,
            Err(crate::PolyhedraError::Mesh(MeshError::DegenerateFace { face: 0, sides: 2 }))
        ));
    }

    #[test]
    fn cube_is_valid_and_convex() {
        let cube = cube();
        assert!(cube.is_valid());
        assert!(cube.is_convex());
    }

    #[test]
    fn largest_face_prefers_lowest_index() {
        assert_eq!(cube().largest_face().index(), 0);
    }
}
