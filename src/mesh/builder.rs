use std::collections::HashSet;

use super::Polyhedron;
use crate::error::Result;
use crate::math::{Matrix4, Point3};

/// Staging area for deriving a new [`Polyhedron`] from an existing one.
///
/// Every method consumes and returns the builder so edits chain; the source
/// polyhedron is copied on construction and never touched again.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

impl Builder {
    /// Starts from a copy of `polyhedron`.
    #[must_use]
    pub fn new(polyhedron: &Polyhedron) -> Self {
        Self {
            vertices: polyhedron.vertices.clone(),
            faces: polyhedron.faces.clone(),
        }
    }

    /// Starts from nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_vertices(mut self, vertices: Vec<Point3>) -> Self {
        self.vertices = vertices;
        self
    }

    #[must_use]
    pub fn with_faces(mut self, faces: Vec<Vec<usize>>) -> Self {
        self.faces = faces;
        self
    }

    #[must_use]
    pub fn add_vertices(mut self, vertices: impl IntoIterator<Item = Point3>) -> Self {
        self.vertices.extend(vertices);
        self
    }

    #[must_use]
    pub fn add_faces(mut self, faces: impl IntoIterator<Item = Vec<usize>>) -> Self {
        self.faces.extend(faces);
        self
    }

    /// Replaces every vertex with `f(index, position)`.
    #[must_use]
    pub fn map_vertices(mut self, mut f: impl FnMut(usize, &Point3) -> Point3) -> Self {
        self.vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, p)| f(i, p))
            .collect();
        self
    }

    /// Replaces every face with `f(index, face)`.
    #[must_use]
    pub fn map_faces(mut self, mut f: impl FnMut(usize, &[usize]) -> Vec<usize>) -> Self {
        self.faces = self
            .faces
            .iter()
            .enumerate()
            .map(|(i, face)| f(i, face))
            .collect();
        self
    }

    /// Drops the faces at the given indices. Vertices are kept.
    #[must_use]
    pub fn without_faces(mut self, indices: &[usize]) -> Self {
        let drop: HashSet<usize> = indices.iter().copied().collect();
        self.faces = std::mem::take(&mut self.faces)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !drop.contains(i))
            .map(|(_, face)| face)
            .collect();
        self
    }

    /// Appends all vertices and faces of `other`, offsetting its face indices
    /// past the vertices already staged.
    #[must_use]
    pub fn add_polyhedron(mut self, other: &Polyhedron) -> Self {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|v| v + offset).collect()),
        );
        self
    }

    /// Applies a homogeneous transform to every vertex.
    #[must_use]
    pub fn transform_vertices(self, matrix: &Matrix4) -> Self {
        self.map_vertices(|_, p| matrix.transform_point(p))
    }

    /// Welds vertices closer than `tolerance`, then removes repeated
    /// consecutive vertices from faces and drops faces left with fewer than
    /// three vertices.
    #[must_use]
    pub fn dedupe_vertices(mut self, tolerance: f64) -> Self {
        let mut kept: Vec<Point3> = Vec::new();
        let mut remap = Vec::with_capacity(self.vertices.len());
        for p in &self.vertices {
            let index = kept
                .iter()
                .position(|q| (q - p).norm() < tolerance)
                .unwrap_or_else(|| {
                    kept.push(*p);
                    kept.len() - 1
                });
            remap.push(index);
        }
        self.vertices = kept;
        self.faces = std::mem::take(&mut self.faces)
            .into_iter()
            .filter_map(|face| {
                let mut welded: Vec<usize> = face.iter().map(|&v| remap[v]).collect();
                welded.dedup();
                while welded.len() > 1 && welded.first() == welded.last() {
                    welded.pop();
                }
                (welded.len() >= 3).then_some(welded)
            })
            .collect();
        self
    }

    /// Drops vertices no face refers to, renumbering the rest in order.
    #[must_use]
    pub fn remove_unused_vertices(mut self) -> Self {
        let mut used = vec![false; self.vertices.len()];
        for &v in self.faces.iter().flatten() {
            if let Some(slot) = used.get_mut(v) {
                *slot = true;
            }
        }
        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut vertices = Vec::new();
        for (i, p) in self.vertices.iter().enumerate() {
            if used[i] {
                remap[i] = vertices.len();
                vertices.push(*p);
            }
        }
        self.vertices = vertices;
        for face in &mut self.faces {
            for v in face.iter_mut() {
                if let Some(&r) = remap.get(*v) {
                    *v = r;
                }
            }
        }
        self
    }

    /// Freezes the staged data into a validated polyhedron, dropping unused
    /// vertices first.
    ///
    /// # Errors
    ///
    /// Returns an error if the staged faces do not form a closed, consistently
    /// wound mesh (see [`Polyhedron::new`]).
    pub fn build(self) -> Result<Polyhedron> {
        let staged = self.remove_unused_vertices();
        Polyhedron::new(staged.vertices, staged.faces)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::math::Vector3;
    use crate::mesh::tests::{cube, tetrahedron};

    #[test]
    fn builder_does_not_touch_source() {
        let cube = cube();
        let moved = Builder::new(&cube)
            .map_vertices(|_, p| p + Vector3::new(1.0, 0.0, 0.0))
            .build()
            .unwrap();
        assert_relative_eq!(cube.positions()[0], Point3::origin());
        assert_relative_eq!(moved.positions()[0], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn add_polyhedron_offsets_indices() {
        let cube = cube();
        let tet = tetrahedron();
        let staged = Builder::new(&cube).add_polyhedron(&tet);
        assert_eq!(staged.vertices.len(), 12);
        assert_eq!(staged.faces.len(), 10);
        assert_eq!(staged.faces[6], vec![8, 9, 10]);
        assert_eq!(staged.faces[9], vec![9, 11, 10]);
    }

    #[test]
    fn two_disjoint_solids_are_rejected() {
        let cube = cube();
        let shifted = Builder::new(&cube)
            .map_vertices(|_, p| p + Vector3::new(5.0, 0.0, 0.0))
            .build()
            .unwrap();
        assert!(matches!(
            Builder::new(&cube).add_polyhedron(&shifted).build(),
            Err(crate::PolyhedraError::Mesh(crate::error::MeshError::InvalidMesh(_)))
        ));
    }

    #[test]
    fn mirrored_vertices_with_reversed_faces() {
        let cube = cube();
        let mirrored: Vec<Point3> =
            cube.positions().iter().map(|p| Point3::new(-p.x, p.y, p.z)).collect();
        let rebuilt = Builder::new(&cube)
            .with_vertices(mirrored)
            .map_faces(|_, face| face.iter().rev().copied().collect())
            .build()
            .unwrap();
        assert!(rebuilt.is_valid());
        assert_relative_eq!(rebuilt.volume(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(rebuilt.positions()[1], Point3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn removing_a_face_and_capping_the_hole() {
        let cube = cube();
        let rebuilt = Builder::new(&cube)
            .without_faces(&[1])
            .add_faces([vec![4, 5, 6, 7]])
            .build()
            .unwrap();
        assert_eq!(rebuilt.num_faces(), 6);
        assert!(rebuilt.is_valid());
    }

    #[test]
    fn dedupe_welds_and_drops_collapsed_faces() {
        let staged = Builder::empty()
            .add_vertices([
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 1e-9),
                Point3::new(0.0, 1.0, 0.0),
            ])
            .add_faces([vec![0, 1, 2], vec![0, 2, 3]])
            .dedupe_vertices(1e-6);
        assert_eq!(staged.vertices.len(), 3);
        assert_eq!(staged.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn unused_vertices_are_removed() {
        let cube = cube();
        let built = Builder::new(&cube)
            .add_vertices([Point3::new(9.0, 9.0, 9.0)])
            .build()
            .unwrap();
        assert_eq!(built.num_vertices(), 8);
    }

    #[test]
    fn transform_scales() {
        let cube = cube();
        let scaled = Builder::new(&cube)
            .transform_vertices(&Matrix4::new_scaling(2.0))
            .build()
            .unwrap();
        assert_relative_eq!(scaled.edge_length(), 2.0);
    }

    proptest! {
        #[test]
        fn offset_matches_staged_vertex_count(extra in 0usize..20) {
            let tet = tetrahedron();
            let offsets = (0..extra).map(|i| f64::from(u32::try_from(i).unwrap()));
            let staged = Builder::empty()
                .add_vertices(offsets.map(|x| Point3::new(x, 0.0, 0.0)))
                .add_polyhedron(&tet);
            prop_assert_eq!(staged.vertices.len(), extra + 4);
            for (face, original) in staged.faces.iter().zip(tet.face_lists()) {
                for (v, o) in face.iter().zip(original) {
                    prop_assert_eq!(*v, o + extra);
                }
            }
            let built = staged.build().unwrap();
            prop_assert_eq!(built.num_vertices(), 4);
            prop_assert!(built.is_valid());
        }
    }
}
