use std::f64::consts::PI;

use super::Polyhedron;
use crate::config::EngineConfig;

impl Polyhedron {
    /// Enclosed volume, from signed tetrahedra fanned out of each face.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let mut signed_volume = 0.0;
        for face in &self.faces {
            let v0 = self.vertices[face[0]];
            for pair in face[1..].windows(2) {
                let v1 = self.vertices[pair[0]];
                let v2 = self.vertices[pair[1]];
                signed_volume += v0.coords.dot(&v1.coords.cross(&v2.coords));
            }
        }
        signed_volume.abs() / 6.0
    }

    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.faces().map(|f| f.area()).sum()
    }

    /// Volume of the solid scaled to unit edge length.
    #[must_use]
    pub fn normalized_volume(&self) -> f64 {
        self.volume() / self.edge_length().powi(3)
    }

    /// Surface area of the solid scaled to unit edge length.
    #[must_use]
    pub fn normalized_surface_area(&self) -> f64 {
        self.surface_area() / self.edge_length().powi(2)
    }

    /// Ratio of the area of a sphere with the same volume to the surface area.
    /// One for a sphere; about 0.806 for a cube.
    #[must_use]
    pub fn sphericity(&self) -> f64 {
        PI.cbrt() * (6.0 * self.volume()).powf(2.0 / 3.0) / self.surface_area()
    }

    /// Whether two meshes are the same solid up to similarity: equal vertex
    /// configurations, equal face-adjacency signatures and equal normalized
    /// volumes.
    #[must_use]
    pub fn is_same(&self, other: &Polyhedron) -> bool {
        self.is_same_with(other, &EngineConfig::default())
    }

    #[must_use]
    pub fn is_same_with(&self, other: &Polyhedron, config: &EngineConfig) -> bool {
        if self.num_faces() != other.num_faces() || self.num_vertices() != other.num_vertices() {
            return false;
        }
        if self.vertex_configuration() != other.vertex_configuration() {
            return false;
        }
        if self.face_signature() != other.face_signature() {
            return false;
        }
        let (a, b) = (self.normalized_volume(), other.normalized_volume());
        (a - b).abs() <= config.comparison_tolerance * a.max(b)
    }
}
