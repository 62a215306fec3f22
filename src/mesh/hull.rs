use std::collections::HashSet;

use itertools::Itertools;

use super::Polyhedron;
use crate::config::EngineConfig;
use crate::error::{MeshError, Result};
use crate::math::{self, Point3, TOLERANCE};

impl Polyhedron {
    /// Builds the convex polyhedron whose vertices are `points` and whose
    /// edges all have the minimum pairwise distance.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than four points are given or the faces
    /// found do not close into a mesh.
    pub fn from_points(points: Vec<Point3>) -> Result<Self> {
        Self::from_points_with(points, &EngineConfig::default())
    }

    /// [`Polyhedron::from_points`] with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`Polyhedron::from_points`].
    pub fn from_points_with(points: Vec<Point3>, config: &EngineConfig) -> Result<Self> {
        if points.len() < 4 {
            return Err(MeshError::InvalidMesh(format!(
                "{} points cannot span a solid",
                points.len()
            ))
            .into());
        }
        let edge = points
            .iter()
            .tuple_combinations()
            .map(|(a, b)| (b - a).norm())
            .fold(f64::INFINITY, f64::min);
        let neighbours: Vec<Vec<usize>> = points
            .iter()
            .map(|p| {
                (0..points.len())
                    .filter(|&j| {
                        let gap = ((points[j] - p).norm() - edge).abs();
                        gap <= config.merge_tolerance * edge.max(1.0)
                    })
                    .collect()
            })
            .collect();

        let tol = config.planarity_tolerance;
        let mut seen = HashSet::new();
        let mut faces = Vec::new();
        for (a, nbrs) in neighbours.iter().enumerate() {
            for (&b, &c) in nbrs.iter().tuple_combinations() {
                let Some(mut normal) = (points[b] - points[a])
                    .cross(&(points[c] - points[a]))
                    .try_normalize(TOLERANCE)
                else {
                    continue;
                };
                let distances: Vec<f64> =
                    points.iter().map(|p| normal.dot(&(p - points[a]))).collect();
                if distances.iter().all(|&d| d >= -tol) {
                    normal = -normal;
                } else if !distances.iter().all(|&d| d <= tol) {
                    continue;
                }
                let mut on_plane: Vec<usize> = distances
                    .iter()
                    .positions(|d| d.abs() <= tol)
                    .collect();
                if !seen.insert(on_plane.clone()) {
                    continue;
                }
                let ring: Vec<Point3> = on_plane.iter().map(|&i| points[i]).collect();
                let centre = math::centroid(&ring);
                let u = (points[on_plane[0]] - centre).normalize();
                let w = normal.cross(&u);
                on_plane.sort_by(|&i, &j| {
                    let angle = |k: usize| {
                        let d = points[k] - centre;
                        d.dot(&w).atan2(d.dot(&u))
                    };
                    angle(i).total_cmp(&angle(j))
                });
                faces.push(on_plane);
            }
        }
        Self::new(points, faces)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::polygon;

    #[test]
    fn cube_from_corners() {
        let pts: Vec<Point3> = (0..8)
            .map(|i| {
                Point3::new(f64::from(i & 1), f64::from((i >> 1) & 1), f64::from((i >> 2) & 1))
            })
            .collect();
        let cube = Polyhedron::from_points(pts).unwrap();
        assert_eq!(cube.num_faces(), 6);
        assert!(cube.is_valid());
        let c = cube.centroid();
        for face in cube.faces() {
            assert!(face.plane_distance(&c) < 0.0);
        }
    }

    #[test]
    fn square_pyramid() {
        let mut pts = polygon::ring(4, 0.0, 0.0);
        pts.push(Point3::new(0.0, 0.5_f64.sqrt(), 0.0));
        let pyramid = Polyhedron::from_points(pts).unwrap();
        assert_eq!(pyramid.faces_by_sides(), [(3, 4), (4, 1)].into());
        assert_relative_eq!(pyramid.edge_length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn too_few_points() {
        let pts = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert!(Polyhedron::from_points(pts).is_err());
    }
}
