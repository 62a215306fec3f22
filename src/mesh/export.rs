use serde::{Deserialize, Serialize};

use super::Polyhedron;
use crate::error::Result;
use crate::math::Point3;

/// Plain vertex and face lists, the exchange format for renderers and files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidData {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<Vec<usize>>,
}

impl Polyhedron {
    #[must_use]
    pub fn to_data(&self) -> SolidData {
        SolidData {
            vertices: self.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Builds a polyhedron from exported data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data does not describe a valid mesh.
    pub fn from_data(data: SolidData) -> Result<Self> {
        let vertices = data
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        Self::new(vertices, data.faces)
    }

    /// Serializes the mesh as `{"vertices": [[x, y, z], ...], "faces": [[i, j, k], ...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_data())?)
    }

    /// Parses a mesh written by [`Polyhedron::to_json`].
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON of the expected shape or
    /// does not describe a valid mesh.
    pub fn from_json(text: &str) -> Result<Self> {
        let data: SolidData = serde_json::from_str(text)?;
        Self::from_data(data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolyhedraError;
    use crate::mesh::tests::cube;

    #[test]
    fn json_round_trip_keeps_faces() {
        let cube = cube();
        let text = cube.to_json().unwrap();
        let back = Polyhedron::from_json(&text).unwrap();
        assert_eq!(back.face_lists(), cube.face_lists());
        assert!(back.is_same(&cube));
    }

    #[test]
    fn data_shape() {
        let data = cube().to_data();
        assert_eq!(data.vertices.len(), 8);
        assert_eq!(data.vertices[6], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Polyhedron::from_json("{\"vertices\": 3}"),
            Err(PolyhedraError::Json(_))
        ));
    }

    #[test]
    fn invalid_mesh_in_json_is_an_error() {
        let text = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[0,1,2]]}"#;
        assert!(matches!(
            Polyhedron::from_json(text),
            Err(PolyhedraError::Mesh(_))
        ));
    }
}
