use std::hash::{DefaultHasher, Hash, Hasher};

use itertools::Itertools;

use super::Polyhedron;

impl Polyhedron {
    /// Face-adjacency signature: faces are labelled by side count, then
    /// repeatedly relabelled by their own label and the multiset of their
    /// neighbours' labels until the number of distinct labels stops growing.
    /// The result is the sorted histogram of final labels.
    ///
    /// Isomorphic meshes always share a signature. It separates solids that
    /// share a vertex configuration but differ in how faces are arranged.
    #[must_use]
    pub fn face_signature(&self) -> &[(u64, usize)] {
        self.signature.get_or_init(|| {
            let adjacency = self.face_adjacency();
            let mut labels: Vec<u64> = self.faces.iter().map(|f| f.len() as u64).collect();
            let mut classes = labels.iter().unique().count();
            for _ in 0..self.faces.len() {
                let refined: Vec<u64> = adjacency
                    .iter()
                    .zip(&labels)
                    .map(|(neighbours, own)| {
                        let mut hasher = DefaultHasher::new();
                        own.hash(&mut hasher);
                        neighbours
                            .iter()
                            .map(|&n| labels[n])
                            .sorted_unstable()
                            .for_each(|l| l.hash(&mut hasher));
                        hasher.finish()
                    })
                    .collect();
                let refined_classes = refined.iter().unique().count();
                labels = refined;
                if refined_classes == classes {
                    break;
                }
                classes = refined_classes;
            }
            labels.into_iter().counts().into_iter().sorted_unstable().collect()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::math::Point3;
    use crate::mesh::tests::cube;
    use crate::mesh::Polyhedron;

    #[test]
    fn signature_ignores_face_order() {
        let cube = cube();
        let mut faces = cube.face_lists().to_vec();
        faces.reverse();
        let shuffled = Polyhedron::new(cube.positions().to_vec(), faces).unwrap();
        assert_eq!(cube.face_signature(), shuffled.face_signature());
    }

    #[test]
    fn prism_signature_differs_from_cube() {
        let prism = Polyhedron::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 0.0, 0.75_f64.sqrt()),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.5, 1.0, 0.75_f64.sqrt()),
            ],
            vec![
                vec![0, 1, 2],
                vec![3, 5, 4],
                vec![0, 3, 4, 1],
                vec![1, 4, 5, 2],
                vec![2, 5, 3, 0],
            ],
        )
        .unwrap();
        let total: usize = prism.face_signature().iter().map(|(_, n)| n).sum();
        assert_eq!(total, 5);
        assert_ne!(prism.face_signature(), crate::mesh::tests::cube().face_signature());
    }
}
