//! Augmented, diminished and gyrate solids.

use std::collections::BTreeSet;

use super::classical;
use crate::mesh::{Cap, Facet, Polyhedron};
use crate::specs::{Composite, CompositeSource, FacetType};

/// Every pyramid, and the cupolae and rotundae whose top is ringed by
/// squares.
pub(super) fn caps(geom: &Polyhedron) -> Vec<Cap> {
    geom.caps()
        .into_iter()
        .filter(|cap| match cap.top(geom) {
            Some(Facet::Face(top)) => top.adjacent_faces().all(|f| f.num_sides() == 4),
            _ => true,
        })
        .collect()
}

/// Caps whose seam joins faces of equal degree, the mark of a turned cap.
pub(super) fn gyrate_caps(geom: &Polyhedron) -> Vec<Cap> {
    caps(geom)
        .into_iter()
        .filter(|cap| cap.has_matching_seam(geom))
        .collect()
}

/// Facets of the source solid that survive the modifications. Faces
/// touching an added cap have no facet.
pub(super) fn facet_faces(specs: &Composite, geom: &Polyhedron, facet: FacetType) -> Vec<usize> {
    let CompositeSource::Classical(source) = specs.source() else {
        return Vec::new();
    };
    let added: BTreeSet<usize> = if specs.augmented() > 0 {
        geom.caps()
            .iter()
            .flat_map(|cap| cap.inner_vertices().iter().copied())
            .collect()
    } else {
        BTreeSet::new()
    };
    classical::classify(source, geom, facet, |face| {
        face.vertex_indices().iter().all(|v| !added.contains(v))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::formes::Forme;
    use crate::specs::FacetType;

    #[test]
    fn augmented_faces_lose_their_facet() {
        let forme = Forme::from_name("augmented dodecahedron").unwrap();
        let faces = forme.facet_faces(FacetType::Face);
        assert_eq!(faces.len(), 11);
        assert!(forme.facet_faces(FacetType::Vertex).is_empty());
        let geom = forme.geom();
        assert!(faces.iter().all(|&f| geom.face(f).num_sides() == 5));
    }

    #[test]
    fn diminished_icosahedra_keep_vertex_facets() {
        let forme = Forme::from_name("metabidiminished icosahedron").unwrap();
        let triangles = forme.facet_faces(FacetType::Vertex);
        assert_eq!(triangles.len(), 10);
        assert!(forme.facet_faces(FacetType::Face).is_empty());
    }

    #[test]
    fn gyrated_caps_are_found() {
        let forme = Forme::from_name("gyrate rhombicosidodecahedron").unwrap();
        assert!(!forme.gyrate_caps().is_empty());
        let forme = Forme::from_name("rhombicosidodecahedron").unwrap();
        assert!(forme.gyrate_caps().is_empty());
    }

    #[test]
    fn capstone_composites_have_no_facets() {
        let forme = Forme::from_name("augmented triangular prism").unwrap();
        assert!(forme.facet_faces(FacetType::Face).is_empty());
        assert_eq!(forme.caps().len(), 1);
    }
}
