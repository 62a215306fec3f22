//! Facet classification of Platonic and Archimedean solids.
//!
//! A classical solid's faces descend either from the faces of its regular
//! ancestor or from its vertices. Where the two classes have different side
//! counts the degree decides; the tetrahedral family, whose face and vertex
//! classes are both triangles, is split geometrically.

use crate::mesh::{Cap, Face, Facet, Polyhedron};
use crate::specs::{Classical, ClassicalOperation, FacetType, Family};

/// Cosine of the angle between two face normals of a regular tetrahedron.
const TETRAHEDRAL_COS: f64 = -1.0 / 3.0;
const NORMAL_TOLERANCE: f64 = 1e-6;

/// Sides of the faces the regular ancestor has in the given class.
pub(super) fn face_type(specs: &Classical, facet: FacetType) -> usize {
    match facet {
        FacetType::Vertex => 3,
        FacetType::Face => specs.family().n(),
    }
}

fn all_neighbours(face: Face<'_>, sides: usize) -> bool {
    face.adjacent_faces().all(|f| f.num_sides() == sides)
}

/// Whether `face` can belong to the class by degree and neighbourhood alone.
pub(super) fn is_candidate(specs: &Classical, face: Face<'_>, facet: FacetType) -> bool {
    let sides = face.num_sides();
    let expected = face_type(specs, facet);
    match specs.operation() {
        ClassicalOperation::Regular => specs.facet() == Some(facet) && sides == expected,
        ClassicalOperation::Truncate => {
            if specs.facet() == Some(facet) {
                sides > 5
            } else {
                sides <= 5
            }
        }
        ClassicalOperation::Rectify => sides == expected,
        ClassicalOperation::Bevel => sides == 2 * expected,
        ClassicalOperation::Cantellate => sides == expected && all_neighbours(face, 4),
        ClassicalOperation::Snub => sides == expected && all_neighbours(face, 3),
    }
}

/// Splits tetrahedral candidates into the two classes: the face class grows
/// from the lowest index by normals at the tetrahedral angle, and the vertex
/// class holds the candidates facing away from it.
fn split_tetrahedral(geom: &Polyhedron, candidates: &[usize], facet: FacetType) -> Vec<usize> {
    let normal = |i: usize| geom.face(i).normal();
    let mut face_class: Vec<usize> = Vec::new();
    for &c in candidates {
        if face_class
            .iter()
            .all(|&m| (normal(c).dot(&normal(m)) - TETRAHEDRAL_COS).abs() < NORMAL_TOLERANCE)
        {
            face_class.push(c);
        }
    }
    match facet {
        FacetType::Face => face_class,
        FacetType::Vertex => candidates
            .iter()
            .copied()
            .filter(|&c| {
                face_class
                    .iter()
                    .any(|&m| normal(c).dot(&normal(m)) < -1.0 + NORMAL_TOLERANCE)
            })
            .collect(),
    }
}

fn is_ambiguous(specs: &Classical) -> bool {
    specs.family() == Family::Tetrahedral
        && matches!(
            specs.operation(),
            ClassicalOperation::Rectify
                | ClassicalOperation::Bevel
                | ClassicalOperation::Cantellate
                | ClassicalOperation::Snub
        )
}

/// Faces of `geom` in the class, read as a `specs` solid.
pub(super) fn classify(
    specs: &Classical,
    geom: &Polyhedron,
    facet: FacetType,
    include: impl Fn(Face<'_>) -> bool,
) -> Vec<usize> {
    let candidates: Vec<usize> = geom
        .faces()
        .filter(|f| include(*f) && is_candidate(specs, *f, facet))
        .map(|f| f.index())
        .collect();
    if is_ambiguous(specs) {
        split_tetrahedral(geom, &candidates, facet)
    } else {
        candidates
    }
}

pub(super) fn facet_faces(specs: &Classical, geom: &Polyhedron, facet: FacetType) -> Vec<usize> {
    classify(specs, geom, facet, |_| true)
}

/// Pyramids at the vertices, and the cupolae crowning face facets.
pub(super) fn caps(specs: &Classical, geom: &Polyhedron) -> Vec<Cap> {
    let faces = facet_faces(specs, geom, FacetType::Face);
    geom.caps()
        .into_iter()
        .filter(|cap| match cap.top(geom) {
            Some(Facet::Face(top)) => faces.contains(&top.index()),
            _ => true,
        })
        .collect()
}
