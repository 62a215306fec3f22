//! Ends of prisms, antiprisms, pyramids, cupolae and rotundae.

use super::unclassified;
use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::mesh::{Cap, CapType, Polyhedron};
use crate::specs::Capstone;

/// One end of a capstone: a base face, or a cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum End {
    Face(usize),
    Cap(Cap),
}

impl End {
    #[must_use]
    pub fn centroid(&self, geom: &Polyhedron) -> Point3 {
        match self {
            Self::Face(face) => geom.face(*face).centroid(),
            Self::Cap(cap) => cap.top_centroid(geom),
        }
    }

    /// Outward direction along the capstone's axis.
    #[must_use]
    pub fn normal(&self, geom: &Polyhedron) -> Vector3 {
        match self {
            Self::Face(face) => geom.face(*face).normal(),
            Self::Cap(cap) => cap.axis(geom),
        }
    }

    /// Direction from the centre of the end's ring to its first vertex.
    pub(super) fn ring_direction(&self, geom: &Polyhedron) -> Vector3 {
        let positions = geom.positions();
        match self {
            Self::Face(face) => {
                let face = geom.face(*face);
                positions[face.vertex_indices()[0]] - face.centroid()
            }
            Self::Cap(cap) => positions[cap.boundary()[0]] - cap.boundary_centroid(geom),
        }
    }
}

fn opposite(a: &Vector3, b: &Vector3) -> bool {
    a.dot(b) < -1.0 + 1e-6
}

pub(super) fn caps(specs: &Capstone, geom: &Polyhedron) -> Vec<Cap> {
    let kinds = specs.cap_types();
    geom.caps()
        .into_iter()
        .filter(|cap| kinds.contains(&cap.kind()) && cap.base_sides() == specs.base_sides())
        .collect()
}

pub(super) fn ends(specs: &Capstone, geom: &Polyhedron) -> Result<Vec<End>> {
    let sides = specs.base_sides();
    let found = match specs.count() {
        0 => geom.faces_with_sides(sides).find_map(|top| {
            geom.faces_with_sides(sides)
                .find(|bottom| opposite(&top.normal(), &bottom.normal()))
                .map(|bottom| vec![End::Face(top.index()), End::Face(bottom.index())])
        }),
        1 => caps(specs, geom).into_iter().find_map(|cap| {
            let axis = cap.axis(geom);
            geom.faces_with_sides(sides)
                .find(|base| opposite(&axis, &base.normal()))
                .map(|base| vec![End::Cap(cap.clone()), End::Face(base.index())])
        }),
        _ => {
            let caps = caps(specs, geom);
            caps.iter().find_map(|top| {
                caps.iter()
                    .find(|bottom| opposite(&top.axis(geom), &bottom.axis(geom)))
                    .map(|bottom| {
                        if top.kind() == CapType::Rotunda && bottom.kind() == CapType::Cupola {
                            vec![End::Cap(bottom.clone()), End::Cap(top.clone())]
                        } else {
                            vec![End::Cap(top.clone()), End::Cap(bottom.clone())]
                        }
                    })
            })
        }
    };
    found.ok_or_else(|| unclassified(specs.name(), "ends").into())
}
