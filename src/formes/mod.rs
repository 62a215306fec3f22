//! Solids bound to their specs.
//!
//! A [`Forme`] pairs a mesh with the specs it realises and answers the
//! structural questions operations ask of it: which faces descend from the
//! faces or the vertices of a regular ancestor, which caps can be cut off or
//! turned, where a capstone's ends are, and how the solid sits in space.

mod capstone;
mod classical;
mod composite;

use tracing::trace;

pub use capstone::End;

use crate::error::{FormeError, Result};
use crate::math::rotation::Frame;
use crate::math::{Point3, Vector3};
use crate::mesh::{attach, Cap, CapType, Face, Polyhedron};
use crate::solids;
use crate::specs::{get_specs, Capstone, Classical, Composite, Elementary, FacetType, Specs};

/// Where a solid sits: its centre, its edge length and two axes fixing its
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub origin: Point3,
    pub scale: f64,
    pub orientation: [Vector3; 2],
}

impl Pose {
    fn new(geom: &Polyhedron, primary: Vector3, secondary: Vector3) -> Self {
        Self {
            origin: geom.centroid(),
            scale: geom.edge_length(),
            orientation: [primary, secondary],
        }
    }

    /// Pose fixed by a face: its normal and the direction to the midpoint of
    /// its first edge.
    fn from_face(face: Face<'_>) -> Self {
        let points = face.points();
        let midpoint = Point3::from((points[0].coords + points[1].coords) / 2.0);
        Self::new(face.polyhedron(), face.normal(), midpoint - face.centroid())
    }

    #[must_use]
    pub fn frame(&self) -> Option<Frame> {
        Frame::new(self.origin, self.orientation[0], self.orientation[1], self.scale)
    }
}

/// A cap glued onto a face, as the solid it produces.
#[derive(Debug, Clone)]
pub struct Augmentation {
    pub kind: CapType,
    pub offset: usize,
    pub result: Polyhedron,
}

/// Cap kinds that fit a face of `sides` sides.
pub(crate) fn cap_kinds_for(sides: usize) -> Vec<CapType> {
    let mut kinds = Vec::new();
    if (3..=5).contains(&sides) {
        kinds.push(CapType::Pyramid);
    }
    if matches!(sides, 4 | 6 | 8 | 10) {
        kinds.push(CapType::Cupola);
    }
    if sides == 10 {
        kinds.push(CapType::Rotunda);
    }
    kinds
}

/// A polyhedron together with the specs it realises.
#[derive(Debug, Clone)]
pub enum Forme {
    Classical { specs: Classical, geom: Polyhedron },
    Capstone { specs: Capstone, geom: Polyhedron },
    Composite { specs: Composite, geom: Polyhedron },
    Elementary { specs: Elementary, geom: Polyhedron },
}

impl Forme {
    /// Binds `geom` to `specs`. Composites without modifications become
    /// formes of their source solid.
    #[must_use]
    pub fn new(specs: Specs, geom: Polyhedron) -> Self {
        match specs.resolved() {
            Specs::Classical(specs) => Self::Classical { specs, geom },
            Specs::Capstone(specs) => Self::Capstone { specs, geom },
            Specs::Composite(specs) => Self::Composite { specs, geom },
            Specs::Elementary(specs) => Self::Elementary { specs, geom },
        }
    }

    /// The forme of a solid in its canonical embedding.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not catalogued or has no geometry.
    pub fn from_specs(specs: &Specs) -> Result<Self> {
        Ok(Self::new(*specs, solids::geometry(specs)?))
    }

    /// # Errors
    ///
    /// Returns an error if no solid has the name or it has no geometry.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_specs(&get_specs(name)?)
    }

    #[must_use]
    pub fn specs(&self) -> Specs {
        match self {
            Self::Classical { specs, .. } => Specs::Classical(*specs),
            Self::Capstone { specs, .. } => Specs::Capstone(*specs),
            Self::Composite { specs, .. } => Specs::Composite(*specs),
            Self::Elementary { specs, .. } => Specs::Elementary(*specs),
        }
    }

    #[must_use]
    pub fn geom(&self) -> &Polyhedron {
        match self {
            Self::Classical { geom, .. }
            | Self::Capstone { geom, .. }
            | Self::Composite { geom, .. }
            | Self::Elementary { geom, .. } => geom,
        }
    }

    #[must_use]
    pub fn into_geom(self) -> Polyhedron {
        match self {
            Self::Classical { geom, .. }
            | Self::Capstone { geom, .. }
            | Self::Composite { geom, .. }
            | Self::Elementary { geom, .. } => geom,
        }
    }

    /// The caps that diminish and gyrate act on.
    #[must_use]
    pub fn caps(&self) -> Vec<Cap> {
        match self {
            Self::Classical { specs, geom } => classical::caps(specs, geom),
            Self::Capstone { specs, geom } => capstone::caps(specs, geom),
            Self::Composite { geom, .. } => composite::caps(geom),
            Self::Elementary { geom, .. } => geom.caps(),
        }
    }

    /// Caps turned against the solid they sit on. Only composites have them.
    #[must_use]
    pub fn gyrate_caps(&self) -> Vec<Cap> {
        match self {
            Self::Composite { geom, .. } => composite::gyrate_caps(geom),
            _ => Vec::new(),
        }
    }

    /// The two ends of a capstone: its caps or base faces, top first. Solids
    /// other than capstones have no ends.
    ///
    /// # Errors
    ///
    /// Returns [`FormeError::Unclassified`] if a capstone's ends cannot be
    /// found on its mesh.
    pub fn ends(&self) -> Result<Vec<End>> {
        match self {
            Self::Capstone { specs, geom } => capstone::ends(specs, geom),
            _ => Ok(Vec::new()),
        }
    }

    /// Indices of the faces in the given facet class, ascending. Only
    /// classical solids and the composites built from them have facets.
    #[must_use]
    pub fn facet_faces(&self, facet: FacetType) -> Vec<usize> {
        match self {
            Self::Classical { specs, geom } => classical::facet_faces(specs, geom, facet),
            Self::Composite { specs, geom } => composite::facet_faces(specs, geom, facet),
            Self::Capstone { .. } | Self::Elementary { .. } => Vec::new(),
        }
    }

    /// The facet class of a face, if it has one.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is not a face of this forme's mesh.
    pub fn get_facet(&self, face: usize) -> Result<Option<FacetType>> {
        self.geom().try_face(face)?;
        Ok([FacetType::Face, FacetType::Vertex]
            .into_iter()
            .find(|facet| self.facet_faces(*facet).contains(&face)))
    }

    /// # Errors
    ///
    /// Returns an error if `face` is not a face of this forme's mesh.
    pub fn is_facet_face(&self, face: usize, facet: FacetType) -> Result<bool> {
        Ok(self.get_facet(face)? == Some(facet))
    }

    /// Every convex solid obtained by gluing a pyramid, cupola or rotunda
    /// onto `face`, in each seam alignment.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is not a face of this forme's mesh.
    pub fn augmentations(&self, face: usize) -> Result<Vec<Augmentation>> {
        let geom = self.geom();
        let sides = geom.try_face(face)?.num_sides();
        let mut found = Vec::new();
        for kind in cap_kinds_for(sides) {
            let (solid, base) = solids::cap(kind, sides)?;
            let offsets = if kind == CapType::Pyramid { 0..1 } else { 0..2 };
            for offset in offsets {
                match attach(geom, face, &solid, base, offset) {
                    Ok(result) if result.is_convex() => {
                        found.push(Augmentation { kind, offset, result });
                    }
                    Ok(_) => trace!(face, kind = kind.name(), offset, "augmentation is not convex"),
                    Err(err) => {
                        trace!(face, kind = kind.name(), offset, %err, "augmentation failed");
                    }
                }
            }
        }
        Ok(found)
    }

    /// Whether some cap glued onto `face` gives a catalogued solid.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is not a face of this forme's mesh.
    pub fn can_augment(&self, face: usize) -> Result<bool> {
        Ok(self
            .augmentations(face)?
            .iter()
            .any(|a| solids::identify(&a.result).is_some()))
    }

    /// The pose that operations use to place their result where this solid
    /// stands.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose_with(None)
    }

    /// The pose with a classical solid oriented on a face of the given
    /// facet class rather than its own.
    #[must_use]
    pub fn pose_with(&self, facet: Option<FacetType>) -> Pose {
        let geom = self.geom();
        match self {
            Self::Classical { specs, .. } => {
                let facet = facet.or(specs.facet()).unwrap_or(FacetType::Face);
                let face = self.facet_faces(facet).first().copied().unwrap_or(0);
                Pose::from_face(geom.face(face))
            }
            Self::Capstone { .. } => match self.ends() {
                Ok(ends) if !ends.is_empty() => {
                    let end = &ends[0];
                    Pose::new(geom, end.normal(geom), end.ring_direction(geom))
                }
                _ => Pose::from_face(geom.largest_face()),
            },
            Self::Composite { .. } | Self::Elementary { .. } => {
                Pose::from_face(geom.largest_face())
            }
        }
    }
}

fn unclassified(specs: impl std::fmt::Display, what: &str) -> FormeError {
    FormeError::Unclassified(format!("{what} of {specs}"))
}
