//! Embedding-independent descriptions of the catalogued solids.

pub mod alternates;
mod capstone;
mod catalog;
mod classical;
mod composite;
pub mod conway;
mod elementary;
pub mod names;
mod symmetry;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::mesh::CapType;
pub use capstone::{Capstone, CapstoneType, Elongation};
pub use catalog::get_specs;
pub use classical::{Classical, ClassicalOperation, Family};
pub use composite::{Align, Composite, CompositeSource};
pub use elementary::Elementary;
pub use symmetry::{Reflection, Symmetry};

use crate::error::Result;

/// Handedness of a chiral solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Twist {
    Left,
    Right,
}

impl Twist {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Whether two facing caps are aligned or rotated against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gyration {
    Ortho,
    Gyro,
}

impl Gyration {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Ortho => Self::Gyro,
            Self::Gyro => Self::Ortho,
        }
    }
}

/// The two facet classes of a classical solid: faces descending from the
/// faces of its regular ancestor, and faces descending from its vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetType {
    Face,
    Vertex,
}

impl FacetType {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Face => Self::Vertex,
            Self::Vertex => Self::Face,
        }
    }
}

const HONEYCOMBS: [&str; 5] = [
    "cube",
    "truncated octahedron",
    "triangular prism",
    "hexagonal prism",
    "gyrobifastigium",
];

/// A solid's combinatorial type, independent of any embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Specs {
    Classical(Classical),
    Capstone(Capstone),
    Composite(Composite),
    Elementary(Elementary),
}

impl Specs {
    /// Every catalogued solid: classical, capstone, composite, then
    /// elementary.
    #[must_use]
    pub fn get_all() -> &'static [Specs] {
        catalog::all()
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        catalog::contains(self)
    }

    /// The name derived from the parameters, which may be an alternate name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Classical(c) => c.name(),
            Self::Capstone(c) => c.name(),
            Self::Composite(c) => c.name(),
            Self::Elementary(e) => e.name().to_string(),
        }
    }

    #[must_use]
    pub fn canonical_name(&self) -> String {
        alternates::canonical(&self.name()).to_string()
    }

    #[must_use]
    pub fn alternate_names(&self) -> &'static [&'static str] {
        alternates::alternates(&self.canonical_name())
    }

    /// The solid this one is listed as in the catalog, such as the cube for
    /// the square prism.
    #[must_use]
    pub fn canonical(&self) -> Specs {
        get_specs(&self.canonical_name()).unwrap_or(*self)
    }

    #[must_use]
    pub fn group(&self) -> &'static str {
        match self.canonical() {
            Self::Classical(c) if c.is_regular() => "Platonic solid",
            Self::Classical(_) => "Archimedean solid",
            Self::Capstone(c) if c.is_prismatic() && c.is_gyroelongated() => "Antiprism",
            Self::Capstone(c) if c.is_prismatic() => "Prism",
            _ => "Johnson solid",
        }
    }

    /// Whether copies of the solid fill space.
    #[must_use]
    pub fn is_honeycomb(&self) -> bool {
        HONEYCOMBS.contains(&self.canonical_name().as_str())
    }

    /// The Conway symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid has no symbol.
    pub fn conway_symbol(&self) -> Result<String> {
        conway::symbol(self)
    }

    /// # Errors
    ///
    /// Returns an error if no catalogued solid has the symbol.
    pub fn from_conway(symbol: &str) -> Result<Specs> {
        conway::from_symbol(symbol)
    }

    #[must_use]
    pub fn symmetry(&self) -> Symmetry {
        match self {
            Self::Classical(c) => symmetry::classical(c),
            Self::Capstone(c) => symmetry::capstone(c),
            Self::Composite(c) => symmetry::composite(c),
            Self::Elementary(e) => symmetry::elementary(*e),
        }
    }

    #[must_use]
    pub fn is_chiral(&self) -> bool {
        match self {
            Self::Classical(c) => c.is_chiral(),
            Self::Capstone(c) => c.is_chiral(),
            Self::Composite(_) | Self::Elementary(_) => false,
        }
    }

    /// A composite without modifications is its source solid.
    #[must_use]
    pub fn resolved(&self) -> Specs {
        match self {
            Self::Composite(c) if c.is_wrapper() => match c.source() {
                CompositeSource::Classical(s) => Self::Classical(*s),
                CompositeSource::Capstone(s) => Self::Capstone(*s),
            },
            _ => *self,
        }
    }

    /// Same parameters once wrappers are unwrapped. Mirror images and
    /// gyrations stay distinct.
    #[must_use]
    pub fn equivalent(&self, other: &Specs) -> bool {
        self.resolved() == other.resolved()
    }

    /// The catalogued specs that name this solid, this one first. The cube
    /// is also the square prism, the octahedron also the tetratetrahedron.
    #[must_use]
    pub fn readings(&self) -> Vec<Specs> {
        catalog::readings(self)
    }

    /// Same canonical name, so the same solid up to embedding.
    #[must_use]
    pub fn same_solid(&self, other: &Specs) -> bool {
        self.canonical_name() == other.canonical_name()
    }

    #[must_use]
    pub fn as_classical(&self) -> Option<&Classical> {
        match self {
            Self::Classical(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_capstone(&self) -> Option<&Capstone> {
        match self {
            Self::Capstone(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Self::Composite(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_elementary(&self) -> Option<Elementary> {
        match self {
            Self::Elementary(e) => Some(*e),
            _ => None,
        }
    }
}

impl fmt::Display for Specs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<Classical> for Specs {
    fn from(value: Classical) -> Self {
        Self::Classical(value)
    }
}

impl From<Capstone> for Specs {
    fn from(value: Capstone) -> Self {
        Self::Capstone(value)
    }
}

impl From<Composite> for Specs {
    fn from(value: Composite) -> Self {
        Self::Composite(value)
    }
}

impl From<Elementary> for Specs {
    fn from(value: Elementary) -> Self {
        Self::Elementary(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn specs(name: &str) -> Specs {
        get_specs(name).unwrap()
    }

    fn symbol(name: &str) -> String {
        specs(name).symmetry().symbol()
    }

    #[test]
    fn canonical_and_alternate_names() {
        let prism = specs("square prism");
        assert_eq!(prism.name(), "square prism");
        assert_eq!(prism.canonical_name(), "cube");
        assert_eq!(prism.alternate_names(), ["square prism"]);
        assert!(prism.same_solid(&specs("cube")));
        assert!(!prism.equivalent(&specs("cube")));
    }

    #[test]
    fn groups() {
        assert_eq!(specs("triangular antiprism").group(), "Platonic solid");
        assert_eq!(specs("truncated tetratetrahedron").group(), "Archimedean solid");
        assert_eq!(specs("pentagonal prism").group(), "Prism");
        assert_eq!(specs("octagonal antiprism").group(), "Antiprism");
        assert_eq!(specs("fastigium").group(), "Prism");
        assert_eq!(specs("gyrobifastigium").group(), "Johnson solid");
        assert_eq!(specs("augmented cube").group(), "Johnson solid");
    }

    #[test]
    fn honeycombs() {
        assert!(specs("square prism").is_honeycomb());
        assert!(specs("truncated tetratetrahedron").is_honeycomb());
        assert!(specs("digonal gyrobicupola").is_honeycomb());
        assert!(!specs("octahedron").is_honeycomb());
    }

    #[test]
    fn wrappers_resolve_to_their_source() {
        let cube = specs("cube");
        let Specs::Classical(classical) = cube else {
            panic!("cube is classical");
        };
        let wrapper = Specs::Composite(Composite::new(CompositeSource::Classical(classical)));
        assert!(!wrapper.exists());
        assert_eq!(wrapper.resolved(), cube);
        assert!(wrapper.equivalent(&cube));
        assert_eq!(wrapper.name(), "cube");
    }

    #[test]
    fn classical_symmetry() {
        assert_eq!(symbol("snub cuboctahedron"), "O");
        assert_eq!(symbol("snub icosidodecahedron"), "I");
        assert_eq!(symbol("tetrahedron"), "T_d");
        assert_eq!(symbol("truncated cube"), "O_h");
        assert_eq!(symbol("icosahedron"), "I_h");
        assert_eq!(symbol("cuboctahedron"), "O_h");
    }

    #[test]
    fn capstone_symmetry() {
        assert_eq!(symbol("pentagonal antiprism"), "D_5d");
        assert_eq!(symbol("hexagonal prism"), "D_6h");
        assert_eq!(symbol("square pyramid"), "C_4v");
        assert_eq!(symbol("gyroelongated pentagonal rotunda"), "C_5v");
        assert_eq!(symbol("digonal gyrobicupola"), "D_2d");
        assert_eq!(symbol("elongated triangular bipyramid"), "D_3h");
        assert_eq!(symbol("gyroelongated square bipyramid"), "D_4d");
        assert_eq!(symbol("elongated pentagonal gyrocupolarotunda"), "C_5v");
        assert_eq!(symbol("gyroelongated pentagonal cupolarotunda"), "C_5");
        assert_eq!(symbol("elongated pentagonal gyrobicupola"), "D_5d");
        assert_eq!(symbol("gyroelongated pentagonal birotunda"), "D_5");
    }

    #[test]
    fn composite_symmetry() {
        assert_eq!(symbol("augmented triangular prism"), "C_2v");
        assert_eq!(symbol("parabiaugmented hexagonal prism"), "D_2h");
        assert_eq!(symbol("triaugmented hexagonal prism"), "D_3h");
        assert_eq!(symbol("augmented truncated cube"), "C_4v");
        assert_eq!(symbol("biaugmented truncated cube"), "D_4h");
        assert_eq!(symbol("parabiaugmented dodecahedron"), "D_5d");
        assert_eq!(symbol("metabiaugmented truncated dodecahedron"), "C_2v");
        assert_eq!(symbol("triaugmented dodecahedron"), "C_3v");
        assert_eq!(symbol("augmented tridiminished icosahedron"), "C_3v");
        assert_eq!(symbol("paragyrate diminished rhombicosidodecahedron"), "C_5v");
        assert_eq!(symbol("metagyrate diminished rhombicosidodecahedron"), "C_1v");
        assert_eq!(symbol("bigyrate diminished rhombicosidodecahedron"), "C_1v");
        assert_eq!(symbol("parabidiminished rhombicosidodecahedron"), "D_5d");
    }

    #[test]
    fn elementary_symmetry() {
        assert_eq!(symbol("snub digonal antiprism"), "D_2d");
        assert_eq!(symbol("sphenocorona"), "C_2v");
        assert_eq!(symbol("augmented sphenocorona"), "C_1v");
        assert_eq!(specs("augmented sphenocorona").symmetry().order(), 2);
        assert_eq!(specs("triaugmented dodecahedron").symmetry().order(), 6);
    }

    #[test]
    fn serde_round_trip() {
        let specs = specs("gyroelongated square bicupola");
        let text = serde_json::to_string(&specs).unwrap();
        let back: Specs = serde_json::from_str(&text).unwrap();
        assert_eq!(back, specs);
    }
}
