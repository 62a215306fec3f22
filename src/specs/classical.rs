use serde::{Deserialize, Serialize};

use super::names::word_join;
use super::{FacetType, Twist};

/// Symmetry family of a Platonic or Archimedean solid, named by the number of
/// sides of its smallest regular face-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Tetrahedral,
    Octahedral,
    Icosahedral,
}

impl Family {
    pub const ALL: [Family; 3] = [Self::Tetrahedral, Self::Octahedral, Self::Icosahedral];

    /// 3, 4 or 5.
    #[must_use]
    pub fn n(self) -> usize {
        match self {
            Self::Tetrahedral => 3,
            Self::Octahedral => 4,
            Self::Icosahedral => 5,
        }
    }

    #[must_use]
    pub fn from_n(n: usize) -> Option<Self> {
        match n {
            3 => Some(Self::Tetrahedral),
            4 => Some(Self::Octahedral),
            5 => Some(Self::Icosahedral),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Tetrahedral => "tetrahedral",
            Self::Octahedral => "octahedral",
            Self::Icosahedral => "icosahedral",
        }
    }
}

/// The Wythoff-style operation producing a classical solid from its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassicalOperation {
    Regular,
    Truncate,
    Rectify,
    Bevel,
    Cantellate,
    Snub,
}

impl ClassicalOperation {
    pub const ALL: [ClassicalOperation; 6] = [
        Self::Regular,
        Self::Truncate,
        Self::Rectify,
        Self::Bevel,
        Self::Cantellate,
        Self::Snub,
    ];
}

/// A Platonic or Archimedean solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classical {
    family: Family,
    operation: ClassicalOperation,
    facet: Option<FacetType>,
    twist: Option<Twist>,
}

impl Classical {
    /// Creates a classical solid, defaulting the facet to `Face` for regular
    /// and truncated solids and the twist to `Left` for snubs.
    #[must_use]
    pub fn new(family: Family, operation: ClassicalOperation) -> Self {
        let mut solid = Self {
            family,
            operation,
            facet: None,
            twist: None,
        };
        if solid.has_facet() {
            solid.facet = Some(FacetType::Face);
        }
        if solid.is_snub() {
            solid.twist = Some(Twist::Left);
        }
        solid
    }

    /// Sets the facet; ignored for solids without one.
    #[must_use]
    pub fn with_facet(mut self, facet: FacetType) -> Self {
        if self.has_facet() {
            self.facet = Some(facet);
        }
        self
    }

    /// Sets the twist; ignored for solids that are not snubs.
    #[must_use]
    pub fn with_twist(mut self, twist: Twist) -> Self {
        if self.is_snub() {
            self.twist = Some(twist);
        }
        self
    }

    #[must_use]
    pub fn with_operation(self, operation: ClassicalOperation) -> Self {
        let mut next = Self::new(self.family, operation);
        if let Some(facet) = self.facet {
            next = next.with_facet(facet);
        }
        if let Some(twist) = self.twist {
            next = next.with_twist(twist);
        }
        next
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    #[must_use]
    pub fn operation(&self) -> ClassicalOperation {
        self.operation
    }

    #[must_use]
    pub fn facet(&self) -> Option<FacetType> {
        self.facet
    }

    #[must_use]
    pub fn twist(&self) -> Option<Twist> {
        self.twist
    }

    /// Regular and truncated solids come in a face and a vertex version.
    #[must_use]
    pub fn has_facet(&self) -> bool {
        matches!(
            self.operation,
            ClassicalOperation::Regular | ClassicalOperation::Truncate
        )
    }

    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.operation == ClassicalOperation::Regular
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.operation == ClassicalOperation::Truncate
    }

    #[must_use]
    pub fn is_rectified(&self) -> bool {
        self.operation == ClassicalOperation::Rectify
    }

    #[must_use]
    pub fn is_bevelled(&self) -> bool {
        self.operation == ClassicalOperation::Bevel
    }

    #[must_use]
    pub fn is_cantellated(&self) -> bool {
        self.operation == ClassicalOperation::Cantellate
    }

    #[must_use]
    pub fn is_snub(&self) -> bool {
        self.operation == ClassicalOperation::Snub
    }

    #[must_use]
    pub fn is_face(&self) -> bool {
        self.facet == Some(FacetType::Face)
    }

    #[must_use]
    pub fn is_vertex(&self) -> bool {
        self.facet == Some(FacetType::Vertex)
    }

    #[must_use]
    pub fn is_chiral(&self) -> bool {
        self.is_snub()
    }

    #[must_use]
    pub fn name(&self) -> String {
        let base = match self.operation {
            ClassicalOperation::Regular | ClassicalOperation::Truncate => self.regular_name(),
            _ => rectified_name(self.family),
        };
        let body = if self.is_cantellated() {
            format!("rhombi{base}").replace("ii", "i")
        } else {
            base.to_string()
        };
        let truncated = matches!(
            self.operation,
            ClassicalOperation::Truncate | ClassicalOperation::Bevel
        );
        word_join(&[
            if self.is_snub() { "snub" } else { "" },
            if truncated { "truncated" } else { "" },
            &body,
        ])
    }

    fn regular_name(&self) -> &'static str {
        match (self.family, self.is_vertex()) {
            (Family::Tetrahedral, false) => "tetrahedron",
            (Family::Tetrahedral, true) => "tetrahedron dual",
            (Family::Octahedral, false) => "cube",
            (Family::Octahedral, true) => "octahedron",
            (Family::Icosahedral, false) => "dodecahedron",
            (Family::Icosahedral, true) => "icosahedron",
        }
    }

    /// Every classical solid: by operation, then family, then facet or twist.
    #[must_use]
    pub fn get_all() -> Vec<Classical> {
        let mut all = Vec::new();
        for operation in ClassicalOperation::ALL {
            for family in Family::ALL {
                let solid = Self::new(family, operation);
                if solid.has_facet() {
                    all.push(solid.with_facet(FacetType::Face));
                    all.push(solid.with_facet(FacetType::Vertex));
                } else if solid.is_snub() {
                    all.push(solid.with_twist(Twist::Left));
                    all.push(solid.with_twist(Twist::Right));
                } else {
                    all.push(solid);
                }
            }
        }
        all
    }
}

fn rectified_name(family: Family) -> &'static str {
    match family {
        Family::Tetrahedral => "tetratetrahedron",
        Family::Octahedral => "cuboctahedron",
        Family::Icosahedral => "icosidodecahedron",
    }
}
