//! Point-group symmetry of the catalogued solids.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::capstone::Capstone;
use super::classical::{Classical, Family};
use super::composite::{Composite, CompositeSource};
use super::elementary::Elementary;
use super::names::polygon_prefix;

/// Which reflections a dihedral group has besides its rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reflection {
    /// A mirror through the main axis' perpendicular plane (`D_nh`).
    Prism,
    /// Mirrors between the two-fold axes (`D_nd`).
    Antiprism,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "lowercase")]
pub enum Symmetry {
    Cyclic { n: usize, chiral: bool },
    Dihedral { n: usize, reflection: Option<Reflection> },
    Polyhedral { family: Family, chiral: bool },
}

impl Symmetry {
    /// `C_1v`.
    pub const BILATERAL: Symmetry = Symmetry::Cyclic { n: 1, chiral: false };
    /// `C_2v`.
    pub const BIRADIAL: Symmetry = Symmetry::Cyclic { n: 2, chiral: false };

    /// Pyramidal symmetry `C_nv`.
    #[must_use]
    pub fn cyclic(n: usize) -> Self {
        Self::Cyclic { n, chiral: false }
    }

    #[must_use]
    pub fn dihedral(n: usize, reflection: Option<Reflection>) -> Self {
        Self::Dihedral { n, reflection }
    }

    #[must_use]
    pub fn polyhedral(family: Family, chiral: bool) -> Self {
        Self::Polyhedral { family, chiral }
    }

    #[must_use]
    pub fn is_chiral(&self) -> bool {
        match *self {
            Self::Cyclic { chiral, .. } | Self::Polyhedral { chiral, .. } => chiral,
            Self::Dihedral { reflection, .. } => reflection.is_none(),
        }
    }

    /// Order of the rotation subgroup.
    #[must_use]
    pub fn rotational_order(&self) -> usize {
        match *self {
            Self::Cyclic { n, .. } => n,
            Self::Dihedral { n, .. } => 2 * n,
            Self::Polyhedral { family, .. } => match family {
                Family::Tetrahedral => 12,
                Family::Octahedral => 24,
                Family::Icosahedral => 60,
            },
        }
    }

    /// Number of isometries in the group.
    #[must_use]
    pub fn order(&self) -> usize {
        let rotations = self.rotational_order();
        if self.is_chiral() {
            rotations
        } else {
            rotations * 2
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        match *self {
            Self::Polyhedral { family, chiral } => {
                format!("{} {}", if chiral { "chiral" } else { "full" }, family.name())
            }
            Self::Cyclic { n: 1, chiral: false } => "bilateral".into(),
            Self::Cyclic { n: 2, chiral: false } => "biradial".into(),
            Self::Cyclic { n, chiral: true } => polygon_prefix(n),
            Self::Cyclic { n, chiral: false } => format!("{} pyramidal", polygon_prefix(n)),
            Self::Dihedral { n, reflection } => {
                let kind = match reflection {
                    Some(Reflection::Prism) => "prismatic",
                    Some(Reflection::Antiprism) => "antiprismatic",
                    None => "dihedral",
                };
                format!("{} {kind}", polygon_prefix(n))
            }
        }
    }

    /// Schoenflies symbol such as `C_3v`, `D_5d`, `T_d` or `I`.
    #[must_use]
    pub fn symbol(&self) -> String {
        let (group, n, achiral_sub) = match *self {
            Self::Cyclic { n, .. } => ('C', Some(n), "v"),
            Self::Dihedral { n, reflection } => (
                'D',
                Some(n),
                if reflection == Some(Reflection::Prism) { "h" } else { "d" },
            ),
            Self::Polyhedral { family, .. } => {
                let group = match family {
                    Family::Tetrahedral => 'T',
                    Family::Octahedral => 'O',
                    Family::Icosahedral => 'I',
                };
                (group, None, if family == Family::Tetrahedral { "d" } else { "h" })
            }
        };
        let sub = format!(
            "{}{}",
            n.map(|n| n.to_string()).unwrap_or_default(),
            if self.is_chiral() { "" } else { achiral_sub }
        );
        if sub.is_empty() {
            group.to_string()
        } else {
            format!("{group}_{sub}")
        }
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

pub(super) fn classical(solid: &Classical) -> Symmetry {
    Symmetry::polyhedral(solid.family(), solid.is_snub())
}

pub(super) fn capstone(solid: &Capstone) -> Symmetry {
    let base = solid.base();
    if solid.is_prismatic() {
        let reflection = if solid.is_gyroelongated() {
            Reflection::Antiprism
        } else {
            Reflection::Prism
        };
        return Symmetry::dihedral(solid.base_sides(), Some(reflection));
    }
    if solid.is_snub() {
        return Symmetry::dihedral(base, Some(Reflection::Antiprism));
    }
    if solid.is_mono() {
        return Symmetry::cyclic(base);
    }
    if solid.is_primary() {
        let reflection = if solid.is_gyroelongated() {
            Reflection::Antiprism
        } else {
            Reflection::Prism
        };
        return Symmetry::dihedral(base, Some(reflection));
    }
    if solid.is_cupolarotunda() {
        return Symmetry::Cyclic {
            n: base,
            chiral: solid.is_gyroelongated(),
        };
    }
    if solid.is_gyroelongated() {
        return Symmetry::dihedral(base, None);
    }
    let reflection = if solid.is_gyro() {
        Reflection::Antiprism
    } else {
        Reflection::Prism
    };
    Symmetry::dihedral(base, Some(reflection))
}

pub(super) fn composite(solid: &Composite) -> Symmetry {
    let pure = solid.is_pure();
    let source = solid.source();
    let family = source.as_classical().map(|c| c.family().n());
    match (solid.modification_count(), family) {
        (0, _) => match source {
            CompositeSource::Classical(c) => classical(c),
            CompositeSource::Capstone(c) => capstone(c),
        },
        (1, None) => Symmetry::BIRADIAL,
        (1, Some(n)) => Symmetry::cyclic(n),
        (2, None) if solid.is_para() => Symmetry::dihedral(2, Some(Reflection::Prism)),
        (2, None) => Symmetry::BIRADIAL,
        (2, Some(4)) => Symmetry::dihedral(4, Some(Reflection::Prism)),
        (2, Some(n)) if solid.is_para() => {
            if pure {
                Symmetry::dihedral(n, Some(Reflection::Antiprism))
            } else {
                Symmetry::cyclic(n)
            }
        }
        (2, Some(_)) if pure => Symmetry::BIRADIAL,
        (2, Some(_)) => Symmetry::BILATERAL,
        (3, None) => Symmetry::dihedral(3, Some(Reflection::Prism)),
        (3, Some(_)) if pure => Symmetry::cyclic(3),
        (3, Some(_)) => Symmetry::BILATERAL,
        _ => Symmetry::cyclic(3),
    }
}

pub(super) fn elementary(solid: Elementary) -> Symmetry {
    match solid {
        Elementary::Sphenocorona
        | Elementary::Sphenomegacorona
        | Elementary::Hebesphenomegacorona => Symmetry::BIRADIAL,
        Elementary::AugmentedSphenocorona => Symmetry::BILATERAL,
        Elementary::Disphenocingulum => Symmetry::dihedral(2, Some(Reflection::Antiprism)),
        Elementary::Bilunabirotunda => Symmetry::dihedral(2, Some(Reflection::Prism)),
        Elementary::TriangularHebesphenorotunda => Symmetry::cyclic(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyhedral_orders() {
        assert_eq!(Symmetry::polyhedral(Family::Tetrahedral, false).order(), 24);
        assert_eq!(Symmetry::polyhedral(Family::Tetrahedral, true).order(), 12);
        assert_eq!(Symmetry::polyhedral(Family::Octahedral, false).order(), 48);
        assert_eq!(Symmetry::polyhedral(Family::Icosahedral, true).order(), 60);
    }

    #[test]
    fn polyhedral_symbols() {
        assert_eq!(Symmetry::polyhedral(Family::Tetrahedral, false).symbol(), "T_d");
        assert_eq!(Symmetry::polyhedral(Family::Octahedral, false).symbol(), "O_h");
        assert_eq!(Symmetry::polyhedral(Family::Icosahedral, true).symbol(), "I");
        assert_eq!(
            Symmetry::polyhedral(Family::Octahedral, true).name(),
            "chiral octahedral"
        );
    }

    #[test]
    fn cyclic_names() {
        assert_eq!(Symmetry::cyclic(1).name(), "bilateral");
        assert_eq!(Symmetry::cyclic(2).name(), "biradial");
        assert_eq!(Symmetry::cyclic(4).name(), "square pyramidal");
        assert_eq!(Symmetry::Cyclic { n: 5, chiral: true }.name(), "pentagonal");
        assert_eq!(Symmetry::Cyclic { n: 5, chiral: true }.symbol(), "C_5");
        assert_eq!(Symmetry::BILATERAL.order(), 2);
        assert_eq!(Symmetry::cyclic(4).order(), 8);
    }

    #[test]
    fn dihedral_orders_and_symbols() {
        let antiprismatic = Symmetry::dihedral(4, Some(Reflection::Antiprism));
        assert_eq!(antiprismatic.order(), 16);
        assert_eq!(antiprismatic.symbol(), "D_4d");
        assert_eq!(Symmetry::dihedral(6, Some(Reflection::Prism)).symbol(), "D_6h");
        assert_eq!(Symmetry::dihedral(5, None).symbol(), "D_5");
        assert_eq!(Symmetry::dihedral(5, None).order(), 10);
        assert_eq!(
            Symmetry::dihedral(8, Some(Reflection::Antiprism)).name(),
            "octagonal antiprismatic"
        );
    }
}
