use serde::{Deserialize, Serialize};

use super::names::{count_prefix, polygon_prefix, word_join};
use super::{CapType, Gyration, Twist};

/// Whether the caps sit on the base polygon itself or on its doubled polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapstoneType {
    /// Pyramids, and prisms on the base polygon.
    Primary,
    /// Cupolae and rotundae, and prisms on the doubled polygon.
    Secondary,
}

/// The band between the caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Elongation {
    Shortened,
    Prism,
    Antiprism,
    Snub,
}

impl Elongation {
    fn prefix(self) -> &'static str {
        match self {
            Self::Prism => "elongated",
            Self::Antiprism => "gyroelongated",
            Self::Shortened | Self::Snub => "",
        }
    }
}

/// Bands of the capstones with caps on both ends.
const ELONGATIONS: [Elongation; 3] = [
    Elongation::Shortened,
    Elongation::Prism,
    Elongation::Antiprism,
];

/// A pyramid, cupola or rotunda capstone, a prism or antiprism, or a snub
/// antiprism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capstone {
    base: u8,
    kind: CapstoneType,
    elongation: Elongation,
    count: u8,
    rotunda_count: u8,
    gyrate: Option<Gyration>,
    twist: Option<Twist>,
}

impl Capstone {
    /// Creates a capstone with `count` caps (0 for prisms and antiprisms).
    /// Gyration defaults to ortho and twist to left where they apply.
    #[must_use]
    pub fn new(base: u8, kind: CapstoneType, elongation: Elongation, count: u8) -> Self {
        Self {
            base,
            kind,
            elongation,
            count,
            rotunda_count: 0,
            gyrate: None,
            twist: None,
        }
        .normalized()
    }

    /// Sets how many of the caps are rotundae; the rest are cupolae.
    #[must_use]
    pub fn with_rotunda_count(mut self, rotunda_count: u8) -> Self {
        self.rotunda_count = rotunda_count;
        self.normalized()
    }

    #[must_use]
    pub fn with_gyrate(mut self, gyrate: Gyration) -> Self {
        self.gyrate = Some(gyrate);
        self.normalized()
    }

    #[must_use]
    pub fn with_twist(mut self, twist: Twist) -> Self {
        self.twist = Some(twist);
        self.normalized()
    }

    #[must_use]
    pub fn with_elongation(mut self, elongation: Elongation) -> Self {
        self.elongation = elongation;
        self.normalized()
    }

    #[must_use]
    pub fn with_count(mut self, count: u8) -> Self {
        self.count = count;
        self.normalized()
    }

    /// Bases too large for any solid saturate and name nothing.
    #[must_use]
    pub fn with_base(mut self, base: usize) -> Self {
        self.base = u8::try_from(base).unwrap_or(u8::MAX);
        self.normalized()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: CapstoneType) -> Self {
        self.kind = kind;
        self.normalized()
    }

    /// Clears gyration, twist and rotundae where they do not apply and fills
    /// defaults where they do.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.kind == CapstoneType::Primary || self.base != 5 {
            self.rotunda_count = 0;
        }
        self.rotunda_count = self.rotunda_count.min(self.count);
        self.gyrate = if self.has_gyrate() {
            Some(self.gyrate.unwrap_or(Gyration::Ortho))
        } else {
            None
        };
        self.twist = if self.is_chiral() {
            Some(self.twist.unwrap_or(Twist::Left))
        } else {
            None
        };
        self
    }

    #[must_use]
    pub fn base(&self) -> usize {
        usize::from(self.base)
    }

    #[must_use]
    pub fn kind(&self) -> CapstoneType {
        self.kind
    }

    #[must_use]
    pub fn elongation(&self) -> Elongation {
        self.elongation
    }

    #[must_use]
    pub fn count(&self) -> u8 {
        self.count
    }

    #[must_use]
    pub fn rotunda_count(&self) -> u8 {
        self.rotunda_count
    }

    #[must_use]
    pub fn gyrate(&self) -> Option<Gyration> {
        self.gyrate
    }

    #[must_use]
    pub fn twist(&self) -> Option<Twist> {
        self.twist
    }

    /// Sides of the polygon the caps or band sit on.
    #[must_use]
    pub fn base_sides(&self) -> usize {
        match self.kind {
            CapstoneType::Primary => self.base(),
            CapstoneType::Secondary => self.base() * 2,
        }
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.kind == CapstoneType::Primary
    }

    #[must_use]
    pub fn is_secondary(&self) -> bool {
        self.kind == CapstoneType::Secondary
    }

    #[must_use]
    pub fn is_shortened(&self) -> bool {
        self.elongation == Elongation::Shortened
    }

    #[must_use]
    pub fn is_elongated(&self) -> bool {
        self.elongation == Elongation::Prism
    }

    #[must_use]
    pub fn is_gyroelongated(&self) -> bool {
        self.elongation == Elongation::Antiprism
    }

    #[must_use]
    pub fn is_snub(&self) -> bool {
        self.elongation == Elongation::Snub
    }

    #[must_use]
    pub fn is_mono(&self) -> bool {
        self.count == 1
    }

    #[must_use]
    pub fn is_bi(&self) -> bool {
        self.count == 2
    }

    #[must_use]
    pub fn is_digonal(&self) -> bool {
        self.base == 2
    }

    /// A bare prism or antiprism.
    #[must_use]
    pub fn is_prismatic(&self) -> bool {
        self.count == 0 && !self.is_snub()
    }

    #[must_use]
    pub fn is_pyramid(&self) -> bool {
        self.is_primary() && self.count > 0
    }

    #[must_use]
    pub fn is_cupola(&self) -> bool {
        self.is_secondary() && self.rotunda_count == 0 && self.count > 0
    }

    #[must_use]
    pub fn is_rotunda(&self) -> bool {
        self.is_secondary() && self.count > 0 && self.rotunda_count == self.count
    }

    #[must_use]
    pub fn is_cupolarotunda(&self) -> bool {
        self.count == 2 && self.rotunda_count == 1
    }

    /// Two secondary caps facing each other directly or across a prism can be
    /// aligned (ortho) or rotated (gyro).
    #[must_use]
    pub fn has_gyrate(&self) -> bool {
        self.count == 2 && self.is_secondary() && self.elongation != Elongation::Antiprism
    }

    #[must_use]
    pub fn is_ortho(&self) -> bool {
        self.gyrate == Some(Gyration::Ortho)
    }

    #[must_use]
    pub fn is_gyro(&self) -> bool {
        self.gyrate == Some(Gyration::Gyro)
    }

    /// Gyroelongated bicupolae and birotundae come in two mirror images.
    #[must_use]
    pub fn is_chiral(&self) -> bool {
        self.is_gyroelongated() && self.count == 2 && self.is_secondary()
    }

    /// The kinds of cap this solid carries, without repeats.
    #[must_use]
    pub fn cap_types(&self) -> Vec<CapType> {
        if self.is_pyramid() {
            vec![CapType::Pyramid]
        } else if self.is_cupolarotunda() {
            vec![CapType::Cupola, CapType::Rotunda]
        } else if self.is_cupola() {
            vec![CapType::Cupola]
        } else if self.is_rotunda() {
            vec![CapType::Rotunda]
        } else {
            Vec::new()
        }
    }

    /// The single kind of cap, or `None` for mixed or capless solids.
    #[must_use]
    pub fn cap_type(&self) -> Option<CapType> {
        match self.cap_types().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// The solid with one cap of the given kind taken away.
    #[must_use]
    pub fn remove_cap(&self, kind: CapType) -> Self {
        let mut next = *self;
        next.count = self.count.saturating_sub(1);
        if kind == CapType::Rotunda {
            next.rotunda_count = self.rotunda_count.saturating_sub(1);
        }
        next.normalized()
    }

    /// Flips the twist of gyroelongated solids and the gyration of the rest.
    #[must_use]
    pub fn gyrated(&self) -> Self {
        let mut next = *self;
        if self.is_gyroelongated() {
            next.twist = self.twist.map(Twist::opposite);
        } else {
            next.gyrate = self.gyrate.map(Gyration::opposite);
        }
        next
    }

    fn cap_name(&self) -> &'static str {
        if self.is_primary() {
            "pyramid"
        } else if self.rotunda_count > 0 {
            "rotunda"
        } else {
            "cupola"
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        if self.is_snub() {
            return format!("snub {} antiprism", polygon_prefix(self.base()));
        }
        if self.is_prismatic() {
            let band = if self.is_gyroelongated() { "antiprism" } else { "prism" };
            return format!("{} {band}", polygon_prefix(self.base_sides()));
        }
        let gyrate = match self.gyrate {
            Some(Gyration::Ortho) => "ortho",
            Some(Gyration::Gyro) => "gyro",
            None => "",
        };
        let caps = if self.is_cupolarotunda() {
            count_prefix(1, "cupolarotunda")
        } else {
            count_prefix(self.count, self.cap_name())
        };
        word_join(&[
            self.elongation.prefix().to_string(),
            polygon_prefix(self.base()),
            format!("{gyrate}{caps}"),
        ])
    }

    fn push_variants(self, all: &mut Vec<Capstone>) {
        if self.has_gyrate() {
            all.push(self.with_gyrate(Gyration::Ortho));
            all.push(self.with_gyrate(Gyration::Gyro));
        } else if self.is_chiral() {
            all.push(self.with_twist(Twist::Left));
            all.push(self.with_twist(Twist::Right));
        } else {
            all.push(self);
        }
    }

    /// Every convex capstone with regular faces.
    #[must_use]
    pub fn get_all() -> Vec<Capstone> {
        let mut all = Vec::new();
        for base in 3..=5 {
            for kind in [CapstoneType::Primary, CapstoneType::Secondary] {
                for elongation in ELONGATIONS {
                    for count in 0..=2 {
                        if count == 0 && elongation == Elongation::Shortened {
                            continue;
                        }
                        if count > 0
                            && base == 3
                            && kind == CapstoneType::Primary
                            && elongation == Elongation::Antiprism
                        {
                            continue;
                        }
                        let solid = Self::new(base, kind, elongation, count);
                        if base == 5 && kind == CapstoneType::Secondary && count > 0 {
                            for rotunda_count in 0..=count {
                                solid.with_rotunda_count(rotunda_count).push_variants(&mut all);
                            }
                        } else {
                            solid.push_variants(&mut all);
                        }
                    }
                }
            }
        }
        all.push(Self::new(2, CapstoneType::Primary, Elongation::Antiprism, 0));
        let fastigium = Self::new(2, CapstoneType::Secondary, Elongation::Shortened, 1);
        all.push(fastigium);
        all.push(fastigium.with_count(2).with_gyrate(Gyration::Gyro));
        for base in 2..=4 {
            all.push(Self::new(base, CapstoneType::Primary, Elongation::Snub, 0));
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> Capstone {
        Capstone::get_all()
            .into_iter()
            .find(|c| c.name() == name)
            .unwrap_or_else(|| panic!("no capstone named {name}"))
    }

    #[test]
    fn names() {
        let names: Vec<String> = Capstone::get_all().iter().map(Capstone::name).collect();
        for expected in [
            "triangular prism",
            "octagonal antiprism",
            "square pyramid",
            "elongated pentagonal pyramid",
            "gyroelongated square bipyramid",
            "triangular orthobicupola",
            "elongated pentagonal gyrobirotunda",
            "pentagonal orthocupolarotunda",
            "gyroelongated pentagonal cupolarotunda",
            "gyroelongated square bicupola",
            "digonal gyrobicupola",
            "snub digonal antiprism",
            "snub square antiprism",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        assert!(!names.iter().any(|n| n == "gyroelongated triangular pyramid"));
    }

    #[test]
    fn variants_are_unique() {
        let all = Capstone::get_all();
        for (i, a) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(a), "duplicate {}", a.name());
        }
    }

    #[test]
    fn chiral_bicupolae_have_twists() {
        let left = find("gyroelongated square bicupola");
        assert!(left.is_chiral());
        assert_eq!(left.twist(), Some(Twist::Left));
        assert_eq!(left.gyrate(), None);
        assert_eq!(left.gyrated().twist(), Some(Twist::Right));
    }

    #[test]
    fn cap_types_and_removal() {
        let cr = find("pentagonal orthocupolarotunda");
        assert_eq!(cr.cap_types(), [CapType::Cupola, CapType::Rotunda]);
        assert_eq!(cr.cap_type(), None);
        assert_eq!(cr.remove_cap(CapType::Rotunda).name(), "pentagonal cupola");
        assert_eq!(cr.remove_cap(CapType::Cupola).name(), "pentagonal rotunda");
        let bipyramid = find("elongated square bipyramid");
        assert_eq!(bipyramid.remove_cap(CapType::Pyramid).name(), "elongated square pyramid");
        assert_eq!(
            find("elongated square pyramid").remove_cap(CapType::Pyramid).name(),
            "square prism"
        );
    }

    #[test]
    fn gyration_flips() {
        let ortho = find("triangular orthobicupola");
        assert_eq!(ortho.gyrated().name(), "triangular gyrobicupola");
        assert!(ortho.is_ortho());
        assert!(!ortho.is_chiral());
    }

    #[test]
    fn rebasing_and_doubling() {
        let pyramid = find("square pyramid");
        assert_eq!(pyramid.with_base(5).name(), "pentagonal pyramid");
        assert_eq!(pyramid.with_kind(CapstoneType::Secondary).name(), "square cupola");
        let doubled = find("triangular bipyramid").with_kind(CapstoneType::Secondary);
        assert_eq!(doubled.gyrate(), Some(Gyration::Ortho));
        assert_eq!(doubled.name(), "triangular orthobicupola");
    }

    #[test]
    fn prismatic_base_sides() {
        let hexagonal = find("hexagonal prism");
        assert!(hexagonal.is_prismatic());
        assert!(hexagonal.is_secondary());
        assert_eq!(hexagonal.base_sides(), 6);
        assert!(!find("snub square antiprism").is_prismatic());
    }
}
