use serde::{Deserialize, Serialize};

use super::capstone::{Capstone, CapstoneType, Elongation};
use super::classical::{Classical, ClassicalOperation, Family};
use super::names::{count_prefix, word_join};
use super::FacetType;

/// Relative placement of two modifications on a solid with two candidate
/// arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Opposite each other.
    Para,
    Meta,
}

impl Align {
    fn prefix(self) -> &'static str {
        match self {
            Self::Para => "para",
            Self::Meta => "meta",
        }
    }
}

/// The solid a composite is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeSource {
    Classical(Classical),
    Capstone(Capstone),
}

impl CompositeSource {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Classical(c) => c.name(),
            Self::Capstone(c) => c.name(),
        }
    }

    #[must_use]
    pub fn as_classical(&self) -> Option<&Classical> {
        match self {
            Self::Classical(c) => Some(c),
            Self::Capstone(_) => None,
        }
    }

    #[must_use]
    pub fn as_capstone(&self) -> Option<&Capstone> {
        match self {
            Self::Capstone(c) => Some(c),
            Self::Classical(_) => None,
        }
    }

    /// Sides of the faces augmentations attach to.
    #[must_use]
    pub fn augment_face_type(&self) -> usize {
        match self {
            Self::Capstone(_) => 4,
            Self::Classical(c) if c.is_truncated() => c.family().n() * 2,
            Self::Classical(c) => c.family().n(),
        }
    }

    #[must_use]
    pub fn augment_limit(&self) -> u8 {
        match self {
            Self::Capstone(c) if c.base_sides() % 3 == 0 => 3,
            Self::Capstone(_) => 2,
            Self::Classical(c) => match c.family() {
                Family::Tetrahedral => 1,
                Family::Octahedral => 2,
                Family::Icosahedral => 3,
            },
        }
    }

    #[must_use]
    pub fn diminish_limit(&self) -> u8 {
        match self {
            Self::Classical(c) if c.family() == Family::Icosahedral => 3,
            _ => 1,
        }
    }
}

/// An augmented, diminished or gyrate modification of a classical solid or
/// prism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Composite {
    source: CompositeSource,
    augmented: u8,
    diminished: u8,
    gyrate: u8,
    align: Option<Align>,
}

impl Composite {
    #[must_use]
    pub fn new(source: CompositeSource) -> Self {
        Self {
            source,
            augmented: 0,
            diminished: 0,
            gyrate: 0,
            align: None,
        }
    }

    #[must_use]
    pub fn with_augmented(mut self, augmented: u8) -> Self {
        self.augmented = augmented;
        self.normalized()
    }

    #[must_use]
    pub fn with_diminished(mut self, diminished: u8) -> Self {
        self.diminished = diminished;
        self.normalized()
    }

    #[must_use]
    pub fn with_gyrate(mut self, gyrate: u8) -> Self {
        self.gyrate = gyrate;
        self.normalized()
    }

    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self.normalized()
    }

    /// Keeps an alignment only where two modifications can be placed two ways,
    /// defaulting to meta.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.align = if self.has_alignment() {
            Some(self.align.unwrap_or(Align::Meta))
        } else {
            None
        };
        self
    }

    #[must_use]
    pub fn source(&self) -> &CompositeSource {
        &self.source
    }

    #[must_use]
    pub fn augmented(&self) -> u8 {
        self.augmented
    }

    #[must_use]
    pub fn diminished(&self) -> u8 {
        self.diminished
    }

    #[must_use]
    pub fn gyrate(&self) -> u8 {
        self.gyrate
    }

    #[must_use]
    pub fn align(&self) -> Option<Align> {
        self.align
    }

    #[must_use]
    pub fn is_para(&self) -> bool {
        self.align == Some(Align::Para)
    }

    /// Total number of modifications.
    #[must_use]
    pub fn modification_count(&self) -> u8 {
        self.augmented + self.diminished + self.gyrate
    }

    #[must_use]
    pub fn has_alignment(&self) -> bool {
        self.modification_count() == 2
            && match &self.source {
                CompositeSource::Capstone(c) => c.is_secondary(),
                CompositeSource::Classical(c) => c.family() == Family::Icosahedral,
            }
    }

    /// Whether only one kind of modification is applied.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        [self.augmented, self.diminished, self.gyrate]
            .iter()
            .filter(|&&n| n > 0)
            .count()
            <= 1
    }

    /// A composite with no modifications names its source solid.
    #[must_use]
    pub fn is_wrapper(&self) -> bool {
        self.modification_count() == 0
    }

    #[must_use]
    pub fn name(&self) -> String {
        let words = word_join(&[
            count_prefix(self.augmented, "augmented"),
            count_prefix(self.gyrate, "gyrate"),
            count_prefix(self.diminished, "diminished"),
            self.source.name(),
        ]);
        match self.align {
            Some(align) => format!("{}{words}", align.prefix()),
            None => words,
        }
    }

    /// One augmentation fewer.
    #[must_use]
    pub fn diminish(&self) -> Self {
        let mut next = *self;
        next.augmented = self.augmented.saturating_sub(1);
        next.align = Some(Align::Meta);
        next.normalized()
    }

    /// Refilling a diminished site. On the tridiminished icosahedron the
    /// augmentation goes elsewhere instead.
    #[must_use]
    pub fn augment_diminished(&self, tridiminished: bool) -> Self {
        let mut next = *self;
        if tridiminished {
            next.augmented = 1;
        } else {
            next.diminished = self.diminished.saturating_sub(1);
            next.align = Some(Align::Meta);
        }
        next.normalized()
    }

    /// Refilling a diminished site of a rhombicosidodecahedron, either in
    /// the original orientation or rotated.
    #[must_use]
    pub fn augment_gyrate(&self, gyrate: bool) -> Self {
        let mut next = *self;
        if gyrate {
            next.gyrate = self.gyrate + 1;
        }
        next.diminished = self.diminished.saturating_sub(1);
        next.normalized()
    }

    /// One gyrated cap fewer.
    #[must_use]
    pub fn ungyrate(&self) -> Self {
        let mut next = *self;
        next.gyrate = self.gyrate.saturating_sub(1);
        next.align = Some(Align::Meta);
        next.normalized()
    }

    fn sources() -> Vec<CompositeSource> {
        Capstone::get_all()
            .into_iter()
            .filter(|c| {
                c.is_prismatic()
                    && c.elongation() == Elongation::Prism
                    && (c.kind() == CapstoneType::Primary || c.base() == 3)
            })
            .map(CompositeSource::Capstone)
            .collect()
    }

    fn push_aligned(self, all: &mut Vec<Composite>) {
        if self.has_alignment() {
            all.push(self.with_align(Align::Para));
            all.push(self.with_align(Align::Meta));
        } else {
            all.push(self);
        }
    }

    /// Every composite with at least one modification.
    #[must_use]
    pub fn get_all() -> Vec<Composite> {
        let mut all = Vec::new();
        let augmentable = Self::sources().into_iter().chain(
            [ClassicalOperation::Regular, ClassicalOperation::Truncate]
                .into_iter()
                .flat_map(|op| {
                    Family::ALL.map(|f| {
                        let facing = Classical::new(f, op).with_facet(FacetType::Face);
                        CompositeSource::Classical(facing)
                    })
                }),
        );
        for source in augmentable {
            for augmented in 1..=source.augment_limit() {
                Self::new(source).with_augmented(augmented).push_aligned(&mut all);
            }
        }

        for family in [Family::Octahedral, Family::Icosahedral] {
            let source = CompositeSource::Classical(
                Classical::new(family, ClassicalOperation::Regular).with_facet(FacetType::Vertex),
            );
            for diminished in 1..=source.diminish_limit() {
                Self::new(source).with_diminished(diminished).push_aligned(&mut all);
            }
            if family == Family::Icosahedral {
                all.push(Self::new(source).with_diminished(3).with_augmented(1));
            }
        }

        for family in Family::ALL {
            let cantellated = Classical::new(family, ClassicalOperation::Cantellate);
            let source = CompositeSource::Classical(cantellated);
            let modifications: Vec<(u8, u8)> = match family {
                Family::Tetrahedral => vec![(1, 0), (0, 1)],
                Family::Octahedral => vec![(1, 0), (2, 0), (0, 1), (1, 1), (0, 2)],
                Family::Icosahedral => (0..=3)
                    .flat_map(|g| (0..=3 - g).map(move |d| (g, d)))
                    .filter(|&(g, d)| g + d > 0)
                    .collect(),
            };
            for (gyrate, diminished) in modifications {
                Self::new(source)
                    .with_gyrate(gyrate)
                    .with_diminished(diminished)
                    .push_aligned(&mut all);
            }
        }
        all
    }
}
