//! Operations that turn one catalogued solid into another.
//!
//! Two kinds exist. Pair operations (elongate, truncate, dual, ...) follow a
//! graph of specs pairs and place the target's canonical geometry where the
//! input stands. Cut-paste operations (augment, diminish, gyrate) rewrite the
//! mesh locally and identify the result among the solids the specs allow.

mod cut_paste;
mod pair;
mod prism;
mod resize;
mod truncate;

use std::fmt;
use std::sync::OnceLock;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub use cut_paste::{Augment, Diminish, Gyrate};
pub use pair::PairOperation;

use crate::error::Result;
use crate::formes::Forme;
use crate::mesh::{CapType, Polyhedron};
use crate::specs::{FacetType, Gyration, Specs, Twist};

/// The choices an operation may take. Unset fields are left to the
/// operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Options {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twist: Option<Twist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gyrate: Option<Gyration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<CapType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet: Option<FacetType>,
    /// Index of a face of the input mesh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<usize>,
    /// Index into the input forme's caps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<usize>,
}

impl Options {
    #[must_use]
    pub fn with_twist(mut self, twist: Twist) -> Self {
        self.twist = Some(twist);
        self
    }

    #[must_use]
    pub fn with_gyrate(mut self, gyrate: Gyration) -> Self {
        self.gyrate = Some(gyrate);
        self
    }

    #[must_use]
    pub fn with_using(mut self, using: CapType) -> Self {
        self.using = Some(using);
        self
    }

    #[must_use]
    pub fn with_facet(mut self, facet: FacetType) -> Self {
        self.facet = Some(facet);
        self
    }

    #[must_use]
    pub fn with_face(mut self, face: usize) -> Self {
        self.face = Some(face);
        self
    }

    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    #[must_use]
    pub fn value(&self, kind: OptionKind) -> Option<OptionValue> {
        match kind {
            OptionKind::Twist => self.twist.map(OptionValue::Twist),
            OptionKind::Gyrate => self.gyrate.map(OptionValue::Gyrate),
            OptionKind::Using => self.using.map(OptionValue::Using),
            OptionKind::Facet => self.facet.map(OptionValue::Facet),
            OptionKind::Face => self.face.map(OptionValue::Face),
            OptionKind::Cap => self.cap.map(OptionValue::Cap),
        }
    }

    /// Whether every option set in `requested` has the same value here.
    #[must_use]
    pub fn satisfies(&self, requested: &Options) -> bool {
        OptionKind::ALL.iter().all(|kind| match requested.value(*kind) {
            Some(value) => self.value(*kind) == Some(value),
            None => true,
        })
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set: Vec<String> = OptionKind::ALL
            .iter()
            .filter_map(|kind| self.value(*kind).map(|v| format!("{kind}={v}")))
            .collect();
        if set.is_empty() {
            f.write_str("no options")
        } else {
            f.write_str(&set.join(", "))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Twist,
    Gyrate,
    Using,
    Facet,
    Face,
    Cap,
}

impl OptionKind {
    pub const ALL: [OptionKind; 6] = [
        Self::Twist,
        Self::Gyrate,
        Self::Using,
        Self::Facet,
        Self::Face,
        Self::Cap,
    ];
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Twist => "twist",
            Self::Gyrate => "gyrate",
            Self::Using => "using",
            Self::Facet => "facet",
            Self::Face => "face",
            Self::Cap => "cap",
        })
    }
}

/// A single option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum OptionValue {
    Twist(Twist),
    Gyrate(Gyration),
    Using(CapType),
    Facet(FacetType),
    Face(usize),
    Cap(usize),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Twist(Twist::Left) => f.write_str("left"),
            Self::Twist(Twist::Right) => f.write_str("right"),
            Self::Gyrate(Gyration::Ortho) => f.write_str("ortho"),
            Self::Gyrate(Gyration::Gyro) => f.write_str("gyro"),
            Self::Using(kind) => f.write_str(kind.name()),
            Self::Facet(FacetType::Face) => f.write_str("face"),
            Self::Facet(FacetType::Vertex) => f.write_str("vertex"),
            Self::Face(i) | Self::Cap(i) => write!(f, "{i}"),
        }
    }
}

/// What an operation produced.
#[derive(Debug, Clone)]
pub struct OpResult {
    pub specs: Specs,
    pub geom: Polyhedron,
}

impl OpResult {
    #[must_use]
    pub fn into_forme(self) -> Forme {
        Forme::new(self.specs, self.geom)
    }
}

/// An operation on catalogued solids.
pub trait Operation: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the operation applies to the solid. Depends on the specs
    /// alone.
    fn can_apply_to(&self, specs: &Specs) -> bool;

    /// Whether applying needs a choice between more than one outcome.
    fn has_options(&self, specs: &Specs) -> bool;

    /// Every legal combination of options for the forme.
    fn all_option_combos(&self, forme: &Forme) -> Vec<Options>;

    /// The distinct values one option takes across [`Self::all_option_combos`].
    fn all_options(&self, forme: &Forme, kind: OptionKind) -> Vec<OptionValue> {
        self.all_option_combos(forme)
            .iter()
            .filter_map(|options| options.value(kind))
            .unique()
            .collect()
    }

    /// Applies the operation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::NotApplicable`] if the
    /// operation does not apply to the forme,
    /// [`crate::error::OperationError::InvalidOption`] if the options match
    /// no legal combination, and
    /// [`crate::error::OperationError::NoResult`] if a rewritten mesh is not
    /// a catalogued solid.
    fn apply(&self, forme: &Forme, options: &Options) -> Result<OpResult>;
}

/// Every operation, in a fixed order.
#[must_use]
pub fn all() -> &'static [Box<dyn Operation>] {
    static OPERATIONS: OnceLock<Vec<Box<dyn Operation>>> = OnceLock::new();
    OPERATIONS.get_or_init(|| {
        vec![
            Box::new(PairOperation::new("elongate", prism::elongate)),
            Box::new(PairOperation::new("gyroelongate", prism::gyroelongate)),
            Box::new(PairOperation::new("shorten", prism::shorten)),
            Box::new(PairOperation::new("turn", prism::turn)),
            Box::new(PairOperation::new("increment", prism::increment)),
            Box::new(PairOperation::new("decrement", prism::decrement)),
            Box::new(PairOperation::new("double", prism::double)),
            Box::new(PairOperation::new("halve", prism::halve)),
            Box::new(PairOperation::new("expand", resize::expand)),
            Box::new(PairOperation::new("snub", resize::snub)),
            Box::new(PairOperation::new("dual", resize::dual)),
            Box::new(PairOperation::new("contract", resize::contract)),
            Box::new(PairOperation::new("twist", resize::twist)),
            Box::new(PairOperation::new("truncate", truncate::truncate)),
            Box::new(PairOperation::new("rectify", truncate::rectify)),
            Box::new(PairOperation::new("sharpen", truncate::sharpen)),
            Box::new(Augment),
            Box::new(Diminish),
            Box::new(Gyrate),
        ]
    })
}

/// Looks an operation up by name.
#[must_use]
pub fn get(name: &str) -> Option<&'static dyn Operation> {
    all().iter().find(|op| op.name() == name).map(|op| op.as_ref())
}
