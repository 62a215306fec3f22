//! Augment, diminish and gyrate: local rewrites of a mesh.
//!
//! The rewritten mesh is matched against the solids the input's specs can
//! lead to, and the match names the result. Augment and diminish fall back
//! to a catalog-wide lookup when no candidate matches.

use itertools::Itertools;
use tracing::{debug, trace, warn};

use super::{OpResult, Operation, Options};
use crate::error::{OperationError, Result};
use crate::formes::Forme;
use crate::mesh::{Cap, Polyhedron};
use crate::solids;
use crate::specs::{
    Align, Capstone, ClassicalOperation, Composite, CompositeSource, Elementary, Gyration, Specs,
    Twist,
};

const ALIGNS: [Align; 2] = [Align::Meta, Align::Para];

/// A solid an operation may produce, with the gyration it stands for where
/// that is a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Candidate {
    specs: Specs,
    gyrate: Option<Gyration>,
}

impl Candidate {
    fn new(specs: impl Into<Specs>) -> Self {
        Self {
            specs: specs.into(),
            gyrate: None,
        }
    }

    fn tagged(specs: impl Into<Specs>, gyrate: Option<Gyration>) -> Self {
        Self {
            specs: specs.into(),
            gyrate,
        }
    }
}

/// Both gyrations or both twists where the capstone has them.
fn capstone_variants(capstone: Capstone) -> Vec<Capstone> {
    if capstone.has_gyrate() {
        vec![capstone.with_gyrate(Gyration::Ortho), capstone.with_gyrate(Gyration::Gyro)]
    } else if capstone.is_chiral() {
        vec![capstone.with_twist(Twist::Left), capstone.with_twist(Twist::Right)]
    } else {
        vec![capstone]
    }
}

/// Alignments open to a composite taking one more modification. A para
/// pair leaves no room for a third.
fn next_aligns(composite: &Composite) -> &'static [Align] {
    match composite.align() {
        Some(Align::Para) => &[],
        Some(Align::Meta) => &[Align::Meta],
        None => &ALIGNS,
    }
}

/// `composite` with the alignment of `like`, when it has one.
fn aligned_as(composite: Composite, like: &Composite) -> Composite {
    like.align().map_or(composite, |align| composite.with_align(align))
}

fn is_cantellated(composite: &Composite) -> bool {
    composite
        .source()
        .as_classical()
        .is_some_and(|c| c.operation() == ClassicalOperation::Cantellate)
}

fn augmented(specs: &Specs) -> Vec<Candidate> {
    let mut found = Vec::new();
    match specs {
        Specs::Capstone(c) => {
            if c.count() < 2 {
                let next = c.with_count(c.count() + 1);
                for rotunda_count in [c.rotunda_count(), c.rotunda_count() + 1] {
                    for variant in capstone_variants(next.with_rotunda_count(rotunda_count)) {
                        found.push(Candidate::tagged(variant, variant.gyrate()));
                    }
                }
            }
            if c.is_prismatic() {
                found.push(Candidate::new(
                    Composite::new(CompositeSource::Capstone(*c)).with_augmented(1),
                ));
            }
        }
        Specs::Classical(c) => {
            found.push(Candidate::new(
                Composite::new(CompositeSource::Classical(*c)).with_augmented(1),
            ));
        }
        Specs::Composite(x) => {
            for &align in next_aligns(x) {
                found.push(Candidate::new(x.with_augmented(x.augmented() + 1).with_align(align)));
            }
            if x.diminished() > 0 {
                if is_cantellated(x) {
                    found.push(Candidate::tagged(x.augment_gyrate(false), Some(Gyration::Ortho)));
                    found.push(Candidate::tagged(x.augment_gyrate(true), Some(Gyration::Gyro)));
                } else {
                    found.push(Candidate::new(x.augment_diminished(false)));
                    found.push(Candidate::new(x.augment_diminished(true)));
                }
            }
        }
        Specs::Elementary(Elementary::Sphenocorona) => {
            found.push(Candidate::new(Elementary::AugmentedSphenocorona));
        }
        Specs::Elementary(_) => {}
    }
    found
}

fn diminished(specs: &Specs) -> Vec<Candidate> {
    let mut found = Vec::new();
    match specs {
        Specs::Capstone(c) if c.count() > 0 => {
            for kind in c.cap_types() {
                found.push(Candidate::new(c.remove_cap(kind)));
            }
        }
        Specs::Capstone(_) => {}
        Specs::Classical(c) => {
            found.push(Candidate::new(
                Composite::new(CompositeSource::Classical(*c)).with_diminished(1),
            ));
        }
        Specs::Composite(x) => {
            if x.augmented() > 0 {
                found.push(Candidate::new(x.diminish()));
            }
            for &align in next_aligns(x) {
                found.push(Candidate::new(x.with_diminished(x.diminished() + 1).with_align(align)));
            }
            if x.gyrate() > 0 {
                let swapped = x.with_diminished(x.diminished() + 1).with_gyrate(x.gyrate() - 1);
                found.push(Candidate::new(aligned_as(swapped, x)));
            }
        }
        Specs::Elementary(Elementary::AugmentedSphenocorona) => {
            found.push(Candidate::new(Elementary::Sphenocorona));
        }
        Specs::Elementary(_) => {}
    }
    found
}

fn gyrated(specs: &Specs) -> Vec<Candidate> {
    let mut found = Vec::new();
    match specs {
        Specs::Capstone(c) if c.has_gyrate() || c.is_chiral() => {
            found.push(Candidate::new(c.gyrated()));
        }
        Specs::Classical(c) if c.is_cantellated() => found.push(Candidate::new(
            Composite::new(CompositeSource::Classical(*c)).with_gyrate(1),
        )),
        Specs::Composite(x) if is_cantellated(x) => {
            for &align in next_aligns(x) {
                found.push(Candidate::new(x.with_gyrate(x.gyrate() + 1).with_align(align)));
            }
            if x.gyrate() > 0 {
                found.push(Candidate::new(x.ungyrate()));
            }
        }
        _ => {}
    }
    found
}

/// Candidates over every reading of `specs`, catalogued and without
/// repeats.
fn candidates(specs: &Specs, rule: fn(&Specs) -> Vec<Candidate>) -> Vec<Candidate> {
    specs
        .readings()
        .iter()
        .flat_map(rule)
        .map(|c| Candidate::tagged(c.specs.resolved(), c.gyrate))
        .filter(|c| c.specs.exists())
        .unique()
        .collect()
}

fn same_shape(specs: &Specs, solid: &Polyhedron) -> bool {
    solids::geometry(specs).is_ok_and(|canonical| {
        canonical.faces_by_sides() == solid.faces_by_sides() && canonical.is_same(solid)
    })
}

/// The candidate `solid` is, or with `fallback` any catalogued solid it is.
fn resolve(solid: &Polyhedron, candidates: &[Candidate], fallback: bool) -> Option<Candidate> {
    let found = candidates.iter().copied().find(|c| {
        let matched = same_shape(&c.specs, solid);
        trace!(candidate = %c.specs, matched, "matching rewritten solid");
        matched
    });
    if found.is_some() || !fallback {
        return found;
    }
    solids::identify(solid).map(Candidate::new)
}

fn not_applicable(operation: &'static str, specs: &Specs) -> OperationError {
    OperationError::NotApplicable {
        operation,
        solid: specs.name(),
    }
}

fn missing(operation: &'static str, option: &str) -> OperationError {
    OperationError::InvalidOption {
        operation,
        option: format!("missing {option}"),
    }
}

fn no_result(operation: &'static str, specs: &Specs, options: &Options) -> OperationError {
    warn!(operation, solid = %specs, %options, "rewritten solid matches no catalogued solid");
    OperationError::NoResult {
        operation,
        solid: specs.name(),
    }
}

fn succeeded(operation: &'static str, from: &Specs, to: Specs, geom: Polyhedron) -> OpResult {
    debug!(operation, from = %from, to = %to, "applied operation");
    OpResult { specs: to, geom }
}

/// Whether a forme of `specs` offers more than one option combination.
fn several_combos(op: &dyn Operation, specs: &Specs) -> bool {
    Forme::from_specs(specs).is_ok_and(|forme| op.all_option_combos(&forme).len() > 1)
}

/// Glues a pyramid, cupola or rotunda onto a face.
///
/// Options: `face` (required), `using` to pick the cap kind, and `gyrate`
/// where the cap can sit aligned or rotated against what lies below.
#[derive(Debug, Clone, Copy, Default)]
pub struct Augment;

impl Augment {
    const NAME: &'static str = "augment";

    fn outcomes(
        forme: &Forme,
        face: usize,
        candidates: &[Candidate],
    ) -> Result<Vec<(Options, Candidate, Polyhedron)>> {
        Ok(forme
            .augmentations(face)?
            .into_iter()
            .filter_map(|a| {
                let found = resolve(&a.result, candidates, true)?;
                let options = Options {
                    face: Some(face),
                    using: Some(a.kind),
                    gyrate: found.gyrate,
                    ..Options::default()
                };
                Some((options, found, a.result))
            })
            .collect())
    }
}

impl Operation for Augment {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn can_apply_to(&self, specs: &Specs) -> bool {
        !candidates(specs, augmented).is_empty()
    }

    /// A face always has to be chosen.
    fn has_options(&self, specs: &Specs) -> bool {
        self.can_apply_to(specs)
    }

    fn all_option_combos(&self, forme: &Forme) -> Vec<Options> {
        let candidates = candidates(&forme.specs(), augmented);
        if candidates.is_empty() {
            return Vec::new();
        }
        (0..forme.geom().num_faces())
            .filter_map(|face| Self::outcomes(forme, face, &candidates).ok())
            .flatten()
            .map(|(options, _, _)| options)
            .unique()
            .collect()
    }

    fn apply(&self, forme: &Forme, options: &Options) -> Result<OpResult> {
        let specs = forme.specs();
        let candidates = candidates(&specs, augmented);
        if candidates.is_empty() {
            return Err(not_applicable(Self::NAME, &specs).into());
        }
        let face = options.face.ok_or_else(|| missing(Self::NAME, "face"))?;
        let (_, found, geom) = Self::outcomes(forme, face, &candidates)?
            .into_iter()
            .find(|(offered, _, _)| offered.satisfies(options))
            .ok_or_else(|| no_result(Self::NAME, &specs, options))?;
        Ok(succeeded(Self::NAME, &specs, found.specs, geom))
    }
}

/// Cap rewrites share the option handling: `cap` indexes the forme's caps.
fn cap_outcome(
    forme: &Forme,
    cap: &Cap,
    rewrite: fn(&Cap, &Polyhedron) -> Result<Polyhedron>,
    candidates: &[Candidate],
    fallback: bool,
) -> Option<(Candidate, Polyhedron)> {
    let result = rewrite(cap, forme.geom()).ok()?;
    resolve(&result, candidates, fallback).map(|found| (found, result))
}

fn cap_combos(
    forme: &Forme,
    rewrite: fn(&Cap, &Polyhedron) -> Result<Polyhedron>,
    candidates: &[Candidate],
    fallback: bool,
) -> Vec<Options> {
    if candidates.is_empty() {
        return Vec::new();
    }
    forme
        .caps()
        .iter()
        .enumerate()
        .filter(|(_, cap)| cap_outcome(forme, cap, rewrite, candidates, fallback).is_some())
        .map(|(i, _)| Options::default().with_cap(i))
        .collect()
}

fn apply_to_cap(
    operation: &'static str,
    forme: &Forme,
    options: &Options,
    rewrite: fn(&Cap, &Polyhedron) -> Result<Polyhedron>,
    candidates: &[Candidate],
    fallback: bool,
) -> Result<OpResult> {
    let specs = forme.specs();
    if candidates.is_empty() {
        return Err(not_applicable(operation, &specs).into());
    }
    let index = options.cap.ok_or_else(|| missing(operation, "cap"))?;
    let caps = forme.caps();
    let cap = caps.get(index).ok_or_else(|| OperationError::InvalidOption {
        operation,
        option: format!("cap {index} of {}", caps.len()),
    })?;
    let (found, geom) = cap_outcome(forme, cap, rewrite, candidates, fallback)
        .ok_or_else(|| no_result(operation, &specs, options))?;
    Ok(succeeded(operation, &specs, found.specs, geom))
}

/// Cuts a cap off, closing the hole with a single face. Option: `cap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diminish;

impl Diminish {
    const NAME: &'static str = "diminish";
}

impl Operation for Diminish {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn can_apply_to(&self, specs: &Specs) -> bool {
        !candidates(specs, diminished).is_empty()
    }

    fn has_options(&self, specs: &Specs) -> bool {
        several_combos(self, specs)
    }

    fn all_option_combos(&self, forme: &Forme) -> Vec<Options> {
        cap_combos(forme, Cap::remove, &candidates(&forme.specs(), diminished), true)
    }

    fn apply(&self, forme: &Forme, options: &Options) -> Result<OpResult> {
        let candidates = candidates(&forme.specs(), diminished);
        apply_to_cap(Self::NAME, forme, options, Cap::remove, &candidates, true)
    }
}

/// Turns a cap about its axis by one step of its base. Option: `cap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gyrate;

impl Gyrate {
    const NAME: &'static str = "gyrate";
}

impl Operation for Gyrate {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn can_apply_to(&self, specs: &Specs) -> bool {
        !candidates(specs, gyrated).is_empty()
    }

    fn has_options(&self, specs: &Specs) -> bool {
        several_combos(self, specs)
    }

    fn all_option_combos(&self, forme: &Forme) -> Vec<Options> {
        cap_combos(forme, Cap::gyrate, &candidates(&forme.specs(), gyrated), false)
    }

    fn apply(&self, forme: &Forme, options: &Options) -> Result<OpResult> {
        let candidates = candidates(&forme.specs(), gyrated);
        apply_to_cap(Self::NAME, forme, options, Cap::gyrate, &candidates, false)
    }
}
