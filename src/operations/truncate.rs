//! Truncation graphs: cutting vertices off, down to the edge midpoints, and
//! growing them back.

use super::pair::Step;
use super::Options;
use crate::specs::{
    Classical, ClassicalOperation, Composite, CompositeSource, Elongation, Family, Specs,
};

fn with_facet(classical: &Classical) -> Options {
    Options {
        facet: classical.facet(),
        ..Options::default()
    }
}

/// Augmented regular solids truncate into augmented truncated solids with
/// the caps grown to cupolae.
fn augmented_regulars() -> Vec<Step> {
    Composite::get_all()
        .into_iter()
        .filter_map(|composite| {
            let CompositeSource::Classical(source) = composite.source() else {
                return None;
            };
            let augmented = composite.augmented();
            if !source.is_regular() || augmented == 0 || !composite.is_pure() {
                return None;
            }
            let truncated = source.with_operation(ClassicalOperation::Truncate);
            let mut end =
                Composite::new(CompositeSource::Classical(truncated)).with_augmented(augmented);
            if let Some(align) = composite.align() {
                end = end.with_align(align);
            }
            Some(Step::new(composite, end))
        })
        .collect()
}

pub(super) fn truncate() -> Vec<Step> {
    let regular = Classical::get_all().into_iter().filter(Classical::is_regular).map(|c| {
        Step::new(c, c.with_operation(ClassicalOperation::Truncate)).with_options(with_facet(&c))
    });
    let rectified = Classical::get_all()
        .into_iter()
        .filter(Classical::is_rectified)
        .map(|c| Step::new(c, c.with_operation(ClassicalOperation::Bevel)));
    regular.chain(rectified).chain(augmented_regulars()).collect()
}

/// The tetrahedron seen from its vertices rectifies to the same solid as
/// seen from its faces and is left out. Pyramids rectify to antiprisms.
pub(super) fn rectify() -> Vec<Step> {
    let regular = Classical::get_all()
        .into_iter()
        .filter(|c| c.is_regular() && !(c.family() == Family::Tetrahedral && c.is_vertex()))
        .map(|c| {
            Step::new(c, c.with_operation(ClassicalOperation::Rectify)).with_options(with_facet(&c))
        });
    let pyramids = Specs::get_all()
        .iter()
        .filter_map(Specs::as_capstone)
        .filter(|c| c.is_pyramid() && c.is_mono() && c.is_shortened())
        .map(|c| Step::new(*c, c.with_elongation(Elongation::Antiprism).with_count(0)));
    regular.chain(pyramids).collect()
}

/// Truncation and rectification undone; the facet chooses which regular
/// solid to return to.
pub(super) fn sharpen() -> Vec<Step> {
    truncate()
        .into_iter()
        .chain(rectify())
        .map(|s| {
            let facet = s.start.as_classical().and_then(Classical::facet);
            s.reversed(Options {
                facet,
                ..Options::default()
            })
        })
        .collect()
}
