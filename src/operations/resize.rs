//! Graphs that push faces apart or pull them together: expand, snub,
//! contract, twist, and the dual that swaps faces for vertices.

use super::pair::{both_ways, Step};
use super::Options;
use crate::specs::{
    Capstone, CapstoneType, Classical, ClassicalOperation, Elongation, FacetType, Family, Gyration,
    Twist,
};

fn classicals(operation: ClassicalOperation) -> impl Iterator<Item = Classical> {
    Classical::get_all()
        .into_iter()
        .filter(move |c| c.operation() == operation)
}

/// Twists a snub of the family comes in. The tetrahedral snub is the
/// icosahedron, which has no handedness worth choosing.
fn twists(family: Family) -> &'static [Twist] {
    match family {
        Family::Tetrahedral => &[Twist::Left],
        _ => &[Twist::Left, Twist::Right],
    }
}

fn prism(n: u8) -> Capstone {
    Capstone::new(n, CapstoneType::Primary, Elongation::Prism, 0)
}

fn pyramid(n: u8) -> Capstone {
    Capstone::new(n, CapstoneType::Primary, Elongation::Shortened, 1)
}

fn facet_options(classical: &Classical) -> Options {
    Options {
        facet: classical.facet(),
        ..Options::default()
    }
}

pub(super) fn expand() -> Vec<Step> {
    let mut steps: Vec<Step> = [
        (ClassicalOperation::Regular, ClassicalOperation::Cantellate),
        (ClassicalOperation::Truncate, ClassicalOperation::Bevel),
    ]
    .into_iter()
    .flat_map(|(from, to)| {
        classicals(from).map(move |c| {
            Step::new(c, Classical::new(c.family(), to)).with_options(facet_options(&c))
        })
    })
    .collect();
    for n in 3..=5 {
        let bicupola = |gyrate| {
            Capstone::new(n, CapstoneType::Secondary, Elongation::Shortened, 2).with_gyrate(gyrate)
        };
        steps.push(Step::new(
            prism(n),
            bicupola(Gyration::Ortho).with_elongation(Elongation::Prism),
        ));
        steps.push(Step::new(pyramid(n), bicupola(Gyration::Gyro)));
    }
    steps
}

/// Snubbing a solid seen from its vertices mirrors the twist.
pub(super) fn snub() -> Vec<Step> {
    let mut steps = Vec::new();
    for c in classicals(ClassicalOperation::Regular) {
        for &t in twists(c.family()) {
            let result_twist = if c.is_vertex() { t.opposite() } else { t };
            let end = Classical::new(c.family(), ClassicalOperation::Snub).with_twist(result_twist);
            steps.push(Step::new(c, end).with_options(Options::default().with_twist(t)));
        }
    }
    for n in 3..=5 {
        steps.push(Step::new(
            pyramid(n),
            Capstone::new(n, CapstoneType::Primary, Elongation::Snub, 0),
        ));
    }
    steps
}

/// Expand and snub undone; the facet chooses which regular solid to return
/// to.
pub(super) fn contract() -> Vec<Step> {
    expand()
        .into_iter()
        .chain(snub())
        .map(|s| {
            let facet = s.start.as_classical().and_then(Classical::facet);
            s.reversed(Options {
                facet,
                ..Options::default()
            })
        })
        .collect()
}

pub(super) fn dual() -> Vec<Step> {
    let mut steps: Vec<Step> = Family::ALL
        .into_iter()
        .map(|family| {
            let regular = Classical::new(family, ClassicalOperation::Regular);
            Step::new(regular.with_facet(FacetType::Face), regular.with_facet(FacetType::Vertex))
        })
        .collect();
    for n in 3..=5 {
        steps.push(Step::new(
            prism(n),
            Capstone::new(n, CapstoneType::Primary, Elongation::Shortened, 2),
        ));
    }
    let mut steps = both_ways(steps);
    steps.extend((3..=5).map(|n| Step::new(pyramid(n), pyramid(n))));
    steps
}

pub(super) fn twist() -> Vec<Step> {
    let mut steps = Vec::new();
    for c in classicals(ClassicalOperation::Cantellate) {
        for &t in twists(c.family()) {
            let options = Options::default().with_twist(t);
            let snub = Classical::new(c.family(), ClassicalOperation::Snub).with_twist(t);
            steps.push(Step::new(c, snub).with_options(options));
            steps.push(Step::new(snub, c));
        }
    }
    for n in 3..=5 {
        let gyrobicupola = Capstone::new(n, CapstoneType::Secondary, Elongation::Shortened, 2)
            .with_gyrate(Gyration::Gyro);
        let snub = Capstone::new(n, CapstoneType::Primary, Elongation::Snub, 0);
        steps.extend(both_ways(vec![Step::new(gyrobicupola, snub)]));
    }
    steps
}
