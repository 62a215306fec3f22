//! Elongation graphs: adding, removing and turning the band between caps.
//! Also the base graphs, which grow or double the polygon the caps sit on.

use super::pair::{both_ways, Step};
use super::Options;
use crate::specs::{
    Align, Capstone, CapstoneType, Composite, CompositeSource, Elongation, Gyration, Specs, Twist,
};

const TWISTS: [Twist; 2] = [Twist::Left, Twist::Right];

fn capstones() -> impl Iterator<Item = Capstone> {
    Specs::get_all().iter().filter_map(Specs::as_capstone).copied()
}

/// Shortened capstones with room for a band.
fn shortened() -> impl Iterator<Item = Capstone> {
    capstones().filter(|c| c.is_shortened() && !c.is_digonal())
}

pub(super) fn elongate() -> Vec<Step> {
    shortened()
        .map(|c| Step::new(c, c.with_elongation(Elongation::Prism)))
        .collect()
}

/// One step per mirror image where the result is chiral.
pub(super) fn gyroelongate() -> Vec<Step> {
    shortened()
        .flat_map(|c| {
            let end = c.with_elongation(Elongation::Antiprism);
            if end.is_chiral() {
                TWISTS
                    .iter()
                    .map(|&t| {
                        let options = Options::default().with_twist(t);
                        Step::new(c, end.with_twist(t)).with_options(options)
                    })
                    .collect()
            } else {
                vec![Step::new(c, end)]
            }
        })
        .collect()
}

/// Back to the shortened solid; where both an ortho and a gyro solid lead
/// here, the choice is the `gyrate` option.
pub(super) fn shorten() -> Vec<Step> {
    elongate()
        .into_iter()
        .chain(gyroelongate())
        .map(|s| {
            let gyrate = s.start.as_capstone().and_then(Capstone::gyrate);
            let options = Options {
                gyrate,
                ..Options::default()
            };
            s.reversed(options)
        })
        .collect()
}

/// Prisms and antiprisms, and elongated and gyroelongated capstones, in
/// both directions. Turning an ortho solid gives the left-handed gyroelongated
/// solid for a left twist; turning a gyro solid gives it for a right twist.
pub(super) fn turn() -> Vec<Step> {
    let mut steps = Vec::new();
    for c in capstones().filter(|c| c.is_elongated()) {
        let turned = c.with_elongation(Elongation::Antiprism);
        if !turned.is_chiral() {
            steps.extend(both_ways(vec![Step::new(c, turned)]));
            continue;
        }
        for t in TWISTS {
            let twist = match c.gyrate() {
                Some(Gyration::Gyro) => t.opposite(),
                _ => t,
            };
            let options = Options::default().with_twist(twist);
            steps.extend(both_ways(vec![Step::new(c, turned.with_twist(t)).with_options(options)]));
        }
    }
    steps
}

fn reversed(steps: Vec<Step>) -> Vec<Step> {
    steps.into_iter().map(|s| s.reversed(Options::default())).collect()
}

/// One more side on the base of pyramids, prisms and their elongations. The
/// pentagonal prism grows into the hexagonal prism.
pub(super) fn increment() -> Vec<Step> {
    let mut steps: Vec<Step> = capstones()
        .filter(|c| c.is_primary() && c.base() != 5 && !c.is_gyroelongated() && !c.is_snub())
        .map(|c| Step::new(c, c.with_base(c.base() + 1)))
        .collect();
    steps.push(Step::new(
        Capstone::new(5, CapstoneType::Primary, Elongation::Prism, 0),
        Capstone::new(3, CapstoneType::Secondary, Elongation::Prism, 0),
    ));
    steps
}

pub(super) fn decrement() -> Vec<Step> {
    reversed(increment())
}

/// Pyramids to cupolae and prisms to prisms on the doubled polygon. The
/// digonal antiprism doubles to the square antiprism, and gyroelongated
/// bipyramids pick the twist of the bicupola.
pub(super) fn double() -> Vec<Step> {
    let mut steps = Vec::new();
    for c in capstones().filter(|c| c.is_primary() && !c.is_snub()) {
        let doubled = c.with_kind(CapstoneType::Secondary);
        if !c.is_gyroelongated() {
            steps.push(Step::new(c, doubled.with_gyrate(Gyration::Ortho)));
        } else if c.is_digonal() {
            steps.push(Step::new(c, c.with_base(4)));
        } else if c.is_bi() {
            steps.extend(TWISTS.iter().map(|&t| {
                Step::new(c, doubled.with_twist(t)).with_options(Options::default().with_twist(t))
            }));
        } else {
            steps.push(Step::new(c, doubled));
        }
    }
    steps.extend(augmented_triangular_prisms());
    steps
}

/// Augmented triangular prisms double to augmented hexagonal prisms, with
/// a pair of augmentations set meta.
fn augmented_triangular_prisms() -> Vec<Step> {
    Composite::get_all()
        .into_iter()
        .filter_map(|composite| {
            let prism = composite.source().as_capstone()?;
            if !prism.is_primary() || prism.base() != 3 {
                return None;
            }
            let hexagonal = CompositeSource::Capstone(prism.with_kind(CapstoneType::Secondary));
            let end = Composite::new(hexagonal)
                .with_augmented(composite.augmented())
                .with_align(Align::Meta);
            Some(Step::new(composite, end))
        })
        .collect()
}

pub(super) fn halve() -> Vec<Step> {
    reversed(double())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::formes::Forme;
    use crate::operations::{get, Operation, OptionKind, OptionValue};
    use crate::specs::get_specs;

    fn op(name: &str) -> &'static dyn Operation {
        get(name).unwrap()
    }

    fn applies(name: &str, solid: &str) -> bool {
        op(name).can_apply_to(&get_specs(solid).unwrap())
    }

    #[test]
    fn elongate_applicability() {
        assert!(applies("elongate", "tetrahedron"));
        assert!(applies("elongate", "square pyramid"));
        assert!(!applies("elongate", "triangular prism"));
        assert!(!applies("elongate", "gyrobifastigium"));
        assert!(!applies("elongate", "elongated square pyramid"));
    }

    #[test]
    fn turn_applicability() {
        assert!(applies("turn", "cube"));
        assert!(applies("turn", "octahedron"));
        assert!(!applies("turn", "tetrahedron"));
        assert!(applies("turn", "elongated triangular cupola"));
    }

    #[test]
    fn gyroelongating_a_bicupola_has_twist_options() {
        let forme = Forme::from_name("square orthobicupola").unwrap();
        assert!(op("gyroelongate").has_options(&forme.specs()));
        assert_eq!(
            op("gyroelongate").all_options(&forme, OptionKind::Twist),
            [OptionValue::Twist(Twist::Left), OptionValue::Twist(Twist::Right)]
        );
        let result = op("gyroelongate")
            .apply(&forme, &Options::default().with_twist(Twist::Right))
            .unwrap();
        assert_eq!(result.specs.name(), "gyroelongated square bicupola");
        assert_eq!(result.specs.as_capstone().unwrap().twist(), Some(Twist::Right));
    }

    #[test]
    fn shortening_a_gyroelongated_bicupola_chooses_the_gyration() {
        let forme = Forme::from_name("gyroelongated triangular bicupola").unwrap();
        let options = op("shorten").all_options(&forme, OptionKind::Gyrate);
        assert_eq!(options.len(), 2);
        let result = op("shorten")
            .apply(&forme, &Options::default().with_gyrate(Gyration::Ortho))
            .unwrap();
        assert_eq!(result.specs.name(), "triangular orthobicupola");
    }

    #[test]
    fn turning_changes_the_band() {
        let forme = Forme::from_name("gyroelongated pentagonal bicupola").unwrap();
        let right = op("turn")
            .apply(&forme, &Options::default().with_twist(Twist::Right))
            .unwrap();
        assert_eq!(right.specs.name(), "elongated pentagonal gyrobicupola");
        let left = op("turn")
            .apply(&forme, &Options::default().with_twist(Twist::Left))
            .unwrap();
        assert_eq!(left.specs.name(), "elongated pentagonal orthobicupola");
        assert!(left.geom.is_valid() && right.geom.is_valid());
    }

    #[test]
    fn elongating_keeps_the_edge_length() {
        let forme = Forme::from_name("pentagonal rotunda").unwrap();
        let result = op("elongate").apply(&forme, &Options::default()).unwrap();
        assert_eq!(result.specs.name(), "elongated pentagonal rotunda");
        assert!((result.geom.edge_length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn incrementing_and_decrementing_the_base() {
        let forme = Forme::from_name("elongated square pyramid").unwrap();
        let result = op("increment").apply(&forme, &Options::default()).unwrap();
        assert_eq!(result.specs.name(), "elongated pentagonal pyramid");
        assert!(result.geom.is_valid());
        let back = op("decrement").apply(&result.into_forme(), &Options::default()).unwrap();
        assert_eq!(back.specs.name(), "elongated square pyramid");

        let prism = Forme::from_name("pentagonal prism").unwrap();
        let hexagonal = op("increment").apply(&prism, &Options::default()).unwrap();
        assert_eq!(hexagonal.specs.name(), "hexagonal prism");
        assert!(applies("decrement", "hexagonal prism"));
        assert!(!applies("increment", "pentagonal pyramid"));
        assert!(!applies("increment", "gyroelongated square pyramid"));
        assert!(!applies("decrement", "triangular prism"));
    }

    #[test]
    fn doubling_and_halving() {
        let pyramid = Forme::from_name("pentagonal pyramid").unwrap();
        let cupola = op("double").apply(&pyramid, &Options::default()).unwrap();
        assert_eq!(cupola.specs.name(), "pentagonal cupola");
        let halved = op("halve").apply(&cupola.into_forme(), &Options::default()).unwrap();
        assert_eq!(halved.specs.name(), "pentagonal pyramid");

        let bipyramid = Forme::from_name("gyroelongated square bipyramid").unwrap();
        assert_eq!(
            op("double").all_options(&bipyramid, OptionKind::Twist),
            [OptionValue::Twist(Twist::Left), OptionValue::Twist(Twist::Right)]
        );
        let digonal = Forme::from_name("digonal antiprism").unwrap();
        let square = op("double").apply(&digonal, &Options::default()).unwrap();
        assert_eq!(square.specs.name(), "square antiprism");

        let augmented = Forme::from_name("biaugmented triangular prism").unwrap();
        let doubled = op("double").apply(&augmented, &Options::default()).unwrap();
        assert_eq!(doubled.specs.name(), "metabiaugmented hexagonal prism");
        assert!(!applies("halve", "square pyramid"));
    }
}
