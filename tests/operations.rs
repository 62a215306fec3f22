#![allow(clippy::unwrap_used)]

use polyhedra::mesh::CapType;
use polyhedra::operations::{self, OptionKind, OptionValue};
use polyhedra::specs::{Gyration, Twist};
use polyhedra::{get_specs, Forme, Operation, Options, Specs};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn op(name: &str) -> &'static dyn Operation {
    operations::get(name).unwrap()
}

fn specs(name: &str) -> Specs {
    get_specs(name).unwrap()
}

fn is_cut_paste(op: &dyn Operation) -> bool {
    matches!(op.name(), "augment" | "diminish" | "gyrate")
}

/// Every option combination of every applicable operation gives a valid,
/// catalogued solid.
fn check_all_results(include: impl Fn(&dyn Operation, &Forme) -> bool) {
    init_tracing();
    for specs in Specs::get_all() {
        let forme = Forme::from_specs(specs).unwrap();
        for op in operations::all() {
            let op = op.as_ref();
            if !op.can_apply_to(specs) || !include(op, &forme) {
                continue;
            }
            let combos = op.all_option_combos(&forme);
            assert!(!combos.is_empty(), "{} offers nothing for {specs}", op.name());
            for options in combos {
                let result = op
                    .apply(&forme, &options)
                    .unwrap_or_else(|e| panic!("{} on {specs} with {options}: {e}", op.name()));
                assert!(result.specs.exists(), "{} on {specs} gave {}", op.name(), result.specs);
                assert!(result.geom.is_valid(), "{} on {specs} with {options}", op.name());
            }
        }
    }
}

#[test]
fn graph_operations_give_valid_solids() {
    check_all_results(|op, _| !is_cut_paste(op));
}

#[test]
fn cut_paste_operations_give_valid_solids() {
    check_all_results(|op, _| is_cut_paste(op));
}

#[test]
fn applicability() {
    let table = [
        ("truncate", "tetrahedron", true),
        ("truncate", "cube", true),
        ("truncate", "cuboctahedron", true),
        ("truncate", "truncated cube", false),
        ("truncate", "square pyramid", false),
        ("rectify", "tetrahedron", true),
        ("rectify", "cube", true),
        ("rectify", "cuboctahedron", false),
        ("sharpen", "cuboctahedron", true),
        ("sharpen", "tetrahedron", false),
        ("dual", "cube", true),
        ("dual", "square pyramid", true),
        ("dual", "cuboctahedron", false),
        ("expand", "cube", true),
        ("expand", "truncated cube", true),
        ("expand", "rhombicuboctahedron", false),
        ("snub", "cube", true),
        ("snub", "cuboctahedron", false),
        ("contract", "rhombicuboctahedron", true),
        ("contract", "cube", false),
        ("twist", "rhombicuboctahedron", true),
        ("twist", "cube", false),
        ("shorten", "elongated square pyramid", true),
        ("shorten", "square pyramid", false),
        ("increment", "square pyramid", true),
        ("increment", "cube", true),
        ("increment", "pentagonal pyramid", false),
        ("decrement", "hexagonal prism", true),
        ("double", "tetrahedron", true),
        ("double", "icosahedron", true),
        ("halve", "square cupola", true),
        ("halve", "square pyramid", false),
        ("rectify", "square pyramid", true),
        ("augment", "cube", true),
        ("augment", "icosahedron", false),
        ("diminish", "icosahedron", true),
        ("diminish", "rhombicosidodecahedron", true),
        ("diminish", "cube", false),
        ("gyrate", "rhombicuboctahedron", true),
        ("gyrate", "rhombicosidodecahedron", true),
        ("gyrate", "square cupola", false),
        ("gyrate", "cube", false),
    ];
    for (name, solid, expected) in table {
        assert_eq!(op(name).can_apply_to(&specs(solid)), expected, "{name} on {solid}");
    }
}

#[test]
fn turning_maps_the_twist_by_gyration() {
    let ortho = Forme::from_name("elongated pentagonal orthobicupola").unwrap();
    let result = op("turn")
        .apply(&ortho, &Options::default().with_twist(Twist::Left))
        .unwrap();
    assert_eq!(result.specs.name(), "gyroelongated pentagonal bicupola");
    assert_eq!(result.specs.as_capstone().unwrap().twist(), Some(Twist::Left));

    let gyro = Forme::from_name("elongated pentagonal gyrobicupola").unwrap();
    let result = op("turn")
        .apply(&gyro, &Options::default().with_twist(Twist::Left))
        .unwrap();
    assert_eq!(result.specs.as_capstone().unwrap().twist(), Some(Twist::Right));
}

#[test]
fn turning_back_picks_the_band_by_twist() {
    let gyroelongated = Forme::from_name("gyroelongated pentagonal bicupola").unwrap();
    let right = op("turn")
        .apply(&gyroelongated, &Options::default().with_twist(Twist::Right))
        .unwrap();
    assert_eq!(right.specs.name(), "elongated pentagonal gyrobicupola");
    let left = op("turn")
        .apply(&gyroelongated, &Options::default().with_twist(Twist::Left))
        .unwrap();
    assert_eq!(left.specs.name(), "elongated pentagonal orthobicupola");
}

#[test]
fn augmenting_a_pentagonal_cupola() {
    let cupola = Forme::from_name("pentagonal cupola").unwrap();
    let decagon = cupola.geom().faces_with_sides(10).next().unwrap().index();
    let using = op("augment").all_options(&cupola, OptionKind::Using);
    assert!(using.contains(&OptionValue::Using(CapType::Cupola)));
    assert!(using.contains(&OptionValue::Using(CapType::Rotunda)));
    let gyrations = op("augment").all_options(&cupola, OptionKind::Gyrate);
    assert!(gyrations.contains(&OptionValue::Gyrate(Gyration::Gyro)));
    let options = Options::default()
        .with_face(decagon)
        .with_using(CapType::Rotunda)
        .with_gyrate(Gyration::Ortho);
    let result = op("augment").apply(&cupola, &options).unwrap();
    assert_eq!(result.specs.name(), "pentagonal orthocupolarotunda");
}

#[test]
fn results_chain() {
    let cube = Forme::from_name("cube").unwrap();
    let truncated = op("truncate")
        .apply(&cube, &Options::default())
        .unwrap()
        .into_forme();
    assert_eq!(truncated.specs().name(), "truncated cube");
    let expanded = op("expand")
        .apply(&truncated, &Options::default())
        .unwrap()
        .into_forme();
    assert_eq!(expanded.specs().name(), "truncated cuboctahedron");
    assert!((expanded.geom().edge_length() - 1.0).abs() < 1e-6);
}
