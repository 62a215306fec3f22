//! Alternate names under which some solids are also known, keyed by the
//! canonical name.

use std::collections::HashMap;
use std::sync::OnceLock;

const ALTERNATES: &[(&str, &[&str])] = &[
    (
        "tetrahedron",
        &["tetrahedron dual", "triangular pyramid", "digonal antiprism", "disphenoid"],
    ),
    ("truncated tetrahedron", &["truncated tetrahedron dual"]),
    ("cube", &["square prism"]),
    (
        "octahedron",
        &["tetratetrahedron", "triangular antiprism", "square bipyramid"],
    ),
    (
        "icosahedron",
        &[
            "snub tetratetrahedron",
            "gyroelongated pentagonal bipyramid",
            "snub triangular antiprism",
        ],
    ),
    ("cuboctahedron", &["rhombitetratetrahedron", "triangular gyrobicupola"]),
    ("truncated octahedron", &["truncated tetratetrahedron"]),
    (
        "rhombicuboctahedron",
        &["elongated square orthobicupola", "bigyrate rhombicuboctahedron"],
    ),
    ("icosidodecahedron", &["pentagonal gyrobirotunda"]),
    ("triangular prism", &["fastigium", "digonal cupola"]),
    ("gyrobifastigium", &["digonal gyrobicupola"]),
    ("triangular bipyramid", &["augmented tetrahedron"]),
    ("elongated square pyramid", &["augmented cube", "augmented square prism"]),
    (
        "elongated square bipyramid",
        &["biaugmented cube", "biaugmented square prism"],
    ),
    ("square pyramid", &["diminished octahedron"]),
    ("pentagonal antiprism", &["parabidiminished icosahedron"]),
    ("gyroelongated pentagonal pyramid", &["diminished icosahedron"]),
    ("triangular orthobicupola", &["gyrate rhombitetratetrahedron"]),
    ("triangular cupola", &["diminished rhombitetratetrahedron"]),
    ("elongated square gyrobicupola", &["gyrate rhombicuboctahedron"]),
    (
        "elongated square cupola",
        &[
            "diminished rhombicuboctahedron",
            "gyrate diminished rhombicuboctahedron",
        ],
    ),
    ("octagonal prism", &["bidiminished rhombicuboctahedron"]),
    ("snub disphenoid", &["snub digonal antiprism"]),
];

struct AlternateNames {
    by_canonical: HashMap<&'static str, &'static [&'static str]>,
    canonical: HashMap<&'static str, &'static str>,
}

fn table() -> &'static AlternateNames {
    static TABLE: OnceLock<AlternateNames> = OnceLock::new();
    TABLE.get_or_init(|| {
        let by_canonical = ALTERNATES.iter().copied().collect();
        let canonical = ALTERNATES
            .iter()
            .flat_map(|&(canonical, alternates)| {
                alternates.iter().map(move |&alt| (alt, canonical))
            })
            .collect();
        AlternateNames {
            by_canonical,
            canonical,
        }
    })
}

/// The canonical form of a name; names without a listed canonical form are
/// returned unchanged.
#[must_use]
pub fn canonical(name: &str) -> &str {
    table().canonical.get(name).copied().unwrap_or(name)
}

/// Alternate names of a canonical name, empty when it has none.
#[must_use]
pub fn alternates(canonical_name: &str) -> &'static [&'static str] {
    table()
        .by_canonical
        .get(canonical_name)
        .copied()
        .unwrap_or_default()
}

/// Every canonical name with alternates.
pub fn canonical_names() -> impl Iterator<Item = &'static str> {
    ALTERNATES.iter().map(|&(name, _)| name)
}
