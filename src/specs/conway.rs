//! Conway notation: `T C O D I` and their operators for the classical solids,
//! `P{n}` / `A{n}` for prisms and antiprisms and `J1`..`J92` for the Johnson
//! solids.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::{get_specs, Specs};
use crate::error::{LookupError, Result};

const CLASSICAL: &[(&str, &str)] = &[
    ("tetrahedron", "T"),
    ("cube", "C"),
    ("octahedron", "O"),
    ("dodecahedron", "D"),
    ("icosahedron", "I"),
    ("truncated tetrahedron", "tT"),
    ("cuboctahedron", "aC"),
    ("truncated cube", "tC"),
    ("truncated octahedron", "tO"),
    ("rhombicuboctahedron", "eC"),
    ("truncated cuboctahedron", "bC"),
    ("snub cuboctahedron", "sC"),
    ("icosidodecahedron", "aD"),
    ("truncated dodecahedron", "tD"),
    ("truncated icosahedron", "tI"),
    ("rhombicosidodecahedron", "eD"),
    ("truncated icosidodecahedron", "bD"),
    ("snub icosidodecahedron", "sD"),
];

/// Johnson solids in numbering order, `J1` first.
pub const JOHNSON: [&str; 92] = [
    "square pyramid",
    "pentagonal pyramid",
    "triangular cupola",
    "square cupola",
    "pentagonal cupola",
    "pentagonal rotunda",
    "elongated triangular pyramid",
    "elongated square pyramid",
    "elongated pentagonal pyramid",
    "gyroelongated square pyramid",
    "gyroelongated pentagonal pyramid",
    "triangular bipyramid",
    "pentagonal bipyramid",
    "elongated triangular bipyramid",
    "elongated square bipyramid",
    "elongated pentagonal bipyramid",
    "gyroelongated square bipyramid",
    "elongated triangular cupola",
    "elongated square cupola",
    "elongated pentagonal cupola",
    "elongated pentagonal rotunda",
    "gyroelongated triangular cupola",
    "gyroelongated square cupola",
    "gyroelongated pentagonal cupola",
    "gyroelongated pentagonal rotunda",
    "gyrobifastigium",
    "triangular orthobicupola",
    "square orthobicupola",
    "square gyrobicupola",
    "pentagonal orthobicupola",
    "pentagonal gyrobicupola",
    "pentagonal orthocupolarotunda",
    "pentagonal gyrocupolarotunda",
    "pentagonal orthobirotunda",
    "elongated triangular orthobicupola",
    "elongated triangular gyrobicupola",
    "elongated square gyrobicupola",
    "elongated pentagonal orthobicupola",
    "elongated pentagonal gyrobicupola",
    "elongated pentagonal orthocupolarotunda",
    "elongated pentagonal gyrocupolarotunda",
    "elongated pentagonal orthobirotunda",
    "elongated pentagonal gyrobirotunda",
    "gyroelongated triangular bicupola",
    "gyroelongated square bicupola",
    "gyroelongated pentagonal bicupola",
    "gyroelongated pentagonal cupolarotunda",
    "gyroelongated pentagonal birotunda",
    "augmented triangular prism",
    "biaugmented triangular prism",
    "triaugmented triangular prism",
    "augmented pentagonal prism",
    "biaugmented pentagonal prism",
    "augmented hexagonal prism",
    "parabiaugmented hexagonal prism",
    "metabiaugmented hexagonal prism",
    "triaugmented hexagonal prism",
    "augmented dodecahedron",
    "parabiaugmented dodecahedron",
    "metabiaugmented dodecahedron",
    "triaugmented dodecahedron",
    "metabidiminished icosahedron",
    "tridiminished icosahedron",
    "augmented tridiminished icosahedron",
    "augmented truncated tetrahedron",
    "augmented truncated cube",
    "biaugmented truncated cube",
    "augmented truncated dodecahedron",
    "parabiaugmented truncated dodecahedron",
    "metabiaugmented truncated dodecahedron",
    "triaugmented truncated dodecahedron",
    "gyrate rhombicosidodecahedron",
    "parabigyrate rhombicosidodecahedron",
    "metabigyrate rhombicosidodecahedron",
    "trigyrate rhombicosidodecahedron",
    "diminished rhombicosidodecahedron",
    "paragyrate diminished rhombicosidodecahedron",
    "metagyrate diminished rhombicosidodecahedron",
    "bigyrate diminished rhombicosidodecahedron",
    "parabidiminished rhombicosidodecahedron",
    "metabidiminished rhombicosidodecahedron",
    "gyrate bidiminished rhombicosidodecahedron",
    "tridiminished rhombicosidodecahedron",
    "snub disphenoid",
    "snub square antiprism",
    "sphenocorona",
    "augmented sphenocorona",
    "sphenomegacorona",
    "hebesphenomegacorona",
    "disphenocingulum",
    "bilunabirotunda",
    "triangular hebesphenorotunda",
];

/// The Conway symbol of a solid.
///
/// # Errors
///
/// Returns [`LookupError::NotConwayNotation`] if the solid has no symbol.
pub fn symbol(specs: &Specs) -> Result<String> {
    let canonical = specs.canonical_name();
    if let Some((_, symbol)) = CLASSICAL.iter().find(|(name, _)| *name == canonical) {
        return Ok((*symbol).to_string());
    }
    if let Ok(Specs::Capstone(capstone)) = get_specs(&canonical) {
        if capstone.is_prismatic() {
            let letter = if capstone.is_gyroelongated() { 'A' } else { 'P' };
            return Ok(format!("{letter}{}", capstone.base_sides()));
        }
    }
    match JOHNSON.iter().position(|name| *name == canonical) {
        Some(index) => Ok(format!("J{}", index + 1)),
        None => Err(LookupError::NotConwayNotation(canonical).into()),
    }
}

fn by_symbol() -> &'static HashMap<String, Specs> {
    static BY_SYMBOL: OnceLock<HashMap<String, Specs>> = OnceLock::new();
    BY_SYMBOL.get_or_init(|| {
        let mut map = HashMap::new();
        for specs in Specs::get_all() {
            if let Ok(symbol) = symbol(specs) {
                map.entry(symbol).or_insert(*specs);
            }
        }
        map
    })
}

/// The solid a Conway symbol names.
///
/// # Errors
///
/// Returns [`LookupError::UnknownSolid`] if no catalogued solid has the symbol.
pub fn from_symbol(symbol: &str) -> Result<Specs> {
    by_symbol()
        .get(symbol)
        .copied()
        .ok_or_else(|| LookupError::UnknownSolid(symbol.to_string()).into())
}
