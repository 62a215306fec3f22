//! Canonical unit-edge geometry for every catalogued solid.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::error::{LookupError, Result};
use crate::mesh::Polyhedron;
use crate::specs::Specs;

mod capstone;
mod classical;
mod composite;
mod elementary;

pub use capstone::cap;

fn cache() -> &'static Mutex<HashMap<Specs, Polyhedron>> {
    static CACHE: OnceLock<Mutex<HashMap<Specs, Polyhedron>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// The canonical embedding of a solid: unit edges, built once and cloned
/// from a process-wide cache afterwards.
///
/// Composites without modifications resolve to their source solid.
///
/// # Errors
///
/// Returns [`LookupError::UnknownSolid`] if the specs are not catalogued.
pub fn geometry(specs: &Specs) -> Result<Polyhedron> {
    let specs = specs.resolved();
    if !specs.exists() {
        return Err(LookupError::UnknownSolid(specs.name()).into());
    }
    if let Some(solid) = cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&specs)
    {
        return Ok(solid.clone());
    }

    debug!(solid = %specs, "building canonical geometry");
    let solid = match &specs {
        Specs::Classical(c) => classical::build(c)?,
        Specs::Capstone(c) => capstone::build(c)?,
        Specs::Composite(c) => composite::build(c)?,
        Specs::Elementary(e) => elementary::build(*e)?,
    };
    cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(specs, solid.clone());
    Ok(solid)
}

/// The first catalogued solid whose canonical geometry is the same solid as
/// `solid`.
#[must_use]
pub fn identify(solid: &Polyhedron) -> Option<Specs> {
    let sides = solid.faces_by_sides();
    Specs::get_all().iter().copied().find(|specs| {
        geometry(specs).is_ok_and(|canonical| {
            canonical.faces_by_sides() == sides && canonical.is_same(solid)
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::specs::get_specs;

    #[test]
    fn geometry_by_name() {
        let cube = geometry(&get_specs("cube").unwrap()).unwrap();
        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-9);
        let fastigium = geometry(&get_specs("fastigium").unwrap()).unwrap();
        assert_eq!(fastigium.faces_by_sides(), [(3, 2), (4, 3)].into());
    }

    #[test]
    fn diminished_octahedron_is_a_square_pyramid() {
        let diminished = get_specs("diminished octahedron").unwrap();
        let pyramid = geometry(&get_specs("square pyramid").unwrap()).unwrap();
        assert!(geometry(&diminished).unwrap().is_same(&pyramid));
    }

    #[test]
    fn identify_finds_the_catalogued_solid() {
        let j37 = geometry(&get_specs("elongated square gyrobicupola").unwrap()).unwrap();
        assert_eq!(identify(&j37).unwrap().name(), "elongated square gyrobicupola");
        let (pyramid, _) = cap(crate::mesh::CapType::Pyramid, 4).unwrap();
        assert_eq!(identify(&pyramid).unwrap().canonical_name(), "square pyramid");
    }

    #[test]
    fn every_catalogued_solid_has_geometry() {
        for specs in Specs::get_all() {
            let solid = geometry(specs).unwrap_or_else(|e| panic!("{specs}: {e}"));
            assert!(solid.is_valid(), "{specs} is invalid");
            assert_relative_eq!(solid.edge_length(), 1.0, epsilon = 1e-6);
        }
    }
}
