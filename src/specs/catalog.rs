use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use tracing::debug;

use super::alternates::canonical;
use super::Specs;
use super::{Capstone, Classical, Composite, Elementary};
use crate::error::{LookupError, Result};

struct Catalog {
    all: Vec<Specs>,
    members: HashSet<Specs>,
    by_name: HashMap<String, Specs>,
    by_canonical: HashMap<String, Specs>,
    readings: HashMap<String, Vec<Specs>>,
}

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let all: Vec<Specs> = Classical::get_all()
            .into_iter()
            .map(Specs::Classical)
            .chain(Capstone::get_all().into_iter().map(Specs::Capstone))
            .chain(Composite::get_all().into_iter().map(Specs::Composite))
            .chain(Elementary::get_all().into_iter().map(Specs::Elementary))
            .collect();
        let mut by_name = HashMap::new();
        let mut by_canonical = HashMap::new();
        let mut readings: HashMap<String, Vec<Specs>> = HashMap::new();
        for specs in &all {
            by_name.entry(specs.name()).or_insert(*specs);
            by_canonical.entry(specs.canonical_name()).or_insert(*specs);
            readings.entry(specs.canonical_name()).or_default().push(*specs);
        }
        debug!(solids = all.len(), names = by_name.len(), "indexed solid catalog");
        Catalog {
            members: all.iter().copied().collect(),
            all,
            by_name,
            by_canonical,
            readings,
        }
    })
}

/// Every catalogued solid: classical, capstone, composite, then elementary.
#[must_use]
pub fn all() -> &'static [Specs] {
    &catalog().all
}

#[must_use]
pub fn contains(specs: &Specs) -> bool {
    catalog().members.contains(specs)
}

/// Resolves a solid by its structural name or by any of its alternate names.
///
/// # Errors
///
/// Returns [`LookupError::UnknownSolid`] if no catalogued solid has the name.
pub fn get_specs(name: &str) -> Result<Specs> {
    let catalog = catalog();
    catalog
        .by_name
        .get(name)
        .or_else(|| catalog.by_canonical.get(canonical(name)))
        .copied()
        .ok_or_else(|| LookupError::UnknownSolid(name.to_string()).into())
}

/// Every catalogued reading of the same solid, starting with `specs` itself
/// and continuing in catalog order.
#[must_use]
pub fn readings(specs: &Specs) -> Vec<Specs> {
    let specs = specs.resolved();
    let others = catalog()
        .readings
        .get(&specs.canonical_name())
        .into_iter()
        .flatten()
        .filter(|s| **s != specs)
        .copied();
    std::iter::once(specs).chain(others).collect()
}
