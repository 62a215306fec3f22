//! Operations defined by a graph of specs pairs.

use std::sync::OnceLock;

use itertools::Itertools;
use tracing::{debug, trace};

use super::{OpResult, Operation, Options};
use crate::error::{OperationError, Result};
use crate::formes::Forme;
use crate::mesh::{Builder, Polyhedron};
use crate::solids;
use crate::specs::Specs;

/// One edge of an operation graph: applying the operation to `start` with
/// `options` gives `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Step {
    pub start: Specs,
    pub end: Specs,
    pub options: Options,
}

impl Step {
    pub(crate) fn new(start: impl Into<Specs>, end: impl Into<Specs>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            options: Options::default(),
        }
    }

    pub(crate) fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// The same edge walked backwards, with options chosen from the new end.
    pub(crate) fn reversed(self, options: Options) -> Self {
        Self {
            start: self.end,
            end: self.start,
            options,
        }
    }
}

/// Both directions of each step, keeping the options.
pub(crate) fn both_ways(steps: Vec<Step>) -> Vec<Step> {
    let back: Vec<Step> = steps.iter().map(|s| s.reversed(s.options)).collect();
    steps.into_iter().chain(back).collect()
}

/// An operation whose results are catalogued solids reached along a fixed
/// graph.
pub struct PairOperation {
    name: &'static str,
    build: fn() -> Vec<Step>,
    steps: OnceLock<Vec<Step>>,
}

impl PairOperation {
    pub(crate) fn new(name: &'static str, build: fn() -> Vec<Step>) -> Self {
        Self {
            name,
            build,
            steps: OnceLock::new(),
        }
    }

    fn steps(&self) -> &[Step] {
        self.steps.get_or_init(|| {
            let steps: Vec<Step> = (self.build)()
                .into_iter()
                .map(|s| Step {
                    start: s.start.resolved(),
                    end: s.end.resolved(),
                    options: s.options,
                })
                .filter(|s| s.start.exists() && s.end.exists())
                .unique()
                .collect();
            debug!(operation = self.name, steps = steps.len(), "built operation graph");
            steps
        })
    }

    /// The first reading of `specs` the graph leaves from, with its steps.
    fn entries(&self, specs: &Specs) -> Option<(Specs, Vec<Step>)> {
        specs.readings().into_iter().find_map(|reading| {
            let steps: Vec<Step> = self
                .steps()
                .iter()
                .filter(|s| s.start == reading)
                .copied()
                .collect();
            (!steps.is_empty()).then_some((reading, steps))
        })
    }

    /// Places the canonical `end` where `forme` stands, read as `reading`.
    fn place(forme: &Forme, reading: Specs, step: &Step) -> Result<Polyhedron> {
        let canonical = solids::geometry(&step.end)?;
        let facet = step.options.facet;
        let input = Forme::new(reading, forme.geom().clone()).pose_with(facet);
        let target = Forme::new(step.end, canonical.clone()).pose_with(facet);
        match (target.frame(), input.frame()) {
            (Some(from), Some(to)) => Builder::new(&canonical)
                .transform_vertices(&from.transform_to(&to))
                .build(),
            _ => {
                trace!(solid = %step.end, "no frame to align with; keeping canonical placement");
                Ok(canonical)
            }
        }
    }
}

impl Operation for PairOperation {
    fn name(&self) -> &'static str {
        self.name
    }

    fn can_apply_to(&self, specs: &Specs) -> bool {
        self.entries(specs).is_some()
    }

    fn has_options(&self, specs: &Specs) -> bool {
        self.entries(specs).is_some_and(|(_, steps)| steps.len() > 1)
    }

    fn all_option_combos(&self, forme: &Forme) -> Vec<Options> {
        self.entries(&forme.specs())
            .map(|(_, steps)| steps.iter().map(|s| s.options).collect())
            .unwrap_or_default()
    }

    fn apply(&self, forme: &Forme, options: &Options) -> Result<OpResult> {
        let specs = forme.specs();
        let (reading, steps) = self.entries(&specs).ok_or_else(|| OperationError::NotApplicable {
            operation: self.name,
            solid: specs.name(),
        })?;
        let step = steps
            .iter()
            .find(|s| s.options.satisfies(options))
            .ok_or_else(|| OperationError::InvalidOption {
                operation: self.name,
                option: options.to_string(),
            })?;
        let geom = Self::place(forme, reading, step)?;
        debug!(operation = self.name, from = %specs, to = %step.end, %options, "applied operation");
        Ok(OpResult {
            specs: step.end,
            geom,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::PolyhedraError;
    use crate::math::{Point3, Vector3};
    use crate::specs::get_specs;

    fn dual() -> PairOperation {
        PairOperation::new("dual", super::super::resize::dual)
    }

    #[test]
    fn result_takes_the_input_placement() {
        let cube = solids::geometry(&get_specs("cube").unwrap()).unwrap();
        let moved = Builder::new(&cube)
            .map_vertices(|_, p| Point3::from(p.coords * 2.0 + Vector3::new(5.0, 0.0, 0.0)))
            .build()
            .unwrap();
        let forme = Forme::new(get_specs("cube").unwrap(), moved);
        let result = dual().apply(&forme, &Options::default()).unwrap();
        assert_eq!(result.specs.name(), "octahedron");
        assert_relative_eq!(result.geom.edge_length(), 2.0, epsilon = 1e-6);
        assert_relative_eq!(result.geom.centroid().x, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn unknown_options_are_rejected() {
        let forme = Forme::from_name("cube").unwrap();
        let options = Options::default().with_cap(1);
        assert!(matches!(
            dual().apply(&forme, &options),
            Err(PolyhedraError::Operation(OperationError::InvalidOption { .. }))
        ));
    }

    #[test]
    fn steps_only_join_catalogued_solids() {
        let op = dual();
        assert!(op.steps().iter().all(|s| s.start.exists() && s.end.exists()));
    }
}
