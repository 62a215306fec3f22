use tracing::trace;

use super::capstone::cap;
use crate::error::{MeshError, Result};
use crate::math::{Point3, Vector3};
use crate::mesh::{attach, Cap, CapType, Facet, Polyhedron};
use crate::specs::{Align, Composite, CompositeSource, Specs};

fn opposite(a: &Vector3, b: &Vector3) -> bool {
    a.dot(b) < -1.0 + 1e-6
}

/// Whether a site facing `normal` may join the already chosen sites.
fn admissible(normal: &Vector3, chosen: &[Vector3], count: u8, align: Option<Align>) -> bool {
    if chosen.len() == 1 && align == Some(Align::Para) && !opposite(normal, &chosen[0]) {
        return false;
    }
    let opposites_allowed = align == Some(Align::Para) || (count == 2 && align.is_none());
    opposites_allowed || !chosen.iter().any(|c| opposite(normal, c))
}

fn locate_face(solid: &Polyhedron, centre: &Point3, sides: usize) -> Option<usize> {
    solid
        .faces_with_sides(sides)
        .find(|f| (f.centroid() - centre).norm() < 1e-6)
        .map(|f| f.index())
}

/// Glues `count` caps onto faces of `face_sides` sides.
fn augment(
    source: &Polyhedron,
    face_sides: usize,
    count: u8,
    align: Option<Align>,
) -> Result<Polyhedron> {
    let kind = if face_sides <= 5 { CapType::Pyramid } else { CapType::Cupola };
    let (solid, base) = cap(kind, face_sides)?;
    let sites: Vec<(Point3, Vector3)> = source
        .faces_with_sides(face_sides)
        .map(|f| (f.centroid(), f.normal()))
        .collect();
    let offsets = if kind == CapType::Cupola { 0..2 } else { 0..1 };

    let mut current = source.clone();
    let mut chosen: Vec<Vector3> = Vec::new();
    for _ in 0..count {
        let next = sites
            .iter()
            .filter(|(_, normal)| !chosen.contains(normal))
            .filter(|(_, normal)| admissible(normal, &chosen, count, align))
            .find_map(|(centre, normal)| {
                let face = locate_face(&current, centre, face_sides)?;
                offsets
                    .clone()
                    .filter_map(|offset| attach(&current, face, &solid, base, offset).ok())
                    .find(Polyhedron::is_convex)
                    .map(|glued| (*normal, glued))
            });
        let Some((normal, glued)) = next else {
            return Err(MeshError::InvalidMesh(format!(
                "no room for {count} {}s",
                kind.name()
            ))
            .into());
        };
        chosen.push(normal);
        current = glued;
    }
    Ok(current)
}

/// Caps that can be gyrated or cut off: every pyramid, and the cupolae whose
/// top is ringed by squares.
fn modifiable_caps(solid: &Polyhedron) -> Vec<Cap> {
    solid
        .caps()
        .into_iter()
        .filter(|cap| match cap.top(solid) {
            Some(Facet::Face(top)) => top.adjacent_faces().all(|f| f.num_sides() == 4),
            _ => true,
        })
        .collect()
}

fn select_caps(solid: &Polyhedron, count: u8, align: Option<Align>) -> Result<Vec<Cap>> {
    let candidates = modifiable_caps(solid);
    let mut chosen: Vec<Cap> = Vec::new();
    let mut axes: Vec<Vector3> = Vec::new();
    for _ in 0..count {
        let next = candidates.iter().find(|cap| {
            !chosen
                .iter()
                .any(|c| c.faces().iter().any(|&f| cap.contains_face(f)))
                && admissible(&cap.axis(solid), &axes, count, align)
        });
        let Some(next) = next else {
            let message = format!("cannot place {count} modifications");
            return Err(MeshError::InvalidMesh(message).into());
        };
        axes.push(next.axis(solid));
        chosen.push(next.clone());
    }
    Ok(chosen)
}

/// Gyrates the first `gyrate` chosen caps and cuts off the rest.
fn modify(source: &Polyhedron, composite: &Composite) -> Result<Polyhedron> {
    let count = composite.gyrate() + composite.diminished();
    let chosen = select_caps(source, count, composite.align())?;
    let mut current = source.clone();
    for (i, original) in chosen.iter().enumerate() {
        let top = original.top_centroid(source);
        let cap = current
            .caps()
            .into_iter()
            .find(|c| c.kind() == original.kind() && (c.top_centroid(&current) - top).norm() < 1e-6)
            .ok_or_else(|| MeshError::InvalidMesh("modified cap no longer found".into()))?;
        current = if i < usize::from(composite.gyrate()) {
            cap.gyrate(&current)?
        } else {
            cap.remove(&current)?
        };
    }
    Ok(current)
}

/// Puts a pyramid on the triangle of a tridiminished icosahedron that is
/// ringed by pentagons.
fn augment_tridiminished(solid: &Polyhedron) -> Result<Polyhedron> {
    let site = solid
        .faces_with_sides(3)
        .find(|f| f.adjacent_faces().all(|g| g.num_sides() == 5))
        .map(|f| f.index())
        .ok_or_else(|| MeshError::InvalidMesh("no triangle between three pentagons".into()))?;
    let (pyramid, base) = cap(CapType::Pyramid, 3)?;
    attach(solid, site, &pyramid, base, 0)
}

pub(super) fn build(composite: &Composite) -> Result<Polyhedron> {
    let source_specs = match composite.source() {
        CompositeSource::Classical(c) => Specs::Classical(*c),
        CompositeSource::Capstone(c) => Specs::Capstone(*c),
    };
    let source = super::geometry(&source_specs)?;
    trace!(solid = %composite.name(), source = %source_specs, "building composite");
    if composite.gyrate() == 0 && composite.diminished() == 0 {
        return augment(
            &source,
            composite.source().augment_face_type(),
            composite.augmented(),
            composite.align(),
        );
    }
    let modified = modify(&source, composite)?;
    if composite.augmented() > 0 {
        augment_tridiminished(&modified)
    } else {
        Ok(modified)
    }
}
