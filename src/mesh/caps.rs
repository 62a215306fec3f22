use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{cycle_pairs, Builder, Facet, Face, Polyhedron, Vertex};
use crate::config::EngineConfig;
use crate::error::{MeshError, Result};
use crate::math::rotation::{rotation_about, Frame};
use crate::math::{self, polygon, Point3, Vector3, TOLERANCE};

/// The solid that can be glued onto, or cut off from, a polygon face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapType {
    Pyramid,
    Cupola,
    Rotunda,
}

impl CapType {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pyramid => "pyramid",
            Self::Cupola => "cupola",
            Self::Rotunda => "rotunda",
        }
    }
}

/// A pyramid, cupola or rotunda found on a mesh.
///
/// A cap is described by index sets into its polyhedron and is only
/// meaningful together with the mesh it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cap {
    kind: CapType,
    /// Apex, top edge or top face vertices.
    top: Vec<usize>,
    /// Vertices off the boundary.
    inner: Vec<usize>,
    /// Sorted face indices.
    faces: Vec<usize>,
    /// Boundary loop, wound the way the cap faces traverse it.
    boundary: Vec<usize>,
}

impl Polyhedron {
    /// Caps that can be cut off this solid, leaving a valid solid behind.
    ///
    /// Pyramids take precedence: if any vertex supports a pyramid, only
    /// pyramids are returned. Otherwise digonal cupolae (fastigia) are
    /// returned if present, and failing that, cupolae and rotundae.
    #[must_use]
    pub fn caps(&self) -> Vec<Cap> {
        let pyramids: Vec<Cap> = self
            .vertices()
            .filter(|v| (3..=5).contains(&v.degree()))
            .filter_map(|v| {
                let config = BTreeMap::from([(3, v.degree())]);
                Cap::detect(self, CapType::Pyramid, vec![v.index()], vec![v.index()], &config)
            })
            .collect();
        if !pyramids.is_empty() {
            return pyramids;
        }

        let fastigium = BTreeMap::from([(3, 1), (4, 2)]);
        let fastigia: Vec<Cap> = self
            .edges()
            .filter_map(|e| {
                let (a, b) = e.vertex_indices();
                Cap::detect(self, CapType::Cupola, vec![a, b], vec![a, b], &fastigium)
            })
            .collect();
        if !fastigia.is_empty() {
            return fastigia;
        }

        let cupolae = self.faces().filter(|f| (3..=5).contains(&f.num_sides())).filter_map(|f| {
            let top = f.vertex_indices().to_vec();
            let config = count_sides([3, 4, 4, f.num_sides()]);
            Cap::detect(self, CapType::Cupola, top.clone(), top, &config)
        });
        let rotundae = self.faces_with_sides(5).filter_map(|f| {
            let top = f.vertex_indices().to_vec();
            let ring = f
                .vertices()
                .flat_map(|v| v.adjacent_vertices())
                .map(|v| v.index())
                .filter(|v| !top.contains(v));
            let inner: Vec<usize> = top
                .iter()
                .copied()
                .chain(ring)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            let config = BTreeMap::from([(3, 2), (5, 2)]);
            Cap::detect(self, CapType::Rotunda, top, inner, &config)
        });
        cupolae.chain(rotundae).collect()
    }
}

impl Cap {
    fn detect(
        polyhedron: &Polyhedron,
        kind: CapType,
        top: Vec<usize>,
        inner: Vec<usize>,
        config: &BTreeMap<usize, usize>,
    ) -> Option<Self> {
        if inner.iter().any(|&v| &side_counts(polyhedron.vertex(v)) != config) {
            return None;
        }
        let faces: Vec<usize> = inner
            .iter()
            .flat_map(|&v| polyhedron.vertex_face_cycles()[v].iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let boundary = boundary_loop(polyhedron, &faces)?;
        let ring: Vec<Point3> = boundary.iter().map(|&v| polyhedron.vertices[v]).collect();
        if !polygon::is_planar(&ring, EngineConfig::default().planarity_tolerance) {
            return None;
        }
        // Cutting must not leave two faces on the same vertices.
        let ring_set: BTreeSet<usize> = boundary.iter().copied().collect();
        let duplicates_face = polyhedron.faces().any(|f| {
            faces.binary_search(&f.index()).is_err()
                && f.num_sides() == ring_set.len()
                && f.vertex_indices().iter().all(|v| ring_set.contains(v))
        });
        if duplicates_face {
            return None;
        }
        Some(Self {
            kind,
            top,
            inner,
            faces,
            boundary,
        })
    }

    #[must_use]
    pub fn kind(&self) -> CapType {
        self.kind
    }

    #[must_use]
    pub fn faces(&self) -> &[usize] {
        &self.faces
    }

    #[must_use]
    pub fn contains_face(&self, face: usize) -> bool {
        self.faces.binary_search(&face).is_ok()
    }

    #[must_use]
    pub fn boundary(&self) -> &[usize] {
        &self.boundary
    }

    #[must_use]
    pub fn inner_vertices(&self) -> &[usize] {
        &self.inner
    }

    /// Sides of the face left behind when the cap is cut off.
    #[must_use]
    pub fn base_sides(&self) -> usize {
        self.boundary.len()
    }

    /// The apex vertex of a pyramid, or the top face of a cupola or rotunda.
    /// A digonal cupola has a top edge and no top facet.
    #[must_use]
    pub fn top<'a>(&self, polyhedron: &'a Polyhedron) -> Option<Facet<'a>> {
        match self.top.as_slice() {
            [apex] => Some(Facet::Vertex(polyhedron.vertex(*apex))),
            [_, _] => None,
            top => polyhedron
                .faces()
                .find(|f| {
                    f.num_sides() == top.len() && f.vertex_indices().iter().all(|v| top.contains(v))
                })
                .map(Facet::Face),
        }
    }

    #[must_use]
    pub fn top_centroid(&self, polyhedron: &Polyhedron) -> Point3 {
        let pts: Vec<Point3> = self.top.iter().map(|&v| polyhedron.vertices[v]).collect();
        math::centroid(&pts)
    }

    #[must_use]
    pub fn boundary_centroid(&self, polyhedron: &Polyhedron) -> Point3 {
        let pts: Vec<Point3> = self.boundary.iter().map(|&v| polyhedron.vertices[v]).collect();
        math::centroid(&pts)
    }

    /// Unit direction from the base towards the top.
    #[must_use]
    pub fn axis(&self, polyhedron: &Polyhedron) -> Vector3 {
        (self.top_centroid(polyhedron) - self.boundary_centroid(polyhedron))
            .try_normalize(TOLERANCE)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Whether some boundary edge joins a cap face and an outside face with
    /// the same number of sides.
    #[must_use]
    pub fn has_matching_seam(&self, polyhedron: &Polyhedron) -> bool {
        cycle_pairs(&self.boundary).any(|(a, b)| {
            match (polyhedron.face_on(a, b), polyhedron.face_on(b, a)) {
                (Some(inside), Some(outside)) => {
                    polyhedron.faces[inside].len() == polyhedron.faces[outside].len()
                }
                _ => false,
            }
        })
    }

    /// The solid left after cutting this cap off and closing the hole with a
    /// single face.
    ///
    /// # Errors
    ///
    /// Returns an error if the remainder is not a valid mesh.
    pub fn remove(&self, polyhedron: &Polyhedron) -> Result<Polyhedron> {
        Builder::new(polyhedron)
            .without_faces(&self.faces)
            .add_faces([self.boundary.clone()])
            .build()
    }

    /// The solid with this cap turned about its axis by one boundary step.
    ///
    /// # Errors
    ///
    /// Returns an error if the rotated cap does not weld back onto the base.
    pub fn gyrate(&self, polyhedron: &Polyhedron) -> Result<Polyhedron> {
        let angle = 2.0 * PI / math_sides(self.boundary.len());
        let turn = rotation_about(
            &self.boundary_centroid(polyhedron),
            &self.axis(polyhedron),
            angle,
        );
        let cap_vertices: BTreeSet<usize> = self
            .faces
            .iter()
            .flat_map(|&f| polyhedron.faces[f].iter().copied())
            .collect();
        let offset = polyhedron.num_vertices();
        let remap: HashMap<usize, usize> = cap_vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, offset + i))
            .collect();
        let turned = cap_vertices
            .iter()
            .map(|&v| turn.transform_point(&polyhedron.vertices[v]));
        let faces = self
            .faces
            .iter()
            .map(|&f| polyhedron.faces[f].iter().map(|v| remap[v]).collect());
        Builder::new(polyhedron)
            .without_faces(&self.faces)
            .add_vertices(turned)
            .add_faces(faces)
            .dedupe_vertices(EngineConfig::default().merge_tolerance)
            .build()
    }
}

/// Glues `cap` onto face `face` of `host`.
///
/// The cap's face `base` is laid over the host face, scaled to its edge
/// length, with the first vertex of `base` landing on vertex `offset` of the
/// host face. Both faces are dropped and coincident vertices welded.
///
/// # Errors
///
/// Returns an error if the two faces have different side counts, either face
/// is degenerate, or the glued mesh is not valid.
pub fn attach(
    host: &Polyhedron,
    face: usize,
    cap: &Polyhedron,
    base: usize,
    offset: usize,
) -> Result<Polyhedron> {
    let target = host.try_face(face)?;
    let source = cap.try_face(base)?;
    if target.num_sides() != source.num_sides() {
        return Err(MeshError::InvalidMesh(format!(
            "cannot glue a {}-gon onto a {}-gon",
            source.num_sides(),
            target.num_sides()
        ))
        .into());
    }
    let from = face_frame(source, 0, 1.0)
        .ok_or_else(|| MeshError::InvalidMesh("degenerate cap base".into()))?;
    let to = face_frame(target, offset % target.num_sides(), -1.0)
        .ok_or_else(|| MeshError::InvalidMesh("degenerate host face".into()))?;
    let placed = Builder::new(cap)
        .transform_vertices(&from.transform_to(&to))
        .build()?;
    Builder::new(host)
        .add_polyhedron(&placed)
        .without_faces(&[face, host.num_faces() + base])
        .dedupe_vertices(EngineConfig::default().merge_tolerance)
        .build()
}

fn face_frame(face: Face<'_>, corner: usize, orientation: f64) -> Option<Frame> {
    let centre = face.centroid();
    let corner = face.polyhedron().positions()[face.vertex_indices()[corner]];
    Frame::new(centre, face.normal() * orientation, corner - centre, face.side_length())
}

fn side_counts(vertex: Vertex<'_>) -> BTreeMap<usize, usize> {
    count_sides(vertex.adjacent_faces().map(|f| f.num_sides()))
}

fn count_sides(sides: impl IntoIterator<Item = usize>) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for s in sides {
        *counts.entry(s).or_insert(0) += 1;
    }
    counts
}

/// The single loop of directed edges of `faces` whose twins lie outside
/// `faces`, starting from its lowest vertex.
fn boundary_loop(polyhedron: &Polyhedron, faces: &[usize]) -> Option<Vec<usize>> {
    let inside: HashSet<usize> = faces.iter().copied().collect();
    let mut next = HashMap::new();
    for &f in faces {
        for (a, b) in cycle_pairs(&polyhedron.faces[f]) {
            if !inside.contains(&polyhedron.face_on(b, a)?) && next.insert(a, b).is_some() {
                return None;
            }
        }
    }
    let &start = next.keys().min()?;
    let mut ring = vec![start];
    loop {
        let &after = next.get(ring.last()?)?;
        if after == start {
            break;
        }
        if ring.len() >= next.len() {
            return None;
        }
        ring.push(after);
    }
    (ring.len() == next.len()).then_some(ring)
}

#[allow(clippy::cast_precision_loss)]
fn math_sides(n: usize) -> f64 {
    n as f64
}
