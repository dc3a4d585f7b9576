//! Partitioning a vertex set into colored sub-solids
//!
//! The [`CompoundPartitioner`] validates a table against its vertex set and
//! produces a [`Compound`]: per-group triangle lists, wireframe edges with a
//! chosen deduplication policy, resolved face pairings and the hull.

use std::collections::BTreeSet;

use poly_math::Plane3;
use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::PartitionError;
use crate::solid::VertexSet;
use crate::subsolid::{Chirality, Edge, Face, SubSolidKind};
use crate::table::CompoundTable;
use crate::validator::CompoundValidator;

/// How wireframe edges shared between groups are emitted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// One deduplicated edge list for the whole compound
    #[default]
    Merged,
    /// One edge list per group, each in the group's color
    ///
    /// Edges shared by two groups appear once in each of them.
    PerGroup,
}

/// One sub-solid after partitioning
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionedGroup {
    pub name: String,
    pub kind: SubSolidKind,
    pub chirality: Chirality,
    pub color: Rgba8,
    pub faces: Vec<Face>,
    /// Fan triangulation of every face
    pub triangles: Vec<[u32; 3]>,
    /// This group's distinct boundary edges
    pub edges: Vec<Edge>,
}

/// A coplanar right/left face pair
#[derive(Clone, Debug, PartialEq)]
pub struct FacePair {
    pub right_group: String,
    pub right: Face,
    pub left_group: String,
    pub left: Face,
    pub plane: Plane3,
}

/// A fully validated compound ready for buffer building
#[derive(Clone, Debug)]
pub struct Compound {
    name: String,
    vertices: VertexSet,
    groups: Vec<PartitionedGroup>,
    edge_policy: EdgePolicy,
    merged_edges: Vec<Edge>,
    hull_edges: Vec<Edge>,
    pairings: Vec<FacePair>,
    shared_edge_count: usize,
}

impl Compound {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn vertices(&self) -> &VertexSet {
        &self.vertices
    }

    #[inline]
    pub fn groups(&self) -> &[PartitionedGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&PartitionedGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    #[inline]
    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Every face edge of the compound, each exactly once
    #[inline]
    pub fn merged_edges(&self) -> &[Edge] {
        &self.merged_edges
    }

    #[inline]
    pub fn hull_edges(&self) -> &[Edge] {
        &self.hull_edges
    }

    #[inline]
    pub fn pairings(&self) -> &[FacePair] {
        &self.pairings
    }

    /// Extra line segments emitted because edges are shared between groups
    ///
    /// Zero under [`EdgePolicy::Merged`].
    #[inline]
    pub fn shared_edge_count(&self) -> usize {
        self.shared_edge_count
    }

    pub fn face_count(&self) -> usize {
        self.groups.iter().map(|g| g.faces.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(|g| g.triangles.len()).sum()
    }

    /// Edge lists to draw under the active policy, with their owning group
    ///
    /// Merged yields a single unnamed list.
    pub fn wireframes(&self) -> Vec<(Option<&PartitionedGroup>, &[Edge])> {
        match self.edge_policy {
            EdgePolicy::Merged => vec![(None, self.merged_edges.as_slice())],
            EdgePolicy::PerGroup => self
                .groups
                .iter()
                .map(|g| (Some(g), g.edges.as_slice()))
                .collect(),
        }
    }
}

/// Builds [`Compound`]s from a decomposition table
pub struct CompoundPartitioner {
    table: CompoundTable,
    edge_policy: EdgePolicy,
}

impl CompoundPartitioner {
    pub fn new(table: CompoundTable) -> Self {
        Self {
            table,
            edge_policy: EdgePolicy::default(),
        }
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    #[inline]
    pub fn table(&self) -> &CompoundTable {
        &self.table
    }

    /// Validate the table against `vertices` and partition
    ///
    /// Every defect is logged; the first one is returned.
    pub fn partition(&self, vertices: &VertexSet) -> Result<Compound, PartitionError> {
        let table = &self.table;

        let errors = CompoundValidator::validate(table, vertices);
        if let Some(first) = errors.first() {
            for err in &errors {
                log::error!("{}: {}", table.name, err);
            }
            return Err(first.clone());
        }

        let groups: Vec<PartitionedGroup> = table
            .groups
            .iter()
            .map(|group| PartitionedGroup {
                name: group.name.clone(),
                kind: group.kind,
                chirality: group.chirality,
                color: group.color,
                faces: group.faces.clone(),
                triangles: group
                    .triangles()
                    .into_iter()
                    .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
                    .collect(),
                edges: group.edges().into_iter().collect(),
            })
            .collect();

        let merged: BTreeSet<Edge> = groups.iter().flat_map(|g| g.edges.iter().copied()).collect();
        let merged_edges: Vec<Edge> = merged.into_iter().collect();
        let per_group_total: usize = groups.iter().map(|g| g.edges.len()).sum();

        let shared_edge_count = match self.edge_policy {
            EdgePolicy::Merged => 0,
            EdgePolicy::PerGroup => per_group_total - merged_edges.len(),
        };

        let pairings = if CompoundValidator::has_pairings(table) {
            let (resolved, errors) = CompoundValidator::resolve_pairings(table, vertices);
            if let Some(err) = errors.into_iter().next() {
                return Err(err);
            }
            resolved
                .into_iter()
                .map(|p| FacePair {
                    right_group: table.groups[p.right_group].name.clone(),
                    right: table.groups[p.right_group].faces[p.right_face].clone(),
                    left_group: table.groups[p.left_group].name.clone(),
                    left: table.groups[p.left_group].faces[p.left_face].clone(),
                    plane: p.plane,
                })
                .collect()
        } else {
            Vec::new()
        };

        let compound = Compound {
            name: table.name.clone(),
            vertices: vertices.clone(),
            groups,
            edge_policy: self.edge_policy,
            merged_edges,
            hull_edges: table.hull_edges.clone(),
            pairings,
            shared_edge_count,
        };

        log::info!(
            "Partitioned '{}': {} groups, {} faces, {} triangles, {} edges, {} hull edges",
            compound.name,
            compound.groups.len(),
            compound.face_count(),
            compound.triangle_count(),
            compound.merged_edges.len(),
            compound.hull_edges.len()
        );
        if compound.shared_edge_count > 0 {
            log::debug!(
                "'{}' draws {} shared edges once per group",
                compound.name,
                compound.shared_edge_count
            );
        }
        if !compound.pairings.is_empty() {
            log::debug!("'{}' has {} coplanar face pairs", compound.name, compound.pairings.len());
        }

        Ok(compound)
    }
}

/// Fail if any undirected edge occurs twice
///
/// Lists built by the partitioner are unique by construction; this is for
/// edge lists a front end assembles itself, such as several groups'
/// wireframes concatenated into one buffer.
pub fn verify_unique_edges(edges: &[Edge]) -> Result<(), PartitionError> {
    let mut seen = BTreeSet::new();
    for &edge in edges {
        let edge = Edge::new(edge.0, edge.1);
        if !seen.insert(edge) {
            return Err(PartitionError::DuplicateEdge(edge));
        }
    }
    Ok(())
}
