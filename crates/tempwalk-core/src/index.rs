//! # Graph Index
//!
//! The read-only temporal graph the walk engine samples from.
//!
//! Two bucket maps are built once from the quadruple dataset:
//! - head entity -> outgoing edges
//! - relation -> every edge carrying that relation
//!
//! All maps are `BTreeMap` so iteration order over keys is deterministic.
//! Buckets keep dataset order and are never deduplicated.

use crate::{Edge, EntityId, RelationId};
use std::collections::BTreeMap;

/// Immutable edge index over a temporal knowledge graph.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    /// Adjacency list: head entity -> outgoing edges
    neighbors: BTreeMap<EntityId, Vec<Edge>>,

    /// Relation buckets: relation -> edges with that relation
    edges_by_relation: BTreeMap<RelationId, Vec<Edge>>,

    /// Total number of indexed edges (duplicates included)
    edge_count: usize,
}

impl GraphIndex {
    /// Build the index from a sequence of quadruples.
    pub fn build<I>(quads: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut index = Self::default();
        for edge in quads {
            index.neighbors.entry(edge.head).or_default().push(edge);
            index
                .edges_by_relation
                .entry(edge.relation)
                .or_default()
                .push(edge);
            index.edge_count = index.edge_count.saturating_add(1);
        }

        tracing::debug!(
            edges = index.edge_count,
            heads = index.neighbors.len(),
            relations = index.edges_by_relation.len(),
            "graph index built"
        );

        index
    }

    /// Outgoing edges of `node`. Unknown entities have no edges.
    #[must_use]
    pub fn neighbors_of(&self, node: EntityId) -> &[Edge] {
        self.neighbors
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All edges carrying `relation`. Unknown relations have no edges.
    #[must_use]
    pub fn edges_of_relation(&self, relation: RelationId) -> &[Edge] {
        self.edges_by_relation
            .get(&relation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Relations with at least one edge, in ascending order.
    pub fn relations(&self) -> impl Iterator<Item = RelationId> + '_ {
        self.edges_by_relation.keys().copied()
    }

    /// All edges, grouped by head entity in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.neighbors.values().flatten()
    }

    /// Number of distinct entities appearing as head or tail.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        let mut entities: Vec<EntityId> = self
            .edges()
            .flat_map(|edge| [edge.head, edge.tail])
            .collect();
        entities.sort_unstable();
        entities.dedup();
        entities.len()
    }

    /// Number of distinct relations.
    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.edges_by_relation.len()
    }

    /// Number of indexed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Check if the index holds no edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }
}

impl FromIterator<Edge> for GraphIndex {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self::build(iter)
    }
}

// =============================================================================
// TESTS
// =============================================================================
