//! # Core Type Definitions
//!
//! This module contains the value types shared by every part of the engine:
//! - Identifiers (`EntityId`, `RelationId`, `Timestamp`)
//! - The timestamped quadruple (`Edge`)
//! - Walk records and call outcomes (`Walk`, `WalkOutcome`)
//! - Error types (`WalkError`)
//!
//! ## Guarantees
//!
//! All identifier types:
//! - Are `Copy` and store a single integer
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an entity (a node of the temporal graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

/// Identifier of a relation (an edge label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationId(pub u64);

/// Ordinal timestamp of an edge.
///
/// Timestamps are compared with saturating arithmetic so that a large
/// tolerance never wraps around.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Shift the timestamp by `delta`, saturating at the `i64` bounds.
    #[must_use]
    pub const fn offset(self, delta: i64) -> Self {
        Self(self.0.saturating_add(delta))
    }

    /// Signed distance `self - reference`, saturating at the `i64` bounds.
    #[must_use]
    pub const fn since(self, reference: Self) -> i64 {
        self.0.saturating_sub(reference.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// A timestamped directed edge: `(head, relation, tail, timestamp)`.
///
/// Edges are small fixed-size records and are always stored by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub head: EntityId,
    pub relation: RelationId,
    pub tail: EntityId,
    pub timestamp: Timestamp,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub const fn new(
        head: EntityId,
        relation: RelationId,
        tail: EntityId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            head,
            relation,
            tail,
            timestamp,
        }
    }

    /// Build an edge from raw integers, in quadruple order.
    #[must_use]
    pub const fn from_raw(head: u64, relation: u64, tail: u64, timestamp: i64) -> Self {
        Self::new(
            EntityId(head),
            RelationId(relation),
            EntityId(tail),
            Timestamp(timestamp),
        )
    }

    /// The literal inverse of this edge under `inverse_relation`.
    ///
    /// Head and tail swap, the timestamp is kept.
    #[must_use]
    pub const fn inverted(&self, inverse_relation: RelationId) -> Self {
        Self::new(self.tail, inverse_relation, self.head, self.timestamp)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.head, self.relation, self.tail, self.timestamp
        )
    }
}

// =============================================================================
// WALK
// =============================================================================

/// A sampled walk.
///
/// Always holds one more entity than it holds relations or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Walk {
    pub entities: Vec<EntityId>,
    pub relations: Vec<RelationId>,
    pub timestamps: Vec<Timestamp>,
}

impl Walk {
    /// Start a walk with a single edge.
    #[must_use]
    pub fn starting_with(edge: &Edge) -> Self {
        Self {
            entities: vec![edge.head, edge.tail],
            relations: vec![edge.relation],
            timestamps: vec![edge.timestamp],
        }
    }

    /// Build a walk from a chain of edges, each starting where the previous ended.
    #[must_use]
    pub fn from_chain(edges: &[Edge]) -> Self {
        let mut walk = Self::default();
        if let Some(first) = edges.first() {
            walk.entities.push(first.head);
        }
        for edge in edges {
            walk.extend(edge);
        }
        walk
    }

    /// Append an edge leaving the current last entity.
    pub fn extend(&mut self, edge: &Edge) {
        self.entities.push(edge.tail);
        self.relations.push(edge.relation);
        self.timestamps.push(edge.timestamp);
    }

    /// Number of edges in the walk.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Check if the walk holds no edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// The edge at position `step`, rebuilt from the parallel sequences.
    #[must_use]
    pub fn edge(&self, step: usize) -> Option<Edge> {
        Some(Edge::new(
            *self.entities.get(step)?,
            *self.relations.get(step)?,
            *self.entities.get(step.saturating_add(1))?,
            *self.timestamps.get(step)?,
        ))
    }

    /// Check if the walk returns to the entity it started from.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.entities.first() == self.entities.last()
    }
}

/// Result of a single sampling call.
///
/// Running out of candidates is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every step found a valid edge.
    Success(Walk),
    /// Some step had no candidate. `partial` holds what was sampled before
    /// the dead end and must not be used as a walk.
    Failed { partial: Walk },
}

impl WalkOutcome {
    /// Check if the call produced a complete walk.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The complete walk, if any.
    #[must_use]
    pub fn walk(&self) -> Option<&Walk> {
        match self {
            Self::Success(walk) => Some(walk),
            Self::Failed { .. } => None,
        }
    }

    /// Consume the outcome, keeping only a complete walk.
    #[must_use]
    pub fn into_walk(self) -> Option<Walk> {
        match self {
            Self::Success(walk) => Some(walk),
            Self::Failed { .. } => None,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in tempwalk.
///
/// These are configuration and precondition violations. A walk that runs
/// out of candidates is reported through `WalkOutcome::Failed` instead.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A walk was requested for a relation that has no edges.
    #[error("Relation {0} has no edges to start a walk from")]
    EmptyRelation(RelationId),

    /// The inverse-relation map has no entry for a relation in use.
    #[error("No inverse registered for relation {0}")]
    MissingInverse(RelationId),

    /// The inverse-relation map is not an involution.
    #[error("Inverse map is not involutive: {relation} -> {inverse} -> {back}")]
    InverseNotInvolutive {
        relation: RelationId,
        inverse: RelationId,
        back: RelationId,
    },

    /// Walks must contain at least one edge.
    #[error("Invalid walk length: {0} (must be at least 1)")]
    InvalidWalkLength(usize),

    /// The sampler was handed an empty candidate set.
    #[error("No candidate edges to sample from")]
    NoCandidates,

    /// An unknown transition distribution name or a bad configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A dataset line could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A walk or report could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
