//! # tempwalk-core
//!
//! The temporal random walk engine for tempwalk - THE ENGINE.
//!
//! This crate samples walks over a temporal knowledge graph: a collection of
//! timestamped directed edges `(head, relation, tail, timestamp)`. Walks are
//! the raw material for mining temporal logical rules; scoring and applying
//! rules happens elsewhere.
//!
//! ## Components
//!
//! - `index`: `GraphIndex`, edges bucketed by head entity and by relation
//! - `inverse`: `InverseRelationMap`, the involutive relation inversion
//! - `sampler`: `EdgeSampler`, uniform or exponential-recency edge choice
//! - `walk`: `WalkEngine`, cyclic walks of length L and acyclic walks of length 3
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no async, no I/O
//! - The index is read-only after construction
//! - Randomness is always injected by the caller
//! - Running out of candidates is an outcome, not an error

// =============================================================================
// MODULES
// =============================================================================

pub mod index;
pub mod inverse;
pub mod primitives;
pub mod sampler;
pub mod types;
pub mod walk;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Edge, EntityId, RelationId, Timestamp, Walk, WalkError, WalkOutcome};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use index::GraphIndex;
pub use inverse::InverseRelationMap;
pub use sampler::{
    DistributionConfig, EdgeSampler, TransitionDistribution, sample_exponential, sample_uniform,
};
pub use walk::WalkEngine;
