//! # Walk Engine
//!
//! Constrained temporal random walks over a `GraphIndex`.
//!
//! Two protocols are implemented:
//! - **Cyclic walks** of length `L`: start from an edge of the target
//!   relation, then walk backwards in time until the last edge closes the
//!   loop on the start entity. Used for rules of length `L - 1`.
//! - **Acyclic walks** of length 3: around a sampled head edge, take one step
//!   forward from its tail and one step backward into its head.
//!
//! A walk that runs out of candidates is a normal outcome
//! (`WalkOutcome::Failed`). Errors are reserved for broken preconditions:
//! an empty target relation, a missing inverse, a zero length.

use crate::index::GraphIndex;
use crate::inverse::InverseRelationMap;
use crate::primitives::MIN_WALK_LENGTH;
use crate::sampler::{DistributionConfig, EdgeSampler, sample_uniform};
use crate::{Edge, EntityId, RelationId, Timestamp, Walk, WalkError, WalkOutcome};
use rand::Rng;

/// Walk sampler over a borrowed index and inverse-relation map.
///
/// The engine holds no mutable state. Several engines on several threads
/// may share one index, each with its own random source.
#[derive(Debug, Clone, Copy)]
pub struct WalkEngine<'a> {
    index: &'a GraphIndex,
    inverse: &'a InverseRelationMap,
    config: DistributionConfig,
    sampler: EdgeSampler,
}

/// Where the cyclic walk stands between two transitions.
struct Cursor {
    start_node: EntityId,
    node: EntityId,
    time: Timestamp,
    prev: Edge,
}

impl<'a> WalkEngine<'a> {
    /// Create an engine.
    ///
    /// Fails with `WalkError::MissingInverse` or
    /// `WalkError::InverseNotInvolutive` if `inverse` does not cover every
    /// relation present in `index`.
    pub fn new(
        index: &'a GraphIndex,
        inverse: &'a InverseRelationMap,
        config: DistributionConfig,
    ) -> Result<Self, WalkError> {
        inverse.validate_covers(index.relations())?;
        Ok(Self {
            index,
            inverse,
            config,
            sampler: EdgeSampler::new(config.distribution),
        })
    }

    /// The configuration this engine samples with.
    #[must_use]
    pub const fn config(&self) -> DistributionConfig {
        self.config
    }

    /// The index this engine samples from.
    #[must_use]
    pub const fn index(&self) -> &'a GraphIndex {
        self.index
    }

    /// Start edge: uniform over every edge of `relation`.
    fn sample_start_edge<R: Rng + ?Sized>(
        &self,
        relation: RelationId,
        rng: &mut R,
    ) -> Result<Edge, WalkError> {
        let candidates = self.index.edges_of_relation(relation);
        if candidates.is_empty() {
            return Err(WalkError::EmptyRelation(relation));
        }
        sample_uniform(candidates, rng)
    }

    // =========================================================================
    // CYCLIC PROTOCOL
    // =========================================================================

    /// Try to sample a cyclic temporal walk of `length` edges whose last edge
    /// returns to the head of the first one.
    ///
    /// Steps after the start move to edges no later than the current time
    /// (strictly earlier on the first transition), plus the configured
    /// `delta`. A single call never retries; re-invoke on `Failed`.
    pub fn sample_walk<R: Rng + ?Sized>(
        &self,
        length: usize,
        target: RelationId,
        rng: &mut R,
    ) -> Result<WalkOutcome, WalkError> {
        if length < MIN_WALK_LENGTH {
            return Err(WalkError::InvalidWalkLength(length));
        }

        let start = self.sample_start_edge(target, rng)?;
        let mut walk = Walk::starting_with(&start);
        let mut cursor = Cursor {
            start_node: start.head,
            node: start.tail,
            time: start.timestamp,
            prev: start,
        };

        for step in 1..length {
            let candidates = self.transition_candidates(&cursor, step, length)?;
            if candidates.is_empty() {
                tracing::trace!(
                    step,
                    length,
                    node = cursor.node.0,
                    time = cursor.time.0,
                    "cyclic walk reached a dead end"
                );
                return Ok(WalkOutcome::Failed { partial: walk });
            }

            let next = self.sampler.sample(&candidates, cursor.time, rng)?;
            walk.extend(&next);
            cursor.node = next.tail;
            cursor.time = next.timestamp;
            cursor.prev = next;
        }

        Ok(WalkOutcome::Success(walk))
    }

    /// Outgoing edges of the cursor that are valid at transition `step`.
    fn transition_candidates(
        &self,
        cursor: &Cursor,
        step: usize,
        length: usize,
    ) -> Result<Vec<Edge>, WalkError> {
        let bound = cursor.time.offset(self.config.delta);
        let neighbors = self.index.neighbors_of(cursor.node);

        let mut candidates: Vec<Edge> = if step == 1 {
            neighbors
                .iter()
                .filter(|edge| edge.timestamp < bound)
                .copied()
                .collect()
        } else {
            let backtrack = Edge::new(
                cursor.node,
                self.inverse.inverse_of(cursor.prev.relation)?,
                cursor.prev.head,
                cursor.time,
            );
            neighbors
                .iter()
                .filter(|edge| edge.timestamp <= bound && **edge != backtrack)
                .copied()
                .collect()
        };

        if step == length - 1 {
            candidates.retain(|edge| edge.tail == cursor.start_node);
        }

        Ok(candidates)
    }

    // =========================================================================
    // ACYCLIC PROTOCOL
    // =========================================================================

    /// Try to sample an acyclic walk of 3 edges around a head edge of
    /// `target`: `pre -> head -> post`.
    pub fn sample_acyclic_walk<R: Rng + ?Sized>(
        &self,
        target: RelationId,
        rng: &mut R,
    ) -> Result<WalkOutcome, WalkError> {
        let head = self.sample_start_edge(target, rng)?;

        let post = self.step_forward(&head, rng)?;
        let pre = self.step_back(&head, rng)?;

        match (pre, post) {
            (Some(pre), Some(post)) => {
                let walk = Walk::from_chain(&[pre, head, post]);
                Ok(WalkOutcome::Success(walk))
            }
            (pre, post) => {
                tracing::trace!(
                    head = %head,
                    backward = pre.is_some(),
                    forward = post.is_some(),
                    "acyclic walk reached a dead end"
                );
                Ok(WalkOutcome::Failed {
                    partial: Walk::starting_with(&head),
                })
            }
        }
    }

    /// One step forward from the tail of `head`.
    ///
    /// The step may not return to `head.head` and may not be the literal
    /// inverse of `head`. No ordering against `head.timestamp` is enforced:
    /// the forward edge may be older than the head edge.
    fn step_forward<R: Rng + ?Sized>(
        &self,
        head: &Edge,
        rng: &mut R,
    ) -> Result<Option<Edge>, WalkError> {
        let inverse = head.inverted(self.inverse.inverse_of(head.relation)?);
        let candidates: Vec<Edge> = self
            .index
            .neighbors_of(head.tail)
            .iter()
            .filter(|edge| edge.tail != head.head && **edge != inverse)
            .copied()
            .collect();

        if candidates.is_empty() {
            return Ok(None);
        }
        self.sampler
            .sample(&candidates, head.timestamp, rng)
            .map(Some)
    }

    /// One step backward into the head of `head`.
    ///
    /// Samples an edge leaving `head.head` no later than `head.timestamp`
    /// and not ending at `head.tail`, then inverts it so that it points
    /// into `head.head`.
    fn step_back<R: Rng + ?Sized>(
        &self,
        head: &Edge,
        rng: &mut R,
    ) -> Result<Option<Edge>, WalkError> {
        let candidates: Vec<Edge> = self
            .index
            .neighbors_of(head.head)
            .iter()
            .filter(|edge| {
                edge.timestamp <= head.timestamp && edge.tail != head.tail && *edge != head
            })
            .copied()
            .collect();

        if candidates.is_empty() {
            return Ok(None);
        }
        let chosen = self.sampler.sample(&candidates, head.timestamp, rng)?;
        Ok(Some(
            chosen.inverted(self.inverse.inverse_of(chosen.relation)?),
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================
