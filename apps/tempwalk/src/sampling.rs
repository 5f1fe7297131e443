//! # Sampling Loop
//!
//! Caller-level batching around `WalkEngine`.
//!
//! The engine makes a single attempt per call. This module asks it again
//! until each requested walk succeeds or its attempt budget runs out.

use rand::Rng;
use serde::Serialize;
use tempwalk_core::{RelationId, Walk, WalkEngine, WalkError, WalkOutcome};

/// Which protocol to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkKind {
    /// Cyclic walk with `length` edges.
    Cyclic { length: usize },
    /// Acyclic walk with 3 edges.
    Acyclic,
}

/// A batch of walks to sample for one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    pub kind: WalkKind,
    pub relation: RelationId,
    /// Number of walks wanted.
    pub count: usize,
    /// Engine calls allowed per wanted walk.
    pub attempts: usize,
}

/// What a batch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleReport {
    pub walks: Vec<Walk>,
    /// Total engine calls.
    pub calls: usize,
    /// Calls that ended in a dead end.
    pub failures: usize,
    /// Wanted walks given up on after exhausting their attempts.
    pub abandoned: usize,
}

fn sample_once<R: Rng + ?Sized>(
    engine: &WalkEngine<'_>,
    request: &SampleRequest,
    rng: &mut R,
) -> Result<WalkOutcome, WalkError> {
    match request.kind {
        WalkKind::Cyclic { length } => engine.sample_walk(length, request.relation, rng),
        WalkKind::Acyclic => engine.sample_acyclic_walk(request.relation, rng),
    }
}

/// Sample `request.count` walks, retrying each up to `request.attempts` times.
///
/// Precondition errors from the engine abort the batch.
pub fn sample_many<R: Rng + ?Sized>(
    engine: &WalkEngine<'_>,
    request: &SampleRequest,
    rng: &mut R,
) -> Result<SampleReport, WalkError> {
    if request.attempts == 0 {
        return Err(WalkError::ConfigError(
            "attempts must be at least 1".to_string(),
        ));
    }

    let mut report = SampleReport::default();
    for _ in 0..request.count {
        let mut found = None;
        for _ in 0..request.attempts {
            report.calls += 1;
            match sample_once(engine, request, rng)? {
                WalkOutcome::Success(walk) => {
                    found = Some(walk);
                    break;
                }
                WalkOutcome::Failed { .. } => report.failures += 1,
            }
        }

        match found {
            Some(walk) => report.walks.push(walk),
            None => report.abandoned += 1,
        }
    }

    tracing::debug!(
        relation = request.relation.0,
        kind = ?request.kind,
        walks = report.walks.len(),
        calls = report.calls,
        failures = report.failures,
        "sampling batch finished"
    );

    Ok(report)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempwalk_core::{DistributionConfig, Edge, GraphIndex, InverseRelationMap};

    fn triangle() -> (GraphIndex, InverseRelationMap) {
        let index = GraphIndex::build([
            Edge::from_raw(0, 0, 1, 9),
            Edge::from_raw(1, 1, 2, 8),
            Edge::from_raw(2, 2, 0, 7),
        ]);
        (index, InverseRelationMap::with_offset(3))
    }

    #[test]
    fn deterministic_triangle_always_succeeds() {
        let (index, inverse) = triangle();
        let engine =
            WalkEngine::new(&index, &inverse, DistributionConfig::default()).expect("engine");
        let request = SampleRequest {
            kind: WalkKind::Cyclic { length: 3 },
            relation: RelationId(0),
            count: 5,
            attempts: 1,
        };

        let report = sample_many(&engine, &request, &mut StdRng::seed_from_u64(1)).expect("batch");

        assert_eq!(report.walks.len(), 5);
        assert_eq!(report.calls, 5);
        assert_eq!(report.failures, 0);
        assert!(report.walks.iter().all(Walk::is_closed));
    }

    #[test]
    fn impossible_walks_are_abandoned() {
        let (index, inverse) = triangle();
        let engine =
            WalkEngine::new(&index, &inverse, DistributionConfig::default()).expect("engine");
        let request = SampleRequest {
            kind: WalkKind::Cyclic { length: 2 },
            relation: RelationId(0),
            count: 2,
            attempts: 4,
        };

        let report = sample_many(&engine, &request, &mut StdRng::seed_from_u64(1)).expect("batch");

        assert!(report.walks.is_empty());
        assert_eq!(report.calls, 8);
        assert_eq!(report.failures, 8);
        assert_eq!(report.abandoned, 2);
    }

    #[test]
    fn precondition_errors_abort() {
        let (index, inverse) = triangle();
        let engine =
            WalkEngine::new(&index, &inverse, DistributionConfig::default()).expect("engine");
        let request = SampleRequest {
            kind: WalkKind::Acyclic,
            relation: RelationId(7),
            count: 1,
            attempts: 1,
        };

        let result = sample_many(&engine, &request, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(WalkError::EmptyRelation(_))));
    }

    #[test]
    fn zero_attempts_rejected() {
        let (index, inverse) = triangle();
        let engine =
            WalkEngine::new(&index, &inverse, DistributionConfig::default()).expect("engine");
        let request = SampleRequest {
            kind: WalkKind::Acyclic,
            relation: RelationId(0),
            count: 1,
            attempts: 0,
        };

        let result = sample_many(&engine, &request, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(WalkError::ConfigError(_))));
    }
}
