//! # Edge Sampler
//!
//! Chooses one edge out of a non-empty candidate set.
//!
//! Two transition distributions are supported:
//! - `Uniform`: every candidate has probability `1/n`
//! - `Exponential`: candidate `i` has weight `exp(t_i - t_ref)`, so edges
//!   close to the reference time dominate and distant ones decay toward zero
//!
//! The random source is always passed in by the caller.

use crate::primitives::DEFAULT_DELTA;
use crate::{Edge, Timestamp, WalkError};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Policy used to pick the next edge of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionDistribution {
    /// Every candidate is equally likely.
    #[serde(alias = "unif")]
    Uniform,
    /// Candidates are weighted by recency relative to the current time.
    #[default]
    #[serde(alias = "exp")]
    Exponential,
}

impl FromStr for TransitionDistribution {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unif" | "uniform" => Ok(Self::Uniform),
            "exp" | "exponential" => Ok(Self::Exponential),
            other => Err(WalkError::ConfigError(format!(
                "Unknown transition distribution '{}' (expected 'unif' or 'exp')",
                other
            ))),
        }
    }
}

impl fmt::Display for TransitionDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Exponential => write!(f, "exponential"),
        }
    }
}

/// Sampling configuration, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Transition distribution for every step after the start edge.
    pub distribution: TransitionDistribution,
    /// Time tolerance added to the current timestamp in temporal filters.
    pub delta: i64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            distribution: TransitionDistribution::default(),
            delta: DEFAULT_DELTA,
        }
    }
}

impl DistributionConfig {
    /// Create a configuration.
    #[must_use]
    pub const fn new(distribution: TransitionDistribution, delta: i64) -> Self {
        Self {
            distribution,
            delta,
        }
    }

    /// Uniform transitions with no time tolerance.
    #[must_use]
    pub const fn uniform() -> Self {
        Self::new(TransitionDistribution::Uniform, DEFAULT_DELTA)
    }

    /// Exponential transitions with no time tolerance.
    #[must_use]
    pub const fn exponential() -> Self {
        Self::new(TransitionDistribution::Exponential, DEFAULT_DELTA)
    }

    /// Same distribution, different tolerance.
    #[must_use]
    pub const fn with_delta(self, delta: i64) -> Self {
        Self::new(self.distribution, delta)
    }
}

// =============================================================================
// SAMPLING FUNCTIONS
// =============================================================================

/// Draw one candidate with probability `1/n`.
pub fn sample_uniform<R: Rng + ?Sized>(edges: &[Edge], rng: &mut R) -> Result<Edge, WalkError> {
    edges.choose(rng).copied().ok_or(WalkError::NoCandidates)
}

/// Recency weights `exp(t_i - reference)` as a ready-to-sample distribution.
///
/// Returns `None` when the weights cannot be normalized: every weight
/// underflowed to zero, or the total is not finite.
#[must_use]
pub fn exponential_weights(edges: &[Edge], reference: Timestamp) -> Option<WeightedIndex<f64>> {
    let weights: Vec<f64> = edges
        .iter()
        .map(|edge| (edge.timestamp.since(reference) as f64).exp())
        .collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }

    WeightedIndex::new(&weights).ok()
}

/// Draw one candidate weighted by recency relative to `reference`.
///
/// Falls back to uniform sampling when the weights are degenerate.
pub fn sample_exponential<R: Rng + ?Sized>(
    edges: &[Edge],
    reference: Timestamp,
    rng: &mut R,
) -> Result<Edge, WalkError> {
    if edges.is_empty() {
        return Err(WalkError::NoCandidates);
    }

    match exponential_weights(edges, reference) {
        Some(dist) => edges
            .get(dist.sample(rng))
            .copied()
            .ok_or(WalkError::NoCandidates),
        None => {
            tracing::debug!(
                candidates = edges.len(),
                reference = reference.0,
                "exponential weights degenerate, sampling uniformly"
            );
            sample_uniform(edges, rng)
        }
    }
}

// =============================================================================
// EDGE SAMPLER
// =============================================================================

/// Dispatches to the configured transition distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeSampler {
    distribution: TransitionDistribution,
}

impl EdgeSampler {
    /// Create a sampler for `distribution`.
    #[must_use]
    pub const fn new(distribution: TransitionDistribution) -> Self {
        Self { distribution }
    }

    /// Draw one of `edges`, using `reference` as the current time.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        edges: &[Edge],
        reference: Timestamp,
        rng: &mut R,
    ) -> Result<Edge, WalkError> {
        match self.distribution {
            TransitionDistribution::Uniform => sample_uniform(edges, rng),
            TransitionDistribution::Exponential => sample_exponential(edges, reference, rng),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TRIALS: usize = 20_000;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn edges_at(timestamps: &[i64]) -> Vec<Edge> {
        timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| Edge::from_raw(0, 1, i as u64, ts))
            .collect()
    }

    fn counts<F>(edges: &[Edge], mut draw: F) -> Vec<usize>
    where
        F: FnMut() -> Edge,
    {
        let mut counts = vec![0usize; edges.len()];
        for _ in 0..TRIALS {
            let picked = draw();
            let slot = edges
                .iter()
                .position(|e| *e == picked)
                .expect("picked edge is a candidate");
            counts[slot] += 1;
        }
        counts
    }

    #[test]
    fn uniform_is_fair() {
        let edges = edges_at(&[0, 1, 2, 3]);
        let mut rng = seeded_rng();

        let counts = counts(&edges, || sample_uniform(&edges, &mut rng).expect("sample"));

        // Each of 4 candidates expected 5000 times; allow 5%.
        for count in counts {
            assert!((4750..=5250).contains(&count), "count {count}");
        }
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let mut rng = seeded_rng();
        assert!(matches!(
            sample_uniform(&[], &mut rng),
            Err(WalkError::NoCandidates)
        ));
        assert!(matches!(
            sample_exponential(&[], Timestamp(0), &mut rng),
            Err(WalkError::NoCandidates)
        ));
    }

    #[test]
    fn exponential_prefers_recent_edges() {
        let edges = edges_at(&[3, 5]);
        let mut rng = seeded_rng();

        let counts = counts(&edges, || {
            sample_exponential(&edges, Timestamp(5), &mut rng).expect("sample")
        });

        // Weights are e^-2 and 1, so the recent edge wins about 88% of draws.
        assert!(counts[1] > counts[0]);
        assert!(counts[1] > TRIALS * 8 / 10);
    }

    #[test]
    fn exponential_single_candidate_is_always_chosen() {
        let edges = edges_at(&[-50]);
        let mut rng = seeded_rng();

        for _ in 0..100 {
            let picked = sample_exponential(&edges, Timestamp(0), &mut rng).expect("sample");
            assert_eq!(picked, edges[0]);
        }
    }

    #[test]
    fn underflowed_weights_are_degenerate() {
        // exp(-10_000) is zero in f64
        let edges = edges_at(&[-10_000, -10_001]);
        assert!(exponential_weights(&edges, Timestamp(0)).is_none());

        let recent = edges_at(&[-1, 0]);
        assert!(exponential_weights(&recent, Timestamp(0)).is_some());
    }

    #[test]
    fn overflowed_weights_are_degenerate() {
        let edges = edges_at(&[10_000, 0]);
        assert!(exponential_weights(&edges, Timestamp(0)).is_none());
    }

    #[test]
    fn degenerate_exponential_falls_back_to_uniform() {
        let edges = edges_at(&[-10_000, -10_001]);
        let mut rng = seeded_rng();

        let counts = counts(&edges, || {
            sample_exponential(&edges, Timestamp(0), &mut rng).expect("sample")
        });

        for count in counts {
            assert!((9500..=10500).contains(&count), "count {count}");
        }
    }

    #[test]
    fn sampler_dispatches_on_distribution() {
        let edges = edges_at(&[0, 100]);
        let mut rng = seeded_rng();

        // With reference 100 the old edge has weight e^-100: never drawn.
        let exp = EdgeSampler::new(TransitionDistribution::Exponential);
        for _ in 0..200 {
            let picked = exp.sample(&edges, Timestamp(100), &mut rng).expect("sample");
            assert_eq!(picked, edges[1]);
        }

        let unif = EdgeSampler::new(TransitionDistribution::Uniform);
        let counts = counts(&edges, || {
            unif.sample(&edges, Timestamp(100), &mut rng).expect("sample")
        });
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn distribution_parses_short_and_long_names() {
        assert_eq!(
            "unif".parse::<TransitionDistribution>().expect("parse"),
            TransitionDistribution::Uniform
        );
        assert_eq!(
            "Exponential".parse::<TransitionDistribution>().expect("parse"),
            TransitionDistribution::Exponential
        );
        assert!("gaussian".parse::<TransitionDistribution>().is_err());
    }

    #[test]
    fn default_config_is_exponential_without_tolerance() {
        let config = DistributionConfig::default();
        assert_eq!(config.distribution, TransitionDistribution::Exponential);
        assert_eq!(config.delta, 0);
        assert_eq!(DistributionConfig::uniform().with_delta(3).delta, 3);
    }
}
