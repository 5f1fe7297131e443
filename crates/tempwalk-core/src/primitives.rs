//! # Walk Primitives
//!
//! Fixed constants of the walk protocols.
//! These are compiled into the binary and are immutable at runtime.

/// Number of edges in an acyclic walk: one backward, the head edge, one forward.
pub const ACYCLIC_WALK_LENGTH: usize = 3;

/// Shortest cyclic walk the engine accepts.
///
/// A length-1 walk is the start edge alone. No transition runs, so the
/// closure filter never applies to it.
pub const MIN_WALK_LENGTH: usize = 1;

/// Default time tolerance applied to temporal filters.
pub const DEFAULT_DELTA: i64 = 0;
