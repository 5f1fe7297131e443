//! # Inverse Relations
//!
//! The mapping from each relation to the relation that traverses it backwards.
//!
//! The map is bijective and involutive: `inverse(inverse(r)) == r`.
//! Both directions are stored, so every lookup is a single `BTreeMap` probe.

use crate::{RelationId, WalkError};
use std::collections::BTreeMap;

/// Involutive mapping `RelationId -> RelationId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InverseRelationMap {
    inverse: BTreeMap<RelationId, RelationId>,
}

impl InverseRelationMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(relation, inverse)` pairs.
    ///
    /// Each pair is registered in both directions. A pair may map a relation
    /// to itself (a symmetric relation). Registering a relation twice with
    /// different inverses fails with `WalkError::InverseNotInvolutive`.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, WalkError>
    where
        I: IntoIterator<Item = (RelationId, RelationId)>,
    {
        let mut map = Self::new();
        for (relation, inverse) in pairs {
            map.link(relation, inverse)?;
        }
        Ok(map)
    }

    /// Build the offset convention: relation `r` in `0..num_relations` is
    /// inverted by `r + num_relations`.
    #[must_use]
    pub fn with_offset(num_relations: u64) -> Self {
        Self::offset_for((0..num_relations).map(RelationId), num_relations)
    }

    /// Offset convention restricted to `relations`: each `r` is linked to
    /// `r + offset`.
    ///
    /// The map holds two entries per distinct relation, however sparse the
    /// ids are.
    #[must_use]
    pub fn offset_for<I>(relations: I, offset: u64) -> Self
    where
        I: IntoIterator<Item = RelationId>,
    {
        let mut inverse = BTreeMap::new();
        for relation in relations {
            let shifted = RelationId(relation.0.saturating_add(offset));
            inverse.insert(relation, shifted);
            inverse.insert(shifted, relation);
        }
        Self { inverse }
    }

    /// Register `relation <-> inverse`.
    pub fn link(&mut self, relation: RelationId, inverse: RelationId) -> Result<(), WalkError> {
        self.check_slot(relation, inverse)?;
        self.check_slot(inverse, relation)?;
        self.inverse.insert(relation, inverse);
        self.inverse.insert(inverse, relation);
        Ok(())
    }

    fn check_slot(&self, relation: RelationId, inverse: RelationId) -> Result<(), WalkError> {
        match self.inverse.get(&relation) {
            Some(&existing) if existing != inverse => Err(WalkError::InverseNotInvolutive {
                relation,
                inverse: existing,
                back: inverse,
            }),
            _ => Ok(()),
        }
    }

    /// Look up the inverse of `relation`.
    #[must_use]
    pub fn get(&self, relation: RelationId) -> Option<RelationId> {
        self.inverse.get(&relation).copied()
    }

    /// Look up the inverse of `relation`, failing if it is not registered.
    pub fn inverse_of(&self, relation: RelationId) -> Result<RelationId, WalkError> {
        self.get(relation).ok_or(WalkError::MissingInverse(relation))
    }

    /// Check that every relation in `relations` has an inverse and that the
    /// mapping round-trips for each of them.
    pub fn validate_covers<I>(&self, relations: I) -> Result<(), WalkError>
    where
        I: IntoIterator<Item = RelationId>,
    {
        for relation in relations {
            let inverse = self.inverse_of(relation)?;
            let back = self.inverse_of(inverse)?;
            if back != relation {
                return Err(WalkError::InverseNotInvolutive {
                    relation,
                    inverse,
                    back,
                });
            }
        }
        Ok(())
    }

    /// Number of relations with a registered inverse.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inverse.len()
    }

    /// Check if no inverse is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inverse.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
