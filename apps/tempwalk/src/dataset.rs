//! # Dataset Loading
//!
//! Reads quadruple files into edges and builds the inverse-relation map.
//!
//! ## Formats
//!
//! Quadruples: one per line, `head relation tail timestamp`, four
//! whitespace-separated integers. Blank lines and lines starting with `#`
//! are skipped.
//!
//! Inverse pairs: one per line, `relation inverse`. Each pair is registered
//! in both directions.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempwalk_core::{Edge, InverseRelationMap, RelationId, WalkError};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum dataset file size (1 GB).
///
/// This prevents memory exhaustion from accidental large files.
const MAX_DATASET_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Validate file path and size before reading.
///
/// Canonicalizes the path, then ensures it is a regular file within the size
/// limit.
fn validate_file(path: &Path) -> Result<PathBuf, WalkError> {
    let canonical = path.canonicalize().map_err(|e| {
        WalkError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(WalkError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| WalkError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_DATASET_FILE_SIZE {
        return Err(WalkError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_DATASET_FILE_SIZE
        )));
    }

    Ok(canonical)
}

fn read_text(path: &Path) -> Result<String, WalkError> {
    let canonical = validate_file(path)?;
    std::fs::read_to_string(&canonical)
        .map_err(|e| WalkError::IoError(format!("Cannot read '{}': {}", path.display(), e)))
}

// =============================================================================
// PARSING
// =============================================================================

/// Content lines with their 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    name: &str,
    line: usize,
) -> Result<T, WalkError> {
    field.parse().map_err(|_| WalkError::ParseError {
        line,
        message: format!("invalid {} '{}'", name, field),
    })
}

/// Parse quadruples.
pub fn parse_quads(text: &str) -> Result<Vec<Edge>, WalkError> {
    let mut edges = Vec::new();
    for (line, content) in content_lines(text) {
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [head, relation, tail, timestamp] = fields.as_slice() else {
            return Err(WalkError::ParseError {
                line,
                message: format!("expected 4 fields, found {}", fields.len()),
            });
        };
        edges.push(Edge::from_raw(
            parse_field(head, "head", line)?,
            parse_field(relation, "relation", line)?,
            parse_field(tail, "tail", line)?,
            parse_field(timestamp, "timestamp", line)?,
        ));
    }
    Ok(edges)
}

/// Parse inverse-relation pairs.
pub fn parse_inverse_pairs(text: &str) -> Result<InverseRelationMap, WalkError> {
    let mut map = InverseRelationMap::new();
    for (line, content) in content_lines(text) {
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [relation, inverse] = fields.as_slice() else {
            return Err(WalkError::ParseError {
                line,
                message: format!("expected 2 fields, found {}", fields.len()),
            });
        };
        map.link(
            RelationId(parse_field(relation, "relation", line)?),
            RelationId(parse_field(inverse, "inverse", line)?),
        )?;
    }
    Ok(map)
}

/// Append the inverse of every edge under the offset convention.
///
/// With `n` relation ids (`max relation + 1`), each `(h, r, t, ts)` also
/// yields `(t, r + n, h, ts)`, and the returned map links `r <-> r + n` for
/// the relations that occur in `edges`.
pub fn with_inverse_edges(edges: &[Edge]) -> (Vec<Edge>, InverseRelationMap) {
    let relations: BTreeSet<RelationId> = edges.iter().map(|e| e.relation).collect();
    let num_relations = relations
        .last()
        .map(|r| r.0.saturating_add(1))
        .unwrap_or(0);

    let mut all = Vec::with_capacity(edges.len().saturating_mul(2));
    all.extend_from_slice(edges);
    all.extend(
        edges
            .iter()
            .map(|e| e.inverted(RelationId(e.relation.0.saturating_add(num_relations)))),
    );

    (all, InverseRelationMap::offset_for(relations, num_relations))
}

// =============================================================================
// DATASET
// =============================================================================

/// Where the inverse-relation map comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InverseSource {
    /// Generate inverse edges and the offset map from the data itself.
    Offset,
    /// Read explicit pairs from a file; the data must already contain
    /// whatever inverse edges it needs.
    PairFile(PathBuf),
}

/// A loaded dataset, ready to be indexed.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub edges: Vec<Edge>,
    pub inverse: InverseRelationMap,
}

impl Dataset {
    /// Load quadruples from `data` and the inverse map from `source`.
    pub fn load(data: &Path, source: &InverseSource) -> Result<Self, WalkError> {
        let quads = parse_quads(&read_text(data)?)?;
        tracing::info!("Loaded {} quadruples from {:?}", quads.len(), data);

        let (edges, inverse) = match source {
            InverseSource::Offset => with_inverse_edges(&quads),
            InverseSource::PairFile(path) => {
                let inverse = parse_inverse_pairs(&read_text(path)?)?;
                tracing::info!("Loaded {} inverse entries from {:?}", inverse.len(), path);
                (quads, inverse)
            }
        };

        Ok(Self { edges, inverse })
    }
}

// =============================================================================
// TESTS
// =============================================================================
