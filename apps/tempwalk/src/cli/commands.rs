//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::DataArgs;
use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::sampling::{SampleReport, SampleRequest, WalkKind, sample_many};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempwalk_core::{GraphIndex, RelationId, Walk, WalkEngine, WalkError};

// =============================================================================
// HELPERS
// =============================================================================

/// Load the dataset and build its index.
fn load_index(data: &DataArgs) -> Result<(GraphIndex, Dataset), WalkError> {
    let mut dataset = Dataset::load(&data.data, &data.inverse_source()?)?;
    let index = GraphIndex::build(std::mem::take(&mut dataset.edges));
    Ok((index, dataset))
}

/// Seeded RNG when the configuration names a seed, entropy otherwise.
fn make_rng(config: &AppConfig) -> StdRng {
    match config.walk.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn to_json_line<T: serde::Serialize>(value: &T) -> Result<String, WalkError> {
    serde_json::to_string(value).map_err(|e| WalkError::SerializationError(e.to_string()))
}

/// Render a walk as `e0 -r0@t0-> e1 -r1@t1-> e2 ...`.
fn format_walk(walk: &Walk) -> String {
    let mut out = walk
        .entities
        .first()
        .map(ToString::to_string)
        .unwrap_or_default();
    for step in 0..walk.len() {
        if let Some(edge) = walk.edge(step) {
            out.push_str(&format!(
                " -{}@{}-> {}",
                edge.relation, edge.timestamp, edge.tail
            ));
        }
    }
    out
}

fn print_report(report: &SampleReport, json_mode: bool) -> Result<(), WalkError> {
    if json_mode {
        for walk in &report.walks {
            println!("{}", to_json_line(walk)?);
        }
        let summary = serde_json::json!({
            "walks": report.walks.len(),
            "calls": report.calls,
            "failures": report.failures,
            "abandoned": report.abandoned,
        });
        println!("{}", to_json_line(&summary)?);
        return Ok(());
    }

    for walk in &report.walks {
        println!("{}", format_walk(walk));
    }
    println!();
    println!("Walks:     {}", report.walks.len());
    println!("Calls:     {}", report.calls);
    println!("Failures:  {}", report.failures);
    println!("Abandoned: {}", report.abandoned);

    Ok(())
}

fn run_batch(
    data: &DataArgs,
    config: &AppConfig,
    json_mode: bool,
    kind: WalkKind,
    relation: RelationId,
    count: usize,
) -> Result<(), WalkError> {
    let (index, dataset) = load_index(data)?;
    let engine = WalkEngine::new(&index, &dataset.inverse, config.walk.distribution_config())?;
    let request = SampleRequest {
        kind,
        relation,
        count,
        attempts: config.sampling.attempts,
    };

    tracing::info!(
        "Sampling {} {:?} walks for relation {} ({}, delta {})",
        count,
        kind,
        relation,
        config.walk.distribution,
        config.walk.delta
    );

    let report = sample_many(&engine, &request, &mut make_rng(config))?;
    print_report(&report, json_mode)
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Show index sizes.
pub fn cmd_stats(data: &DataArgs, json_mode: bool) -> Result<(), WalkError> {
    let (index, dataset) = load_index(data)?;

    if json_mode {
        let output = serde_json::json!({
            "data": data.data.to_string_lossy(),
            "entities": index.entity_count(),
            "relations": index.relation_count(),
            "edges": index.edge_count(),
            "inverse_entries": dataset.inverse.len(),
        });
        println!("{}", to_json_line(&output)?);
        return Ok(());
    }

    println!("tempwalk Dataset Stats");
    println!("======================");
    println!("Data: {:?}", data.data);
    println!();
    println!("Entities:        {}", index.entity_count());
    println!("Relations:       {}", index.relation_count());
    println!("Edges:           {}", index.edge_count());
    println!("Inverse entries: {}", dataset.inverse.len());

    Ok(())
}

// =============================================================================
// SAMPLE COMMANDS
// =============================================================================

/// Sample cyclic walks of `length` edges.
pub fn cmd_sample(
    data: &DataArgs,
    config: &AppConfig,
    json_mode: bool,
    relation: RelationId,
    length: usize,
    count: usize,
) -> Result<(), WalkError> {
    run_batch(
        data,
        config,
        json_mode,
        WalkKind::Cyclic { length },
        relation,
        count,
    )
}

/// Sample acyclic walks.
pub fn cmd_acyclic(
    data: &DataArgs,
    config: &AppConfig,
    json_mode: bool,
    relation: RelationId,
    count: usize,
) -> Result<(), WalkError> {
    run_batch(data, config, json_mode, WalkKind::Acyclic, relation, count)
}

// =============================================================================
// TESTS
// =============================================================================
