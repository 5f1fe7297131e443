//! # tempwalk
//!
//! Command-line front end for the tempwalk-core sampling engine.
//!
//! - `dataset`: quadruple and inverse-pair files
//! - `config`: TOML configuration with CLI overrides
//! - `sampling`: retry loop around single engine calls
//! - `cli`: clap commands

pub mod cli;
pub mod config;
pub mod dataset;
pub mod sampling;
