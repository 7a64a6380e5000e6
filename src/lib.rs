//! Themeforge - modular stylesheet theme builder
//!
//! This library assembles a stylesheet theme from a declarative,
//! file-system-backed component tree: directories (modules) with a
//! `properties.yaml` manifest, and leaf files (content) holding raw style
//! fragments. A build stages the resolved tree into a scratch directory,
//! aggregates import statements, and hands the result to an external
//! style compiler.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic: component model, resolution, orchestration
//! - [`infra`] - Infrastructure layer (filesystem, external processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
