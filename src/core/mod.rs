//! Core business logic module
//!
//! # Submodules
//!
//! - [`component`] - The component data model (modules, content, variables)
//! - [`manifest`] - Manifest (properties.yaml) parsing
//! - [`resolver`] - Component tree resolution
//! - [`builder`] - Build orchestration and staging
//! - [`tree`] - Component tree visualization

pub mod builder;
pub mod component;
pub mod manifest;
pub mod resolver;
pub mod tree;
