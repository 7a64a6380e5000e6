//! Error types for themeforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Component resolution errors
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Referenced component path does not exist
    #[error("Component does not exist: '{path}'")]
    NotFound { path: PathBuf },

    /// Directory component without a manifest file
    #[error("Directory '{path}' has no '{manifest}' manifest")]
    MissingManifest { path: PathBuf, manifest: String },

    /// Manifest failed to parse
    #[error("Failed to parse manifest '{path}': {error}")]
    ManifestParse { path: PathBuf, error: String },

    /// A `$ref` chain references a component already being resolved
    #[error("Circular component reference: '{path}'")]
    CircularReference { path: PathBuf },

    /// Two children of the same module resolve to the same path
    #[error("Module '{parent}' lists component '{child}' more than once")]
    DuplicateChild { parent: PathBuf, child: PathBuf },

    /// `oneof` with no children or an out-of-range `selected` index
    #[error("Module '{path}' selects child {selected} but has {children} children")]
    InvalidSelection {
        path: PathBuf,
        selected: usize,
        children: usize,
    },

    /// `isIndex` set on a component below the root
    #[error("Component '{path}' sets isIndex but is not the build root")]
    NestedIndex { path: PathBuf },

    /// The build root is a content file rather than a module
    #[error("Index component '{path}' must be a module directory")]
    IndexNotModule { path: PathBuf },

    /// Failed to read a content file or manifest
    #[error("Failed to read '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// External compiler errors
#[derive(Error, Debug)]
pub enum CompileError {
    /// Compiler executable not found
    #[error("Style compiler '{program}' not found on PATH")]
    NotFound { program: String },

    /// Failed to spawn the compiler process
    #[error("Failed to run '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Compiler rejected the aggregate input
    #[error("Compilation failed: {diagnostic}")]
    Failed { diagnostic: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Build orchestration errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build requested on a component that is not the index
    #[error("Cannot start building on non-index component '{name}'")]
    InvalidRoot { name: String },

    /// Staging-phase filesystem failure
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// External compiler failure
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// The orchestrator's scheduler has shut down
    #[error("Build queue is closed")]
    QueueClosed,
}

/// Top-level themeforge error type
#[derive(Error, Debug)]
pub enum ThemeforgeError {
    /// Resolution error
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Compile error
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// IO error
    #[error("IO error: {source}")]
    Io { source: std::io::Error },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
