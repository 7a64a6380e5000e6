//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Test theme context
///
/// Creates a temporary directory for test themes and provides utilities
/// for setting up component trees.
pub struct TestTheme {
    /// Temporary directory holding the theme source
    pub dir: TempDir,
}

impl TestTheme {
    /// Create a new test theme in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the theme directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the theme
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the theme directory
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Write a minimal two-leaf theme: `b.scss` (order 1) before `a.scss`
    /// (order 2)
    pub fn create_two_leaf_theme(&self) {
        self.create_file("a.scss", ".a { color: red; }\n");
        self.create_file("b.scss", ".b { color: blue; }\n");
        self.create_file(
            "properties.yaml",
            r#"
name: test-theme
components:
  - $ref: a.scss
    order: 2
  - $ref: b.scss
    order: 1
"#,
        );
    }

    /// Write a stub style compiler that echoes the aggregate file, and
    /// return its path.
    #[cfg(unix)]
    pub fn create_stub_compiler(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("fakesass");
        std::fs::write(&path, "#!/bin/sh\ncat \"$1\"\n").expect("Failed to write stub compiler");
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat stub compiler")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod stub compiler");
        path
    }
}

impl Default for TestTheme {
    fn default() -> Self {
        Self::new()
    }
}
