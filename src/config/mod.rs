//! Configuration and constants

pub mod defaults;

use std::path::PathBuf;

/// Well-known scratch directory root under the system temp directory
pub fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join(defaults::SCRATCH_DIR_NAME)
}
