//! Default configuration values

/// Manifest file name recognized inside module directories
pub const MANIFEST_FILE_NAME: &str = "properties.yaml";

/// Name of the synthetic aggregate file written at the scratch root
pub const AGGREGATE_FILE_NAME: &str = "index.scss";

/// Subdirectory of the system temp directory used for staging
pub const SCRATCH_DIR_NAME: &str = "themeforge/build";

/// External style compiler invoked on the aggregate file
pub const DEFAULT_COMPILER: &str = "sass";

/// Prefix used when rendering variable declarations
pub const VARIABLE_PREFIX: char = '$';

/// Placeholder token replaced by the effective value in a variable format
pub const FORMAT_PLACEHOLDER: char = '$';
