//! Default configuration values

/// Application name used in directory paths
pub const APP_NAME: &str = "sygmare";

/// Manifest file looked up when none is given
pub const DEFAULT_MANIFEST: &str = "sygmare_manifest.json";

/// Project settings file name
pub const SETTINGS_FILE: &str = "sygmare.toml";

/// Environment variable overriding the manifest path
pub const ENV_MANIFEST: &str = "SYGMARE_MANIFEST";

/// Environment variable overriding the settings file path
pub const ENV_CONFIG: &str = "SYGMARE_CONFIG";

/// Lines of command output kept in failure details
pub const OUTPUT_TAIL_LINES: usize = 20;
