// Memoria - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Memoria";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Memoria";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Filtering
// =============================================================================

/// Query value meaning "do not filter". Compared exactly (case-sensitive).
pub const ALL_LABEL: &str = "All";

/// Maximum number of characters of a label echoed into debug output.
pub const DEBUG_MAX_LABEL_PREVIEW: usize = 64;

// =============================================================================
// Input limits
// =============================================================================

/// Maximum size of a memories JSON file in bytes.
pub const MAX_INPUT_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MB

/// Maximum number of memories accepted from a single document.
pub const MAX_MEMORIES: usize = 1_000_000;

/// Maximum size of config.toml in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB

// =============================================================================
// Export
// =============================================================================

/// Maximum number of memories that can be exported in a single operation.
pub const MAX_EXPORT_ENTRIES: usize = MAX_MEMORIES;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
