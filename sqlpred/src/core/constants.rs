// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "sqlpred";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".sqlpred";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "sqlpred.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SQLPRED_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SQLPRED_LOG";

/// Environment variable for bound-parameter output
pub const ENV_BIND: &str = "SQLPRED_BIND";

/// Environment variable for the filter JSON size limit
pub const ENV_MAX_JSON_BYTES: &str = "SQLPRED_MAX_JSON_BYTES";

/// Environment variable for the top-level filter count limit
pub const ENV_MAX_FILTERS: &str = "SQLPRED_MAX_FILTERS";

/// Environment variable for the group nesting limit
pub const ENV_MAX_DEPTH: &str = "SQLPRED_MAX_DEPTH";

// =============================================================================
// Logging Defaults
// =============================================================================

/// Log filter when neither SQLPRED_LOG nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "warn";
