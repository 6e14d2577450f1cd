// DocWatch - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "DocWatch";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DocWatch";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Expiry query defaults
// =============================================================================

/// Default expiry window in days used by `list --expiring` when neither the
/// CLI nor config.toml specifies one.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Hard upper bound on the configurable expiry window. Roughly ten years;
/// beyond this a "window" stops being a reminder horizon in any useful sense.
pub const MAX_WINDOW_DAYS: i64 = 3_650;

// =============================================================================
// CSV import limits
// =============================================================================

/// Default number of data rows shown by the import preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// Hard upper bound on preview rows (the preview is for eyeballing column
/// layout, not for reading the whole file).
pub const MAX_PREVIEW_ROWS: usize = 1_000;

/// CSV export column headers, in output order.
pub const EXPORT_HEADERS: [&str; 3] = ["title", "due_date", "attachment_path"];

/// Date format used when serialising due dates to CSV. Round-trips through
/// the import format list.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration and storage
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Document store file name (stored in the platform data directory).
pub const STORE_FILE_NAME: &str = "documents.json";
