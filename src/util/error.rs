// DocWatch - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all DocWatch operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum DocWatchError {
    /// Document validation failed.
    Validation(ValidationError),

    /// Expiry query received an out-of-contract argument.
    Query(QueryError),

    /// CSV import or export failed.
    Codec(CodecError),

    /// Document store operation failed.
    Store(StoreError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for DocWatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "Validation error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Codec(e) => write!(f, "CSV error: {e}"),
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for DocWatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Codec(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Errors from document construction and validation.
#[derive(Debug)]
pub enum ValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Document title must not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for DocWatchError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Errors from the expiry query engine.
#[derive(Debug)]
pub enum QueryError {
    /// The expiry window was negative. The window is a day count measured
    /// forward from the reference date and must be >= 0.
    NegativeWindow { days: i64 },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeWindow { days } => {
                write!(f, "Expiry window must be >= 0 days, got {days}")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for DocWatchError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

/// Errors from CSV import and export.
///
/// Per-row mapping failures are NOT errors: a malformed data row is dropped
/// silently (logged at debug level) and never aborts the file.
#[derive(Debug)]
pub enum CodecError {
    /// The CSV source has no non-blank header line. Fatal: nothing can be
    /// imported from a file whose column layout is unknown.
    EmptyFile { path: PathBuf },

    /// I/O error reading or writing the CSV file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFile { path } => {
                write!(
                    f,
                    "CSV file '{}' is empty or has no header line",
                    path.display()
                )
            }
            Self::Io { path, source } => {
                write!(f, "CSV I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CodecError> for DocWatchError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors from the document store.
#[derive(Debug)]
pub enum StoreError {
    /// No document exists with the given id.
    NotFound { id: i64 },

    /// An update was attempted on a document that has never been saved
    /// (no id assigned).
    UnsavedDocument,

    /// Store file (de)serialisation failed.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error reading or writing the store file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "No document with id {id}"),
            Self::UnsavedDocument => {
                write!(f, "Document has no id; it has never been saved")
            }
            Self::Serialize { path, source } => {
                write!(
                    f,
                    "Store file '{}' is not valid JSON: {source}",
                    path.display()
                )
            }
            Self::Io { path, source } => {
                write!(f, "Store I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for DocWatchError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for DocWatchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for DocWatch results.
pub type Result<T> = std::result::Result<T, DocWatchError>;
