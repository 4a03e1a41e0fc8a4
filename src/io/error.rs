//! Error types and context management for board generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for configuration loading, generation and board export
#[derive(Debug)]
pub enum BingoError {
    /// Failed to read a content configuration file
    ConfigRead {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration document is not valid YAML or has wrongly typed fields
    ConfigParse {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying YAML error
        source: serde_yaml::Error,
    },

    /// Configuration parsed but violates a content rule
    InvalidConfig {
        /// Description of what's wrong with the configuration
        reason: String,
    },

    /// Generation parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The configuration declares no tile generators
    NoGenerators,

    /// A tile pool or grid does not match the board dimensions
    BoardShape {
        /// Expected (width, height)
        expected: (usize, usize),
        /// Number of tiles or cells supplied
        actual: usize,
    },

    /// A serialized board references a category the configuration doesn't know
    UnknownCategory {
        /// Category name found in the board document
        name: String,
    },

    /// Board JSON could not be written or read
    BoardFormat {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for BingoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigRead { path, source } => {
                write!(
                    f,
                    "Failed to read configuration '{}': {source}",
                    path.display()
                )
            }
            Self::ConfigParse { path, source } => {
                write!(
                    f,
                    "Failed to parse configuration '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NoGenerators => {
                write!(f, "Configuration contains no tile generators")
            }
            Self::BoardShape { expected, actual } => {
                write!(
                    f,
                    "Board of size {}x{} needs {} tiles, got {actual}",
                    expected.0,
                    expected.1,
                    expected.0 * expected.1
                )
            }
            Self::UnknownCategory { name } => {
                write!(f, "Unknown category '{name}'")
            }
            Self::BoardFormat { source } => {
                write!(f, "Board format error: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for BingoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::BoardFormat { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, BingoError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the failing operation touched
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with the file and operation that failed
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the path context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path context applied
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<BingoError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only path-carrying variants benefit from file context
            match &mut error {
                BingoError::ConfigRead { path, .. } | BingoError::ConfigParse { path, .. } => {
                    if let Some(context_path) = &context.path {
                        path.clone_from(context_path);
                    }
                }
                BingoError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = &context.path {
                        path.clone_from(context_path);
                    }
                    if let Some(context_operation) = context.operation {
                        *operation = context_operation;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for BingoError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for BingoError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigParse {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for BingoError {
    fn from(err: serde_json::Error) -> Self {
        Self::BoardFormat { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BingoError {
    BingoError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid configuration error
pub fn invalid_config(reason: &impl ToString) -> BingoError {
    BingoError::InvalidConfig {
        reason: reason.to_string(),
    }
}
