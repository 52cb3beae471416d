//! Typed error handling for keyset pagination
//!
//! The paginator validates exactly one thing itself (the page size). Every
//! other failure belongs to the query executor and is carried through
//! untouched.
//!
//! # Error Categories
//!
//! - [`PaginateError`]: errors returned by a pagination call
//! - [`ConfigError`]: errors loading or validating a [`PaginatorConfig`](crate::config::PaginatorConfig)
//!
//! # Example
//!
//! ```rust,ignore
//! match paginator.paginate(&collection, options).await {
//!     Ok(stream) => { /* consume the page */ }
//!     Err(PaginateError::InvalidArgument { argument, .. }) => {
//!         eprintln!("bad request parameter: {}", argument);
//!     }
//!     Err(PaginateError::Executor(e)) => eprintln!("storage failed: {:#}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned by pagination operations
#[derive(Debug, Error)]
pub enum PaginateError {
    /// A request argument is outside its allowed domain.
    ///
    /// Raised before any query is built, so the executor never sees the
    /// request. Always recoverable by fixing the request.
    #[error("{message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// The delegated range query failed.
    ///
    /// Display and source chain are the executor's own.
    #[error(transparent)]
    Executor(#[from] anyhow::Error),
}

impl PaginateError {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        PaginateError::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PaginateError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            PaginateError::Executor(_) => "EXECUTOR_ERROR",
        }
    }

    /// Returns true if the request itself was rejected
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PaginateError::InvalidArgument { .. })
    }

    /// Name of the rejected argument, if any
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            PaginateError::InvalidArgument { argument, .. } => Some(*argument),
            PaginateError::Executor(_) => None,
        }
    }
}

/// Errors related to configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    /// Configuration could not be parsed
    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    /// A configuration value is not allowed
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
            ConfigError::Parse { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for pagination calls
pub type PaginateResult<T> = Result<T, PaginateError>;

/// A specialized Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
