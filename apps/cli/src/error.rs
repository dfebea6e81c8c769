//! # CLI Error Type
//!
//! Unified error type for commands and the interactive menu.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in StockLedger                            │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, CliError>                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validation Error? ─── CoreError::Validation ──────┐                   │
//! │         │                                          │                   │
//! │         ▼                                          ▼                   │
//! │  Database Error? ─── DbError::QueryFailed ───► CliError ──► report()   │
//! │         │                                          │                   │
//! │         ▼                                          ▼                   │
//! │  Success                          ErrorReport { code, message }        │
//! │                                          │                              │
//! │                     ┌────────────────────┴────────────────────┐        │
//! │                     ▼                                         ▼        │
//! │           one-shot command: stderr                  menu: print and    │
//! │           + exit code                               prompt again       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockledger_core::CoreError;
use stockledger_db::DbError;
use thiserror::Error;

use crate::state::config::ConfigError;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Machine-readable error codes.
///
/// Stable across releases; scripts match on these in `--json` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id not present
    NotFound,

    /// Create input rejected
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Bad environment or flag value
    ConfigError,

    /// Terminal I/O failed
    IoError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for a one-shot command failing with this code.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::ConfigError => 4,
            ErrorCode::DatabaseError => 5,
            ErrorCode::IoError => 6,
        }
    }
}

/// What the operator (or a script) is shown for a failure.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 999"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    /// The error's code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Core(CoreError::ProductNotFound(_)) => ErrorCode::NotFound,
            CliError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            CliError::Core(CoreError::IdsExhausted) => ErrorCode::Internal,
            CliError::Db(DbError::NotFound { .. }) => ErrorCode::NotFound,
            CliError::Db(_) => ErrorCode::DatabaseError,
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Io(_) => ErrorCode::IoError,
            CliError::Json(_) => ErrorCode::Internal,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        self.code().exit_code()
    }

    /// Builds the operator-facing report.
    ///
    /// Database internals are logged, not shown; the operator gets a
    /// short message instead.
    pub fn report(&self) -> ErrorReport {
        let message = match self {
            CliError::Core(e) => e.to_string(),
            CliError::Db(e) => db_message(e),
            CliError::Config(e) => e.to_string(),
            CliError::Io(e) => format!("Terminal I/O failed: {}", e),
            CliError::Json(e) => {
                tracing::error!("JSON encoding failed: {}", e);
                "Could not encode output".to_string()
            }
        };

        ErrorReport {
            code: self.code(),
            message,
        }
    }
}

fn db_message(err: &DbError) -> String {
    match err {
        DbError::NotFound { entity, id } => format!("{} not found: {}", entity, id),
        DbError::UniqueViolation { field, value } => {
            format!("{} '{}' already exists", field, value)
        }
        DbError::ConstraintViolation { message } => {
            tracing::error!("Constraint violation: {}", message);
            "Stored data rejected by database constraints".to_string()
        }
        DbError::ConnectionFailed(e) => {
            tracing::error!("Database connection failed: {}", e);
            "Database connection failed".to_string()
        }
        DbError::MigrationFailed(e) => {
            tracing::error!("Migration failed: {}", e);
            "Database migration failed".to_string()
        }
        DbError::QueryFailed(e) => {
            tracing::error!("Database query failed: {}", e);
            "Database operation failed".to_string()
        }
        DbError::PoolExhausted => "Database pool exhausted".to_string(),
        DbError::Internal(e) => {
            tracing::error!("Internal database error: {}", e);
            "Database operation failed".to_string()
        }
    }
}
