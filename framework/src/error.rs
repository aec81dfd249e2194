//! Framework-wide error types
//!
//! Provides a unified error type that can be used throughout the framework
//! and automatically converts to appropriate HTTP responses.

use thiserror::Error;

/// Framework-wide error type
///
/// This enum represents all possible errors that can occur in the framework.
/// It implements `From<Error> for HttpResponse` so errors can be propagated
/// using the `?` operator in handlers.
///
/// # Example
///
/// ```rust,ignore
/// use breeze::{Database, Request, Response};
///
/// pub async fn index(db: Database, _req: Request) -> Response {
///     let conn = db.connection()?; // 503 when no database is attached
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The request body could not be read from the connection
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The request body exceeded the configured size limit (413)
    #[error("request body exceeds the configured size limit")]
    PayloadTooLarge,

    /// The request body was declared as JSON but did not parse (400)
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The request body was declared as a form but did not parse (400)
    #[error("invalid form body: {0}")]
    InvalidForm(String),

    /// Parameter extraction failed (missing path parameter)
    #[error("missing required parameter: {param_name}")]
    ParamError {
        /// The name of the parameter that failed extraction
        param_name: String,
    },

    /// No database connection has been established (503)
    ///
    /// Returned by [`Database::connection`](crate::Database::connection) when
    /// the process started without a reachable database.
    #[error("database connection is not available")]
    DatabaseUnavailable,

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Domain/application error with custom status code
    ///
    /// Used for user-defined domain errors that need custom HTTP status codes.
    #[error("{message}")]
    Domain {
        /// The error message
        message: String,
        /// HTTP status code
        status_code: u16,
    },

    /// Generic internal server error
    #[error("internal server error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl Error {
    /// Create a ParamError for a missing parameter
    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a Domain error with custom status code
    pub fn domain(message: impl Into<String>, status_code: u16) -> Self {
        Self::Domain {
            message: message.into(),
            status_code,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BodyRead(_) => 400,
            Self::PayloadTooLarge => 413,
            Self::InvalidJson(_) => 400,
            Self::InvalidForm(_) => 400,
            Self::ParamError { .. } => 400,
            Self::DatabaseUnavailable => 503,
            Self::Database(_) => 500,
            Self::Domain { status_code, .. } => *status_code,
            Self::Internal { .. } => 500,
        }
    }
}

// Implement From<DbErr> for automatic error conversion with ?
impl From<sea_orm::DbErr> for Error {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}

/// Ad-hoc domain error with a message and an HTTP status
///
/// For handlers that want to fail with a specific status without defining
/// an error type of their own.
///
/// # Example
///
/// ```rust,ignore
/// use breeze::{AppError, Request, Response};
///
/// pub async fn me(_req: Request) -> Response {
///     Err(AppError::unauthorized("no session").into())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AppError {
    message: String,
    status_code: u16,
}

impl AppError {
    /// Create a new AppError with status 500 (Internal Server Error)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: 500,
        }
    }

    /// Set the HTTP status code
    pub fn status(mut self, code: u16) -> Self {
        self.status_code = code;
        self
    }

    /// Create a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message).status(404)
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message).status(400)
    }

    /// Create a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message).status(401)
    }

    /// Create a 403 Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message).status(403)
    }

    /// Create a 422 Unprocessable Entity error
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(message).status(422)
    }

    /// Create a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message).status(409)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for Error {
    fn from(e: AppError) -> Self {
        Error::Domain {
            message: e.message,
            status_code: e.status_code,
        }
    }
}
