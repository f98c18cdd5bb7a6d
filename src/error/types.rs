/**
 * API Error Types
 *
 * This module defines the classified error type used by every HTTP handler
 * and by the store/coordinator layer underneath them. Each variant maps to
 * one HTTP status code and carries a human-readable message; internal detail
 * (database errors, I/O errors) is logged but never serialized into a
 * response.
 *
 * # Taxonomy
 *
 * - `Unauthorized` - missing/invalid/expired session token, or bad login /
 *   delete-account credentials. Deliberately vague so callers cannot tell
 *   which check failed.
 * - `Forbidden` - whitelist rejection. Distinct from `Unauthorized` because
 *   it is an access-policy gate, not an identity check.
 * - `NotFound` - a referenced entity is absent.
 * - `Conflict` - a uniqueness constraint was violated.
 * - `BadRequest` - malformed input.
 * - `InvalidOrExpired` - reset-token specific; merges not-found, expired and
 *   already-used into one indistinguishable failure.
 * - `PayloadTooLarge` - upload body exceeded the configured limit.
 * - `Internal` - backing-store or I/O failure not otherwise classified.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Classified errors returned by handlers and the stores behind them.
///
/// Each variant converts to an HTTP response via the `IntoResponse` impl in
/// `error::conversion`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (bad email shape, missing multipart field, ...)
    #[error("{message}")]
    BadRequest {
        /// Human-readable error message
        message: String,
    },

    /// Identity check failed (credentials or session token)
    #[error("{message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Access-policy rejection (whitelist gate)
    #[error("{message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Referenced entity does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Uniqueness violation (duplicate email, filename, ...)
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Reset token failed validation. One merged message for missing,
    /// expired and already-used tokens, so token state cannot be enumerated.
    #[error("Reset token is invalid or expired")]
    InvalidOrExpired,

    /// Upload body exceeded the configured limit
    #[error("Uploaded file exceeds the maximum allowed size")]
    PayloadTooLarge,

    /// Unclassified failure. The message is logged server-side; callers see
    /// a fixed generic message.
    #[error("Internal server error")]
    Internal {
        /// Internal detail, for logs only
        message: String,
    },
}

impl ApiError {
    /// Create a `BadRequest` error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an `Unauthorized` error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a `Forbidden` error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a `NotFound` error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a `Conflict` error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an `Internal` error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InvalidOrExpired => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message delivered to the caller.
    ///
    /// `Internal` deliberately hides its detail; everything else returns the
    /// message it was constructed with.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Check whether a sqlx error is a uniqueness-constraint violation.
///
/// Call sites use this to turn the raw store error into a domain-specific
/// `Conflict` (duplicate email vs. duplicate filename need different
/// messages).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(dbe) => {
            matches!(dbe.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

/// Check whether a sqlx error is a foreign-key violation.
///
/// `reset_tokens::issue` uses this to answer `NotFound` when the referenced
/// user no longer exists, letting the schema make the call on the INSERT
/// itself instead of a separate existence check.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(dbe) => {
            matches!(dbe.kind(), sqlx::error::ErrorKind::ForeignKeyViolation)
        }
        _ => false,
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal {
            message: format!("database error: {err}"),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal {
            message: format!("password hashing error: {err}"),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("i/o error: {err}"),
        }
    }
}
