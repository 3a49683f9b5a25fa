//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use thiserror::Error;

/// Represents failures of the access-token verification step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The signature does not match the process-wide secret.
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// The token was valid once but its expiry has passed.
    #[error("Token has expired")]
    Expired,
    /// The token could not be parsed at all.
    #[error("Token is malformed")]
    Malformed,
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Failed! Email is already in use!")]
    DuplicateEmail,

    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("Invalid Password!")]
    InvalidCredentials,

    #[error("{message}")]
    Forbidden { message: String },

    #[error("Unauthorized!")]
    Unauthorized,

    #[error("{message}")]
    MissingToken { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn missing_token(message: impl Into<String>) -> Self {
        Self::MissingToken {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(_: TokenError) -> Self {
        // Every verification failure on a protected route collapses to 401.
        ServiceError::Unauthorized
    }
}
