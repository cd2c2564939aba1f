//! Custom error types for fintrack
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FintrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity is still referenced by other records
    #[error("{entity_type} '{identifier}' is still in use: {reason}")]
    InUse {
        entity_type: &'static str,
        identifier: String,
        reason: String,
    },

    /// A hybrid transaction would exceed the remaining budget
    #[error("Budget exceeded for '{concept}': requested {requested}, remaining {remaining}")]
    BudgetExceeded {
        concept: String,
        requested: Money,
        remaining: Money,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse error buckets used to decide what the user gets to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was wrong; the message is meant for the user
    Client,
    /// Something failed underneath; show a generic message
    Internal,
}

impl FintrackError {
    /// Create a "not found" error for pockets
    pub fn pocket_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Pocket",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for concepts
    pub fn concept_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Concept",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for cycles
    pub fn cycle_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Cycle",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for payment types
    pub fn payment_type_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Payment type",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for fixed expenses
    pub fn fixed_expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Fixed expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for hybrid transactions
    pub fn hybrid_transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Hybrid transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for daily expenses
    pub fn daily_expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Daily expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Which bucket this error falls into
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_)
            | Self::NotFound { .. }
            | Self::Duplicate { .. }
            | Self::InUse { .. }
            | Self::BudgetExceeded { .. } => ErrorKind::Client,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Export(_) | Self::Storage(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Message suitable for showing to the user
    ///
    /// Client errors carry their own message. Internal errors collapse to a
    /// generic message; the detail is only logged.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Client => self.to_string(),
            ErrorKind::Internal => {
                "An internal error occurred. Please try again.".to_string()
            }
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FintrackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FintrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FintrackResult<T> = Result<T, FintrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FintrackError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FintrackError::pocket_not_found("Housing");
        assert_eq!(err.to_string(), "Pocket not found: Housing");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_budget_exceeded_error() {
        let err = FintrackError::BudgetExceeded {
            concept: "Groceries".into(),
            requested: Money::from_units(5000),
            remaining: Money::from_units(3000),
        };
        assert_eq!(
            err.to_string(),
            "Budget exceeded for 'Groceries': requested $5,000.00, remaining $3,000.00"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FintrackError = io_err.into();
        assert!(matches!(err, FintrackError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_user_message_buckets() {
        let client = FintrackError::Validation("Amount must be greater than 0".into());
        assert_eq!(client.kind(), ErrorKind::Client);
        assert_eq!(
            client.user_message(),
            "Validation error: Amount must be greater than 0"
        );

        let internal = FintrackError::Storage("disk full".into());
        assert_eq!(internal.kind(), ErrorKind::Internal);
        assert!(!internal.user_message().contains("disk full"));
    }
}
