//! Common error infrastructure for bathala-core.
//!
//! This module provides the shared severity classification and the trait every
//! error type in the crate implements. Domain-specific errors (e.g. [`HandError`],
//! [`ConfigError`]) live next to the code that raises them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each validation surface has its own error type
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Fail Loudly**: Precondition violations are errors, never silent fallbacks
//!
//! [`HandError`]: crate::hand::HandError
//! [`ConfigError`]: crate::config::ConfigError

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Conditions the caller may resolve by trying something else
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted session state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller can continue with a different request.
    ///
    /// Examples: recording telemetry while no combat is open
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: six cards passed to the hand evaluator, adaptation rate of 2.0
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate integration bugs and should be investigated.
    Internal,

    /// Fatal error - session state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all bathala-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable, machine-readable error code.
    ///
    /// Codes are `SCREAMING_SNAKE_CASE` and prefixed with the domain, e.g.
    /// `HAND_TOO_MANY_CARDS`. They are suitable for log aggregation.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
    }
}
