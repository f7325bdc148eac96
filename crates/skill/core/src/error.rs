//! Common error infrastructure for skill-core.
//!
//! Domain-specific errors (e.g., `DefinitionError`) live next to the types
//! they validate. This module provides the shared classification so callers
//! can decide between "log and carry on" and "stop the simulation".
//!
//! Nothing in the skill subsystem is fatal in practice: the worst outcome of
//! a failed skill use is that it had no effect this frame.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same call may succeed on a later frame.
    ///
    /// Examples: no enemy on the field yet.
    Recoverable,

    /// Invalid input that will keep failing until the caller changes it.
    ///
    /// Examples: unregistered effect name, zero attack count.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    ///
    /// Examples: stale pool handle.
    Internal,

    /// Unrecoverable; the subsystem cannot continue.
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

/// Common trait for all skill errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable, upper-case `error_code` per variant
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
