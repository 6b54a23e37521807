//! Error type shared by every parser and constructor in the crate.
//!
//! Two kinds are reported: input that does not match a grammar
//! ([`AddrError::Malformed`]) and input that parses but breaks a semantic
//! rule ([`AddrError::Invalid`]).

use thiserror::Error;

/// Failure to construct one of the crate's value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrError {
    /// The text does not match the grammar, or a numeric component is out of range.
    #[error("malformed {what}: [{input}]")]
    Malformed { what: &'static str, input: String },
    /// The value is well formed but violates an invariant.
    #[error("invalid {what}: {reason}")]
    Invalid { what: &'static str, reason: String },
}

impl AddrError {
    pub fn malformed(what: &'static str, input: impl Into<String>) -> Self {
        AddrError::Malformed {
            what,
            input: input.into(),
        }
    }

    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        AddrError::Invalid {
            what,
            reason: reason.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, AddrError::Malformed { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, AddrError::Invalid { .. })
    }

    /// Report a grammar failure against the enclosing `input`; invariant
    /// failures pass through unchanged.
    pub(crate) fn within(self, what: &'static str, input: &str) -> AddrError {
        match self {
            AddrError::Malformed { .. } => AddrError::malformed(what, input),
            invalid => invalid,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AddrError>;
