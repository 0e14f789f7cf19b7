//! Error types for registration and accessor compilation.
//!
//! ```text
//! RegistrationError - describing a type to the registry
//! ReflectError      - locating a member and compiling an accessor for it
//! ```
//!
//! Every `ReflectError` is raised while an accessor is being compiled.
//! Once an accessor exists, calling it has no error path.

use thiserror::Error;

use crate::MemberKind;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while describing a type to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A type with this name (or Rust type) is already registered.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// Two members of the same kind and name at the same inheritance depth.
    #[error("duplicate {kind} '{member}' on type '{type_name}'")]
    DuplicateMember {
        type_name: String,
        kind: MemberKind,
        member: String,
    },

    /// A member was registered with an empty name.
    #[error("empty {kind} name on type '{type_name}'")]
    EmptyName { type_name: String, kind: MemberKind },
}

// ============================================================================
// Reflect Errors
// ============================================================================

/// Errors from locating a member or compiling an accessor for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    /// No member of the requested kind and name is visible.
    ///
    /// The facade reports this as an absent result, not as an error.
    #[error("{kind} '{member}' not found on type '{type_name}'")]
    NotFound {
        type_name: String,
        kind: MemberKind,
        member: String,
    },

    /// Several visible members match the name and none is preferred.
    #[error("ambiguous match for {kind} '{member}' on type '{type_name}' ({candidates} candidates)")]
    AmbiguousMatch {
        type_name: String,
        kind: MemberKind,
        member: String,
        candidates: usize,
    },

    /// A descriptor of one kind was handed to a compiler for another.
    #[error("'{member}' is a {found}, expected a {expected}")]
    WrongKind {
        member: String,
        expected: MemberKind,
        found: MemberKind,
    },

    /// The declared and requested types have no conversion.
    #[error("type mismatch for '{member}': declared {declared}, requested {requested}")]
    TypeMismatch {
        member: String,
        declared: String,
        requested: String,
    },

    /// The binding mode does not fit the member's static/instance modifier.
    #[error("invalid binding for '{member}': {reason}")]
    InvalidBinding { member: String, reason: &'static str },

    /// The requested signature's parameter count differs from the method's.
    #[error("arity mismatch for '{member}': method takes {expected} parameter(s), signature has {found}")]
    ArityMismatch {
        member: String,
        expected: usize,
        found: usize,
    },

    /// A setter was requested for a member without one.
    #[error("'{member}' is read-only")]
    ReadOnly { member: String },
}

impl ReflectError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReflectError::NotFound { .. })
    }
}
