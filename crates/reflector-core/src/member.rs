//! Member kinds and receiver kinds.

use std::fmt;

/// The kind of member a lookup searches.
///
/// Fields and properties live in separate namespaces: a field lookup only
/// searches fields, so a field and a property may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field => write!(f, "field"),
            MemberKind::Property => write!(f, "property"),
            MemberKind::Method => write!(f, "method"),
        }
    }
}

/// How a method takes its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverKind {
    /// No receiver.
    Static,
    /// `&self`
    Shared,
    /// `&mut self`
    Exclusive,
}

impl ReceiverKind {
    #[inline]
    pub fn is_static(self) -> bool {
        self == ReceiverKind::Static
    }
}
