//! Visibility modifiers and lookup scopes for members.

use std::fmt;

use bitflags::bitflags;

/// Visibility modifier for members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    #[inline]
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

bitflags! {
    /// Which members a lookup may see.
    ///
    /// A member is visible when its storage class (`INSTANCE`/`STATIC`) and
    /// its visibility class (`PUBLIC`/`NON_PUBLIC`) are both admitted.
    /// Inherited statics additionally need `FLATTEN_HIERARCHY`, and
    /// `DECLARED_ONLY` hides everything inherited.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberScope: u8 {
        const INSTANCE = 1 << 0;
        const STATIC = 1 << 1;
        const PUBLIC = 1 << 2;
        const NON_PUBLIC = 1 << 3;
        const DECLARED_ONLY = 1 << 4;
        const FLATTEN_HIERARCHY = 1 << 5;

        /// Instance and static, public and non-public.
        const DEFAULT = Self::INSTANCE.bits()
            | Self::STATIC.bits()
            | Self::PUBLIC.bits()
            | Self::NON_PUBLIC.bits();
    }
}

impl Default for MemberScope {
    fn default() -> Self {
        MemberScope::DEFAULT
    }
}

impl MemberScope {
    /// Whether a member with these modifiers, declared `depth` levels up the
    /// inheritance chain (0 = on the type itself), is visible.
    pub fn admits(self, visibility: Visibility, is_static: bool, depth: u32) -> bool {
        let storage = if is_static {
            MemberScope::STATIC
        } else {
            MemberScope::INSTANCE
        };
        let access = if visibility.is_public() {
            MemberScope::PUBLIC
        } else {
            MemberScope::NON_PUBLIC
        };
        if !self.contains(storage) || !self.contains(access) {
            return false;
        }
        if depth == 0 {
            return true;
        }
        if self.contains(MemberScope::DECLARED_ONLY) || visibility == Visibility::Private {
            return false;
        }
        !is_static || self.contains(MemberScope::FLATTEN_HIERARCHY)
    }
}
