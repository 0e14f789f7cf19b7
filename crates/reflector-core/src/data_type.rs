//! Runtime description of a Rust type as seen by the registry.

use std::any::TypeId;
use std::fmt;

use crate::{PrimitiveKind, Reflect, TypeHash};

/// The declared or requested type of a member, parameter or return value.
///
/// Two data types are the same type exactly when their `TypeId`s match;
/// the hash and name are carried for lookups and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub type_hash: TypeHash,
    pub type_id: TypeId,
    pub name: &'static str,
    pub primitive: Option<PrimitiveKind>,
}

impl DataType {
    /// Describe `T`.
    pub fn of<T: Reflect>() -> Self {
        DataType {
            type_hash: T::type_hash(),
            type_id: TypeId::of::<T>(),
            name: T::type_name(),
            primitive: T::primitive_codec().map(|codec| codec.kind),
        }
    }

    /// Same Rust type.
    #[inline]
    pub fn is_same(&self, other: &DataType) -> bool {
        self.type_id == other.type_id
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.primitive.is_some()
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.primitive == Some(PrimitiveKind::Void)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
