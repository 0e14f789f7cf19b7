//! The `Reflect` trait for types that can be described to a registry.
//!
//! `Reflect` gives a type its identity (`TypeHash` and name) and, for the
//! built-in primitives, a [`PrimitiveCodec`] used when a member is read or
//! written as a different numeric type than the one it was declared with.
//!
//! # Example
//!
//! ```
//! use reflector_core::{Reflect, TypeHash};
//!
//! struct Player {
//!     health: i32,
//! }
//!
//! impl Reflect for Player {
//!     fn type_hash() -> TypeHash {
//!         TypeHash::from_name("Player")
//!     }
//!
//!     fn type_name() -> &'static str {
//!         "Player"
//!     }
//! }
//!
//! assert_eq!(Player::type_name(), "Player");
//! assert!(Player::primitive_codec().is_none());
//! ```
//!
//! With the derive macro (from `reflector-macros`):
//!
//! ```ignore
//! #[derive(Reflect)]
//! #[reflect(name = "Player")]
//! pub struct Player {
//!     health: i32,
//! }
//! ```

use crate::{Primitive, PrimitiveCodec, PrimitiveKind, TypeHash};

/// Trait for types with a reflected identity.
///
/// The defaults derive the name from [`std::any::type_name`], which is
/// enough for container types such as `Vec<T>`. Types registered by name
/// should override both methods.
pub trait Reflect: 'static {
    /// Get the type hash for this type.
    fn type_hash() -> TypeHash {
        TypeHash::from_name(Self::type_name())
    }

    /// Get the reflected type name.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Codec for primitive conversions, `None` for object types.
    fn primitive_codec() -> Option<PrimitiveCodec<Self>>
    where
        Self: Sized,
    {
        None
    }
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty => $kind:ident, $view:ident;)*) => {
        $(
            impl Reflect for $ty {
                fn type_hash() -> TypeHash {
                    PrimitiveKind::$kind.type_hash()
                }

                fn type_name() -> &'static str {
                    PrimitiveKind::$kind.name()
                }

                fn primitive_codec() -> Option<PrimitiveCodec<Self>> {
                    Some(PrimitiveCodec::new(
                        PrimitiveKind::$kind,
                        |value: &$ty| Primitive::$kind(*value),
                        |p: Primitive| p.$view(),
                    ))
                }
            }
        )*
    };
}

impl_reflect_primitive! {
    bool => Bool, to_bool;
    i8 => Int8, to_i8;
    i16 => Int16, to_i16;
    i32 => Int32, to_i32;
    i64 => Int64, to_i64;
    u8 => Uint8, to_u8;
    u16 => Uint16, to_u16;
    u32 => Uint32, to_u32;
    u64 => Uint64, to_u64;
    f32 => Float, to_f32;
    f64 => Double, to_f64;
}

impl Reflect for () {
    fn type_hash() -> TypeHash {
        PrimitiveKind::Void.type_hash()
    }

    fn type_name() -> &'static str {
        "void"
    }

    fn primitive_codec() -> Option<PrimitiveCodec<Self>> {
        Some(PrimitiveCodec::new(PrimitiveKind::Void, |_: &()| Primitive::Void, |_: Primitive| ()))
    }
}

impl Reflect for String {
    fn type_hash() -> TypeHash {
        TypeHash::from_name("string")
    }

    fn type_name() -> &'static str {
        "string"
    }
}

impl<T: Reflect> Reflect for Vec<T> {}

impl<T: Reflect> Reflect for Option<T> {}
