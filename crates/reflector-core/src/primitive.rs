//! Primitive kinds and the erased primitive value used on converting paths.
//!
//! A member whose declared type differs from the requested type is read
//! through a [`Primitive`]: the declared value is encoded, then decoded as
//! the requested type. Both steps are plain `fn` pointers held in a
//! [`PrimitiveCodec`], so the converting path never allocates.

use std::fmt;
use std::marker::PhantomData;

use crate::TypeHash;

/// Built-in numeric and boolean kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Void,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Get the TypeHash for this primitive type.
    pub fn type_hash(self) -> TypeHash {
        TypeHash::from_name(self.name())
    }

    /// Get the name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub const fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8 | PrimitiveKind::Int16 | PrimitiveKind::Int32 | PrimitiveKind::Int64
        )
    }

    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Uint8 | PrimitiveKind::Uint16 | PrimitiveKind::Uint32 | PrimitiveKind::Uint64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::Float | PrimitiveKind::Double)
    }

    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Width in bits, or 0 for `void`.
    pub const fn bits(self) -> u32 {
        match self {
            PrimitiveKind::Void => 0,
            PrimitiveKind::Bool | PrimitiveKind::Int8 | PrimitiveKind::Uint8 => 8,
            PrimitiveKind::Int16 | PrimitiveKind::Uint16 => 16,
            PrimitiveKind::Int32 | PrimitiveKind::Uint32 | PrimitiveKind::Float => 32,
            PrimitiveKind::Int64 | PrimitiveKind::Uint64 | PrimitiveKind::Double => 64,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A primitive value tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Void,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float(f32),
    Double(f64),
}

// Floats go straight to the target so saturation happens at the target width.
macro_rules! int_views {
    ($($name:ident => $ty:ty),* $(,)?) => {
        impl Primitive {
            $(
                pub fn $name(self) -> $ty {
                    match self {
                        Primitive::Float(f) => f as $ty,
                        Primitive::Double(f) => f as $ty,
                        other => other.to_i128() as $ty,
                    }
                }
            )*
        }
    };
}

int_views! {
    to_i8 => i8,
    to_i16 => i16,
    to_i32 => i32,
    to_i64 => i64,
    to_u8 => u8,
    to_u16 => u16,
    to_u32 => u32,
    to_u64 => u64,
}

impl Primitive {
    pub const fn kind(self) -> PrimitiveKind {
        match self {
            Primitive::Void => PrimitiveKind::Void,
            Primitive::Bool(_) => PrimitiveKind::Bool,
            Primitive::Int8(_) => PrimitiveKind::Int8,
            Primitive::Int16(_) => PrimitiveKind::Int16,
            Primitive::Int32(_) => PrimitiveKind::Int32,
            Primitive::Int64(_) => PrimitiveKind::Int64,
            Primitive::Uint8(_) => PrimitiveKind::Uint8,
            Primitive::Uint16(_) => PrimitiveKind::Uint16,
            Primitive::Uint32(_) => PrimitiveKind::Uint32,
            Primitive::Uint64(_) => PrimitiveKind::Uint64,
            Primitive::Float(_) => PrimitiveKind::Float,
            Primitive::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Integer view of the value. Floats saturate toward the i128 range.
    pub fn to_i128(self) -> i128 {
        match self {
            Primitive::Void => 0,
            Primitive::Bool(v) => v as i128,
            Primitive::Int8(v) => v as i128,
            Primitive::Int16(v) => v as i128,
            Primitive::Int32(v) => v as i128,
            Primitive::Int64(v) => v as i128,
            Primitive::Uint8(v) => v as i128,
            Primitive::Uint16(v) => v as i128,
            Primitive::Uint32(v) => v as i128,
            Primitive::Uint64(v) => v as i128,
            Primitive::Float(v) => v as i128,
            Primitive::Double(v) => v as i128,
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Primitive::Float(v) => v as f64,
            Primitive::Double(v) => v,
            other => other.to_i128() as f64,
        }
    }

    pub fn to_f32(self) -> f32 {
        match self {
            Primitive::Float(v) => v,
            Primitive::Double(v) => v as f32,
            other => other.to_i128() as f32,
        }
    }

    pub fn to_bool(self) -> bool {
        match self {
            Primitive::Bool(v) => v,
            Primitive::Float(v) => v != 0.0,
            Primitive::Double(v) => v != 0.0,
            other => other.to_i128() != 0,
        }
    }

    /// Cast to another kind with `as` semantics.
    ///
    /// Integer narrowing truncates, float to integer saturates and NaN
    /// becomes zero. The cast is total; whether a cast is *allowed* is
    /// decided by the conversion rules before any value flows.
    pub fn cast(self, to: PrimitiveKind) -> Primitive {
        match to {
            PrimitiveKind::Void => Primitive::Void,
            PrimitiveKind::Bool => Primitive::Bool(self.to_bool()),
            PrimitiveKind::Int8 => Primitive::Int8(self.to_i8()),
            PrimitiveKind::Int16 => Primitive::Int16(self.to_i16()),
            PrimitiveKind::Int32 => Primitive::Int32(self.to_i32()),
            PrimitiveKind::Int64 => Primitive::Int64(self.to_i64()),
            PrimitiveKind::Uint8 => Primitive::Uint8(self.to_u8()),
            PrimitiveKind::Uint16 => Primitive::Uint16(self.to_u16()),
            PrimitiveKind::Uint32 => Primitive::Uint32(self.to_u32()),
            PrimitiveKind::Uint64 => Primitive::Uint64(self.to_u64()),
            PrimitiveKind::Float => Primitive::Float(self.to_f32()),
            PrimitiveKind::Double => Primitive::Double(self.to_f64()),
        }
    }
}

/// Encoder/decoder pair between a Rust type and [`Primitive`].
pub struct PrimitiveCodec<T> {
    pub kind: PrimitiveKind,
    pub encode: fn(&T) -> Primitive,
    pub decode: fn(Primitive) -> T,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PrimitiveCodec<T> {
    pub const fn new(kind: PrimitiveKind, encode: fn(&T) -> Primitive, decode: fn(Primitive) -> T) -> Self {
        Self {
            kind,
            encode,
            decode,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for PrimitiveCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PrimitiveCodec<T> {}

impl<T> fmt::Debug for PrimitiveCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveCodec").field("kind", &self.kind).finish()
    }
}
