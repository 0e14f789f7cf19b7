//! Reflector Core
//!
//! Shared vocabulary for the reflector crates: type identity, primitive
//! values and kinds, member scopes, binding modes, thunk shapes and errors.
//!
//! ## Modules
//!
//! - [`type_hash`]: Deterministic 64-bit identity for types and members
//! - [`reflect`]: The `Reflect` trait and its primitive implementations
//! - [`primitive`]: Primitive kinds, values and codecs
//! - [`data_type`]: Runtime description of a declared or requested type
//! - [`scope`]: `Visibility` and `MemberScope` lookup flags
//! - [`binding`]: `Binding` and shared instances
//! - [`thunk`]: Getter/setter shapes and `ErasedThunk`
//! - [`error`]: `RegistrationError` and `ReflectError`

pub mod binding;
pub mod data_type;
pub mod error;
pub mod member;
pub mod primitive;
pub mod reflect;
pub mod scope;
pub mod thunk;
pub mod type_hash;

pub use binding::{Binding, BindingMode, Shared, shared};
pub use data_type::DataType;
pub use error::{ReflectError, RegistrationError};
pub use member::{MemberKind, ReceiverKind};
pub use primitive::{Primitive, PrimitiveCodec, PrimitiveKind};
pub use reflect::Reflect;
pub use scope::{MemberScope, Visibility};
pub use thunk::{
    BoundGetter, BoundSetter, ErasedThunk, Getter, PrimitiveMethod, PrimitiveMethodMut, Setter,
};
pub use type_hash::{TypeHash, hash_constants};

// Re-exported so generated code can name the lock without a direct dependency.
pub use parking_lot;
